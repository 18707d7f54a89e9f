use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::{Duration, TimeZone, Utc};
use stockpilot_catalog::{InventoryItemSnapshot, ItemCategory, MovementKind, StockMovement};
use stockpilot_core::ItemId;
use stockpilot_engine::{EngineConfig, analyze_usage, forecast_demand};

fn subject() -> InventoryItemSnapshot {
    InventoryItemSnapshot {
        id: ItemId::new(),
        name: "bench item".to_string(),
        category: ItemCategory::Server,
        quantity: 250,
        minimum_stock: 50,
        maximum_stock: 1_000,
        reorder_level: 100,
        unit_cost: 800.0,
    }
}

/// A year of synthetic outbound movements, two per day with varying sizes.
fn year_of_movements(item_id: ItemId) -> Vec<StockMovement> {
    let now = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
    (1..=365i64)
        .flat_map(|d| {
            let at = now - Duration::days(d);
            [
                StockMovement::new(item_id, MovementKind::StockOut, 1 + (d % 7), at).unwrap(),
                StockMovement::new(item_id, MovementKind::StockOut, 1 + (d % 3), at).unwrap(),
            ]
        })
        .collect()
}

fn bench_usage_analysis(c: &mut Criterion) {
    let item = subject();
    let movements = year_of_movements(item.id);
    let now = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();

    let mut group = c.benchmark_group("usage_analysis");
    group.throughput(Throughput::Elements(movements.len() as u64));
    group.bench_function("one_year_history", |b| {
        b.iter(|| analyze_usage(black_box(&movements), None, now))
    });
    group.finish();
}

fn bench_forecast(c: &mut Criterion) {
    let item = subject();
    let movements = year_of_movements(item.id);
    let now = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
    let cfg = EngineConfig::default();

    let mut group = c.benchmark_group("forecast_demand");
    for horizon in [7u32, 30, 90] {
        group.bench_with_input(
            BenchmarkId::from_parameter(horizon),
            &horizon,
            |b, &horizon| {
                b.iter(|| {
                    forecast_demand(
                        black_box(&item),
                        black_box(&movements),
                        horizon,
                        None,
                        now,
                        &cfg,
                    )
                    .unwrap()
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_usage_analysis, bench_forecast);
criterion_main!(benches);
