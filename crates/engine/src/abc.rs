//! ABC classification of the catalog by economic importance.
//!
//! Items are ranked by a composite of economic value, movement velocity,
//! and criticality, then partitioned into tiers A/B/C. Tier membership
//! drives how much control rigor each item warrants.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockpilot_catalog::{InventoryItemSnapshot, StockMovement};
use stockpilot_core::ItemId;

use crate::config::EngineConfig;
use crate::scoring::{criticality_score, velocity_score};

/// Inventory control tier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AbcTier {
    A,
    B,
    C,
}

impl AbcTier {
    /// Recommended review cadence for items in this tier.
    pub fn review_cadence(&self) -> &'static str {
        match self {
            AbcTier::A => "weekly",
            AbcTier::B => "monthly",
            AbcTier::C => "quarterly",
        }
    }

    /// Recommended control policy for items in this tier.
    pub fn control_policy(&self) -> &'static str {
        match self {
            AbcTier::A => "tight control; vendor-managed-inventory candidate",
            AbcTier::B => "moderate control; automated reorder",
            AbcTier::C => "bulk review; inventory-reduction focus",
        }
    }
}

/// One item's classification outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbcEntry {
    pub item_id: ItemId,
    pub tier: AbcTier,
    pub composite_score: f64,
    pub total_value: f64,
    pub velocity_score: f64,
    pub criticality_score: f64,
}

/// Aggregate view of one tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierSummary {
    pub tier: AbcTier,
    pub item_count: usize,
    pub total_value: f64,
    pub review_cadence: String,
    pub control_policy: String,
}

/// Full classification result: entries sorted by composite score
/// descending, plus per-tier aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbcAnalysisResult {
    pub entries: Vec<AbcEntry>,
    pub summaries: Vec<TierSummary>,
}

impl AbcAnalysisResult {
    pub fn tier_of(&self, item_id: ItemId) -> Option<AbcTier> {
        self.entries.iter().find(|e| e.item_id == item_id).map(|e| e.tier)
    }
}

/// Classify the whole catalog into tiers A/B/C.
///
/// Composite score = total value × velocity × criticality. Sorting is
/// stable with an item-id tiebreak so equal scores classify
/// deterministically. The top ceil(20%) of items land in A (at least one
/// when any items exist), the next ceil(30%) in B, the remainder in C.
/// Empty input yields an empty, valid result.
pub fn classify_abc(
    items: &[InventoryItemSnapshot],
    movements: &HashMap<ItemId, Vec<StockMovement>>,
    window_months: Option<u32>,
    now: DateTime<Utc>,
    cfg: &EngineConfig,
) -> AbcAnalysisResult {
    let empty: Vec<StockMovement> = Vec::new();
    let cutoff = window_months
        .map(|m| now.checked_sub_months(chrono::Months::new(m)).unwrap_or(now));

    let mut entries: Vec<AbcEntry> = items
        .iter()
        .map(|item| {
            let history = movements.get(&item.id).unwrap_or(&empty);
            let windowed: Vec<StockMovement> = match cutoff {
                Some(cutoff) => history
                    .iter()
                    .filter(|m| m.occurred_at >= cutoff)
                    .cloned()
                    .collect(),
                None => history.clone(),
            };
            let velocity = velocity_score(&windowed, now, cfg);
            let criticality = criticality_score(item, cfg);
            let total_value = item.total_value();
            AbcEntry {
                item_id: item.id,
                tier: AbcTier::C,
                composite_score: total_value * velocity * criticality,
                total_value,
                velocity_score: velocity,
                criticality_score: criticality,
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.composite_score
            .total_cmp(&a.composite_score)
            .then_with(|| a.item_id.cmp(&b.item_id))
    });

    let n = entries.len();
    let a_count = ((cfg.tier_a_fraction * n as f64).ceil() as usize).min(n);
    let b_count = ((cfg.tier_b_fraction * n as f64).ceil() as usize).min(n - a_count);

    for (rank, entry) in entries.iter_mut().enumerate() {
        entry.tier = if rank < a_count {
            AbcTier::A
        } else if rank < a_count + b_count {
            AbcTier::B
        } else {
            AbcTier::C
        };
    }

    let summaries = [AbcTier::A, AbcTier::B, AbcTier::C]
        .into_iter()
        .map(|tier| {
            let in_tier = entries.iter().filter(|e| e.tier == tier);
            TierSummary {
                tier,
                item_count: in_tier.clone().count(),
                total_value: in_tier.map(|e| e.total_value).sum(),
                review_cadence: tier.review_cadence().to_string(),
                control_policy: tier.control_policy().to_string(),
            }
        })
        .collect();

    AbcAnalysisResult { entries, summaries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;
    use stockpilot_catalog::{ItemCategory, MovementKind};
    use uuid::Uuid;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap()
    }

    /// Deterministic item id so tie-breaking is reproducible.
    fn nth_id(n: u128) -> ItemId {
        ItemId::from_uuid(Uuid::from_u128(n))
    }

    fn item(id: ItemId, quantity: i64, unit_cost: f64) -> InventoryItemSnapshot {
        InventoryItemSnapshot {
            id,
            name: format!("item {id}"),
            category: ItemCategory::Server,
            quantity,
            minimum_stock: 100,
            maximum_stock: 1_000,
            reorder_level: 50,
            unit_cost,
        }
    }

    fn steady_outbound(id: ItemId, movements_count: usize) -> Vec<StockMovement> {
        (0..movements_count)
            .map(|i| {
                StockMovement::new(
                    id,
                    MovementKind::StockOut,
                    1,
                    now() - chrono::Duration::days((i % 80) as i64),
                )
                .unwrap()
            })
            .collect()
    }

    #[test]
    fn empty_catalog_classifies_to_an_empty_result() {
        let result = classify_abc(&[], &HashMap::new(), None, now(), &EngineConfig::default());
        assert!(result.entries.is_empty());
        for summary in &result.summaries {
            assert_eq!(summary.item_count, 0);
            assert_eq!(summary.total_value, 0.0);
        }
    }

    #[test]
    fn single_item_lands_in_tier_a() {
        let id = nth_id(1);
        let items = vec![item(id, 10, 5.0)];
        let movements = HashMap::from([(id, steady_outbound(id, 10))]);
        let result = classify_abc(&items, &movements, None, now(), &EngineConfig::default());
        assert_eq!(result.tier_of(id), Some(AbcTier::A));
    }

    #[test]
    fn ten_distinct_items_put_exactly_two_in_tier_a() {
        let cfg = EngineConfig::default();
        let mut items = Vec::new();
        let mut movements = HashMap::new();
        for n in 0..10u128 {
            let id = nth_id(n + 1);
            // Distinct composites: value grows with n, same velocity and criticality.
            items.push(item(id, 10 + n as i64, 100.0));
            movements.insert(id, steady_outbound(id, 20));
        }
        let result = classify_abc(&items, &movements, None, now(), &cfg);

        let a_count = result.entries.iter().filter(|e| e.tier == AbcTier::A).count();
        let b_count = result.entries.iter().filter(|e| e.tier == AbcTier::B).count();
        let c_count = result.entries.iter().filter(|e| e.tier == AbcTier::C).count();
        assert_eq!(a_count, 2);
        assert_eq!(b_count, 3);
        assert_eq!(c_count, 5);

        // The two highest-value items are the ones in A.
        assert_eq!(result.entries[0].item_id, nth_id(10));
        assert_eq!(result.entries[1].item_id, nth_id(9));
    }

    #[test]
    fn equal_scores_break_ties_by_item_id() {
        let cfg = EngineConfig::default();
        let ids = [nth_id(3), nth_id(1), nth_id(2)];
        let items: Vec<_> = ids.iter().map(|id| item(*id, 10, 5.0)).collect();
        let movements: HashMap<_, _> =
            ids.iter().map(|id| (*id, steady_outbound(*id, 10))).collect();
        let result = classify_abc(&items, &movements, None, now(), &cfg);
        let order: Vec<_> = result.entries.iter().map(|e| e.item_id).collect();
        assert_eq!(order, vec![nth_id(1), nth_id(2), nth_id(3)]);
    }

    #[test]
    fn items_with_no_movements_score_zero_composite() {
        let id = nth_id(7);
        let items = vec![item(id, 10, 500.0)];
        let result =
            classify_abc(&items, &HashMap::new(), None, now(), &EngineConfig::default());
        assert_eq!(result.entries[0].composite_score, 0.0);
        // Still tier A: it is the only item.
        assert_eq!(result.entries[0].tier, AbcTier::A);
    }

    proptest! {
        #[test]
        fn partition_is_exact_and_score_ordered(item_count in 0usize..60) {
            let cfg = EngineConfig::default();
            let mut items = Vec::new();
            let mut movements = HashMap::new();
            for n in 0..item_count {
                let id = nth_id(n as u128 + 1);
                items.push(item(id, (n as i64 % 17) + 1, (n as f64 * 3.7) + 0.5));
                movements.insert(id, steady_outbound(id, n % 25));
            }
            let result = classify_abc(&items, &movements, None, now(), &cfg);

            prop_assert_eq!(result.entries.len(), item_count);
            let counts: usize = result.summaries.iter().map(|s| s.item_count).sum();
            prop_assert_eq!(counts, item_count);

            // Entries are score-ordered, so every A entry outranks every B entry
            // and every B entry outranks every C entry.
            for pair in result.entries.windows(2) {
                prop_assert!(pair[0].composite_score >= pair[1].composite_score);
                prop_assert!(pair[0].tier <= pair[1].tier);
            }
            if item_count >= 1 {
                prop_assert_eq!(result.entries[0].tier, AbcTier::A);
            }
        }
    }
}
