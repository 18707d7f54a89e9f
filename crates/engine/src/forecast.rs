//! Demand forecasting: reorder point, order quantity, and a day-by-day
//! projected-stock series with risk banding.
//!
//! Every numeric edge case (empty history, zero variance, zero cost) must
//! degrade to a documented fallback rather than propagate NaN, infinity,
//! or a negative value.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use stockpilot_catalog::{InventoryItemSnapshot, StockMovement};
use stockpilot_core::{EngineError, EngineResult, ItemId};

use crate::config::EngineConfig;
use crate::usage::{UsagePattern, analyze_usage};

/// Stock-out risk band for one projected day.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

/// One day of the forward projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub forecasted_demand: f64,
    /// Fixed fractional band around the forecast, not a statistical CI.
    pub confidence_interval: f64,
    /// Running stock projection, floored at zero.
    pub projected_stock: f64,
    pub seasonal_factor: f64,
    pub risk_level: RiskLevel,
}

/// Forecast output for a single item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandForecast {
    pub item_id: ItemId,
    pub average_daily_demand: f64,
    pub peak_daily_demand: f64,
    pub min_daily_demand: f64,
    /// Coarse movement-count-tiered heuristic in [0, 1]; deliberately not a
    /// statistical confidence interval.
    pub confidence_level: f64,
    pub seasonality_detected: bool,
    pub recommended_reorder_point: i64,
    pub recommended_order_quantity: i64,
    pub daily_forecast: Vec<DailyForecast>,
}

/// Forecast demand for one item over `horizon_days`.
///
/// The usage pattern is recomputed from the supplied movements on every
/// call; the function holds no state and is idempotent for identical
/// inputs. `lead_time_days` defaults to the configured lead time when
/// `None`.
pub fn forecast_demand(
    item: &InventoryItemSnapshot,
    movements: &[StockMovement],
    horizon_days: u32,
    lead_time_days: Option<u32>,
    now: DateTime<Utc>,
    cfg: &EngineConfig,
) -> EngineResult<DemandForecast> {
    if horizon_days == 0 {
        return Err(EngineError::invalid_input(format!(
            "item {}: forecast horizon must be positive",
            item.id
        )));
    }
    let lead_time = lead_time_days.unwrap_or(cfg.default_lead_time_days);
    if lead_time == 0 {
        return Err(EngineError::invalid_input(format!(
            "item {}: lead time must be positive",
            item.id
        )));
    }
    item.validate()?;

    let pattern = analyze_usage(movements, None, now);
    let daily: Vec<f64> = pattern.daily_usage.iter().map(|(_, q)| *q).collect();

    let average = mean(&daily);
    let peak = daily.iter().copied().fold(0.0f64, f64::max);
    let min = if daily.is_empty() {
        0.0
    } else {
        daily.iter().copied().fold(f64::INFINITY, f64::min)
    };

    let outbound_count = movements.iter().filter(|m| m.is_outbound()).count();
    let confidence_level = if outbound_count < cfg.confidence_low_samples {
        cfg.confidence_low
    } else if outbound_count < cfg.confidence_medium_samples {
        cfg.confidence_medium
    } else {
        cfg.confidence_high
    };

    let std_dev = stddev_population(&daily, average);
    let safety_stock = cfg.service_level_z * std_dev * (lead_time as f64).sqrt();

    let recommended_reorder_point = if daily.is_empty() {
        cfg.fallback_reorder_point
    } else {
        ((average * lead_time as f64 + safety_stock).ceil() as i64).max(1)
    };

    let recommended_order_quantity = economic_order_quantity(item, average, cfg);

    let seasonality_detected = pattern
        .seasonal_factor
        .iter()
        .any(|f| (f - 1.0).abs() > cfg.seasonality_threshold);

    let daily_forecast =
        project_daily(item, &pattern, average, horizon_days, now, cfg);

    Ok(DemandForecast {
        item_id: item.id,
        average_daily_demand: average,
        peak_daily_demand: peak,
        min_daily_demand: min,
        confidence_level,
        seasonality_detected,
        recommended_reorder_point,
        recommended_order_quantity,
        daily_forecast,
    })
}

/// EOQ with degenerate-input fallbacks.
///
/// sqrt(2 · annual demand · ordering cost / holding cost); when demand or
/// holding cost is non-positive the item's own reorder level stands in, or
/// the configured fallback when that is zero too.
fn economic_order_quantity(
    item: &InventoryItemSnapshot,
    average_daily_demand: f64,
    cfg: &EngineConfig,
) -> i64 {
    let holding_cost = item.unit_cost * cfg.holding_cost_rate;
    if average_daily_demand <= 0.0 || holding_cost <= 0.0 {
        return if item.reorder_level > 0 {
            item.reorder_level
        } else {
            cfg.fallback_order_quantity
        };
    }
    let annual_demand = average_daily_demand * 365.0;
    let eoq = (2.0 * annual_demand * cfg.ordering_cost / holding_cost).sqrt();
    if eoq.is_finite() {
        (eoq.ceil() as i64).max(1)
    } else {
        cfg.fallback_order_quantity
    }
}

fn project_daily(
    item: &InventoryItemSnapshot,
    pattern: &UsagePattern,
    average_daily_demand: f64,
    horizon_days: u32,
    now: DateTime<Utc>,
    cfg: &EngineConfig,
) -> Vec<DailyForecast> {
    let weekday_mean = mean(&pattern.weekday_factor);
    let month_mean = mean(&pattern.month_factor);

    let mut projected_stock = (item.quantity.max(0)) as f64;
    let mut series = Vec::with_capacity(horizon_days as usize);

    for offset in 1..=i64::from(horizon_days) {
        let date = (now + Duration::days(offset)).date_naive();

        let weekday = date.weekday().num_days_from_monday() as usize;
        let month = date.month0() as usize;
        let quarter = month / 3;

        let weekday_factor = normalized(pattern.weekday_factor[weekday], weekday_mean);
        let month_factor = normalized(pattern.month_factor[month], month_mean);
        let seasonal_factor = guard_factor(pattern.seasonal_factor[quarter]);

        let mut demand = average_daily_demand * weekday_factor * month_factor * seasonal_factor;
        if !demand.is_finite() || demand < 0.0 {
            demand = average_daily_demand;
        }

        projected_stock = (projected_stock - demand).max(0.0);

        let risk_level = if projected_stock <= 0.0 {
            RiskLevel::Critical
        } else if projected_stock < cfg.risk_high_stock {
            RiskLevel::High
        } else if projected_stock < cfg.risk_medium_stock {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        };

        series.push(DailyForecast {
            date,
            forecasted_demand: demand,
            confidence_interval: demand * cfg.confidence_band,
            projected_stock,
            seasonal_factor,
            risk_level,
        });
    }

    series
}

/// Factor divided by its series mean; 1.0 whenever that would be undefined.
fn normalized(factor: f64, series_mean: f64) -> f64 {
    if series_mean <= 0.0 {
        return 1.0;
    }
    let normalized = factor / series_mean;
    if normalized.is_finite() && normalized > 0.0 {
        normalized
    } else {
        1.0
    }
}

fn guard_factor(factor: f64) -> f64 {
    if factor.is_finite() && factor > 0.0 { factor } else { 1.0 }
}

fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Population standard deviation (n), deterministic.
fn stddev_population(xs: &[f64], mean: f64) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    let var = xs
        .iter()
        .map(|x| {
            let d = x - mean;
            d * d
        })
        .sum::<f64>()
        / xs.len() as f64;
    var.sqrt()
}
