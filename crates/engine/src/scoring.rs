//! Velocity and criticality scoring.
//!
//! Both scores are pure functions into [0, 1] and feed the ABC composite.

use chrono::{DateTime, Duration, Utc};

use stockpilot_catalog::{InventoryItemSnapshot, StockMovement};

use crate::config::EngineConfig;

/// How frequently an item moves out of stock, normalized to [0, 1].
///
/// Counts stock-out movements in the trailing window (default 90 days) and
/// saturates at one movement per day. No movements → 0.0.
pub fn velocity_score(
    movements: &[StockMovement],
    now: DateTime<Utc>,
    cfg: &EngineConfig,
) -> f64 {
    let window = Duration::days(cfg.velocity_window_days);
    let cutoff = now - window;
    let outbound = movements
        .iter()
        .filter(|m| m.is_outbound() && m.occurred_at >= cutoff && m.occurred_at <= now)
        .count();
    (outbound as f64 / cfg.velocity_window_days as f64).min(1.0)
}

/// How damaging a stock-out of this item would be, normalized to [0, 1].
///
/// Category weight times stock-ratio weight: the scarcer the stock relative
/// to the minimum, the heavier the weight. A zero minimum stock is treated
/// as an ample ratio.
pub fn criticality_score(item: &InventoryItemSnapshot, cfg: &EngineConfig) -> f64 {
    let category_weight = cfg.category_weight(item.category);

    let ratio_weight = if item.minimum_stock <= 0 {
        cfg.weight_ample
    } else {
        let ratio = item.quantity as f64 / item.minimum_stock as f64;
        if ratio < cfg.ratio_scarce {
            cfg.weight_scarce
        } else if ratio < cfg.ratio_low {
            cfg.weight_low
        } else {
            cfg.weight_ample
        }
    };

    (category_weight * ratio_weight).clamp(0.0, 1.0)
}
