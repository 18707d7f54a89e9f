//! Replenishment decisioning.
//!
//! Combines an item's current state with its demand forecast into a
//! should/shouldn't-replenish verdict with priority, quantity, cost, and a
//! human-readable reason naming the triggering condition.
//!
//! Documented downstream contract: only `Critical` decisions auto-trigger a
//! procurement request; `High` and `Medium` are surfaced for manual review.

use serde::{Deserialize, Serialize};

use stockpilot_catalog::InventoryItemSnapshot;
use stockpilot_core::ItemId;

use crate::config::EngineConfig;
use crate::forecast::DemandForecast;

/// Urgency of a replenishment decision.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    Medium,
    High,
    Critical,
}

/// Per-item replenishment verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplenishmentDecision {
    pub item_id: ItemId,
    pub should_replenish: bool,
    pub order_quantity: i64,
    pub priority: Priority,
    /// Names the condition that triggered (or didn't trigger) the decision.
    pub reasoning: String,
    pub estimated_delivery_days: u32,
    pub estimated_cost: f64,
}

/// Decide whether and how urgently an item should be replenished.
///
/// `vendor_lead_time_days` is a collaborator-supplied delivery estimate;
/// the configured default applies when it is absent.
pub fn decide_replenishment(
    item: &InventoryItemSnapshot,
    forecast: &DemandForecast,
    vendor_lead_time_days: Option<u32>,
    cfg: &EngineConfig,
) -> ReplenishmentDecision {
    let should_replenish = item.quantity <= item.reorder_level;
    let order_quantity = forecast.recommended_order_quantity.max(item.reorder_level).max(1);

    let (priority, reasoning) = if item.quantity == 0 {
        (
            Priority::Critical,
            format!("item '{}' is out of stock", item.name),
        )
    } else if item.quantity <= item.minimum_stock {
        (
            Priority::High,
            format!(
                "item '{}' is below minimum stock ({} on hand, minimum {})",
                item.name, item.quantity, item.minimum_stock
            ),
        )
    } else if should_replenish {
        (
            Priority::Medium,
            format!(
                "item '{}' reached its reorder point ({} on hand, reorder level {})",
                item.name, item.quantity, item.reorder_level
            ),
        )
    } else {
        (
            Priority::Medium,
            format!(
                "item '{}' is above its reorder level ({} on hand, reorder level {}); no replenishment required",
                item.name, item.quantity, item.reorder_level
            ),
        )
    };

    ReplenishmentDecision {
        item_id: item.id,
        should_replenish,
        order_quantity,
        priority,
        reasoning,
        estimated_delivery_days: vendor_lead_time_days.unwrap_or(cfg.default_delivery_days),
        estimated_cost: order_quantity as f64 * item.unit_cost,
    }
}
