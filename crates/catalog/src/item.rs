use serde::{Deserialize, Serialize};

use stockpilot_core::{EngineError, EngineResult, ItemId};

/// Hardware category of an inventory item.
///
/// The category feeds the criticality score through a configurable weight
/// table; anything the table does not name falls back to a default weight.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    Server,
    NetworkDevice,
    Laptop,
    Desktop,
    Monitor,
    Peripheral,
    Consumable,
    Other,
}

/// Read-only snapshot of one inventory item at analysis time.
///
/// Owned and mutated by the external catalog service; the engine treats it
/// as an immutable value. `total_value` is derived, not stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItemSnapshot {
    pub id: ItemId,
    pub name: String,
    pub category: ItemCategory,
    /// Units currently on hand.
    pub quantity: i64,
    pub minimum_stock: i64,
    pub maximum_stock: i64,
    /// Stock level at which a replenishment order should be placed.
    pub reorder_level: i64,
    /// Cost per unit in the catalog's currency.
    pub unit_cost: f64,
}

impl InventoryItemSnapshot {
    /// Derived economic value of the on-hand stock.
    pub fn total_value(&self) -> f64 {
        self.unit_cost * self.quantity as f64
    }

    /// Contract check on a caller-supplied snapshot.
    ///
    /// A malformed snapshot aborts that single item's computation, never the
    /// whole batch.
    pub fn validate(&self) -> EngineResult<()> {
        if self.name.trim().is_empty() {
            return Err(EngineError::invalid_input(format!(
                "item {}: name cannot be empty",
                self.id
            )));
        }
        if self.quantity < 0 {
            return Err(EngineError::invalid_input(format!(
                "item {}: quantity cannot be negative (got {})",
                self.id, self.quantity
            )));
        }
        if self.minimum_stock < 0 || self.maximum_stock < 0 || self.reorder_level < 0 {
            return Err(EngineError::invalid_input(format!(
                "item {}: stock thresholds cannot be negative",
                self.id
            )));
        }
        if !self.unit_cost.is_finite() || self.unit_cost < 0.0 {
            return Err(EngineError::invalid_input(format!(
                "item {}: unit cost must be finite and non-negative",
                self.id
            )));
        }
        Ok(())
    }
}
