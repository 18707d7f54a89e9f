use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockpilot_core::{EngineError, EngineResult, ItemId};

/// Kind of a stock movement in the append-only ledger.
///
/// Only `StockOut` movements feed demand analysis; the other kinds are
/// carried so a full ledger slice can be passed through unfiltered.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    StockIn,
    StockOut,
    Adjustment,
    Reservation,
    Transfer,
}

/// One entry in the stock-movement ledger. Immutable, append-only, owned by
/// the catalog/ledger collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockMovement {
    pub item_id: ItemId,
    pub kind: MovementKind,
    /// Units moved; always positive regardless of direction.
    pub quantity: i64,
    pub occurred_at: DateTime<Utc>,
}

impl StockMovement {
    pub fn new(
        item_id: ItemId,
        kind: MovementKind,
        quantity: i64,
        occurred_at: DateTime<Utc>,
    ) -> EngineResult<Self> {
        if quantity <= 0 {
            return Err(EngineError::invalid_input(format!(
                "movement for item {item_id}: quantity must be positive (got {quantity})"
            )));
        }
        Ok(Self {
            item_id,
            kind,
            quantity,
            occurred_at,
        })
    }

    /// Whether this movement represents outbound demand.
    pub fn is_outbound(&self) -> bool {
        self.kind == MovementKind::StockOut
    }
}
