//! `stockpilot-catalog` — immutable inputs the engine consumes.
//!
//! **Responsibility:** value types for the read-only item/movement snapshot.
//!
//! The catalog service that owns persistence of items and movements is an
//! external collaborator; this crate only describes the shape of the data it
//! hands the engine. Nothing here is mutated by the engine.

pub mod item;
pub mod movement;

pub use item::{InventoryItemSnapshot, ItemCategory};
pub use movement::{MovementKind, StockMovement};
