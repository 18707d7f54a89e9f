//! `stockpilot-core` — engine foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! strongly-typed identifiers, the engine error model, and the injectable
//! clock used for deterministic movement windowing and date generation.

pub mod clock;
pub mod error;
pub mod id;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{EngineError, EngineResult};
pub use id::{ItemId, RequestId, UserId};
