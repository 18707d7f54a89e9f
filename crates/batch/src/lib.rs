//! `stockpilot-batch`
//!
//! **Responsibility:** the offline/periodic batch runner around the pure
//! engine.
//!
//! Per-item computation has no cross-item dependency, so the runner fans
//! items out in parallel under a configurable concurrency bound. ABC
//! classification needs every item's score before partitioning, so it runs
//! once up front as a full-batch barrier.
//!
//! Partial-failure semantics: each item's outcome is recorded
//! independently. One item's invalid snapshot or failed procurement call
//! never aborts the others, and a cancelled run reports whatever was
//! already computed.

pub mod cancel;
pub mod procurement;
pub mod runner;

pub use cancel::CancellationToken;
pub use procurement::{NoopProcurement, ProcurementReceipt, ProcurementService};
pub use runner::{BatchConfig, BatchReport, BatchRunner, BatchStats, ItemOutcome};
