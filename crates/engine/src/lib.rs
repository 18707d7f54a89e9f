//! `stockpilot-engine`
//!
//! **Responsibility:** the pure computational core of demand forecasting and
//! replenishment decisioning.
//!
//! This crate is intentionally free of infrastructure concerns:
//! - It performs no I/O; callers supply an in-memory item/movement snapshot.
//! - It never mutates its inputs; every function is deterministic given the
//!   same snapshot, clock instant, and configuration.
//! - It emits derived values (patterns, scores, forecasts, decisions) that a
//!   higher layer persists or acts upon.
//!
//! Data flows one way: raw movement history → patterns/scores →
//! forecast/classification → decision.

pub mod abc;
pub mod config;
pub mod forecast;
pub mod replenish;
pub mod scoring;
pub mod usage;

pub use abc::{AbcAnalysisResult, AbcEntry, AbcTier, TierSummary, classify_abc};
pub use config::EngineConfig;
pub use forecast::{DailyForecast, DemandForecast, RiskLevel, forecast_demand};
pub use replenish::{Priority, ReplenishmentDecision, decide_replenishment};
pub use scoring::{criticality_score, velocity_score};
pub use usage::{UsagePattern, analyze_usage};
