//! Tunable engine parameters.
//!
//! Every heuristic constant the scoring, classification, and forecasting
//! formulas use lives here rather than inline. The defaults mirror the
//! values the business has historically run with, but they are illustrative
//! heuristics, not validated parameters; hosts are expected to tune them.

use serde::{Deserialize, Serialize};

use stockpilot_catalog::ItemCategory;

/// Parameter set for the whole engine. Cheap to clone; share one per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Trailing window (days) over which stock-out movements count toward
    /// the velocity score. The score saturates at one movement per day.
    pub velocity_window_days: i64,

    /// Stock-ratio banding for the criticality score: ratios below
    /// `ratio_scarce` weigh `weight_scarce`, below `ratio_low` weigh
    /// `weight_low`, everything else `weight_ample`.
    pub ratio_scarce: f64,
    pub ratio_low: f64,
    pub weight_scarce: f64,
    pub weight_low: f64,
    pub weight_ample: f64,

    /// Category criticality weights; categories without an entry fall back
    /// to `default_category_weight`.
    pub category_weights: Vec<(ItemCategory, f64)>,
    pub default_category_weight: f64,

    /// Fraction of items (by composite-score rank) assigned to tiers A and B.
    pub tier_a_fraction: f64,
    pub tier_b_fraction: f64,

    /// z-score for the target service level (default 95% → 1.645).
    pub service_level_z: f64,
    /// Fixed cost per order, in the catalog's currency.
    pub ordering_cost: f64,
    /// Annual holding cost as a fraction of unit cost.
    pub holding_cost_rate: f64,

    /// Reorder point used when an item has no usage history at all.
    pub fallback_reorder_point: i64,
    /// Order quantity used when both the EOQ inputs and the item's own
    /// reorder level are degenerate.
    pub fallback_order_quantity: i64,

    /// Sample-count boundaries for the tiered confidence heuristic.
    pub confidence_low_samples: usize,
    pub confidence_medium_samples: usize,
    pub confidence_low: f64,
    pub confidence_medium: f64,
    pub confidence_high: f64,

    /// A seasonal factor deviating from 1.0 by more than this flags
    /// seasonality.
    pub seasonality_threshold: f64,
    /// Fixed fractional confidence band around each day's forecast.
    pub confidence_band: f64,

    /// Projected-stock thresholds for risk banding: at or below zero is
    /// Critical, below `risk_high_stock` High, below `risk_medium_stock`
    /// Medium, otherwise Low.
    pub risk_high_stock: f64,
    pub risk_medium_stock: f64,

    /// Lead time assumed when the caller supplies none.
    pub default_lead_time_days: u32,
    /// Delivery estimate used when no vendor-specific lead time is known.
    pub default_delivery_days: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            velocity_window_days: 90,
            ratio_scarce: 0.5,
            ratio_low: 1.0,
            weight_scarce: 1.0,
            weight_low: 0.8,
            weight_ample: 0.5,
            category_weights: vec![
                (ItemCategory::Server, 1.0),
                (ItemCategory::NetworkDevice, 0.9),
                (ItemCategory::Laptop, 0.8),
                (ItemCategory::Desktop, 0.7),
            ],
            default_category_weight: 0.5,
            tier_a_fraction: 0.2,
            tier_b_fraction: 0.3,
            service_level_z: 1.645,
            ordering_cost: 50.0,
            holding_cost_rate: 0.25,
            fallback_reorder_point: 10,
            fallback_order_quantity: 10,
            confidence_low_samples: 10,
            confidence_medium_samples: 30,
            confidence_low: 0.3,
            confidence_medium: 0.6,
            confidence_high: 0.85,
            seasonality_threshold: 0.1,
            confidence_band: 0.2,
            risk_high_stock: 5.0,
            risk_medium_stock: 10.0,
            default_lead_time_days: 7,
            default_delivery_days: 7,
        }
    }
}

impl EngineConfig {
    pub fn with_service_level_z(mut self, z: f64) -> Self {
        self.service_level_z = z;
        self
    }

    pub fn with_ordering_cost(mut self, cost: f64) -> Self {
        self.ordering_cost = cost;
        self
    }

    pub fn with_holding_cost_rate(mut self, rate: f64) -> Self {
        self.holding_cost_rate = rate;
        self
    }

    pub fn with_default_lead_time_days(mut self, days: u32) -> Self {
        self.default_lead_time_days = days;
        self
    }

    pub fn with_category_weight(mut self, category: ItemCategory, weight: f64) -> Self {
        if let Some(entry) = self.category_weights.iter_mut().find(|(c, _)| *c == category) {
            entry.1 = weight;
        } else {
            self.category_weights.push((category, weight));
        }
        self
    }

    /// Criticality weight for an item category.
    pub fn category_weight(&self, category: ItemCategory) -> f64 {
        self.category_weights
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, w)| *w)
            .unwrap_or(self.default_category_weight)
    }
}
