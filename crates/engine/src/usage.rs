//! Usage pattern analysis over outbound stock movements.
//!
//! Converts one item's movement ledger into daily, weekday, monthly, and
//! quarterly-seasonal usage series. Patterns are recomputed on every
//! forecast call and never persisted; the engine holds no state between
//! invocations.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use stockpilot_catalog::StockMovement;

/// Derived usage series for a single item.
///
/// `weekday_factor` and `month_factor` hold raw means (units moved per day
/// falling on that weekday/month); the forecaster normalizes them against
/// their own series mean. `seasonal_factor` is already normalized so the
/// overall mean is 1.0, with 1.0 substituted for empty quarters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsagePattern {
    /// Units moved out per calendar day, ordered by date ascending.
    pub daily_usage: Vec<(NaiveDate, f64)>,
    /// Mean daily outbound quantity by weekday (Monday = index 0).
    pub weekday_factor: [f64; 7],
    /// Mean daily outbound quantity by calendar month (January = index 0).
    pub month_factor: [f64; 12],
    /// Quarterly mean relative to the overall mean (Q1 = index 0).
    pub seasonal_factor: [f64; 4],
}

impl UsagePattern {
    /// Pattern of an item with no outbound history.
    pub fn empty() -> Self {
        Self {
            daily_usage: Vec::new(),
            weekday_factor: [0.0; 7],
            month_factor: [0.0; 12],
            seasonal_factor: [1.0; 4],
        }
    }

    /// Mean units moved per active day; 0.0 with no history.
    pub fn average_daily_usage(&self) -> f64 {
        if self.daily_usage.is_empty() {
            return 0.0;
        }
        self.daily_usage.iter().map(|(_, q)| q).sum::<f64>() / self.daily_usage.len() as f64
    }
}

/// Derive the usage pattern for one item's movements.
///
/// Only `StockOut` movements are considered. When `window_months` is set,
/// movements older than that many calendar months before `now` are ignored.
/// Deterministic given the same inputs; no side effects.
pub fn analyze_usage(
    movements: &[StockMovement],
    window_months: Option<u32>,
    now: DateTime<Utc>,
) -> UsagePattern {
    let cutoff = window_months.map(|m| now.checked_sub_months(Months::new(m)).unwrap_or(now));

    let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for movement in movements {
        if !movement.is_outbound() {
            continue;
        }
        if let Some(cutoff) = cutoff {
            if movement.occurred_at < cutoff {
                continue;
            }
        }
        *by_date.entry(movement.occurred_at.date_naive()).or_insert(0.0) +=
            movement.quantity as f64;
    }

    if by_date.is_empty() {
        return UsagePattern::empty();
    }

    let daily_usage: Vec<(NaiveDate, f64)> = by_date.into_iter().collect();

    let mut weekday_sum = [0.0f64; 7];
    let mut weekday_days = [0usize; 7];
    let mut month_sum = [0.0f64; 12];
    let mut month_days = [0usize; 12];
    let mut quarter_sum = [0.0f64; 4];
    let mut quarter_days = [0usize; 4];

    for (date, quantity) in &daily_usage {
        let wd = date.weekday().num_days_from_monday() as usize;
        weekday_sum[wd] += quantity;
        weekday_days[wd] += 1;

        let month = date.month0() as usize;
        month_sum[month] += quantity;
        month_days[month] += 1;

        let quarter = month / 3;
        quarter_sum[quarter] += quantity;
        quarter_days[quarter] += 1;
    }

    let mut weekday_factor = [0.0f64; 7];
    for d in 0..7 {
        if weekday_days[d] > 0 {
            weekday_factor[d] = weekday_sum[d] / weekday_days[d] as f64;
        }
    }

    let mut month_factor = [0.0f64; 12];
    for m in 0..12 {
        if month_days[m] > 0 {
            month_factor[m] = month_sum[m] / month_days[m] as f64;
        }
    }

    let overall_mean =
        daily_usage.iter().map(|(_, q)| q).sum::<f64>() / daily_usage.len() as f64;

    let mut seasonal_factor = [1.0f64; 4];
    for q in 0..4 {
        if quarter_days[q] > 0 && overall_mean > 0.0 {
            let factor = (quarter_sum[q] / quarter_days[q] as f64) / overall_mean;
            if factor.is_finite() {
                seasonal_factor[q] = factor;
            }
        }
    }

    UsagePattern {
        daily_usage,
        weekday_factor,
        month_factor,
        seasonal_factor,
    }
}
