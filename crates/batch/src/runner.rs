//! Batch runner: ABC barrier, then bounded per-item fan-out.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use stockpilot_catalog::{InventoryItemSnapshot, StockMovement};
use stockpilot_core::{Clock, EngineError, EngineResult, ItemId, RequestId, SystemClock, UserId};
use stockpilot_engine::{
    AbcAnalysisResult, DemandForecast, EngineConfig, Priority, ReplenishmentDecision, classify_abc,
    decide_replenishment, forecast_demand,
};

use crate::cancel::CancellationToken;
use crate::procurement::ProcurementService;

/// Batch run parameters.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Maximum items processed concurrently; bounds pressure on whatever
    /// supplies the snapshot.
    pub max_concurrent: usize,
    /// Movement window (calendar months) for ABC classification.
    pub window_months: Option<u32>,
    /// Forecast horizon per item.
    pub horizon_days: u32,
    /// Lead time passed to the forecaster; engine default when `None`.
    pub lead_time_days: Option<u32>,
    /// Actor recorded on procurement requests raised by this run.
    pub initiated_by: UserId,
    /// Name for logging.
    pub name: String,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_concurrent: 4,
            window_months: Some(12),
            horizon_days: 30,
            lead_time_days: None,
            initiated_by: UserId::new(),
            name: "replenishment-batch".to_string(),
        }
    }
}

impl BatchConfig {
    pub fn with_max_concurrent(mut self, max: usize) -> Self {
        self.max_concurrent = max;
        self
    }

    pub fn with_horizon_days(mut self, days: u32) -> Self {
        self.horizon_days = days;
        self
    }

    pub fn with_initiated_by(mut self, user: UserId) -> Self {
        self.initiated_by = user;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// Everything the run produced for one item.
///
/// Independently recorded: a collaborator failure shows up here as
/// `action_taken = false` plus a note, never as a batch abort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemOutcome {
    pub item_id: ItemId,
    pub forecast: Option<DemandForecast>,
    pub decision: Option<ReplenishmentDecision>,
    /// Whether a procurement request was actually created downstream.
    pub action_taken: bool,
    pub request_id: Option<RequestId>,
    /// Collaborator failure note, if the procurement call failed.
    pub note: Option<String>,
    /// Contract violation that aborted this item's computation.
    pub error: Option<String>,
}

impl ItemOutcome {
    fn failed(item_id: ItemId, error: &EngineError) -> Self {
        Self {
            item_id,
            forecast: None,
            decision: None,
            action_taken: false,
            request_id: None,
            note: None,
            error: Some(error.to_string()),
        }
    }
}

/// Run-level counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStats {
    pub items_processed: usize,
    pub items_failed: usize,
    pub items_skipped: usize,
    pub requests_raised: usize,
    pub elapsed_ms: u64,
}

/// Result of one batch run: the classification, per-item outcomes (sorted
/// by item id), and counters. `cancelled` marks a run that stopped early;
/// its outcomes are the partial results already computed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub abc: AbcAnalysisResult,
    pub outcomes: Vec<ItemOutcome>,
    pub stats: BatchStats,
    pub cancelled: bool,
}

/// Orchestrates one full pass over the catalog snapshot.
pub struct BatchRunner<P> {
    engine_config: Arc<EngineConfig>,
    batch_config: BatchConfig,
    clock: Arc<dyn Clock>,
    procurement: Arc<P>,
}

impl<P: ProcurementService> BatchRunner<P> {
    pub fn new(procurement: Arc<P>) -> Self {
        Self {
            engine_config: Arc::new(EngineConfig::default()),
            batch_config: BatchConfig::default(),
            clock: Arc::new(SystemClock),
            procurement,
        }
    }

    pub fn with_engine_config(mut self, config: EngineConfig) -> Self {
        self.engine_config = Arc::new(config);
        self
    }

    pub fn with_batch_config(mut self, config: BatchConfig) -> Self {
        self.batch_config = config;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Classify the catalog, then forecast and decide every item with
    /// bounded concurrency. Completion order between items is
    /// unconstrained; the report is sorted by item id for determinism.
    pub async fn run(
        &self,
        items: Vec<InventoryItemSnapshot>,
        mut movements: HashMap<ItemId, Vec<StockMovement>>,
        cancel: &CancellationToken,
    ) -> BatchReport {
        let started = Instant::now();
        let now = self.clock.now();
        let total = items.len();
        info!(batch = %self.batch_config.name, items = total, "batch run started");

        // Full-batch barrier: tier partitioning needs every item's score.
        let abc = classify_abc(
            &items,
            &movements,
            self.batch_config.window_months,
            now,
            &self.engine_config,
        );

        let semaphore = Arc::new(Semaphore::new(self.batch_config.max_concurrent.max(1)));
        let mut tasks: JoinSet<ItemOutcome> = JoinSet::new();
        let mut stats = BatchStats::default();

        for item in items {
            // Cooperative cancellation point: no new items start once the
            // token flips, but in-flight ones run to completion.
            if cancel.is_cancelled() {
                stats.items_skipped += 1;
                continue;
            }

            let history = movements.remove(&item.id).unwrap_or_default();
            let semaphore = Arc::clone(&semaphore);
            let cancel = cancel.clone();
            let engine_config = Arc::clone(&self.engine_config);
            let procurement = Arc::clone(&self.procurement);
            let horizon_days = self.batch_config.horizon_days;
            let lead_time_days = self.batch_config.lead_time_days;
            let initiated_by = self.batch_config.initiated_by;

            tasks.spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => return ItemOutcome::failed(item.id, &EngineError::Cancelled),
                };
                if cancel.is_cancelled() {
                    return ItemOutcome::failed(item.id, &EngineError::Cancelled);
                }
                process_item(
                    &item,
                    &history,
                    horizon_days,
                    lead_time_days,
                    now,
                    &engine_config,
                    procurement.as_ref(),
                    initiated_by,
                )
                .await
            });
        }

        let mut outcomes = Vec::with_capacity(total);
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    // A panicking task loses its item context; count it and
                    // keep draining the rest.
                    warn!(batch = %self.batch_config.name, error = %e, "item task failed");
                    stats.items_failed += 1;
                }
            }
        }

        outcomes.sort_by_key(|o| o.item_id);

        for outcome in &outcomes {
            if outcome.error.is_some() {
                stats.items_failed += 1;
            } else {
                stats.items_processed += 1;
            }
            if outcome.action_taken {
                stats.requests_raised += 1;
            }
        }
        stats.elapsed_ms = started.elapsed().as_millis() as u64;

        let cancelled = cancel.is_cancelled();
        info!(
            batch = %self.batch_config.name,
            processed = stats.items_processed,
            failed = stats.items_failed,
            skipped = stats.items_skipped,
            requests = stats.requests_raised,
            elapsed_ms = stats.elapsed_ms,
            cancelled,
            "batch run finished"
        );

        BatchReport {
            abc,
            outcomes,
            stats,
            cancelled,
        }
    }
}

#[allow(clippy::too_many_arguments)]
async fn process_item<P: ProcurementService>(
    item: &InventoryItemSnapshot,
    history: &[StockMovement],
    horizon_days: u32,
    lead_time_days: Option<u32>,
    now: chrono::DateTime<chrono::Utc>,
    engine_config: &EngineConfig,
    procurement: &P,
    initiated_by: UserId,
) -> ItemOutcome {
    let computed: EngineResult<(DemandForecast, ReplenishmentDecision)> = (|| {
        item.validate()?;
        let forecast =
            forecast_demand(item, history, horizon_days, lead_time_days, now, engine_config)?;
        let decision = decide_replenishment(item, &forecast, None, engine_config);
        Ok((forecast, decision))
    })();

    let (forecast, decision) = match computed {
        Ok(pair) => pair,
        Err(e) => {
            warn!(item = %item.id, error = %e, "item computation rejected");
            return ItemOutcome::failed(item.id, &e);
        }
    };

    debug!(
        item = %item.id,
        replenish = decision.should_replenish,
        priority = ?decision.priority,
        quantity = decision.order_quantity,
        "decision computed"
    );

    let mut outcome = ItemOutcome {
        item_id: item.id,
        forecast: Some(forecast),
        decision: Some(decision.clone()),
        action_taken: false,
        request_id: None,
        note: None,
        error: None,
    };

    // Only Critical decisions auto-trigger procurement; everything else is
    // surfaced for manual review.
    if decision.should_replenish && decision.priority == Priority::Critical {
        match procurement
            .create_request(item.id, decision.order_quantity, decision.priority, initiated_by)
            .await
        {
            Ok(receipt) => {
                outcome.action_taken = receipt.created;
                outcome.request_id = receipt.request_id;
            }
            Err(e) => {
                warn!(item = %item.id, error = %e, "procurement request failed");
                outcome.note = Some(e.to_string());
            }
        }
    }

    outcome
}
