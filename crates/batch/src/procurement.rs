//! Procurement-request collaborator boundary.
//!
//! The engine never executes purchases. For `Critical` decisions the batch
//! runner asks this collaborator to create a procurement request; `High`
//! and `Medium` decisions are only surfaced for manual review. The call is
//! independently-failing: an error is recorded on that item's outcome and
//! the rest of the batch proceeds.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use stockpilot_core::{EngineResult, ItemId, RequestId, UserId};
use stockpilot_engine::Priority;

/// Acknowledgement from the procurement collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcurementReceipt {
    pub created: bool,
    pub request_id: Option<RequestId>,
}

/// External service that turns a critical decision into a purchase request.
///
/// Implementations may block or talk to remote systems; the runner treats
/// each call as cancellable and failure-isolated.
#[async_trait]
pub trait ProcurementService: Send + Sync + 'static {
    async fn create_request(
        &self,
        item_id: ItemId,
        quantity: i64,
        priority: Priority,
        initiated_by: UserId,
    ) -> EngineResult<ProcurementReceipt>;
}

/// Collaborator that acknowledges without creating anything. Useful for
/// dry runs and hosts that only want the decision report.
#[derive(Debug, Default, Copy, Clone)]
pub struct NoopProcurement;

#[async_trait]
impl ProcurementService for NoopProcurement {
    async fn create_request(
        &self,
        _item_id: ItemId,
        _quantity: i64,
        _priority: Priority,
        _initiated_by: UserId,
    ) -> EngineResult<ProcurementReceipt> {
        Ok(ProcurementReceipt {
            created: false,
            request_id: None,
        })
    }
}
