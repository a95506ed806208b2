//! Result correlator: the host→thread handoff point
//!
//! Each enqueued call owns one oneshot slot keyed by call id. The dispatcher
//! completes it exactly once; completing an unknown or already-resolved id
//! is logged and dropped, never delivered to a later caller. Caller timeout
//! is abandonment only; it never interrupts in-flight host work.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::oneshot;
use tracing::warn;

use crate::call::{CallId, CallResult};
use crate::error::BridgeError;

/// Pending futures keyed by call id
#[derive(Default)]
pub struct ResultCorrelator {
    pending: Mutex<HashMap<CallId, oneshot::Sender<CallResult>>>,
}

impl ResultCorrelator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the pending slot for a call about to be enqueued
    pub fn register(&self, id: CallId) -> oneshot::Receiver<CallResult> {
        let (tx, rx) = oneshot::channel();
        self.pending.lock().insert(id, tx);
        rx
    }

    /// Resolve the matching future exactly once
    ///
    /// Returns false when the result was undeliverable: the id was never
    /// registered, already resolved, or its caller abandoned the wait.
    pub fn complete(&self, result: CallResult) -> bool {
        let id = result.call_id;
        let Some(sender) = self.pending.lock().remove(&id) else {
            warn!(call = %id, "discarding result for unknown or abandoned call");
            return false;
        };
        if sender.send(result).is_err() {
            warn!(call = %id, "caller gone before result delivery");
            return false;
        }
        true
    }

    /// Drop the pending slot after a caller-side timeout
    pub fn abandon(&self, id: CallId) -> bool {
        self.pending.lock().remove(&id).is_some()
    }

    /// Fail every pending future, e.g. with ShuttingDown at teardown
    pub fn fail_all(&self, error: &BridgeError) {
        let drained: Vec<_> = self.pending.lock().drain().collect();
        for (id, sender) in drained {
            let _ = sender.send(CallResult::err(id, error.clone()));
        }
    }

    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Caller-side handle to one in-flight call
pub struct PendingCall {
    id: CallId,
    rx: oneshot::Receiver<CallResult>,
    correlator: Arc<ResultCorrelator>,
    timeout: Duration,
}

impl PendingCall {
    pub(crate) fn new(
        id: CallId,
        rx: oneshot::Receiver<CallResult>,
        correlator: Arc<ResultCorrelator>,
        timeout: Duration,
    ) -> Self {
        Self {
            id,
            rx,
            correlator,
            timeout,
        }
    }

    pub fn id(&self) -> CallId {
        self.id
    }

    /// Block on the result up to the call's timeout budget
    ///
    /// On timeout the pending slot is removed and a Timeout result is
    /// synthesized; a claimed call may still execute, its late result
    /// discarded by the correlator with a warning.
    pub async fn wait(self) -> CallResult {
        let Self {
            id,
            rx,
            correlator,
            timeout,
        } = self;
        match tokio::time::timeout(timeout, rx).await {
            Ok(Ok(result)) => result,
            Ok(Err(_closed)) => CallResult::err(
                id,
                BridgeError::Internal("result channel closed before completion".into()),
            ),
            Err(_elapsed) => {
                correlator.abandon(id);
                warn!(call = %id, "caller abandoned call after {:?}", timeout);
                CallResult::err(id, BridgeError::Timeout)
            }
        }
    }

    /// Wait with an explicit budget instead of the submitted one
    pub async fn wait_for(self, timeout: Duration) -> CallResult {
        Self { timeout, ..self }.wait().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_complete_resolves_waiting_caller() {
        let correlator = Arc::new(ResultCorrelator::new());
        let id = CallId::new();
        let rx = correlator.register(id);
        let pending = PendingCall::new(id, rx, Arc::clone(&correlator), Duration::from_secs(1));

        assert!(correlator.complete(CallResult::ok(id, json!({ "done": true }))));
        let result = pending.wait().await;
        assert!(result.is_ok());
        assert!(correlator.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_completion_is_noop() {
        let correlator = ResultCorrelator::new();
        let id = CallId::new();
        let _rx = correlator.register(id);

        assert!(correlator.complete(CallResult::ok(id, json!(1))));
        assert!(!correlator.complete(CallResult::ok(id, json!(2))));
    }

    #[tokio::test]
    async fn test_timeout_synthesizes_result_and_discards_late_completion() {
        let correlator = Arc::new(ResultCorrelator::new());
        let id = CallId::new();
        let rx = correlator.register(id);
        let pending = PendingCall::new(id, rx, Arc::clone(&correlator), Duration::from_millis(20));

        let result = pending.wait().await;
        assert_eq!(result.outcome.err().map(|e| e.kind().to_string()), Some("timeout".into()));

        // The call completes late; the result must be dropped, not delivered.
        assert!(!correlator.complete(CallResult::ok(id, json!("late"))));
    }

    #[tokio::test]
    async fn test_fail_all_resolves_every_pending_future() {
        let correlator = Arc::new(ResultCorrelator::new());
        let mut pendings = Vec::new();
        for _ in 0..5 {
            let id = CallId::new();
            let rx = correlator.register(id);
            pendings.push(PendingCall::new(
                id,
                rx,
                Arc::clone(&correlator),
                Duration::from_secs(5),
            ));
        }

        correlator.fail_all(&BridgeError::ShuttingDown);
        for pending in pendings {
            let result = pending.wait().await;
            assert_eq!(result.outcome.err(), Some(BridgeError::ShuttingDown));
        }
    }

    #[tokio::test]
    async fn test_completing_unregistered_id_is_noop() {
        let correlator = ResultCorrelator::new();
        assert!(!correlator.complete(CallResult::ok(CallId::new(), json!(null))));
    }
}
