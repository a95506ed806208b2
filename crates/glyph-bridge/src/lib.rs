//! Glyph Bridge - command dispatch across the host-thread boundary
//!
//! An external agent submits tool calls at arbitrary times; the host
//! application can only be mutated from its own main-loop tick. This crate
//! reconciles the two:
//!
//! - [`Registry`] validates calls against declared parameter schemas
//! - [`ExecutionQueue`] hands validated calls from the transport thread to
//!   the host thread without blocking either
//! - [`Dispatcher`] drains a bounded batch once per host tick and executes
//!   adapters inside a failure boundary
//! - [`ResultCorrelator`] resolves each caller's pending future exactly once
//!
//! ## Flow
//!
//! ```text
//! listener -> registry (validate) -> queue -> dispatcher (host tick)
//!          <----------- correlator (oneshot per call) <-----------
//! ```
//!
//! A [`Bridge`] instance owns the moving parts and is explicitly
//! constructed and torn down; tests build as many isolated instances as
//! they need.

pub mod call;
pub mod correlator;
pub mod dispatcher;
pub mod envelope;
pub mod error;
pub mod queue;
pub mod registry;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde_json::{Map, Value};

pub use call::{CallId, CallResult, ValidatedCall};
pub use correlator::{PendingCall, ResultCorrelator};
pub use dispatcher::Dispatcher;
pub use envelope::{ErrorBody, RequestEnvelope, ResponseEnvelope, ResponseStatus};
pub use error::{AdapterError, BridgeError};
pub use queue::ExecutionQueue;
pub use registry::{Operation, ParamKind, ParamSpec, Params, Registry};

/// Tunables for one bridge instance
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Backpressure bound; enqueue beyond this fails with QueueFull
    pub queue_capacity: usize,
    /// Calls executed per host tick at most
    pub batch_size: usize,
    /// Caller wait budget when the request names none
    pub default_timeout: Duration,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 256,
            batch_size: 10,
            default_timeout: Duration::from_secs(60),
        }
    }
}

/// One bridge instance: registry + queue + correlator under one lifecycle
///
/// `H` is the host document type. The bridge itself never touches it; the
/// only path to `&mut H` is the [`Dispatcher`] handed to the host loop.
pub struct Bridge<H> {
    registry: Arc<Registry<H>>,
    queue: Arc<ExecutionQueue<H>>,
    correlator: Arc<ResultCorrelator>,
    config: BridgeConfig,
    shutting_down: AtomicBool,
}

impl<H> Bridge<H> {
    pub fn new(registry: Registry<H>, config: BridgeConfig) -> Self {
        Self {
            registry: Arc::new(registry),
            queue: Arc::new(ExecutionQueue::new(config.queue_capacity)),
            correlator: Arc::new(ResultCorrelator::new()),
            config,
            shutting_down: AtomicBool::new(false),
        }
    }

    pub fn registry(&self) -> &Registry<H> {
        &self.registry
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// The sole adapter-invoking handle; give it to the host loop at startup
    pub fn dispatcher(&self) -> Dispatcher<H> {
        Dispatcher::new(
            Arc::clone(&self.queue),
            Arc::clone(&self.correlator),
            self.config.batch_size,
        )
    }

    /// Validate and enqueue a call with the default wait budget
    pub fn submit(
        &self,
        operation: &str,
        params: Map<String, Value>,
    ) -> Result<PendingCall, BridgeError> {
        self.submit_with_timeout(operation, params, None)
    }

    /// Validate and enqueue a call
    ///
    /// Validation errors and backpressure rejections return immediately;
    /// nothing enters the queue for them.
    pub fn submit_with_timeout(
        &self,
        operation: &str,
        params: Map<String, Value>,
        timeout: Option<Duration>,
    ) -> Result<PendingCall, BridgeError> {
        if self.shutting_down.load(Ordering::Acquire) {
            return Err(BridgeError::ShuttingDown);
        }

        let call = self.registry.resolve(operation, params, timeout)?;
        let id = call.id;
        let wait_budget = call.timeout.unwrap_or(self.config.default_timeout);

        let rx = self.correlator.register(id);
        if let Err(err) = self.queue.enqueue(call) {
            self.correlator.abandon(id);
            return Err(err);
        }

        Ok(PendingCall::new(
            id,
            rx,
            Arc::clone(&self.correlator),
            wait_budget,
        ))
    }

    /// Submit and wait: the synchronous-caller convenience path
    pub async fn call(
        &self,
        operation: &str,
        params: Map<String, Value>,
    ) -> Result<CallResult, BridgeError> {
        let pending = self.submit(operation, params)?;
        Ok(pending.wait().await)
    }

    /// Best-effort cancellation; only effective before the dispatcher
    /// claims the call.
    pub fn cancel(&self, id: CallId) -> bool {
        if self.queue.cancel(id).is_some() {
            self.correlator
                .complete(CallResult::err(id, BridgeError::Cancelled));
            true
        } else {
            false
        }
    }

    /// Stop accepting calls and fail everything still pending
    ///
    /// Queued-but-unclaimed calls and in-flight futures both resolve with
    /// ShuttingDown, so no caller blocks past teardown.
    pub fn shutdown(&self) {
        self.shutting_down.store(true, Ordering::Release);
        for entry in self.queue.close() {
            self.correlator.complete(CallResult::err(
                entry.call.id,
                BridgeError::ShuttingDown,
            ));
        }
        self.correlator.fail_all(&BridgeError::ShuttingDown);
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutting_down.load(Ordering::Acquire)
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn pending_len(&self) -> usize {
        self.correlator.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Minimal host: a log of executed operation payloads
    #[derive(Default)]
    struct TestHost {
        log: Vec<String>,
    }

    fn test_registry() -> Registry<TestHost> {
        let mut reg = Registry::new();
        reg.register(
            Operation::new("record", |host: &mut TestHost, params: &Params| {
                let text = params.require_str("text")?.to_string();
                host.log.push(text.clone());
                Ok(json!({ "recorded": text, "total": host.log.len() }))
            })
            .param(ParamSpec::required("text", ParamKind::Str)),
        );
        reg.register(Operation::new("explode", |_: &mut TestHost, _: &Params| {
            panic!("adapter blew up");
        }));
        reg.register(Operation::new("refuse", |_: &mut TestHost, _: &Params| {
            Err(AdapterError::new("object_not_found", "no such object"))
        }));
        reg
    }

    fn params(text: &str) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("text".into(), json!(text));
        map
    }

    #[tokio::test]
    async fn test_submit_tick_wait_roundtrip() {
        let bridge = Bridge::new(test_registry(), BridgeConfig::default());
        let dispatcher = bridge.dispatcher();
        let mut host = TestHost::default();

        let pending = bridge.submit("record", params("hello")).expect("valid");
        assert_eq!(bridge.queue_len(), 1);

        assert_eq!(dispatcher.tick(&mut host), 1);
        let result = pending.wait().await;
        assert_eq!(
            result.outcome.ok(),
            Some(json!({ "recorded": "hello", "total": 1 }))
        );
        assert_eq!(host.log, vec!["hello"]);
    }

    #[tokio::test]
    async fn test_results_follow_claim_order() {
        let bridge = Bridge::new(test_registry(), BridgeConfig::default());
        let dispatcher = bridge.dispatcher();
        let mut host = TestHost::default();

        let pendings: Vec<_> = (0..5)
            .map(|i| bridge.submit("record", params(&format!("c{i}"))).expect("valid"))
            .collect();
        dispatcher.tick(&mut host);

        assert_eq!(host.log, vec!["c0", "c1", "c2", "c3", "c4"]);
        for (i, pending) in pendings.into_iter().enumerate() {
            let result = pending.wait().await;
            let payload = result.outcome.expect("ok");
            assert_eq!(payload["recorded"], format!("c{i}"));
        }
    }

    #[tokio::test]
    async fn test_batch_budget_spans_ticks() {
        let config = BridgeConfig {
            batch_size: 3,
            ..BridgeConfig::default()
        };
        let bridge = Bridge::new(test_registry(), config);
        let dispatcher = bridge.dispatcher();
        let mut host = TestHost::default();

        for i in 0..7 {
            bridge.submit("record", params(&format!("c{i}"))).expect("valid");
        }
        assert_eq!(dispatcher.tick(&mut host), 3);
        assert_eq!(dispatcher.tick(&mut host), 3);
        assert_eq!(dispatcher.tick(&mut host), 1);
        assert_eq!(dispatcher.tick(&mut host), 0);
        assert_eq!(host.log.len(), 7);
    }

    #[tokio::test]
    async fn test_panicking_adapter_yields_internal_error() {
        let bridge = Bridge::new(test_registry(), BridgeConfig::default());
        let dispatcher = bridge.dispatcher();
        let mut host = TestHost::default();

        let boom = bridge.submit("explode", Map::new()).expect("valid");
        let after = bridge.submit("record", params("survivor")).expect("valid");
        dispatcher.tick(&mut host);

        let result = boom.wait().await;
        match result.outcome {
            Err(BridgeError::Internal(msg)) => assert!(msg.contains("blew up")),
            other => panic!("expected internal error, got {other:?}"),
        }
        // The failing call must not abort the tick.
        assert!(after.wait().await.is_ok());
        assert_eq!(host.log, vec!["survivor"]);
    }

    #[tokio::test]
    async fn test_adapter_error_carries_declared_kind() {
        let bridge = Bridge::new(test_registry(), BridgeConfig::default());
        let dispatcher = bridge.dispatcher();
        let mut host = TestHost::default();

        let pending = bridge.submit("refuse", Map::new()).expect("valid");
        dispatcher.tick(&mut host);
        let result = pending.wait().await;
        assert_eq!(
            result.outcome.err().map(|e| e.kind().to_string()),
            Some("object_not_found".into())
        );
    }

    #[tokio::test]
    async fn test_validation_errors_never_enqueue() {
        let bridge = Bridge::new(test_registry(), BridgeConfig::default());

        assert!(matches!(
            bridge.submit("vanish", Map::new()),
            Err(BridgeError::UnknownOperation(_))
        ));
        assert!(matches!(
            bridge.submit("record", Map::new()),
            Err(BridgeError::MissingParameter { .. })
        ));
        let mut bad = Map::new();
        bad.insert("text".into(), json!(17));
        assert!(matches!(
            bridge.submit("record", bad),
            Err(BridgeError::InvalidParameter { .. })
        ));
        assert_eq!(bridge.queue_len(), 0);
        assert_eq!(bridge.pending_len(), 0);
    }

    #[tokio::test]
    async fn test_enqueue_past_bound_rejected_immediately() {
        let config = BridgeConfig {
            queue_capacity: 256,
            ..BridgeConfig::default()
        };
        let bridge = Bridge::new(test_registry(), config);

        let mut accepted = 0;
        let mut rejected = 0;
        for i in 0..300 {
            match bridge.submit("record", params(&format!("c{i}"))) {
                Ok(_) => accepted += 1,
                Err(BridgeError::QueueFull) => rejected += 1,
                Err(other) => panic!("unexpected error: {other:?}"),
            }
        }
        assert_eq!(accepted, 256);
        assert_eq!(rejected, 44);
        // Rejected calls must not leak pending futures.
        assert_eq!(bridge.pending_len(), 256);
    }

    #[tokio::test]
    async fn test_shutdown_fails_queued_and_pending() {
        let bridge = Bridge::new(test_registry(), BridgeConfig::default());

        let pendings: Vec<_> = (0..5)
            .map(|i| bridge.submit("record", params(&format!("c{i}"))).expect("valid"))
            .collect();
        bridge.shutdown();

        for pending in pendings {
            let result = pending.wait().await;
            assert_eq!(result.outcome.err(), Some(BridgeError::ShuttingDown));
        }
        assert!(matches!(
            bridge.submit("record", params("late")),
            Err(BridgeError::ShuttingDown)
        ));
    }

    #[tokio::test]
    async fn test_cancel_before_claim() {
        let bridge = Bridge::new(test_registry(), BridgeConfig::default());
        let dispatcher = bridge.dispatcher();
        let mut host = TestHost::default();

        let keep = bridge.submit("record", params("keep")).expect("valid");
        let drop_it = bridge.submit("record", params("drop")).expect("valid");
        assert!(bridge.cancel(drop_it.id()));

        dispatcher.tick(&mut host);
        assert_eq!(host.log, vec!["keep"]);
        assert!(keep.wait().await.is_ok());
        let result = drop_it.wait().await;
        assert_eq!(result.outcome.err(), Some(BridgeError::Cancelled));
    }

    #[tokio::test]
    async fn test_timeout_then_late_result_discarded() {
        let bridge = Bridge::new(test_registry(), BridgeConfig::default());
        let dispatcher = bridge.dispatcher();
        let mut host = TestHost::default();

        let pending = bridge
            .submit_with_timeout("record", params("slow"), Some(Duration::from_millis(10)))
            .expect("valid");

        // Caller gives up before any tick runs.
        let result = pending.wait().await;
        assert_eq!(result.outcome.err(), Some(BridgeError::Timeout));

        // The claimed call still executes and mutates the host; its result
        // is discarded rather than delivered to anyone.
        dispatcher.tick(&mut host);
        assert_eq!(host.log, vec!["slow"]);
        assert_eq!(bridge.pending_len(), 0);
    }
}
