//! Main-loop dispatcher: the only component that touches the host
//!
//! The host's scheduler invokes `tick` once per loop iteration. Each tick
//! claims a bounded batch so external calls never starve the host's own
//! frame budget, executes the batch strictly sequentially, and hands every
//! result to the correlator. The failure boundary converts adapter errors
//! and panics into error results; a failing call never aborts the tick.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use tracing::{debug, error};

use crate::call::CallResult;
use crate::correlator::ResultCorrelator;
use crate::error::BridgeError;
use crate::queue::ExecutionQueue;

pub struct Dispatcher<H> {
    queue: Arc<ExecutionQueue<H>>,
    correlator: Arc<ResultCorrelator>,
    batch_size: usize,
}

impl<H> Dispatcher<H> {
    pub(crate) fn new(
        queue: Arc<ExecutionQueue<H>>,
        correlator: Arc<ResultCorrelator>,
        batch_size: usize,
    ) -> Self {
        Self {
            queue,
            correlator,
            batch_size,
        }
    }

    /// Drain and execute up to one batch of queued calls against the host
    ///
    /// Must be called from the host's own loop; the `&mut H` it receives is
    /// the sole mutation path into host state. Returns the number of calls
    /// executed this tick.
    pub fn tick(&self, host: &mut H) -> usize {
        let batch = self.queue.drain(self.batch_size);
        let executed = batch.len();

        for entry in batch {
            let call = entry.call;
            let waited = entry.enqueued_at.elapsed();
            debug!(call = %call.id, op = call.operation.name(), ?waited, "executing");

            let invoked =
                catch_unwind(AssertUnwindSafe(|| call.operation.invoke(host, &call.params)));
            let outcome = match invoked {
                Ok(Ok(payload)) => Ok(payload),
                Ok(Err(adapter_err)) => Err(BridgeError::from(adapter_err)),
                Err(panic) => {
                    error!(call = %call.id, op = call.operation.name(), "adapter panicked");
                    Err(BridgeError::Internal(panic_message(panic.as_ref())))
                }
            };

            self.correlator.complete(CallResult {
                call_id: call.id,
                outcome,
            });
        }

        executed
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        format!("adapter panicked: {msg}")
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        format!("adapter panicked: {msg}")
    } else {
        "adapter panicked".to_string()
    }
}
