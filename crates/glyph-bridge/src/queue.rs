//! Execution queue: the thread→host handoff point
//!
//! A bounded, mutex-protected FIFO. Enqueue never blocks: beyond the
//! configured depth it fails fast with QueueFull so the transport thread
//! stays responsive. Only the dispatcher drains, only on the host thread.
//! Insertion order is execution order; there is no priority.

use std::collections::VecDeque;
use std::time::Instant;

use parking_lot::Mutex;

use crate::call::{CallId, ValidatedCall};
use crate::error::BridgeError;

/// A validated call waiting for its tick
///
/// Ownership transfers whole: listener thread at enqueue, dispatcher at
/// drain. No two threads ever hold mutation rights at once.
pub struct QueueEntry<H> {
    pub call: ValidatedCall<H>,
    pub enqueued_at: Instant,
}

struct Inner<H> {
    entries: VecDeque<QueueEntry<H>>,
    open: bool,
}

/// Thread-safe FIFO of pending calls, bounded for backpressure
pub struct ExecutionQueue<H> {
    inner: Mutex<Inner<H>>,
    capacity: usize,
}

impl<H> ExecutionQueue<H> {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: VecDeque::new(),
                open: true,
            }),
            capacity,
        }
    }

    /// Non-blocking enqueue; fails immediately when full or closed
    pub fn enqueue(&self, call: ValidatedCall<H>) -> Result<(), BridgeError> {
        let mut inner = self.inner.lock();
        if !inner.open {
            return Err(BridgeError::ShuttingDown);
        }
        if inner.entries.len() >= self.capacity {
            return Err(BridgeError::QueueFull);
        }
        inner.entries.push_back(QueueEntry {
            call,
            enqueued_at: Instant::now(),
        });
        Ok(())
    }

    /// Claim up to `max_n` calls in FIFO order. Dispatcher-only.
    pub fn drain(&self, max_n: usize) -> Vec<QueueEntry<H>> {
        let mut inner = self.inner.lock();
        let n = max_n.min(inner.entries.len());
        inner.entries.drain(..n).collect()
    }

    /// Remove a still-queued call. No effect once the dispatcher claimed it.
    pub fn cancel(&self, id: CallId) -> Option<ValidatedCall<H>> {
        let mut inner = self.inner.lock();
        let position = inner.entries.iter().position(|e| e.call.id == id)?;
        inner.entries.remove(position).map(|e| e.call)
    }

    /// Stop accepting work and hand back whatever was still queued
    pub fn close(&self) -> Vec<QueueEntry<H>> {
        let mut inner = self.inner.lock();
        inner.open = false;
        inner.entries.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{Operation, ParamSpec, Params, Registry};
    use serde_json::{json, Map};

    fn queue_and_registry() -> (ExecutionQueue<u32>, Registry<u32>) {
        let mut reg = Registry::new();
        reg.register(
            Operation::new("tag", |host: &mut u32, params: &Params| {
                *host += 1;
                Ok(json!({ "seq": params.opt_i64("seq").unwrap_or(0) }))
            })
            .param(ParamSpec::optional("seq", crate::registry::ParamKind::Int)),
        );
        (ExecutionQueue::new(4), reg)
    }

    fn call(reg: &Registry<u32>, seq: i64) -> crate::call::ValidatedCall<u32> {
        let mut params = Map::new();
        params.insert("seq".into(), json!(seq));
        reg.resolve("tag", params, None).expect("valid call")
    }

    #[test]
    fn test_fifo_order_preserved() {
        let (queue, reg) = queue_and_registry();
        for seq in 0..4 {
            queue.enqueue(call(&reg, seq)).expect("under capacity");
        }
        let drained = queue.drain(10);
        let order: Vec<i64> = drained
            .iter()
            .map(|e| e.call.params.opt_i64("seq").unwrap_or(-1))
            .collect();
        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_drain_respects_batch_bound() {
        let (queue, reg) = queue_and_registry();
        for seq in 0..4 {
            queue.enqueue(call(&reg, seq)).expect("under capacity");
        }
        assert_eq!(queue.drain(3).len(), 3);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_enqueue_beyond_bound_fails_fast() {
        let (queue, reg) = queue_and_registry();
        for seq in 0..4 {
            queue.enqueue(call(&reg, seq)).expect("under capacity");
        }
        let err = queue.enqueue(call(&reg, 4)).err();
        assert_eq!(err, Some(BridgeError::QueueFull));
        assert_eq!(queue.len(), 4);
    }

    #[test]
    fn test_cancel_only_while_queued() {
        let (queue, reg) = queue_and_registry();
        let c = call(&reg, 0);
        let id = c.id;
        queue.enqueue(c).expect("under capacity");
        assert!(queue.cancel(id).is_some());
        assert!(queue.cancel(id).is_none());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_closed_queue_rejects_and_returns_pending() {
        let (queue, reg) = queue_and_registry();
        queue.enqueue(call(&reg, 0)).expect("under capacity");
        let pending = queue.close();
        assert_eq!(pending.len(), 1);
        let err = queue.enqueue(call(&reg, 1)).err();
        assert_eq!(err, Some(BridgeError::ShuttingDown));
    }
}
