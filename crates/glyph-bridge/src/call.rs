//! Call identity and result types

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::Value;
use uuid::Uuid;

use crate::error::BridgeError;
use crate::registry::{Operation, Params};

/// Process-unique token identifying one requested operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallId(Uuid);

impl CallId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CallId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A call that passed registry validation
///
/// Carries the resolved adapter and coerced parameters; never constructed
/// when a required parameter is missing or fails coercion.
pub struct ValidatedCall<H> {
    pub id: CallId,
    pub operation: Arc<Operation<H>>,
    pub params: Params,
    pub received_at: Instant,
    /// Caller-requested wait budget; `None` means the bridge default
    pub timeout: Option<Duration>,
}

/// The single result produced for an accepted call
#[derive(Debug, Clone)]
pub struct CallResult {
    pub call_id: CallId,
    pub outcome: Result<Value, BridgeError>,
}

impl CallResult {
    pub fn ok(call_id: CallId, payload: Value) -> Self {
        Self {
            call_id,
            outcome: Ok(payload),
        }
    }

    pub fn err(call_id: CallId, error: BridgeError) -> Self {
        Self {
            call_id,
            outcome: Err(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}
