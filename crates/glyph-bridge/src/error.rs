//! Error taxonomy for the bridge
//!
//! Validation errors never enter the queue; execution errors are caught per
//! call inside the dispatcher and returned as results. Every variant maps to
//! a stable `kind()` string carried in the wire error body.

use thiserror::Error;

/// Errors produced anywhere along a call's lifecycle
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// Malformed envelope with no call id to correlate against
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Operation name not present in the registry
    #[error("unknown operation '{0}'")]
    UnknownOperation(String),

    /// A required parameter was absent at validation time
    #[error("operation '{operation}' is missing required parameter '{name}'")]
    MissingParameter { operation: String, name: String },

    /// A parameter was present but failed type coercion
    #[error("invalid parameter '{name}' for operation '{operation}': {reason}")]
    InvalidParameter {
        operation: String,
        name: String,
        reason: String,
    },

    /// Domain failure raised by an adapter, with its declared kind
    #[error("{kind}: {message}")]
    Adapter { kind: String, message: String },

    /// Unclassified failure during execution (including adapter panics)
    #[error("internal error: {0}")]
    Internal(String),

    /// Backpressure rejection: the execution queue is at capacity
    #[error("execution queue is full")]
    QueueFull,

    /// The call was removed from the queue before the dispatcher claimed it
    #[error("call was cancelled before execution")]
    Cancelled,

    /// Caller-side abandonment; the call may still execute later
    #[error("timed out waiting for result")]
    Timeout,

    /// The bridge is draining; no new work is accepted
    #[error("bridge is shutting down")]
    ShuttingDown,

    /// The optional relay could not forward the call
    #[error("relay unavailable: {0}")]
    RelayUnavailable(String),
}

impl BridgeError {
    /// Stable kind string for the wire error body
    pub fn kind(&self) -> &str {
        match self {
            Self::Protocol(_) => "protocol_error",
            Self::UnknownOperation(_) => "unknown_operation",
            Self::MissingParameter { .. } => "missing_parameter",
            Self::InvalidParameter { .. } => "invalid_parameter",
            Self::Adapter { kind, .. } => kind,
            Self::Internal(_) => "internal_error",
            Self::QueueFull => "queue_full",
            Self::Cancelled => "cancelled",
            Self::Timeout => "timeout",
            Self::ShuttingDown => "shutting_down",
            Self::RelayUnavailable(_) => "relay_unavailable",
        }
    }
}

/// Domain failure returned by an adapter
///
/// Adapters declare their own error kinds (`object_not_found`,
/// `export_failed`, ...); anything they return crosses back over the
/// dispatcher's failure boundary as a per-call error result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct AdapterError {
    pub kind: String,
    pub message: String,
}

impl AdapterError {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Schema and adapter disagree about a parameter; should not happen
    /// once validation has passed.
    pub fn missing(name: &str) -> Self {
        Self::new(
            "missing_parameter",
            format!("parameter '{name}' missing after validation"),
        )
    }
}

impl From<AdapterError> for BridgeError {
    fn from(err: AdapterError) -> Self {
        Self::Adapter {
            kind: err.kind,
            message: err.message,
        }
    }
}
