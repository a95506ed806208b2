//! Wire envelopes for the newline-delimited JSON transport

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::call::CallResult;
use crate::error::BridgeError;

/// `{ "id": ..., "operation": ..., "params": {...} }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestEnvelope {
    /// Client-chosen correlation id, echoed back in the response
    #[serde(default)]
    pub id: Option<String>,
    pub operation: String,
    #[serde(default)]
    pub params: Map<String, Value>,
    /// Per-call wait budget in milliseconds; bridge default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Ok,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub kind: String,
    pub message: String,
}

/// `{ "id": ..., "status": "ok"|"error", "result": ..., "error": {...} }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// Echoes the request id; null for protocol-level errors
    pub id: Option<String>,
    pub status: ResponseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl ResponseEnvelope {
    pub fn ok(id: Option<String>, result: Value) -> Self {
        Self {
            id,
            status: ResponseStatus::Ok,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Option<String>, error: &BridgeError) -> Self {
        Self {
            id,
            status: ResponseStatus::Error,
            result: None,
            error: Some(ErrorBody {
                kind: error.kind().to_string(),
                message: error.to_string(),
            }),
        }
    }

    pub fn from_result(id: Option<String>, result: &CallResult) -> Self {
        match &result.outcome {
            Ok(payload) => Self::ok(id, payload.clone()),
            Err(error) => Self::error(id, error),
        }
    }
}
