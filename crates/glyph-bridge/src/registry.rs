//! Call registry: operation lookup and structural validation
//!
//! Each operation declares a parameter schema; `resolve` checks it once,
//! before a call ever reaches the queue. Declared defaults are injected
//! into the parameter map at the same point, so adapters always see a
//! value for every defaulted parameter. Validation is purely structural
//! and never touches the host document. Parameters the schema does not
//! declare pass through untouched so adapters may inspect them.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::{Map, Value};

use crate::call::{CallId, ValidatedCall};
use crate::error::{AdapterError, BridgeError};

/// Adapter signature: synchronous, host-thread only, at most once per call
pub type AdapterFn<H> = dyn Fn(&mut H, &Params) -> Result<Value, AdapterError> + Send + Sync;

/// Declared type for one parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Bool,
    /// Whole number; accepts floats with no fractional part
    Int,
    Float,
    Str,
    /// Array of exactly three numbers
    Vec3,
    Array,
    Object,
    Any,
}

impl ParamKind {
    fn name(self) -> &'static str {
        match self {
            Self::Bool => "boolean",
            Self::Int => "integer",
            Self::Float => "number",
            Self::Str => "string",
            Self::Vec3 => "vec3",
            Self::Array => "array",
            Self::Object => "object",
            Self::Any => "any",
        }
    }
}

/// Schema entry for one parameter of one operation
#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub required: bool,
    /// Injected at validation time when the parameter is absent
    pub default: Option<Value>,
}

impl ParamSpec {
    pub fn required(name: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            kind,
            required: true,
            default: None,
        }
    }

    pub fn optional(name: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            default: None,
        }
    }

    /// Optional parameter whose fallback value lives in the schema
    pub fn defaulted(name: &'static str, kind: ParamKind, default: Value) -> Self {
        Self {
            name,
            kind,
            required: false,
            default: Some(default),
        }
    }
}

/// One named operation with its schema and adapter
pub struct Operation<H> {
    name: &'static str,
    params: Vec<ParamSpec>,
    handler: Box<AdapterFn<H>>,
}

impl<H> Operation<H> {
    pub fn new<F>(name: &'static str, handler: F) -> Self
    where
        F: Fn(&mut H, &Params) -> Result<Value, AdapterError> + Send + Sync + 'static,
    {
        Self {
            name,
            params: Vec::new(),
            handler: Box::new(handler),
        }
    }

    /// Builder: declare one parameter
    pub fn param(mut self, spec: ParamSpec) -> Self {
        self.params.push(spec);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn invoke(&self, host: &mut H, params: &Params) -> Result<Value, AdapterError> {
        (self.handler)(host, params)
    }
}

/// Maps operation names to adapters; registered at startup, read-only after
pub struct Registry<H> {
    ops: HashMap<&'static str, Arc<Operation<H>>>,
}

impl<H> Default for Registry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Registry<H> {
    pub fn new() -> Self {
        Self {
            ops: HashMap::new(),
        }
    }

    /// Register an operation. Duplicate names are a startup bug.
    pub fn register(&mut self, op: Operation<H>) {
        let previous = self.ops.insert(op.name, Arc::new(op));
        assert!(previous.is_none(), "duplicate operation registration");
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ops.contains_key(name)
    }

    /// Sorted operation names, for discovery responses
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.ops.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Validate a raw parameter map against the operation's schema
    pub fn resolve(
        &self,
        name: &str,
        params: Map<String, Value>,
        timeout: Option<Duration>,
    ) -> Result<ValidatedCall<H>, BridgeError> {
        let op = self
            .ops
            .get(name)
            .ok_or_else(|| BridgeError::UnknownOperation(name.to_string()))?;

        let mut validated = params;
        for spec in &op.params {
            match validated.get(spec.name) {
                None | Some(Value::Null) => {
                    if spec.required {
                        return Err(BridgeError::MissingParameter {
                            operation: name.to_string(),
                            name: spec.name.to_string(),
                        });
                    }
                    if let Some(default) = &spec.default {
                        validated.insert(spec.name.to_string(), default.clone());
                    }
                }
                Some(value) => {
                    let coerced = coerce(spec.kind, value).map_err(|reason| {
                        BridgeError::InvalidParameter {
                            operation: name.to_string(),
                            name: spec.name.to_string(),
                            reason,
                        }
                    })?;
                    validated.insert(spec.name.to_string(), coerced);
                }
            }
        }

        Ok(ValidatedCall {
            id: CallId::new(),
            operation: Arc::clone(op),
            params: Params(validated),
            received_at: Instant::now(),
            timeout,
        })
    }
}

/// Check a present value against its declared kind, normalizing numbers
fn coerce(kind: ParamKind, value: &Value) -> Result<Value, String> {
    let mismatch = || format!("expected {}, got {}", kind.name(), type_name(value));
    match kind {
        ParamKind::Any => Ok(value.clone()),
        ParamKind::Bool => value.is_boolean().then(|| value.clone()).ok_or_else(mismatch),
        ParamKind::Str => value.is_string().then(|| value.clone()).ok_or_else(mismatch),
        ParamKind::Array => value.is_array().then(|| value.clone()).ok_or_else(mismatch),
        ParamKind::Object => value.is_object().then(|| value.clone()).ok_or_else(mismatch),
        ParamKind::Float => value.as_f64().map(Value::from).ok_or_else(mismatch),
        ParamKind::Int => {
            if let Some(i) = value.as_i64() {
                Ok(Value::from(i))
            } else if let Some(f) = value.as_f64() {
                if f.fract() == 0.0 {
                    Ok(Value::from(f as i64))
                } else {
                    Err(mismatch())
                }
            } else {
                Err(mismatch())
            }
        }
        ParamKind::Vec3 => {
            let items = value.as_array().ok_or_else(mismatch)?;
            if items.len() != 3 || !items.iter().all(Value::is_number) {
                return Err(mismatch());
            }
            Ok(value.clone())
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Coerced parameter map handed to adapters
///
/// Defaults are already injected by `resolve`, so `require_*` getters are
/// the common path; `opt_*` getters are for parameters whose absence is
/// itself meaningful to the adapter.
#[derive(Debug, Clone, Default)]
pub struct Params(pub(crate) Map<String, Value>);

impl Params {
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn value(&self, key: &str) -> Option<&Value> {
        match self.0.get(key) {
            Some(Value::Null) | None => None,
            Some(v) => Some(v),
        }
    }

    pub fn opt_str(&self, key: &str) -> Option<&str> {
        self.value(key).and_then(Value::as_str)
    }

    pub fn opt_f64(&self, key: &str) -> Option<f64> {
        self.value(key).and_then(Value::as_f64)
    }

    pub fn opt_i64(&self, key: &str) -> Option<i64> {
        self.value(key).and_then(Value::as_i64)
    }

    pub fn opt_bool(&self, key: &str) -> Option<bool> {
        self.value(key).and_then(Value::as_bool)
    }

    pub fn opt_vec3(&self, key: &str) -> Option<[f64; 3]> {
        let items = self.value(key)?.as_array()?;
        if items.len() != 3 {
            return None;
        }
        match (items[0].as_f64(), items[1].as_f64(), items[2].as_f64()) {
            (Some(x), Some(y), Some(z)) => Some([x, y, z]),
            _ => None,
        }
    }

    pub fn require_str(&self, key: &str) -> Result<&str, AdapterError> {
        self.opt_str(key).ok_or_else(|| AdapterError::missing(key))
    }

    pub fn require_f64(&self, key: &str) -> Result<f64, AdapterError> {
        self.opt_f64(key).ok_or_else(|| AdapterError::missing(key))
    }

    pub fn require_i64(&self, key: &str) -> Result<i64, AdapterError> {
        self.opt_i64(key).ok_or_else(|| AdapterError::missing(key))
    }

    pub fn require_bool(&self, key: &str) -> Result<bool, AdapterError> {
        self.opt_bool(key).ok_or_else(|| AdapterError::missing(key))
    }

    pub fn require_vec3(&self, key: &str) -> Result<[f64; 3], AdapterError> {
        self.opt_vec3(key).ok_or_else(|| AdapterError::missing(key))
    }
}
