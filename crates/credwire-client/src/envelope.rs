//! # Response Envelope Validation
//!
//! Every backend response is wrapped as `{ "data": { ... } }`. A call
//! succeeds only when:
//!
//! 1. `data` is present (anything JS-falsy counts as absent), and
//! 2. the operation's completion flag inside `data` is truthy.
//!
//! Which flag is checked, and whether a falsy flag means "still pending"
//! or "failed", varies per operation. [`SuccessCheck`] captures that pair
//! so the check is written once and every service composes it.
//!
//! Truthiness follows the backend's JSON conventions: `null`, `false`, `0`,
//! and `""` are falsy; every other value, including empty arrays and
//! objects, is truthy.

use serde_json::{Map, Value};

use crate::error::BackendError;

/// Error raised when the completion flag is falsy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FalsyOutcome {
    /// The backend is still processing; the caller may poll.
    Pending,
    /// The backend reported failure.
    Failed,
}

/// Which `data` flag must be truthy, and what a falsy value means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuccessCheck {
    pub flag: &'static str,
    pub on_falsy: FalsyOutcome,
}

impl SuccessCheck {
    /// `data.result` falsy means the issuer has not finished.
    pub const RESULT_PENDING: Self = Self {
        flag: "result",
        on_falsy: FalsyOutcome::Pending,
    };

    /// `data.result` falsy means the operation failed.
    pub const RESULT_FAILED: Self = Self {
        flag: "result",
        on_falsy: FalsyOutcome::Failed,
    };

    /// Completion flag for image claim requests.
    pub const REQUEST_IMAGE_TOKENS: Self = Self {
        flag: "requestImageTokens",
        on_falsy: FalsyOutcome::Failed,
    };
}

/// A response body whose `data` object is known to be present.
#[derive(Debug, Clone)]
pub struct ValidatedEnvelope {
    body: Value,
}

impl ValidatedEnvelope {
    /// Accept `body` only if it carries a `data` field.
    ///
    /// A truthy non-object `data` is accepted; field lookups on it return
    /// `None`, the same as a missing field.
    pub fn decode(endpoint: &str, body: Value) -> Result<Self, BackendError> {
        match body.get("data") {
            Some(data) if is_truthy(data) => Ok(Self { body }),
            _ => {
                tracing::warn!(endpoint, "response envelope has no data object");
                Err(BackendError::MissingData {
                    endpoint: endpoint.to_string(),
                })
            }
        }
    }

    /// Decode and then require `check.flag` to be truthy.
    pub fn validate(
        endpoint: &str,
        body: Value,
        check: SuccessCheck,
    ) -> Result<Self, BackendError> {
        let envelope = Self::decode(endpoint, body)?;
        if envelope.field(check.flag).is_some_and(is_truthy) {
            return Ok(envelope);
        }
        tracing::warn!(endpoint, flag = check.flag, outcome = ?check.on_falsy, "completion flag is falsy");
        let endpoint = endpoint.to_string();
        Err(match check.on_falsy {
            FalsyOutcome::Pending => BackendError::Pending { endpoint },
            FalsyOutcome::Failed => BackendError::OperationFailed { endpoint },
        })
    }

    /// The `data` object, if it is an object.
    pub fn data(&self) -> Option<&Map<String, Value>> {
        self.body.get("data").and_then(Value::as_object)
    }

    /// A field inside `data`.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.data().and_then(|data| data.get(name))
    }

    /// `data.pems` as a non-empty string.
    pub fn pems(&self, endpoint: &str) -> Result<&str, BackendError> {
        match self.field("pems").and_then(Value::as_str) {
            Some(pems) if !pems.is_empty() => Ok(pems),
            _ => Err(BackendError::InvalidPemData {
                endpoint: endpoint.to_string(),
            }),
        }
    }

    /// The full body, untouched.
    pub fn into_inner(self) -> Value {
        self.body
    }
}

/// JS-style truthiness of a JSON value.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
