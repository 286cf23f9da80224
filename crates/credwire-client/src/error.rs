//! Backend client error types.
//!
//! Transport-level failures (`Http`, `ApiError`, `Deserialization`) are
//! raised before the response envelope is looked at. The envelope variants
//! (`MissingData` through `Revoked`) describe a well-formed HTTP exchange
//! whose JSON body did not satisfy the operation's contract.

/// Errors from credential-backend calls.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Backend returned a non-2xx status.
    #[error("backend {endpoint} returned {status}: {body}")]
    ApiError {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// Response body was not valid JSON.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Request body could not be encoded.
    #[error("failed to serialize request body for {endpoint}: {source}")]
    Serialization {
        endpoint: String,
        source: serde_json::Error,
    },
    /// The endpoint path could not be resolved against the backend URL.
    #[error("invalid endpoint path {path:?}: {reason}")]
    InvalidEndpoint { path: String, reason: String },

    /// The response JSON has no `data` object.
    #[error("unexpected: {endpoint} returned JSON without a data object")]
    MissingData { endpoint: String },
    /// The issuer accepted the request but has not finished processing it.
    #[error("the operation is pending ({endpoint})")]
    Pending { endpoint: String },
    /// The backend reported a negative result.
    #[error("{endpoint} failed")]
    OperationFailed { endpoint: String },
    /// A successful response carried no usable PEM payload.
    #[error("unexpected: {endpoint} PEM data was invalid")]
    InvalidPemData { endpoint: String },
    /// Splitting the PEM payload produced no entries.
    #[error("unexpected: {endpoint} PEM array was empty")]
    InvalidPemArray { endpoint: String },
    /// The address is revoked, or its status could not be confirmed as valid.
    #[error("address got revoked: {address}")]
    Revoked { address: String },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}

impl BackendError {
    /// Whether the caller may poll again later.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }

    /// Whether the error is a (fail-closed) revocation verdict.
    pub fn is_revoked(&self) -> bool {
        matches!(self, Self::Revoked { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revoked_message_names_address() {
        let err = BackendError::Revoked {
            address: "0xAB12".into(),
        };
        assert_eq!(err.to_string(), "address got revoked: 0xAB12");
        assert!(err.is_revoked());
        assert!(!err.is_pending());
    }

    #[test]
    fn pending_is_distinct_from_failure() {
        let pending = BackendError::Pending {
            endpoint: "GET getTokens".into(),
        };
        let failed = BackendError::OperationFailed {
            endpoint: "GET deleteRequest".into(),
        };
        assert!(pending.is_pending());
        assert!(!failed.is_pending());
        assert_eq!(failed.to_string(), "GET deleteRequest failed");
    }
}
