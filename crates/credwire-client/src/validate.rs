//! # Revocation Checks
//!
//! Read-only queries against the backend's revocation registry, which is
//! itself backed by an on-chain contract this crate never talks to.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `isRevoked?address=` | Revocation status of a credential address or token serials |
//!
//! ## Fail-Closed Policy
//!
//! An address is valid only when the backend answers `"isRevoked": false`
//! with a JSON boolean. `true`, a missing field, `null`, the string
//! `"false"`, or `0` are all reported as [`BackendError::Revoked`].

use crate::envelope::ValidatedEnvelope;
use crate::error::BackendError;
use crate::http::BackendClient;

/// Token serial numbers to check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSerials {
    /// Already in wire form (`0xAB12,0xCD34`); sent unchanged.
    Formatted(String),
    /// Bare hex serials; each gets a `0x` prefix and they are comma-joined.
    Bare(Vec<String>),
}

impl TokenSerials {
    /// The `address` query value for this set of serials.
    pub fn to_address(&self) -> String {
        match self {
            Self::Formatted(s) => s.clone(),
            Self::Bare(serials) => serials
                .iter()
                .map(|serial| format!("0x{serial}"))
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

impl From<&str> for TokenSerials {
    fn from(s: &str) -> Self {
        Self::Formatted(s.to_string())
    }
}

impl From<String> for TokenSerials {
    fn from(s: String) -> Self {
        Self::Formatted(s)
    }
}

impl From<Vec<String>> for TokenSerials {
    fn from(serials: Vec<String>) -> Self {
        Self::Bare(serials)
    }
}

impl<S: AsRef<str>> From<&[S]> for TokenSerials {
    fn from(serials: &[S]) -> Self {
        Self::Bare(serials.iter().map(|s| s.as_ref().to_string()).collect())
    }
}

impl<S: AsRef<str>, const N: usize> From<[S; N]> for TokenSerials {
    fn from(serials: [S; N]) -> Self {
        Self::Bare(serials.iter().map(|s| s.as_ref().to_string()).collect())
    }
}

/// Client for revocation checks. Needs no credentials.
#[derive(Debug, Clone)]
pub struct ValidateService {
    http: BackendClient,
}

impl ValidateService {
    pub fn new(http: BackendClient) -> Self {
        Self { http }
    }

    /// Check that a credential has not been revoked.
    pub async fn validate_credential(&self, address: &str) -> Result<bool, BackendError> {
        self.validate(address).await
    }

    /// Check that none of the given token serials has been revoked.
    pub async fn validate_tokens(
        &self,
        serials: impl Into<TokenSerials>,
    ) -> Result<bool, BackendError> {
        let address = serials.into().to_address();
        self.validate(&address).await
    }

    async fn validate(&self, address: &str) -> Result<bool, BackendError> {
        let endpoint = "GET isRevoked";
        let body = self.http.get("isRevoked", &[("address", address)]).await?;
        let envelope = ValidatedEnvelope::decode(endpoint, body)?;

        if envelope.field("isRevoked") != Some(&serde_json::Value::Bool(false)) {
            tracing::warn!(address, status = ?envelope.field("isRevoked"), "address not confirmed valid");
            return Err(BackendError::Revoked {
                address: address.to_string(),
            });
        }
        Ok(true)
    }
}
