//! Typed client for the token issuer.
//!
//! ## Endpoints
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `getCertificates?requestid=` | Fetch the token PEM bundle for a request |
//! | GET    | `deleteRequest?requestid=` | Delete the tokens of one request |
//! | GET    | `deleteAllRequests` | Delete all tokens of the default credential |
//!
//! The token issuer authenticates with an application key pair, so the
//! [`BackendClient`] handed to this service should be configured with
//! [`Credentials::KeyPair`](crate::auth::Credentials::KeyPair).

use crate::envelope::{SuccessCheck, ValidatedEnvelope};
use crate::error::BackendError;
use crate::http::BackendClient;
use crate::pem::PemBundle;

/// Client for token issuance.
#[derive(Debug, Clone)]
pub struct TokenIssuerService {
    http: BackendClient,
}

impl TokenIssuerService {
    pub fn new(http: BackendClient) -> Self {
        Self { http }
    }

    /// Get the tokens for the request identified by `request_id`.
    ///
    /// Entries are split on `-----BEGIN` with the marker removed; see
    /// [`PemBundle::split_tokens`].
    pub async fn get_tokens(&self, request_id: &str) -> Result<PemBundle, BackendError> {
        let endpoint = "GET getCertificates";
        let body = self
            .http
            .get("getCertificates", &[("requestid", request_id)])
            .await?;

        let envelope = ValidatedEnvelope::validate(endpoint, body, SuccessCheck::RESULT_PENDING)?;
        let bundle = PemBundle::split_tokens(envelope.pems(endpoint)?);
        if bundle.is_empty() {
            return Err(BackendError::InvalidPemArray {
                endpoint: endpoint.into(),
            });
        }

        tracing::debug!(request_id, entries = bundle.len(), "tokens issued");
        Ok(bundle)
    }

    /// Delete the tokens for the request identified by `request_id`.
    pub async fn delete_tokens(&self, request_id: &str) -> Result<(), BackendError> {
        let body = self
            .http
            .get("deleteRequest", &[("requestid", request_id)])
            .await?;
        ValidatedEnvelope::validate("GET deleteRequest", body, SuccessCheck::RESULT_FAILED)?;
        Ok(())
    }

    /// Delete all tokens for the default credential.
    pub async fn delete_all_tokens(&self) -> Result<(), BackendError> {
        let body = self.http.get("deleteAllRequests", &[]).await?;
        ValidatedEnvelope::validate("GET deleteAllRequests", body, SuccessCheck::RESULT_FAILED)?;
        Ok(())
    }
}
