//! Typed client for the claim issuer.
//!
//! ## Endpoints
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `getTokens?requestid=` | Fetch the claim PEM bundle for a request |
//! | POST   | `requestImageTokens` | Submit a claim request with document images |
//! | GET    | `deleteRequest?requestid=` | Delete the claims of one request |
//! | GET    | `deleteAllRequests` | Delete all claims of the default credential |
//!
//! The claim paths predate the token issuer and still use "token" names on
//! the wire.

use crate::envelope::{SuccessCheck, ValidatedEnvelope};
use crate::error::BackendError;
use crate::http::BackendClient;
use crate::pem::PemBundle;
use crate::types::RequestInfo;

/// Client for claim issuance.
#[derive(Debug, Clone)]
pub struct ClaimIssuerService {
    http: BackendClient,
}

impl ClaimIssuerService {
    pub fn new(http: BackendClient) -> Self {
        Self { http }
    }

    /// Get the claims for the request identified by `request_id`.
    ///
    /// Fails with [`BackendError::Pending`] while the issuer is still
    /// processing; callers poll until the bundle is ready.
    pub async fn get_claims(&self, request_id: &str) -> Result<PemBundle, BackendError> {
        let endpoint = "GET getTokens";
        let body = self
            .http
            .get("getTokens", &[("requestid", request_id)])
            .await?;

        let envelope = ValidatedEnvelope::validate(endpoint, body, SuccessCheck::RESULT_PENDING)?;
        let bundle = PemBundle::split_claims(envelope.pems(endpoint)?);
        if bundle.is_empty() {
            return Err(BackendError::InvalidPemArray {
                endpoint: endpoint.into(),
            });
        }

        tracing::debug!(request_id, entries = bundle.len(), "claims issued");
        Ok(bundle)
    }

    /// Request claims with the given attributes and optional document images.
    ///
    /// Returns `true` once the issuer has accepted the request.
    pub async fn request_image_claims(&self, request: &RequestInfo) -> Result<bool, BackendError> {
        let body = self.http.post("requestImageTokens", &[], request).await?;
        ValidatedEnvelope::validate(
            "POST requestImageTokens",
            body,
            SuccessCheck::REQUEST_IMAGE_TOKENS,
        )?;
        Ok(true)
    }

    /// Delete the claims for the request identified by `request_id`.
    pub async fn delete_claims(&self, request_id: &str) -> Result<bool, BackendError> {
        let body = self
            .http
            .get("deleteRequest", &[("requestid", request_id)])
            .await?;
        ValidatedEnvelope::validate("GET deleteRequest", body, SuccessCheck::RESULT_FAILED)?;
        Ok(true)
    }

    /// Delete all claims for the default credential.
    pub async fn delete_all_claims(&self) -> Result<bool, BackendError> {
        let body = self.http.get("deleteAllRequests", &[]).await?;
        ValidatedEnvelope::validate("GET deleteAllRequests", body, SuccessCheck::RESULT_FAILED)?;
        Ok(true)
    }
}
