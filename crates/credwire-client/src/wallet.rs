//! Typed client for wallet pairing, signature requests, and notifications.
//!
//! ## Endpoints
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `request` | Create a pending login/signing request |
//! | GET    | `getPendingRequest` | Next pending request for the default credential |
//! | GET    | `removePendingRequest?nonce=` | Drop a pending request |
//! | GET    | `registerDevice?devicetoken=` | Register this device for push notifications |
//! | GET    | `notify` | Push a notification to a device |
//!
//! Every call shares one success check (`data` present, `data.result`
//! truthy) and returns the full response body; callers pick out the
//! fields they need.

use serde_json::Value;

use crate::envelope::{SuccessCheck, ValidatedEnvelope};
use crate::error::BackendError;
use crate::http::BackendClient;

/// Client for wallet operations.
#[derive(Debug, Clone)]
pub struct WalletService {
    http: BackendClient,
}

impl WalletService {
    pub fn new(http: BackendClient) -> Self {
        Self { http }
    }

    /// Create a new pending request.
    pub async fn request(
        &self,
        address: &str,
        nonce: &str,
        callback_url: &str,
        document_url: &str,
        object_ids: &str,
    ) -> Result<Value, BackendError> {
        self.call(
            "request",
            &[
                ("address", address),
                ("nonce", nonce),
                ("callbackUrl", callback_url),
                ("documentUrl", document_url),
                ("objectIds", object_ids),
            ],
        )
        .await
    }

    /// Grab the next login/signing request for the default registered credential.
    pub async fn get_pending_signature_request(&self) -> Result<Value, BackendError> {
        self.call("getPendingRequest", &[]).await
    }

    /// Remove the pending request identified by `nonce`, as received from the
    /// notification or the pending request.
    pub async fn remove_signature_request(&self, nonce: &str) -> Result<Value, BackendError> {
        self.call("removePendingRequest", &[("nonce", nonce)]).await
    }

    /// Register this device with the notification service so it receives
    /// remote notifications sent to the default registered credential.
    pub async fn register_device(&self, device_token: &str) -> Result<Value, BackendError> {
        self.call("registerDevice", &[("devicetoken", device_token)])
            .await
    }

    /// Send a notification to a device.
    pub async fn notify(
        &self,
        address: &str,
        nonce: &str,
        message: &str,
    ) -> Result<Value, BackendError> {
        self.call(
            "notify",
            &[("address", address), ("nonce", nonce), ("message", message)],
        )
        .await
    }

    async fn call(&self, path: &str, params: &[(&str, &str)]) -> Result<Value, BackendError> {
        let body = self.http.get(path, params).await?;
        let endpoint = format!("GET {path}");
        ValidatedEnvelope::validate(&endpoint, body, SuccessCheck::RESULT_FAILED)
            .map(ValidatedEnvelope::into_inner)
    }
}
