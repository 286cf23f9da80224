//! Request types sent to the issuer.

use std::collections::BTreeMap;

use base64ct::{Base64, Encoding};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A claim request: attributes to certify plus optional document images.
///
/// `request_id` is the caller-chosen handle for retries and for the later
/// `get_claims` / `delete_claims` calls. It is sent as `requestid`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestInfo {
    #[serde(rename = "requestid", alias = "requestId")]
    pub request_id: String,
    /// Expiry of the issued claims.
    pub expiry: DateTime<Utc>,
    /// OID to value.
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<DocumentImage>,
}

impl RequestInfo {
    /// Start a request with a fresh UUIDv4 request ID.
    pub fn new(expiry: DateTime<Utc>) -> Self {
        Self::with_request_id(Uuid::new_v4().to_string(), expiry)
    }

    pub fn with_request_id(request_id: impl Into<String>, expiry: DateTime<Utc>) -> Self {
        Self {
            request_id: request_id.into(),
            expiry,
            attributes: BTreeMap::new(),
            images: Vec::new(),
        }
    }

    /// Add an OID:value attribute.
    pub fn attribute(mut self, oid: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(oid.into(), value.into());
        self
    }

    pub fn image(mut self, image: DocumentImage) -> Self {
        self.images.push(image);
        self
    }
}

/// A document image attached to a claim request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentImage {
    /// File name, e.g. `passport.jpg`.
    pub name: String,
    /// Base64 image bytes.
    pub data: String,
}

impl DocumentImage {
    /// Encode raw image bytes.
    pub fn from_bytes(name: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            name: name.into(),
            data: Base64::encode_string(bytes),
        }
    }
}
