//! # Application Credentials
//!
//! The backend authenticates callers in one of two ways:
//!
//! - **App secret**: an application ID and shared secret, sent as HTTP Basic
//!   credentials on every request. Used by the claim and wallet endpoints.
//! - **App key pair**: an Ed25519 key pair. Each request carries the public
//!   key, a Unix timestamp, and a signature over the request. Used by the
//!   token endpoints.
//!
//! Requests without credentials are allowed but the backend only serves
//! non-privileged operations to them (revocation checks, for instance).
//!
//! ## Signed Message Layout
//!
//! ```text
//! METHOD \n PATH[?QUERY] \n TIMESTAMP \n BODY
//! ```
//!
//! `PATH[?QUERY]` is the exact request target as sent, percent-encoding
//! included. `BODY` is the raw request body (empty for GET).

use base64ct::{Base64, Encoding};
use ed25519_dalek::{Signer, SigningKey};
use rand_core::OsRng;
use zeroize::Zeroizing;

use crate::config::ConfigError;

/// Header carrying the base64 Ed25519 public key.
pub const APP_KEY_HEADER: &str = "x-app-key";
/// Header carrying the Unix timestamp (seconds) covered by the signature.
pub const APP_TIMESTAMP_HEADER: &str = "x-app-timestamp";
/// Header carrying the base64 Ed25519 signature.
pub const APP_SIGNATURE_HEADER: &str = "x-app-signature";

/// Credentials attached to every backend request.
#[derive(Clone)]
pub enum Credentials {
    /// No authentication.
    Anonymous,
    /// Application ID and shared secret.
    AppSecret {
        app_id: String,
        app_secret: Zeroizing<String>,
    },
    /// Ed25519 request signing.
    KeyPair(AppKeyPair),
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Anonymous => f.write_str("Anonymous"),
            Self::AppSecret { app_id, .. } => f
                .debug_struct("AppSecret")
                .field("app_id", app_id)
                .field("app_secret", &"[REDACTED]")
                .finish(),
            Self::KeyPair(pair) => f.debug_tuple("KeyPair").field(pair).finish(),
        }
    }
}

/// An application Ed25519 key pair used to sign backend requests.
#[derive(Clone)]
pub struct AppKeyPair {
    signing_key: SigningKey,
}

impl std::fmt::Debug for AppKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppKeyPair")
            .field("public_key", &self.public_key_base64())
            .field("seed", &"[REDACTED]")
            .finish()
    }
}

impl AppKeyPair {
    /// Generate a fresh key pair from the OS RNG.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Build a key pair from a raw 32-byte seed.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&seed),
        }
    }

    /// Build a key pair from a base64-encoded 32-byte seed.
    pub fn from_seed_base64(encoded: &str) -> Result<Self, ConfigError> {
        let bytes = Zeroizing::new(
            Base64::decode_vec(encoded).map_err(|e| ConfigError::InvalidAppKey(e.to_string()))?,
        );
        let seed: [u8; 32] = bytes.as_slice().try_into().map_err(|_| {
            ConfigError::InvalidAppKey(format!("expected 32 seed bytes, got {}", bytes.len()))
        })?;
        Ok(Self::from_seed(seed))
    }

    /// The secret seed, base64-encoded. Handle with care.
    pub fn seed_base64(&self) -> Zeroizing<String> {
        Zeroizing::new(Base64::encode_string(self.signing_key.as_bytes()))
    }

    /// The public key, base64-encoded, as sent in [`APP_KEY_HEADER`].
    pub fn public_key_base64(&self) -> String {
        Base64::encode_string(self.signing_key.verifying_key().as_bytes())
    }

    /// The public key.
    pub fn verifying_key(&self) -> ed25519_dalek::VerifyingKey {
        self.signing_key.verifying_key()
    }

    /// Sign a request and return the base64 signature.
    pub fn sign_request(&self, method: &str, target: &str, timestamp: i64, body: &[u8]) -> String {
        let message = signing_message(method, target, timestamp, body);
        Base64::encode_string(&self.signing_key.sign(&message).to_bytes())
    }
}

/// Assemble the byte string covered by a request signature.
pub fn signing_message(method: &str, target: &str, timestamp: i64, body: &[u8]) -> Vec<u8> {
    let mut message = format!("{method}\n{target}\n{timestamp}\n").into_bytes();
    message.extend_from_slice(body);
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signature, Verifier};

    #[test]
    fn seed_round_trips_through_base64() {
        let pair = AppKeyPair::from_seed([42u8; 32]);
        let restored = AppKeyPair::from_seed_base64(&pair.seed_base64()).unwrap();
        assert_eq!(pair.public_key_base64(), restored.public_key_base64());
    }

    #[test]
    fn rejects_short_seed() {
        let short = Base64::encode_string(&[1u8; 16]);
        let err = AppKeyPair::from_seed_base64(&short).unwrap_err();
        assert!(err.to_string().contains("expected 32 seed bytes, got 16"));
    }

    #[test]
    fn rejects_non_base64_seed() {
        assert!(AppKeyPair::from_seed_base64("not*base64").is_err());
    }

    #[test]
    fn signature_verifies_over_request_layout() {
        let pair = AppKeyPair::generate();
        let body = br#"{"requestid":"r1"}"#;
        let sig_b64 = pair.sign_request("POST", "/requestImageTokens", 1_700_000_000, body);

        let sig_bytes = Base64::decode_vec(&sig_b64).unwrap();
        let sig = Signature::from_slice(&sig_bytes).unwrap();
        let message = signing_message("POST", "/requestImageTokens", 1_700_000_000, body);
        assert!(pair.verifying_key().verify(&message, &sig).is_ok());

        let tampered = signing_message("POST", "/requestImageTokens", 1_700_000_001, body);
        assert!(pair.verifying_key().verify(&tampered, &sig).is_err());
    }

    #[test]
    fn signing_message_layout() {
        let msg = signing_message("GET", "/getCertificates?requestid=r1", 5, b"");
        assert_eq!(msg, b"GET\n/getCertificates?requestid=r1\n5\n");
    }

    #[test]
    fn debug_never_prints_secret_material() {
        let pair = AppKeyPair::from_seed([9u8; 32]);
        let seed = pair.seed_base64();
        let creds = Credentials::KeyPair(pair);
        let rendered = format!("{creds:?}");
        assert!(!rendered.contains(seed.as_str()));
        assert!(rendered.contains("[REDACTED]"));
    }
}
