//! # credwire-client -- Typed Rust client for the credential-issuance backend
//!
//! Provides typed access to the four backend services:
//! - **Claims** via [`ClaimIssuerService`]: request, fetch, and delete identity
//!   claim PEM bundles tied to a request ID
//! - **Tokens** via [`TokenIssuerService`]: fetch and delete token PEM bundles
//! - **Validation** via [`ValidateService`]: revocation status of credential
//!   addresses and token serial numbers
//! - **Wallet** via [`WalletService`]: pairing requests, pending signature
//!   requests, device registration, and push notifications
//!
//! ## Architecture
//!
//! Every service holds a clone of one [`BackendClient`], configured once with
//! the backend URL and application credentials. Each call is a single
//! request/response: the service forwards its parameters, validates the
//! `{ "data": { ... } }` envelope through [`envelope`], and returns a typed
//! value or a [`BackendError`]. Nothing is cached, retried, or recovered
//! locally; a pending issuance surfaces as [`BackendError::Pending`] for the
//! caller to poll.

pub mod auth;
pub mod claims;
pub mod config;
pub mod envelope;
pub mod error;
pub mod http;
pub mod pem;
pub mod tokens;
pub mod types;
pub mod validate;
pub mod wallet;

pub use auth::{AppKeyPair, Credentials};
pub use claims::ClaimIssuerService;
pub use config::{BackendConfig, ConfigError};
pub use error::BackendError;
pub use http::BackendClient;
pub use pem::PemBundle;
pub use tokens::TokenIssuerService;
pub use types::{DocumentImage, RequestInfo};
pub use validate::{TokenSerials, ValidateService};
pub use wallet::WalletService;

/// Top-level backend client. Holds one client per service.
#[derive(Debug, Clone)]
pub struct CredwireClient {
    claims: ClaimIssuerService,
    tokens: TokenIssuerService,
    validate: ValidateService,
    wallet: WalletService,
}

impl CredwireClient {
    /// Create a new backend client from configuration.
    pub fn new(config: BackendConfig) -> Result<Self, BackendError> {
        let http = BackendClient::new(config)?;
        Ok(Self::from_http(http))
    }

    /// Build every service over an existing [`BackendClient`].
    pub fn from_http(http: BackendClient) -> Self {
        Self {
            claims: ClaimIssuerService::new(http.clone()),
            tokens: TokenIssuerService::new(http.clone()),
            validate: ValidateService::new(http.clone()),
            wallet: WalletService::new(http),
        }
    }

    /// Access the claim issuer client.
    pub fn claims(&self) -> &ClaimIssuerService {
        &self.claims
    }

    /// Access the token issuer client.
    pub fn tokens(&self) -> &TokenIssuerService {
        &self.tokens
    }

    /// Access the revocation check client.
    pub fn validate(&self) -> &ValidateService {
        &self.validate
    }

    /// Access the wallet client.
    pub fn wallet(&self) -> &WalletService {
        &self.wallet
    }
}
