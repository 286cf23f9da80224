//! Backend client configuration.
//!
//! Holds the backend base URL, the application credentials used to
//! authenticate each call, and the request timeout. Load from the
//! environment with [`BackendConfig::from_env`] or construct explicitly
//! for staging/testing.

use url::Url;
use zeroize::Zeroizing;

use crate::auth::{AppKeyPair, Credentials};

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for connecting to the credential backend.
///
/// Custom `Debug` implementation redacts credential material
/// to prevent leakage in log output.
#[derive(Clone)]
pub struct BackendConfig {
    /// Base URL every endpoint path is resolved against.
    pub backend_url: Url,
    /// Credentials attached to every request.
    pub credentials: Credentials,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("backend_url", &self.backend_url)
            .field("credentials", &self.credentials)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl BackendConfig {
    /// Anonymous configuration for `backend_url` with the default timeout.
    /// Only non-privileged operations succeed without credentials.
    pub fn new(backend_url: Url) -> Self {
        Self {
            backend_url,
            credentials: Credentials::Anonymous,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Replace the credentials.
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `CREDWIRE_BACKEND_URL` (required)
    /// - `CREDWIRE_APP_ID` / `CREDWIRE_APP_SECRET` (optional, both or neither)
    /// - `CREDWIRE_APP_KEY` (optional base64 Ed25519 seed; wins over id/secret)
    /// - `CREDWIRE_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup, using the
    /// same variable names as [`BackendConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_url = lookup("CREDWIRE_BACKEND_URL").ok_or(ConfigError::MissingBackendUrl)?;
        let backend_url = Url::parse(&raw_url).map_err(|e| {
            ConfigError::InvalidUrl("CREDWIRE_BACKEND_URL".to_string(), e.to_string())
        })?;

        let credentials = match (
            lookup("CREDWIRE_APP_KEY"),
            lookup("CREDWIRE_APP_ID"),
            lookup("CREDWIRE_APP_SECRET"),
        ) {
            (Some(seed), _, _) => {
                let seed = Zeroizing::new(seed);
                Credentials::KeyPair(AppKeyPair::from_seed_base64(seed.trim())?)
            }
            (None, Some(app_id), Some(app_secret)) => Credentials::AppSecret {
                app_id,
                app_secret: Zeroizing::new(app_secret),
            },
            (None, None, None) => Credentials::Anonymous,
            (None, _, _) => return Err(ConfigError::IncompleteAppSecret),
        };

        Ok(Self {
            backend_url,
            credentials,
            timeout_secs: lookup("CREDWIRE_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Create a configuration pointing to a local mock server (for testing).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if the localhost URL cannot be parsed.
    pub fn local_mock(port: u16) -> Result<Self, ConfigError> {
        let backend_url = Url::parse(&format!("http://127.0.0.1:{port}"))
            .map_err(|e| ConfigError::InvalidUrl("localhost".to_string(), e.to_string()))?;
        Ok(Self {
            backend_url,
            credentials: Credentials::Anonymous,
            timeout_secs: 5,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("CREDWIRE_BACKEND_URL environment variable is required")]
    MissingBackendUrl,
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("CREDWIRE_APP_ID and CREDWIRE_APP_SECRET must be set together")]
    IncompleteAppSecret,
    #[error("invalid application key: {0}")]
    InvalidAppKey(String),
}
