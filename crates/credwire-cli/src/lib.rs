//! # credwire-cli: Command-line front end for the credential backend
//!
//! Provides the `credwire` command-line interface over `credwire-client`.
//!
//! ## Subcommands
//!
//! - `credwire claims`: request, fetch, and delete claim PEM bundles.
//! - `credwire tokens`: fetch and delete token PEM bundles.
//! - `credwire validate`: revocation checks for credentials and tokens.
//! - `credwire wallet`: pairing requests, pending requests, devices, notifications.
//! - `credwire keygen`: generate an application Ed25519 key.
//!
//! ## Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | success |
//! | 1 | error |
//! | 2 | issuance still pending after polling |
//! | 3 | revoked (or not confirmed valid) |
//!
//! ```bash
//! export CREDWIRE_BACKEND_URL=https://issuer.example.com/api
//! credwire claims get 6f1c... --poll-attempts 10
//! credwire validate tokens AB12 CD34
//! ```

pub mod claims;
pub mod keygen;
pub mod tokens;
pub mod validate;
pub mod wallet;

use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use credwire_client::{BackendConfig, BackendError};

/// Exit code when the issuer is still processing after every poll attempt.
pub const EXIT_PENDING: u8 = 2;
/// Exit code when an address or serial is revoked.
pub const EXIT_REVOKED: u8 = 3;

/// Polling flags for commands that may return a pending result.
#[derive(Args, Debug, Clone)]
pub struct PollArgs {
    /// Extra attempts while the issuer reports the request as pending.
    #[arg(long, default_value_t = 0)]
    pub poll_attempts: u32,

    /// Seconds to wait between attempts.
    #[arg(long, default_value_t = 5)]
    pub poll_interval_secs: u64,
}

/// Run `call`, repeating it while it fails with [`BackendError::Pending`]
/// and attempts remain. Any other outcome is returned as-is.
pub async fn poll_while_pending<T, F, Fut>(poll: &PollArgs, mut call: F) -> Result<T, BackendError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, BackendError>>,
{
    let mut remaining = poll.poll_attempts;
    loop {
        match call().await {
            Err(e) if e.is_pending() && remaining > 0 => {
                remaining -= 1;
                tracing::info!(remaining, "issuance pending, polling again");
                tokio::time::sleep(Duration::from_secs(poll.poll_interval_secs)).await;
            }
            other => return other,
        }
    }
}

/// Resolve backend configuration from the environment, with CLI overrides.
pub fn resolve_config(
    backend_url: Option<&str>,
    timeout_secs: Option<u64>,
) -> Result<BackendConfig> {
    let mut config = BackendConfig::from_lookup(|var| match (var, backend_url) {
        ("CREDWIRE_BACKEND_URL", Some(url)) => Some(url.to_string()),
        _ => std::env::var(var).ok(),
    })
    .context("failed to load backend configuration")?;

    if let Some(secs) = timeout_secs {
        config.timeout_secs = secs;
    }
    tracing::debug!(?config, "resolved backend configuration");
    Ok(config)
}

/// Pretty-print a value as JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to render JSON output")?;
    println!("{rendered}");
    Ok(())
}
