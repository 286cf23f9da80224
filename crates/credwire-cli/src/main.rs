//! # credwire CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use credwire_cli::claims::{run_claims, ClaimsArgs};
use credwire_cli::keygen::{run_keygen, KeygenArgs};
use credwire_cli::resolve_config;
use credwire_cli::tokens::{run_tokens, TokensArgs};
use credwire_cli::validate::{run_validate, ValidateArgs};
use credwire_cli::wallet::{run_wallet, WalletArgs};
use credwire_client::CredwireClient;

/// Command-line client for the credential-issuance backend.
///
/// Backend settings come from `CREDWIRE_*` environment variables; the
/// global flags override them.
#[derive(Parser, Debug)]
#[command(name = "credwire", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Backend base URL (overrides CREDWIRE_BACKEND_URL).
    #[arg(long, global = true)]
    backend_url: Option<String>,

    /// Request timeout in seconds (overrides CREDWIRE_TIMEOUT_SECS).
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Request, fetch, and delete claims.
    Claims(ClaimsArgs),

    /// Fetch and delete tokens.
    Tokens(TokensArgs),

    /// Check credentials and token serials against the revocation ledger.
    Validate(ValidateArgs),

    /// Wallet pairing requests, devices, and notifications.
    Wallet(WalletArgs),

    /// Generate an application Ed25519 key.
    Keygen(KeygenArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "credwire CLI starting");

    match run(cli).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

async fn run(cli: Cli) -> Result<u8> {
    if let Commands::Keygen(args) = &cli.command {
        return run_keygen(args);
    }

    let config = resolve_config(cli.backend_url.as_deref(), cli.timeout_secs)?;
    let client = CredwireClient::new(config).context("failed to build backend client")?;

    match &cli.command {
        Commands::Claims(args) => run_claims(args, client.claims()).await,
        Commands::Tokens(args) => run_tokens(args, client.tokens()).await,
        Commands::Validate(args) => run_validate(args, client.validate()).await,
        Commands::Wallet(args) => run_wallet(args, client.wallet()).await,
        Commands::Keygen(args) => run_keygen(args),
    }
}
