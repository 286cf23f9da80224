//! # Tokens Subcommand
//!
//! Fetch and delete token PEM bundles. The token issuer expects requests
//! signed with the application key (`CREDWIRE_APP_KEY`).

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use credwire_client::TokenIssuerService;

use crate::{poll_while_pending, print_json, PollArgs, EXIT_PENDING};

/// Arguments for the `credwire tokens` subcommand.
#[derive(Args, Debug)]
pub struct TokensArgs {
    #[command(subcommand)]
    pub command: TokensCommand,
}

/// Token subcommands.
#[derive(Subcommand, Debug)]
pub enum TokensCommand {
    /// Fetch the token PEM bundle for a request.
    Get {
        request_id: String,
        #[command(flatten)]
        poll: PollArgs,
    },

    /// Delete the tokens of one request.
    Delete { request_id: String },

    /// Delete all tokens of the default credential.
    DeleteAll,
}

/// Execute the tokens subcommand.
pub async fn run_tokens(args: &TokensArgs, tokens: &TokenIssuerService) -> Result<u8> {
    match &args.command {
        TokensCommand::Get { request_id, poll } => {
            match poll_while_pending(poll, || tokens.get_tokens(request_id)).await {
                Ok(bundle) => {
                    print_json(&bundle)?;
                    Ok(0)
                }
                Err(e) if e.is_pending() => {
                    eprintln!("PENDING: tokens for {request_id} are not issued yet");
                    Ok(EXIT_PENDING)
                }
                Err(e) => Err(e).context("failed to fetch tokens"),
            }
        }
        TokensCommand::Delete { request_id } => {
            tokens
                .delete_tokens(request_id)
                .await
                .context("failed to delete tokens")?;
            println!("OK: deleted tokens for {request_id}");
            Ok(0)
        }
        TokensCommand::DeleteAll => {
            tokens
                .delete_all_tokens()
                .await
                .context("failed to delete all tokens")?;
            println!("OK: deleted all tokens");
            Ok(0)
        }
    }
}
