//! # Validate Subcommand
//!
//! Revocation checks for credential addresses and token serial numbers.
//! A revoked (or unconfirmed) result exits with [`EXIT_REVOKED`] rather
//! than the generic error code, so scripts can tell the two apart.

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};

use credwire_client::{BackendError, TokenSerials, ValidateService};

use crate::EXIT_REVOKED;

/// Arguments for the `credwire validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(subcommand)]
    pub command: ValidateCommand,
}

/// Validate subcommands.
#[derive(Subcommand, Debug)]
pub enum ValidateCommand {
    /// Check a credential address.
    Credential { address: String },

    /// Check token serial numbers.
    Tokens {
        /// Bare hex serial numbers; each is sent as `0x<serial>`.
        #[arg(value_name = "SERIAL", conflicts_with = "formatted")]
        serials: Vec<String>,

        /// Pre-formatted list (`0xAB12,0xCD34`), sent unchanged.
        #[arg(long, value_name = "LIST")]
        formatted: Option<String>,
    },
}

/// Execute the validate subcommand.
pub async fn run_validate(args: &ValidateArgs, validate: &ValidateService) -> Result<u8> {
    let (subject, outcome) = match &args.command {
        ValidateCommand::Credential { address } => (
            address.clone(),
            validate.validate_credential(address).await,
        ),
        ValidateCommand::Tokens {
            serials,
            formatted,
        } => {
            let serials = token_serials(serials, formatted.as_deref())?;
            let subject = serials.to_address();
            (subject, validate.validate_tokens(serials).await)
        }
    };

    match outcome {
        Ok(_) => {
            println!("OK: {subject} is valid");
            Ok(0)
        }
        Err(BackendError::Revoked { address }) => {
            println!("REVOKED: {address}");
            Ok(EXIT_REVOKED)
        }
        Err(e) => Err(e).context("revocation check failed"),
    }
}

fn token_serials(serials: &[String], formatted: Option<&str>) -> Result<TokenSerials> {
    match formatted {
        Some(list) => Ok(TokenSerials::from(list)),
        None if serials.is_empty() => bail!("at least one SERIAL or --formatted is required"),
        None => Ok(TokenSerials::from(serials.to_vec())),
    }
}
