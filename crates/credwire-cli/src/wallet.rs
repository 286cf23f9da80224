//! # Wallet Subcommand
//!
//! Pairing requests, pending signature requests, device registration, and
//! push notifications. Every command prints the backend's JSON response.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use credwire_client::WalletService;

use crate::print_json;

/// Arguments for the `credwire wallet` subcommand.
#[derive(Args, Debug)]
pub struct WalletArgs {
    #[command(subcommand)]
    pub command: WalletCommand,
}

/// Wallet subcommands.
#[derive(Subcommand, Debug)]
pub enum WalletCommand {
    /// Create a new pending login/signing request.
    Request {
        #[arg(long)]
        address: String,
        #[arg(long)]
        nonce: String,
        #[arg(long)]
        callback_url: String,
        #[arg(long)]
        document_url: String,
        /// Requested attribute OIDs.
        #[arg(long)]
        object_ids: String,
    },

    /// Show the next pending request for the default credential.
    Pending,

    /// Remove a pending request by nonce.
    Remove { nonce: String },

    /// Register a device token for push notifications.
    Register { device_token: String },

    /// Send a notification to a device.
    Notify {
        #[arg(long)]
        address: String,
        #[arg(long)]
        nonce: String,
        #[arg(long)]
        message: String,
    },
}

/// Execute the wallet subcommand.
pub async fn run_wallet(args: &WalletArgs, wallet: &WalletService) -> Result<u8> {
    let response = match &args.command {
        WalletCommand::Request {
            address,
            nonce,
            callback_url,
            document_url,
            object_ids,
        } => wallet
            .request(address, nonce, callback_url, document_url, object_ids)
            .await
            .context("failed to create pending request")?,
        WalletCommand::Pending => wallet
            .get_pending_signature_request()
            .await
            .context("failed to fetch pending request")?,
        WalletCommand::Remove { nonce } => wallet
            .remove_signature_request(nonce)
            .await
            .context("failed to remove pending request")?,
        WalletCommand::Register { device_token } => wallet
            .register_device(device_token)
            .await
            .context("failed to register device")?,
        WalletCommand::Notify {
            address,
            nonce,
            message,
        } => wallet
            .notify(address, nonce, message)
            .await
            .context("failed to send notification")?,
    };

    print_json(&response)?;
    Ok(0)
}
