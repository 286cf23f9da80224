//! # Keygen Subcommand
//!
//! Generates an application Ed25519 key for signing token-issuer requests.
//! The seed is written to a file (never printed) and the public key is
//! printed for registration with the backend.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;

use credwire_client::AppKeyPair;

/// Arguments for the `credwire keygen` subcommand.
#[derive(Args, Debug)]
pub struct KeygenArgs {
    /// File to write the base64 seed to (use as `CREDWIRE_APP_KEY`).
    #[arg(long, short, default_value = "credwire.key")]
    pub output: PathBuf,

    /// Overwrite an existing key file.
    #[arg(long)]
    pub force: bool,
}

/// Execute the keygen subcommand.
pub fn run_keygen(args: &KeygenArgs) -> Result<u8> {
    let pair = write_new_key(&args.output, args.force)?;
    println!("OK: generated Ed25519 application key");
    println!("  Seed file:  {}", args.output.display());
    println!("  Public key: {}", pair.public_key_base64());
    Ok(0)
}

fn write_new_key(path: &Path, force: bool) -> Result<AppKeyPair> {
    if path.exists() && !force {
        bail!(
            "key file already exists: {} (pass --force to overwrite)",
            path.display()
        );
    }
    let pair = AppKeyPair::generate();
    std::fs::write(path, pair.seed_base64().as_bytes())
        .with_context(|| format!("failed to write key file: {}", path.display()))?;
    Ok(pair)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn written_seed_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.key");
        let pair = write_new_key(&path, false).unwrap();

        let seed = std::fs::read_to_string(&path).unwrap();
        let restored = AppKeyPair::from_seed_base64(seed.trim()).unwrap();
        assert_eq!(restored.public_key_base64(), pair.public_key_base64());
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.key");
        std::fs::write(&path, "existing").unwrap();

        assert!(write_new_key(&path, false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "existing");

        write_new_key(&path, true).unwrap();
        assert_ne!(std::fs::read_to_string(&path).unwrap(), "existing");
    }
}
