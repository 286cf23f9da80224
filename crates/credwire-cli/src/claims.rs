//! # Claims Subcommand
//!
//! Request, fetch, and delete claim PEM bundles.
//!
//! A claim request is assembled from an optional JSON file (the
//! `RequestInfo` wire shape) overlaid with command-line flags, so a saved
//! template can be reused with a new request ID or extra attributes.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};

use credwire_client::{ClaimIssuerService, DocumentImage, RequestInfo};

use crate::{poll_while_pending, print_json, PollArgs, EXIT_PENDING};

/// Arguments for the `credwire claims` subcommand.
#[derive(Args, Debug)]
pub struct ClaimsArgs {
    #[command(subcommand)]
    pub command: ClaimsCommand,
}

/// Claim subcommands.
#[derive(Subcommand, Debug)]
pub enum ClaimsCommand {
    /// Fetch the claim PEM bundle for a request.
    Get {
        request_id: String,
        #[command(flatten)]
        poll: PollArgs,
    },

    /// Submit a claim request with attributes and optional document images.
    Request(RequestClaimsArgs),

    /// Delete the claims of one request.
    Delete { request_id: String },

    /// Delete all claims of the default credential.
    DeleteAll,
}

/// Flags for `credwire claims request`.
#[derive(Args, Debug, Default)]
pub struct RequestClaimsArgs {
    /// JSON file with a RequestInfo template.
    #[arg(long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Request ID (default: the file's, or a fresh UUID).
    #[arg(long)]
    pub request_id: Option<String>,

    /// Expiry of the issued claims (RFC 3339).
    #[arg(long)]
    pub expiry: Option<DateTime<Utc>>,

    /// Attribute as OID=VALUE. Repeatable.
    #[arg(long = "attribute", value_name = "OID=VALUE", value_parser = parse_attribute)]
    pub attributes: Vec<(String, String)>,

    /// Document image file. Repeatable.
    #[arg(long = "image", value_name = "PATH")]
    pub images: Vec<PathBuf>,
}

/// Execute the claims subcommand.
pub async fn run_claims(args: &ClaimsArgs, claims: &ClaimIssuerService) -> Result<u8> {
    match &args.command {
        ClaimsCommand::Get { request_id, poll } => {
            match poll_while_pending(poll, || claims.get_claims(request_id)).await {
                Ok(bundle) => {
                    print_json(&bundle)?;
                    Ok(0)
                }
                Err(e) if e.is_pending() => {
                    eprintln!("PENDING: claims for {request_id} are not issued yet");
                    Ok(EXIT_PENDING)
                }
                Err(e) => Err(e).context("failed to fetch claims"),
            }
        }
        ClaimsCommand::Request(request_args) => {
            let request = build_request(request_args)?;
            claims
                .request_image_claims(&request)
                .await
                .context("claim request was not accepted")?;
            println!("OK: requested claims");
            println!("  Request ID: {}", request.request_id);
            Ok(0)
        }
        ClaimsCommand::Delete { request_id } => {
            claims
                .delete_claims(request_id)
                .await
                .context("failed to delete claims")?;
            println!("OK: deleted claims for {request_id}");
            Ok(0)
        }
        ClaimsCommand::DeleteAll => {
            claims
                .delete_all_claims()
                .await
                .context("failed to delete all claims")?;
            println!("OK: deleted all claims");
            Ok(0)
        }
    }
}

/// Assemble a [`RequestInfo`] from the template file and flags.
pub fn build_request(args: &RequestClaimsArgs) -> Result<RequestInfo> {
    let mut request = match (&args.file, args.expiry) {
        (Some(path), _) => read_template(path)?,
        (None, Some(expiry)) => RequestInfo::new(expiry),
        (None, None) => bail!("either --file or --expiry is required"),
    };

    if let Some(expiry) = args.expiry {
        request.expiry = expiry;
    }
    if let Some(id) = &args.request_id {
        request.request_id = id.clone();
    }
    for (oid, value) in &args.attributes {
        request.attributes.insert(oid.clone(), value.clone());
    }
    for path in &args.images {
        request.images.push(read_image(path)?);
    }
    Ok(request)
}

fn read_template(path: &Path) -> Result<RequestInfo> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read request file: {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("invalid request file: {}", path.display()))
}

fn read_image(path: &Path) -> Result<DocumentImage> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read image: {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .with_context(|| format!("image path has no file name: {}", path.display()))?;
    Ok(DocumentImage::from_bytes(name, &bytes))
}

fn parse_attribute(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((oid, value)) if !oid.is_empty() => Ok((oid.to_string(), value.to_string())),
        _ => Err(format!("expected OID=VALUE, got {raw:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parse_attribute_splits_on_first_equals() {
        assert_eq!(
            parse_attribute("2.5.4.3=Alice=Admin").unwrap(),
            ("2.5.4.3".to_string(), "Alice=Admin".to_string())
        );
        assert!(parse_attribute("no-separator").is_err());
        assert!(parse_attribute("=value").is_err());
    }

    #[test]
    fn build_request_requires_file_or_expiry() {
        let err = build_request(&RequestClaimsArgs::default()).unwrap_err();
        assert!(err.to_string().contains("--file or --expiry"));
    }

    #[test]
    fn build_request_from_flags() {
        let expiry = Utc.with_ymd_and_hms(2027, 3, 1, 0, 0, 0).unwrap();
        let args = RequestClaimsArgs {
            request_id: Some("req-9".into()),
            expiry: Some(expiry),
            attributes: vec![("2.5.4.6".into(), "NL".into())],
            ..Default::default()
        };
        let request = build_request(&args).unwrap();
        assert_eq!(request.request_id, "req-9");
        assert_eq!(request.expiry, expiry);
        assert_eq!(request.attributes.get("2.5.4.6").map(String::as_str), Some("NL"));
        assert!(request.images.is_empty());
    }

    #[test]
    fn build_request_overlays_template_and_images() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("request.json");
        std::fs::write(
            &template,
            r#"{"requestid":"from-file","expiry":"2027-01-01T00:00:00Z","attributes":{"2.5.4.3":"Alice"}}"#,
        )
        .unwrap();
        let image = dir.path().join("passport.jpg");
        std::fs::write(&image, b"img").unwrap();

        let args = RequestClaimsArgs {
            file: Some(template),
            attributes: vec![("2.5.4.6".into(), "NL".into())],
            images: vec![image],
            ..Default::default()
        };
        let request = build_request(&args).unwrap();
        assert_eq!(request.request_id, "from-file");
        assert_eq!(request.attributes.len(), 2);
        assert_eq!(request.images.len(), 1);
        assert_eq!(request.images[0].name, "passport.jpg");
        assert_eq!(request.images[0].data, "aW1n");
    }

    #[test]
    fn build_request_reports_unreadable_template() {
        let args = RequestClaimsArgs {
            file: Some(PathBuf::from("/nonexistent/request.json")),
            ..Default::default()
        };
        let err = build_request(&args).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read request file"));
    }
}
