//! Exit-code behavior of the subcommand handlers against a mock backend.

use credwire_cli::claims::{run_claims, ClaimsArgs, ClaimsCommand};
use credwire_cli::tokens::{run_tokens, TokensArgs, TokensCommand};
use credwire_cli::validate::{run_validate, ValidateArgs, ValidateCommand};
use credwire_cli::wallet::{run_wallet, WalletArgs, WalletCommand};
use credwire_cli::{PollArgs, EXIT_PENDING, EXIT_REVOKED};
use credwire_client::{BackendConfig, CredwireClient};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(mock_server: &MockServer) -> CredwireClient {
    CredwireClient::new(BackendConfig::new(mock_server.uri().parse().unwrap())).unwrap()
}

fn no_poll() -> PollArgs {
    PollArgs {
        poll_attempts: 0,
        poll_interval_secs: 0,
    }
}

#[tokio::test]
async fn pending_claims_exit_with_pending_code() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/getTokens"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"result": false}})),
        )
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let args = ClaimsArgs {
        command: ClaimsCommand::Get {
            request_id: "req-1".into(),
            poll: PollArgs {
                poll_attempts: 2,
                poll_interval_secs: 0,
            },
        },
    };
    assert_eq!(run_claims(&args, client.claims()).await.unwrap(), EXIT_PENDING);
}

#[tokio::test]
async fn issued_tokens_exit_zero() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/getCertificates"))
        .and(query_param("requestid", "req-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"result": true, "pems": "-----BEGIN A-----\n-----BEGIN B-----"}
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let args = TokensArgs {
        command: TokensCommand::Get {
            request_id: "req-2".into(),
            poll: no_poll(),
        },
    };
    assert_eq!(run_tokens(&args, client.tokens()).await.unwrap(), 0);
}

#[tokio::test]
async fn failed_delete_is_an_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/deleteAllRequests"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"result": false}})),
        )
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let args = ClaimsArgs {
        command: ClaimsCommand::DeleteAll,
    };
    let err = run_claims(&args, client.claims()).await.unwrap_err();
    assert!(format!("{err:#}").contains("failed to delete all claims"));
}

#[tokio::test]
async fn revoked_serials_exit_with_revoked_code() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/isRevoked"))
        .and(query_param("address", "0xAB12,0xCD34"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"isRevoked": true}})),
        )
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let args = ValidateArgs {
        command: ValidateCommand::Tokens {
            serials: vec!["AB12".into(), "CD34".into()],
            formatted: None,
        },
    };
    assert_eq!(
        run_validate(&args, client.validate()).await.unwrap(),
        EXIT_REVOKED
    );
}

#[tokio::test]
async fn valid_credential_exits_zero() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/isRevoked"))
        .and(query_param("address", "0xC0FFEE"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"isRevoked": false}})),
        )
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let args = ValidateArgs {
        command: ValidateCommand::Credential {
            address: "0xC0FFEE".into(),
        },
    };
    assert_eq!(run_validate(&args, client.validate()).await.unwrap(), 0);
}

#[tokio::test]
async fn backend_error_status_is_an_error_not_revoked() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/isRevoked"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let args = ValidateArgs {
        command: ValidateCommand::Credential {
            address: "0xC0FFEE".into(),
        },
    };
    assert!(run_validate(&args, client.validate()).await.is_err());
}

#[tokio::test]
async fn wallet_pending_prints_and_exits_zero() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/getPendingRequest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"result": true, "nonce": "n-1"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let args = WalletArgs {
        command: WalletCommand::Pending,
    };
    assert_eq!(run_wallet(&args, client.wallet()).await.unwrap(), 0);
}
