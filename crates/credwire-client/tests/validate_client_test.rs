//! Contract tests for ValidateService (`GET isRevoked`).
//!
//! Covers serial-number normalization and the fail-closed revocation
//! policy: only a JSON `false` counts as "not revoked".

use credwire_client::{BackendConfig, BackendError, CredwireClient};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(mock_server: &MockServer) -> CredwireClient {
    CredwireClient::new(BackendConfig::new(mock_server.uri().parse().unwrap())).unwrap()
}

async fn mount_status(server: &MockServer, address: &str, data: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/isRevoked"))
        .and(query_param("address", address))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": data })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn validate_credential_accepts_literal_false() {
    let mock_server = MockServer::start().await;
    mount_status(&mock_server, "0xC0FFEE", json!({"isRevoked": false})).await;

    let client = test_client(&mock_server);
    assert!(client.validate().validate_credential("0xC0FFEE").await.unwrap());
}

#[tokio::test]
async fn validate_tokens_prefixes_and_joins_serials() {
    let mock_server = MockServer::start().await;
    mount_status(&mock_server, "0xAB12,0xCD34", json!({"isRevoked": false})).await;

    let client = test_client(&mock_server);
    assert!(client
        .validate()
        .validate_tokens(["AB12", "CD34"])
        .await
        .unwrap());
}

#[tokio::test]
async fn validate_tokens_passes_string_through() {
    let mock_server = MockServer::start().await;
    mount_status(&mock_server, "0xAB12,0xCD34", json!({"isRevoked": false})).await;

    let client = test_client(&mock_server);
    assert!(client
        .validate()
        .validate_tokens("0xAB12,0xCD34")
        .await
        .unwrap());
}

#[tokio::test]
async fn anything_but_false_is_revoked() {
    let verdicts = [
        json!({"isRevoked": true}),
        json!({}),
        json!({"isRevoked": null}),
        json!({"isRevoked": "false"}),
        json!({"isRevoked": 0}),
    ];

    for data in verdicts {
        let mock_server = MockServer::start().await;
        mount_status(&mock_server, "0xDEAD", data.clone()).await;

        let client = test_client(&mock_server);
        match client.validate().validate_credential("0xDEAD").await {
            Err(BackendError::Revoked { address }) => assert_eq!(address, "0xDEAD"),
            other => panic!("data {data} should be treated as revoked, got: {other:?}"),
        }
    }
}

#[tokio::test]
async fn revoked_token_error_carries_joined_address() {
    let mock_server = MockServer::start().await;
    mount_status(&mock_server, "0x01,0x02", json!({"isRevoked": true})).await;

    let client = test_client(&mock_server);
    let serials = vec!["01".to_string(), "02".to_string()];
    let err = client.validate().validate_tokens(serials).await.unwrap_err();
    assert!(err.is_revoked());
    assert_eq!(err.to_string(), "address got revoked: 0x01,0x02");
}

#[tokio::test]
async fn missing_data_is_not_a_revocation() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/isRevoked"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"isRevoked": false})))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client.validate().validate_credential("0xC0FFEE").await.unwrap_err();
    assert!(matches!(err, BackendError::MissingData { .. }), "got: {err:?}");
}
