//! # Backend HTTP Collaborator
//!
//! [`BackendClient`] performs authenticated GET/POST calls against the
//! configured backend URL and returns the parsed JSON body. It knows nothing
//! about envelopes or success flags; that is the job of [`crate::envelope`].
//!
//! Endpoint paths are relative (`getTokens`, `isRevoked`, ...) and are
//! resolved against the base URL, so a base of `https://host/issuer` calls
//! `https://host/issuer/getTokens`.
//!
//! There is no retry here. Transport failures and non-2xx statuses surface
//! to the caller immediately.

use std::time::Duration;

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::auth::{self, Credentials};
use crate::config::BackendConfig;
use crate::error::BackendError;

/// Shared HTTP client for every backend service.
///
/// Cheap to clone: the inner `reqwest::Client` is reference-counted.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Credentials,
}

impl BackendClient {
    /// Build a client from configuration.
    pub fn new(config: BackendConfig) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| BackendError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        Ok(Self {
            http,
            base_url: with_trailing_slash(config.backend_url),
            credentials: config.credentials,
        })
    }

    /// The normalized base URL (always ends in `/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET {base}/{path}?{params}` and parse the JSON body.
    pub async fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<Value, BackendError> {
        self.send(Method::GET, path, params, None).await
    }

    /// `POST {base}/{path}?{params}` with a JSON body, and parse the JSON response.
    pub async fn post<B>(
        &self,
        path: &str,
        params: &[(&str, &str)],
        body: &B,
    ) -> Result<Value, BackendError>
    where
        B: Serialize + ?Sized,
    {
        let bytes = serde_json::to_vec(body).map_err(|e| BackendError::Serialization {
            endpoint: endpoint_label(&Method::POST, path),
            source: e,
        })?;
        self.send(Method::POST, path, params, Some(bytes)).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, &str)],
        body: Option<Vec<u8>>,
    ) -> Result<Value, BackendError> {
        let endpoint = endpoint_label(&method, path);
        let url = self.endpoint_url(path, params)?;

        tracing::debug!(endpoint = %endpoint, params = params.len(), "calling credential backend");

        let mut req = self.http.request(method.clone(), url.clone());
        req = self.authorize(req, &method, &url, body.as_deref().unwrap_or_default());
        if let Some(bytes) = body {
            req = req
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(bytes);
        }

        let resp = req.send().await.map_err(|e| BackendError::Http {
            endpoint: endpoint.clone(),
            source: e,
        })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(endpoint = %endpoint, status, "credential backend returned error status");
            return Err(BackendError::ApiError {
                endpoint,
                status,
                body,
            });
        }

        resp.json().await.map_err(|e| BackendError::Deserialization {
            endpoint,
            source: e,
        })
    }

    /// Resolve `path` against the base URL and append `params` as the query.
    /// No `?` is emitted when `params` is empty.
    fn endpoint_url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, BackendError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| BackendError::InvalidEndpoint {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params.iter().copied());
        }
        Ok(url)
    }

    fn authorize(
        &self,
        req: reqwest::RequestBuilder,
        method: &Method,
        url: &Url,
        body: &[u8],
    ) -> reqwest::RequestBuilder {
        match &self.credentials {
            Credentials::Anonymous => req,
            Credentials::AppSecret { app_id, app_secret } => {
                req.basic_auth(app_id, Some(app_secret.as_str()))
            }
            Credentials::KeyPair(pair) => {
                let timestamp = chrono::Utc::now().timestamp();
                let signature =
                    pair.sign_request(method.as_str(), &request_target(url), timestamp, body);
                req.header(auth::APP_KEY_HEADER, pair.public_key_base64())
                    .header(auth::APP_TIMESTAMP_HEADER, timestamp.to_string())
                    .header(auth::APP_SIGNATURE_HEADER, signature)
            }
        }
    }
}

/// `"GET getTokens"`-style label used in errors and log events.
fn endpoint_label(method: &Method, path: &str) -> String {
    format!("{method} {path}")
}

/// The origin-form request target: path plus query, as sent on the wire.
pub(crate) fn request_target(url: &Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{query}", url.path()),
        None => url.path().to_string(),
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> BackendClient {
        BackendClient::new(BackendConfig::new(Url::parse(base).unwrap())).unwrap()
    }

    #[test]
    fn base_path_is_preserved_on_join() {
        let c = client("https://issuer.example.com/v2/issuer");
        let url = c.endpoint_url("getTokens", &[("requestid", "r1")]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://issuer.example.com/v2/issuer/getTokens?requestid=r1"
        );
    }

    #[test]
    fn empty_params_emit_no_query() {
        let c = client("http://127.0.0.1:9000");
        let url = c.endpoint_url("deleteAllRequests", &[]).unwrap();
        assert_eq!(url.query(), None);
        assert_eq!(request_target(&url), "/deleteAllRequests");
    }

    #[test]
    fn params_are_percent_encoded() {
        let c = client("http://127.0.0.1:9000/");
        let url = c
            .endpoint_url("isRevoked", &[("address", "0xAB12,0xCD34")])
            .unwrap();
        assert_eq!(
            request_target(&url),
            "/isRevoked?address=0xAB12%2C0xCD34"
        );
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs, vec![("address".into(), "0xAB12,0xCD34".into())]);
    }

    #[test]
    fn endpoint_label_format() {
        assert_eq!(endpoint_label(&Method::GET, "getTokens"), "GET getTokens");
    }
}
