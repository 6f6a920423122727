//! HTTP helpers for JSON APIs with consistent timeouts and error handling. Feature
//! clients use these helpers to avoid duplicating request setup and to enforce a
//! predictable timeout policy. The helpers never log request bodies, which may
//! carry passwords.

use super::{config::AppConfig, errors::AppError};
use crate::APP_USER_AGENT;
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, instrument, warn};

/// Maximum number of error body characters surfaced to the UI.
const MAX_ERROR_CHARS: usize = 200;

/// JSON-over-HTTP client bound to one backend base URL.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Builds a client from the loaded configuration.
    ///
    /// # Errors
    /// Returns [`AppError::Config`] if the underlying HTTP client cannot be built.
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let http = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| AppError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
        })
    }

    /// Posts a JSON body and decodes the JSON response, whatever the status.
    /// The backend reports failures in the payload rather than the status
    /// line, so an error status with a decodable body still reaches the caller.
    ///
    /// # Errors
    /// Returns [`AppError::Network`]/[`AppError::Timeout`] when no response arrives,
    /// [`AppError::Parse`] for a success status whose body does not decode into `T`
    /// and [`AppError::Http`] for an error status whose body does not decode.
    #[instrument(skip(self, body), fields(base_url = %self.base_url))]
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let response = self.send_json(path, body).await?;

        let status = response.status();
        debug!(%status, "response received");
        let bytes = response.bytes().await.map_err(map_request_error)?;
        match serde_json::from_slice::<T>(&bytes) {
            Ok(value) => {
                if !status.is_success() {
                    warn!(%status, "backend answered with an error status and a JSON payload");
                }
                Ok(value)
            }
            Err(err) if status.is_success() => {
                Err(AppError::Parse(format!("Failed to decode response: {err}")))
            }
            Err(_) => Err(AppError::Http {
                status: status.as_u16(),
                message: sanitize_body(&String::from_utf8_lossy(&bytes)),
            }),
        }
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Response, AppError> {
        let url = build_url_with_base(&self.base_url, path);
        let payload = serde_json::to_vec(body)
            .map_err(|err| AppError::Serialization(format!("Failed to encode request: {err}")))?;

        self.http
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(map_request_error)
    }
}

/// Builds a URL from an explicit base URL and the provided path.
fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Maps transport errors into `AppError` variants with timeout detection.
fn map_request_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::Timeout("Request timed out. Please try again.".to_string())
    } else if err.is_builder() {
        AppError::Serialization(format!("Failed to build request: {err}"))
    } else {
        AppError::Network(format!("Unable to reach the server: {err}"))
    }
}

/// Sanitizes HTTP error bodies for user-facing messages by trimming and truncating.
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Deserialize)]
    struct Echo {
        ok: bool,
    }

    fn client_for(server: &MockServer, timeout: Duration) -> ApiClient {
        let config = AppConfig {
            api_base_url: server.uri(),
            request_timeout: timeout,
            ..AppConfig::default()
        };
        ApiClient::new(&config).expect("client builds")
    }

    #[test]
    fn build_url_joins_base_and_path() {
        assert_eq!(
            build_url_with_base("https://api.test/", "/login"),
            "https://api.test/login"
        );
        assert_eq!(
            build_url_with_base(" https://api.test ", "users"),
            "https://api.test/users"
        );
        assert_eq!(build_url_with_base("", "/login"), "/login");
    }

    #[test]
    fn sanitize_body_truncates_and_defaults() {
        assert_eq!(sanitize_body("   "), "Request failed.");
        assert_eq!(sanitize_body(" boom \n"), "boom");
        let long = "x".repeat(500);
        assert_eq!(sanitize_body(&long).len(), MAX_ERROR_CHARS);
    }

    #[tokio::test]
    async fn post_json_sends_json_and_decodes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/echo"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({ "hello": "world" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, Duration::from_secs(5));
        let echo: Echo = client
            .post_json("/echo", &json!({ "hello": "world" }))
            .await
            .expect("request succeeds");
        assert!(echo.ok);
    }

    #[tokio::test]
    async fn post_json_maps_undecodable_bodies() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/echo"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let client = client_for(&server, Duration::from_secs(5));
        let err = client
            .post_json::<_, Echo>("/echo", &json!({}))
            .await
            .expect_err("html is not json");
        assert!(matches!(err, AppError::Parse(_)));
    }

    #[tokio::test]
    async fn post_json_decodes_error_payloads() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/echo"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "ok": false })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/broken"))
            .respond_with(ResponseTemplate::new(500).set_body_string("stack trace"))
            .mount(&server)
            .await;

        let client = client_for(&server, Duration::from_secs(5));
        let echo: Echo = client
            .post_json("/echo", &json!({}))
            .await
            .expect("json payload is returned despite 401");
        assert!(!echo.ok);

        let err = client
            .post_json::<_, Echo>("/broken", &json!({}))
            .await
            .expect_err("non-json 500 is an error");
        assert_eq!(
            err,
            AppError::Http {
                status: 500,
                message: "stack trace".to_string()
            }
        );
    }

    #[tokio::test]
    async fn post_json_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/echo"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "ok": true }))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let client = client_for(&server, Duration::from_millis(200));
        let err = client
            .post_json::<_, Echo>("/echo", &json!({}))
            .await
            .expect_err("delay exceeds timeout");
        assert!(matches!(err, AppError::Timeout(_)));
    }

    #[tokio::test]
    async fn post_json_maps_connection_failures() {
        let config = AppConfig {
            api_base_url: "http://127.0.0.1:1".to_string(),
            request_timeout: Duration::from_secs(2),
            ..AppConfig::default()
        };
        let client = ApiClient::new(&config).expect("client builds");
        let err = client
            .post_json::<_, Echo>("/echo", &json!({}))
            .await
            .expect_err("nothing listens on port 1");
        assert!(err.is_transport());
    }
}
