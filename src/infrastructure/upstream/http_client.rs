//! # HTTP Client Utilities
//!
//! Shared HTTP client for the upstream service adapters.
//!
//! This module provides a reusable HTTP client wrapper with:
//! - A client-level request timeout
//! - Safe URL construction from a base URL and path segments
//! - JSON deserialization of 200 responses
//! - Uniform mapping of transport errors and non-200 statuses
//!
//! # Examples
//!
//! ```ignore
//! use loyalty_quote::infrastructure::upstream::http_client::HttpClient;
//!
//! let client = HttpClient::new(5000)?;
//! let url = HttpClient::endpoint("http://localhost:8081", &["fx", "USD"])?;
//! let body: FxRateBody = client.get_json(url).await?;
//! ```

use crate::infrastructure::upstream::error::{UpstreamError, UpstreamResult};
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client wrapper for upstream adapters.
#[derive(Debug, Clone)]
pub struct HttpClient {
    /// Inner reqwest client.
    client: Client,
    /// Request timeout in milliseconds.
    timeout_ms: u64,
}

impl HttpClient {
    /// Creates a new HTTP client with the specified timeout.
    ///
    /// # Arguments
    ///
    /// * `timeout_ms` - Request timeout in milliseconds.
    ///
    /// # Errors
    ///
    /// Returns `UpstreamError::Configuration` if the client cannot be created.
    pub fn new(timeout_ms: u64) -> UpstreamResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| {
                UpstreamError::configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client, timeout_ms })
    }

    /// Returns the configured timeout in milliseconds.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Builds `{base_url}/{segments...}`, percent-encoding each segment.
    ///
    /// # Errors
    ///
    /// Returns `UpstreamError::Configuration` if the base URL is invalid or
    /// cannot carry a path.
    pub fn endpoint(base_url: &str, segments: &[&str]) -> UpstreamResult<Url> {
        let mut url = Url::parse(base_url).map_err(|e| {
            UpstreamError::configuration(format!("Invalid base URL '{}': {}", base_url, e))
        })?;

        url.path_segments_mut()
            .map_err(|_| {
                UpstreamError::configuration(format!("Base URL '{}' cannot be a base", base_url))
            })?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    /// Makes a GET request and deserializes a 200 JSON response.
    ///
    /// # Errors
    ///
    /// Returns `UpstreamError::Timeout` or `UpstreamError::Connection` if the
    /// request fails, `UpstreamError::UnexpectedStatus` for any status other
    /// than 200 and `UpstreamError::Decode` if the body cannot be parsed.
    pub async fn get_json<T: DeserializeOwned>(&self, url: Url) -> UpstreamResult<T> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        self.handle_response(response).await
    }

    /// Checks the status and deserializes the JSON body.
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> UpstreamResult<T> {
        let status = response.status();

        if status == StatusCode::OK {
            response
                .json::<T>()
                .await
                .map_err(|e| UpstreamError::decode(format!("Failed to parse response: {}", e)))
        } else {
            let error_body = response.text().await.unwrap_or_default();
            Err(UpstreamError::unexpected_status(
                status.as_u16(),
                error_body.trim(),
            ))
        }
    }

    /// Maps a reqwest error to an UpstreamError.
    fn map_reqwest_error(&self, error: reqwest::Error) -> UpstreamError {
        if error.is_timeout() {
            UpstreamError::timeout(format!("Request timed out after {}ms", self.timeout_ms))
        } else if error.is_connect() {
            UpstreamError::connection(format!("Connection failed: {}", error))
        } else {
            UpstreamError::connection(format!("HTTP request failed: {}", error))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Deserialize, PartialEq)]
    struct Body {
        value: u32,
    }

    #[test]
    fn new_client() {
        let client = HttpClient::new(5000);
        assert!(client.is_ok());
        assert_eq!(client.unwrap().timeout_ms(), 5000);
    }

    #[test]
    fn endpoint_appends_segments() {
        let url = HttpClient::endpoint("http://localhost:8081", &["fx", "USD"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8081/fx/USD");
    }

    #[test]
    fn endpoint_handles_trailing_slash() {
        let url = HttpClient::endpoint("http://localhost:8082/", &["promo", "X"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8082/promo/X");
    }

    #[test]
    fn endpoint_encodes_segments() {
        let url = HttpClient::endpoint("http://localhost:8082", &["promo", "a/b c"]).unwrap();
        assert_eq!(url.path(), "/promo/a%2Fb%20c");
    }

    #[test]
    fn endpoint_rejects_garbage() {
        let result = HttpClient::endpoint("not a url", &["fx"]);
        assert!(matches!(result, Err(UpstreamError::Configuration { .. })));
    }

    #[tokio::test]
    async fn get_json_decodes_ok_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/thing"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"value": 7})))
            .mount(&server)
            .await;

        let client = HttpClient::new(1000).unwrap();
        let url = HttpClient::endpoint(&server.uri(), &["thing"]).unwrap();
        let body: Body = client.get_json(url).await.unwrap();
        assert_eq!(body, Body { value: 7 });
    }

    #[tokio::test]
    async fn get_json_rejects_non_200_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"value": 7})))
            .mount(&server)
            .await;

        let client = HttpClient::new(1000).unwrap();
        let url = HttpClient::endpoint(&server.uri(), &["thing"]).unwrap();
        let result: UpstreamResult<Body> = client.get_json(url).await;
        assert_eq!(result.unwrap_err().status(), Some(201));
    }

    #[tokio::test]
    async fn get_json_reports_decode_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = HttpClient::new(1000).unwrap();
        let url = HttpClient::endpoint(&server.uri(), &["thing"]).unwrap();
        let result: UpstreamResult<Body> = client.get_json(url).await;
        assert!(matches!(result, Err(UpstreamError::Decode { .. })));
    }

    #[tokio::test]
    async fn get_json_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"value": 7}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let client = HttpClient::new(50).unwrap();
        let url = HttpClient::endpoint(&server.uri(), &["thing"]).unwrap();
        let result: UpstreamResult<Body> = client.get_json(url).await;
        assert!(result.unwrap_err().is_timeout());
    }
}
