// SPDX-FileCopyrightText: 2026 Kaiwa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Gemini `generateContent` API.
//!
//! One outbound call per invocation; no retry and no client-side timeout.
//! Bounded latency and retry policy belong to an outer operational layer.

use kaiwa_core::KaiwaError;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::debug;

use crate::types::{ApiErrorResponse, GenerateContentRequest, GenerateContentResponse};

/// HTTP client for Gemini API communication.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Creates a new Gemini API client.
    ///
    /// # Arguments
    /// * `api_key` - Gemini API key for authentication
    /// * `model` - Model identifier (e.g., "gemini-2.5-flash")
    /// * `base_url` - API base URL, overridable for tests
    pub fn new(api_key: &str, model: String, base_url: String) -> Result<Self, KaiwaError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(api_key)
                .map_err(|e| KaiwaError::Config(format!("invalid API key header value: {e}")))?,
        );
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| KaiwaError::upstream("failed to build HTTP client", e))?;

        Ok(Self {
            client,
            base_url,
            model,
        })
    }

    /// Returns the model identifier requests are sent to.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends a single `generateContent` request and returns the parsed
    /// response envelope.
    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, KaiwaError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        );

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| KaiwaError::upstream("generation request failed", e))?;

        let status = response.status();
        debug!(status = %status, model = %self.model, "generation response received");

        let body = response
            .text()
            .await
            .map_err(|e| KaiwaError::upstream("failed to read generation response body", e))?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) => format!(
                    "Gemini API error ({}): {}",
                    api_err.error.status.as_deref().unwrap_or("unknown"),
                    api_err.error.message
                ),
                Err(_) => format!("API returned {status}: {body}"),
            };
            return Err(KaiwaError::Upstream {
                message,
                source: None,
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| KaiwaError::upstream("failed to parse generation response", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Content;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> GeminiClient {
        GeminiClient::new(
            "test-api-key",
            "gemini-2.5-flash".into(),
            base_url.to_string(),
        )
        .unwrap()
    }

    fn test_request() -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content::user("Hello")],
            tools: None,
        }
    }

    fn success_body() -> serde_json::Value {
        serde_json::json!({
            "candidates": [{
                "content": {"parts": [{"text": "Hi there!"}], "role": "model"}
            }]
        })
    }

    #[tokio::test]
    async fn generate_content_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let response = client.generate_content(&test_request()).await.unwrap();
        assert_eq!(response.candidates.len(), 1);
    }

    #[tokio::test]
    async fn client_sends_api_key_header() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(header("x-goog-api-key", "test-api-key"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.generate_content(&test_request()).await;
        assert!(result.is_ok(), "headers should match: {result:?}");
    }

    #[tokio::test]
    async fn api_error_body_is_surfaced_as_upstream() {
        let server = MockServer::start().await;

        let error_body = serde_json::json!({
            "error": {"code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED"}
        });
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(&error_body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.generate_content(&test_request()).await.unwrap_err();
        match err {
            KaiwaError::Upstream { message, .. } => {
                assert!(message.contains("RESOURCE_EXHAUSTED"), "got: {message}");
                assert!(message.contains("Quota exceeded"), "got: {message}");
            }
            other => panic!("expected Upstream, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_error_body_is_still_upstream() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.generate_content(&test_request()).await.unwrap_err();
        assert!(matches!(err, KaiwaError::Upstream { .. }));
    }

    #[tokio::test]
    async fn malformed_success_body_is_upstream() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"candidates\": \"nope\"}"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.generate_content(&test_request()).await.unwrap_err();
        assert!(matches!(err, KaiwaError::Upstream { .. }));
    }

    #[tokio::test]
    async fn no_retry_on_transient_status() {
        let server = MockServer::start().await;

        // A single 503 must produce a single request; the orchestrator
        // never retries on its own.
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.generate_content(&test_request()).await;
        assert!(result.is_err());
        server.verify().await;
    }
}
