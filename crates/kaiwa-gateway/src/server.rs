// SPDX-FileCopyrightText: 2026 Kaiwa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, the cross-origin layer, and shared state for the
//! request handlers. All state is assembled once by the caller and passed
//! in; handlers never read ambient environment state.

use std::sync::Arc;

use axum::http::{HeaderValue, Method, header};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use kaiwa_auth::{GoogleOAuth, SessionCodec};
use kaiwa_core::KaiwaError;
use kaiwa_gemini::ChatGenerator;

use crate::{auth, chat};

/// Local-development origins appended to the allow-list outside of
/// production.
const DEV_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://localhost:8080"];

/// How long browsers may cache preflight results, in seconds.
const PREFLIGHT_MAX_AGE_SECS: u64 = 86_400;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Generation orchestrator for /api/chat.
    pub generator: Arc<ChatGenerator>,
    /// Session credential codec.
    pub codec: Arc<SessionCodec>,
    /// Google OAuth client; `None` disables the login flow.
    pub oauth: Option<Arc<GoogleOAuth>>,
    /// Request web-search grounding on generation calls.
    pub grounding: bool,
    /// Frontend base URL for post-login redirects.
    pub frontend_url: String,
    /// Session cookie lifetime in seconds.
    pub session_max_age: i64,
    /// Mark session cookies Secure (production mode).
    pub secure_cookies: bool,
}

/// Gateway server configuration (mirrors the `[server]` and `[cors]`
/// sections of the application config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Configured CORS allow-list entries.
    pub allowed_origins: Vec<String>,
    /// Development mode appends the fixed local-dev origins.
    pub development: bool,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status string.
    pub status: String,
    /// Binary version.
    pub version: String,
}

/// Builds the cross-origin layer from the allow-list.
///
/// Allowed origins are echoed back with fixed methods and headers; an
/// origin outside the list gets no CORS headers at all (the browser
/// blocks the read client-side), never an explicit rejection status. A
/// `*` entry allows any origin while still echoing it.
pub fn cors_layer(allowed_origins: &[String], development: bool) -> CorsLayer {
    let mut origins: Vec<String> = allowed_origins.to_vec();
    if development {
        origins.extend(DEV_ORIGINS.iter().map(|origin| origin.to_string()));
    }
    let wildcard = origins.iter().any(|origin| origin == "*");

    let allow = AllowOrigin::predicate(move |origin: &HeaderValue, _| {
        origin
            .to_str()
            .map(|origin| wildcard || origins.iter().any(|allowed| allowed == origin))
            .unwrap_or(false)
    });

    CorsLayer::new()
        .allow_origin(allow)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(PREFLIGHT_MAX_AGE_SECS))
}

/// Builds the gateway router with all routes and layers attached.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route(
            "/api/chat",
            post(chat::post_chat).options(chat::options_chat),
        )
        .route("/api/auth/google", get(auth::google_login))
        .route("/api/auth/google/callback", get(auth::google_callback))
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/logout", post(auth::logout))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.allowed_origins, config.development))
        .with_state(state)
}

/// Start the gateway HTTP server.
pub async fn start_server(config: &ServerConfig, state: AppState) -> Result<(), KaiwaError> {
    let app = build_router(state, config);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| KaiwaError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("kaiwa gateway listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| KaiwaError::Internal(format!("gateway server error: {e}")))?;

    Ok(())
}

/// GET /health
///
/// Unauthenticated liveness probe.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use kaiwa_config::model::GeminiConfig;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        AppState {
            generator: Arc::new(ChatGenerator::from_config(&GeminiConfig::default()).unwrap()),
            codec: Arc::new(SessionCodec::new("test-secret", chrono::Duration::days(7))),
            oauth: None,
            grounding: false,
            frontend_url: "http://localhost:3000".to_string(),
            session_max_age: 604_800,
            secure_cookies: false,
        }
    }

    fn test_router(allowed_origins: Vec<String>, development: bool) -> Router {
        build_router(
            test_state(),
            &ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                allowed_origins,
                development,
            },
        )
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let router = test_router(vec![], false);
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn bare_options_short_circuits_with_204() {
        let router = test_router(vec![], false);
        let response = router
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/api/chat")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn allowed_origin_is_echoed() {
        let router = test_router(vec!["https://app.example.com".to_string()], false);
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/chat")
                    .header("origin", "https://app.example.com")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"message": ""}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .and_then(|v| v.to_str().ok()),
            Some("https://app.example.com")
        );
    }

    #[tokio::test]
    async fn disallowed_origin_gets_no_cors_headers_not_403() {
        let router = test_router(vec!["https://app.example.com".to_string()], false);
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/chat")
                    .header("origin", "https://evil.example.com")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"message": ""}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(
            response
                .headers()
                .get("access-control-allow-origin")
                .is_none()
        );
        // The request itself is still served; rejection is left to the
        // browser's same-origin policy.
        assert_ne!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn wildcard_entry_echoes_any_origin() {
        let router = test_router(vec!["*".to_string()], false);
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/chat")
                    .header("origin", "https://anywhere.example.com")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"message": ""}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .and_then(|v| v.to_str().ok()),
            Some("https://anywhere.example.com")
        );
    }

    #[tokio::test]
    async fn dev_mode_allows_local_origins() {
        let router = test_router(vec![], true);
        let response = router
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/api/chat")
                    .header("origin", "http://localhost:3000")
                    .header("access-control-request-method", "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .and_then(|v| v.to_str().ok()),
            Some("http://localhost:3000")
        );
        let allow_methods = response
            .headers()
            .get("access-control-allow-methods")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        assert!(allow_methods.contains("POST"));
    }

    #[tokio::test]
    async fn preflight_carries_max_age() {
        let router = test_router(vec!["https://app.example.com".to_string()], false);
        let response = router
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/api/chat")
                    .header("origin", "https://app.example.com")
                    .header("access-control-request-method", "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            response
                .headers()
                .get("access-control-max-age")
                .and_then(|v| v.to_str().ok()),
            Some("86400")
        );
    }
}
