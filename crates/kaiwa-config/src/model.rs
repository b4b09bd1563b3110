// SPDX-FileCopyrightText: 2026 Kaiwa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Kaiwa chat backend.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Placeholder signing secret shipped as the compiled default.
///
/// Deployments must override it; startup warns when it is still in place.
pub const PLACEHOLDER_JWT_SECRET: &str = "default-secret-key-change-in-production";

/// Top-level Kaiwa configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values; the whole structure is assembled once at startup and passed
/// explicitly to each component.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct KaiwaConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Gemini generation API settings.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Session signing and Google OAuth settings.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Cross-origin allow-list settings.
    #[serde(default)]
    pub cors: CorsConfig,
}

/// Runtime mode, controlling the secure-cookie flag and whether the fixed
/// local-development origins are appended to the CORS allow-list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeMode {
    #[default]
    Development,
    Production,
}

impl RuntimeMode {
    pub fn is_production(self) -> bool {
        matches!(self, RuntimeMode::Production)
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to bind the server to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Runtime mode (development or production).
    #[serde(default)]
    pub mode: RuntimeMode,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            mode: RuntimeMode::default(),
            log_level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8081
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Gemini generation API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiConfig {
    /// Gemini API key. `None` leaves the chat endpoint misconfigured; the
    /// server still starts so the auth surface keeps working.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model identifier used for generation requests.
    #[serde(default = "default_model")]
    pub model: String,

    /// Request web-search grounding on every generation call.
    #[serde(default = "default_grounding")]
    pub grounding: bool,

    /// Base URL of the generative-language API.
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            grounding: default_grounding(),
            base_url: default_gemini_base_url(),
        }
    }
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_grounding() -> bool {
    true
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

/// Session signing and Google OAuth configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// Google OAuth client id. `None` disables the login flow.
    #[serde(default)]
    pub google_client_id: Option<String>,

    /// Google OAuth client secret. `None` disables the login flow.
    #[serde(default)]
    pub google_client_secret: Option<String>,

    /// Secret used to sign session credentials (HS256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,

    /// Public base URL of this backend, used to build the OAuth callback
    /// address.
    #[serde(default = "default_callback_base_url")]
    pub callback_base_url: String,

    /// Base URL of the frontend to redirect to after login.
    #[serde(default = "default_frontend_url")]
    pub frontend_url: String,

    /// Session credential validity window in days.
    #[serde(default = "default_session_ttl_days")]
    pub session_ttl_days: i64,

    /// Google authorization endpoint.
    #[serde(default = "default_authorize_url")]
    pub authorize_url: String,

    /// Google token endpoint. Overridable so tests can point it at a mock.
    #[serde(default = "default_token_url")]
    pub token_url: String,

    /// Google JWKS endpoint for id-token verification.
    #[serde(default = "default_jwks_url")]
    pub jwks_url: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            google_client_id: None,
            google_client_secret: None,
            jwt_secret: default_jwt_secret(),
            callback_base_url: default_callback_base_url(),
            frontend_url: default_frontend_url(),
            session_ttl_days: default_session_ttl_days(),
            authorize_url: default_authorize_url(),
            token_url: default_token_url(),
            jwks_url: default_jwks_url(),
        }
    }
}

fn default_jwt_secret() -> String {
    PLACEHOLDER_JWT_SECRET.to_string()
}

fn default_callback_base_url() -> String {
    "http://localhost:8081".to_string()
}

fn default_frontend_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_session_ttl_days() -> i64 {
    7
}

fn default_authorize_url() -> String {
    "https://accounts.google.com/o/oauth2/v2/auth".to_string()
}

fn default_token_url() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

fn default_jwks_url() -> String {
    "https://www.googleapis.com/oauth2/v3/certs".to_string()
}

/// Cross-origin allow-list configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins. A `*` entry allows any
    /// origin (the request origin is still echoed, never a literal `*`).
    #[serde(default)]
    pub allowed_origins: String,
}

impl CorsConfig {
    /// Splits the comma-separated allow-list into trimmed, non-empty
    /// entries.
    pub fn origin_list(&self) -> Vec<String> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_development_localhost() {
        let config = KaiwaConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.server.mode, RuntimeMode::Development);
        assert!(!config.server.mode.is_production());
        assert_eq!(config.gemini.model, "gemini-2.5-flash");
        assert!(config.gemini.grounding);
        assert_eq!(config.auth.session_ttl_days, 7);
        assert_eq!(config.auth.jwt_secret, PLACEHOLDER_JWT_SECRET);
    }

    #[test]
    fn origin_list_splits_and_trims() {
        let cors = CorsConfig {
            allowed_origins: "https://app.example.com, https://staging.example.com ,".into(),
        };
        assert_eq!(
            cors.origin_list(),
            vec![
                "https://app.example.com".to_string(),
                "https://staging.example.com".to_string(),
            ]
        );
    }

    #[test]
    fn origin_list_empty_when_unset() {
        assert!(CorsConfig::default().origin_list().is_empty());
    }

    #[test]
    fn runtime_mode_deserializes_lowercase() {
        let toml_str = r#"
[server]
mode = "production"
"#;
        let config: KaiwaConfig = toml::from_str(toml_str).unwrap();
        assert!(config.server.mode.is_production());
    }
}
