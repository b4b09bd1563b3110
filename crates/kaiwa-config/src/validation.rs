// SPDX-FileCopyrightText: 2026 Kaiwa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes. Hard errors abort startup; softer deployment risks (missing
//! API key, placeholder signing secret) are reported as warnings so the
//! rest of the surface keeps working.

use thiserror::Error;

use crate::model::{KaiwaConfig, PLACEHOLDER_JWT_SECRET};

/// A configuration error surfaced at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A semantic constraint on a deserialized value failed.
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Figment failed to merge or deserialize the configuration sources.
    #[error("{0}")]
    Load(#[from] Box<figment::Error>),
}

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)`
/// with all collected validation errors (does not fail fast).
pub fn validate_config(config: &KaiwaConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let host = config.server.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("server.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    if config.gemini.model.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "gemini.model must not be empty".to_string(),
        });
    }

    for (key, value) in [
        ("gemini.base_url", &config.gemini.base_url),
        ("auth.callback_base_url", &config.auth.callback_base_url),
        ("auth.frontend_url", &config.auth.frontend_url),
        ("auth.authorize_url", &config.auth.authorize_url),
        ("auth.token_url", &config.auth.token_url),
        ("auth.jwks_url", &config.auth.jwks_url),
    ] {
        if !value.starts_with("http://") && !value.starts_with("https://") {
            errors.push(ConfigError::Validation {
                message: format!("{key} must be an http(s) URL, got `{value}`"),
            });
        }
    }

    if config.auth.session_ttl_days < 1 {
        errors.push(ConfigError::Validation {
            message: format!(
                "auth.session_ttl_days must be at least 1, got {}",
                config.auth.session_ttl_days
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Deployment risks worth warning operators about at startup.
///
/// These do not prevent the server from starting: a missing generation key
/// or login credentials degrade a single surface, and a placeholder
/// signing secret still yields a functioning (if forgeable) codec.
pub fn startup_warnings(config: &KaiwaConfig) -> Vec<String> {
    let mut warnings = Vec::new();

    let secret = config.auth.jwt_secret.trim();
    if secret.is_empty() || secret == PLACEHOLDER_JWT_SECRET {
        warnings.push(
            "auth.jwt_secret is unset or still the placeholder value; \
             session credentials are forgeable until it is replaced"
                .to_string(),
        );
    }

    if config
        .gemini
        .api_key
        .as_deref()
        .is_none_or(|key| key.trim().is_empty())
    {
        warnings.push(
            "gemini.api_key is not configured; POST /api/chat will report the \
             service as misconfigured"
                .to_string(),
        );
    }

    if config.auth.google_client_id.is_none() || config.auth.google_client_secret.is_none() {
        warnings.push(
            "auth.google_client_id/google_client_secret are not configured; \
             the Google login flow is disabled"
                .to_string(),
        );
    }

    warnings
}
