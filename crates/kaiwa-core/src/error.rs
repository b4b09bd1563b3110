// SPDX-FileCopyrightText: 2026 Kaiwa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Kaiwa chat backend.

use thiserror::Error;

/// The primary error type used across all Kaiwa crates.
///
/// Each variant carries a fixed HTTP mapping at the gateway boundary:
/// `InvalidInput` becomes a 400, everything else a 500. Upstream causes
/// are retained for logging and never serialized into response bodies.
#[derive(Debug, Error)]
pub enum KaiwaError {
    /// Caller-supplied data failed a precondition (empty message, bad body).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Required operator configuration is absent or unusable.
    #[error("configuration error: {0}")]
    Config(String),

    /// The external generation or identity capability failed or returned
    /// unusable data.
    #[error("upstream error: {message}")]
    Upstream {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Credential issuance or identity exchange failed.
    #[error("auth error: {0}")]
    Auth(String),

    /// Internal or unexpected errors (bind failure, serialization).
    #[error("internal error: {0}")]
    Internal(String),
}

impl KaiwaError {
    /// Wraps an external fault as an upstream failure, keeping the cause.
    pub fn upstream<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Upstream {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
