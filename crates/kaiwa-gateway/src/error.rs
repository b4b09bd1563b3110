// SPDX-FileCopyrightText: 2026 Kaiwa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error-to-response mapping for the gateway.
//!
//! Every error becomes a small JSON object with a human-readable message.
//! Upstream causes are logged here and never serialized into the body.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use kaiwa_core::KaiwaError;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
}

/// Maps a [`KaiwaError`] onto an HTTP response.
///
/// `InvalidInput` is the caller's fault (400); everything else is a 500.
pub(crate) fn error_response(err: &KaiwaError) -> Response {
    let (status, message) = match err {
        KaiwaError::InvalidInput(message) => (StatusCode::BAD_REQUEST, message.clone()),
        KaiwaError::Config(message) => {
            tracing::error!(error = %message, "service misconfigured");
            (StatusCode::INTERNAL_SERVER_ERROR, message.clone())
        }
        KaiwaError::Upstream { message, source } => {
            tracing::error!(error = %message, source = ?source, "upstream call failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "chat request failed".to_string(),
            )
        }
        KaiwaError::Auth(message) => {
            tracing::error!(error = %message, "authentication failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "authentication failed".to_string(),
            )
        }
        KaiwaError::Internal(message) => {
            tracing::error!(error = %message, "internal error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal error".to_string(),
            )
        }
    };
    (status, Json(ErrorResponse { error: message })).into_response()
}
