// SPDX-FileCopyrightText: 2026 Kaiwa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP handlers for the chat endpoint.
//!
//! Handles POST /api/chat (single-turn `{message}` and multi-turn
//! `{messages}` bodies, plus SSE streaming via the Accept header) and the
//! bare OPTIONS short-circuit.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use kaiwa_core::{ChatInput, ChatTurn, GenerateOptions, GenerationResult};

use crate::error::{ErrorResponse, error_response};
use crate::server::AppState;
use crate::sse;

/// Request body for POST /api/chat.
///
/// Single-turn clients send `message`; multi-turn clients re-send their
/// full history as `messages`. When both are present, `messages` wins.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub messages: Option<Vec<ChatTurn>>,
}

impl ChatRequest {
    /// Collapses the two accepted body shapes into one generation input.
    /// `None` means the body carried neither field.
    pub(crate) fn into_input(self) -> Option<ChatInput> {
        match (self.messages, self.message) {
            (Some(messages), _) => Some(ChatInput::Conversation(messages)),
            (None, Some(message)) => Some(ChatInput::Text(message)),
            (None, None) => None,
        }
    }
}

/// Response body for POST /api/chat.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Generated reply text.
    pub response: String,

    /// Web citations in provider order. Omitted when empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citations: Option<Vec<String>>,

    /// Rendered search-entry-point markup, when the provider returned one.
    #[serde(rename = "searchEntryPoint", skip_serializing_if = "Option::is_none")]
    pub search_entry_point: Option<String>,
}

impl ChatResponse {
    pub(crate) fn from_result(result: GenerationResult) -> Self {
        Self {
            response: result.text,
            citations: (!result.citations.is_empty()).then_some(result.citations),
            search_entry_point: result.search_entry_point,
        }
    }
}

/// POST /api/chat
///
/// Validates the body, then either streams the reply as SSE (when the
/// client accepts `text/event-stream`) or returns it as a single JSON
/// response.
pub async fn post_chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<ChatRequest>,
) -> Response {
    let Some(input) = body.into_input() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "message is required".to_string(),
            }),
        )
            .into_response();
    };

    let opts = GenerateOptions {
        grounding: state.grounding,
    };

    let accept = headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if accept.contains("text/event-stream") {
        return sse::stream_chat(state, input, opts).await.into_response();
    }

    match state.generator.generate(input, opts).await {
        Ok(result) => (StatusCode::OK, Json(ChatResponse::from_result(result))).into_response(),
        Err(err) => error_response(&err),
    }
}

/// OPTIONS /api/chat
///
/// Bare OPTIONS calls short-circuit with an empty 204; browser preflights
/// are answered by the CORS layer with the computed headers.
pub async fn options_chat() -> StatusCode {
    StatusCode::NO_CONTENT
}
