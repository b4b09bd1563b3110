// SPDX-FileCopyrightText: 2026 Kaiwa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Server-Sent Events streaming for POST /api/chat.
//!
//! When clients send Accept: text/event-stream, the gateway returns the
//! reply as an SSE stream the consumer concatenates in arrival order:
//!
//! ```text
//! event: text_delta
//! data: {"text": "partial content here"}
//!
//! event: message_stop
//! data: {"response": "full content", "citations": [...]}
//! ```
//!
//! The provider call itself is not chunked, so the stream carries one
//! text_delta followed by message_stop. If the consumer disconnects, the
//! dropped stream releases the connection; no further events are issued.

use axum::response::sse::{Event, Sse};
use futures::stream::{self, Stream};

use kaiwa_core::{ChatInput, GenerateOptions, KaiwaError};

use crate::server::AppState;

/// Streams a chat reply as Server-Sent Events.
pub async fn stream_chat(
    state: AppState,
    input: ChatInput,
    opts: GenerateOptions,
) -> Sse<impl Stream<Item = Result<Event, std::convert::Infallible>>> {
    let events: Vec<Result<Event, std::convert::Infallible>> =
        match state.generator.generate(input, opts).await {
            Ok(result) => {
                let delta = serde_json::json!({ "text": result.text });

                let mut stop = serde_json::json!({ "response": result.text });
                if !result.citations.is_empty() {
                    stop["citations"] = serde_json::json!(result.citations);
                }
                if let Some(entry_point) = result.search_entry_point {
                    stop["searchEntryPoint"] = serde_json::json!(entry_point);
                }

                vec![
                    Ok(Event::default().event("text_delta").data(delta.to_string())),
                    Ok(Event::default().event("message_stop").data(stop.to_string())),
                ]
            }
            Err(err) => {
                let message = match &err {
                    KaiwaError::InvalidInput(message) | KaiwaError::Config(message) => {
                        message.clone()
                    }
                    _ => {
                        tracing::error!(error = %err, "streaming generation failed");
                        "chat request failed".to_string()
                    }
                };
                vec![Ok(Event::default()
                    .event("error")
                    .data(serde_json::json!({ "error": message }).to_string()))]
            }
        };

    Sse::new(stream::iter(events))
}
