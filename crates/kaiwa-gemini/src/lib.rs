// SPDX-FileCopyrightText: 2026 Kaiwa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generation orchestration for the Kaiwa chat backend.
//!
//! [`ChatGenerator`] accepts a user message (or a full conversation),
//! invokes the Gemini `generateContent` capability exactly once, and
//! normalizes the heterogeneous response envelope into a stable
//! [`GenerationResult`]: text, ordered web citations, and an optional
//! rendered search entry point.

pub mod client;
pub mod types;

use kaiwa_config::model::GeminiConfig;
use kaiwa_core::{ChatInput, GenerateOptions, GenerationResult, KaiwaError, Role};

pub use client::GeminiClient;
use types::{Content, GenerateContentRequest, GenerateContentResponse, Part, Tool};

/// Orchestrates generation calls against the Gemini API.
///
/// Constructed once at startup from configuration. When no API key is
/// configured the generator is built keyless and every call reports the
/// service as misconfigured without touching the network, so the rest of
/// the API surface stays up.
pub struct ChatGenerator {
    client: Option<GeminiClient>,
}

impl ChatGenerator {
    /// Builds a generator from the `[gemini]` config section.
    pub fn from_config(config: &GeminiConfig) -> Result<Self, KaiwaError> {
        let client = match config.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Some(GeminiClient::new(
                key,
                config.model.clone(),
                config.base_url.clone(),
            )?),
            _ => None,
        };
        Ok(Self { client })
    }

    /// Generates a reply for the given input.
    ///
    /// Fails with `InvalidInput` before any external call when the input
    /// is blank, and with `Config` when no API key is configured. Exactly
    /// one upstream call is made otherwise; upstream faults of any kind
    /// come back as `Upstream` with the cause retained for logging.
    pub async fn generate(
        &self,
        input: ChatInput,
        opts: GenerateOptions,
    ) -> Result<GenerationResult, KaiwaError> {
        if input.is_blank() {
            return Err(KaiwaError::InvalidInput(
                "message must not be empty".to_string(),
            ));
        }

        let client = self.client.as_ref().ok_or_else(|| {
            KaiwaError::Config("Gemini API key is not configured".to_string())
        })?;

        let request = build_request(&input, opts);
        let response = client.generate_content(&request).await?;
        normalize(response)
    }
}

/// Maps a conversation role onto the provider's wire label.
///
/// Gemini calls the assistant side "model".
fn wire_role(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Assistant => "model",
    }
}

fn build_request(input: &ChatInput, opts: GenerateOptions) -> GenerateContentRequest {
    let contents = match input {
        ChatInput::Text(text) => vec![Content::user(text.clone())],
        ChatInput::Conversation(turns) => turns
            .iter()
            .map(|turn| Content {
                role: wire_role(turn.role).to_string(),
                parts: vec![Part {
                    text: turn.text.clone(),
                }],
            })
            .collect(),
    };

    GenerateContentRequest {
        contents,
        tools: opts.grounding.then(|| vec![Tool::google_search()]),
    }
}

/// Normalizes the provider envelope into a [`GenerationResult`].
///
/// Reads the first candidate's text parts. Grounding chunks are walked in
/// provider order; chunks without a web URI are skipped silently. A
/// response with no usable text is unusable data and therefore an
/// upstream failure.
fn normalize(response: GenerateContentResponse) -> Result<GenerationResult, KaiwaError> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        return Err(KaiwaError::Upstream {
            message: "response contained no candidates".to_string(),
            source: None,
        });
    };

    let text = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    if text.is_empty() {
        return Err(KaiwaError::Upstream {
            message: "response contained no text".to_string(),
            source: None,
        });
    }

    let (citations, search_entry_point) = match candidate.grounding_metadata {
        Some(metadata) => {
            let citations = metadata
                .grounding_chunks
                .into_iter()
                .filter_map(|chunk| chunk.web.and_then(|web| web.uri))
                .collect();
            let entry_point = metadata
                .search_entry_point
                .and_then(|entry| entry.rendered_content);
            (citations, entry_point)
        }
        None => (Vec::new(), None),
    };

    Ok(GenerationResult {
        text,
        citations,
        search_entry_point,
    })
}
