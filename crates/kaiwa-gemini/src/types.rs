// SPDX-FileCopyrightText: 2026 Kaiwa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gemini `generateContent` request/response types.
//!
//! The response side models the provider's envelope with explicit
//! `Option` fields at every level: a missing candidate, content block,
//! grounding section, or web source is a named normal state, never a
//! deserialization failure.

use serde::{Deserialize, Serialize};

// --- Request types ---

/// A request to the Gemini `generateContent` endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    /// Conversation contents, oldest turn first.
    pub contents: Vec<Content>,

    /// Tool declarations. Carries the search tool when grounding is on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,
}

/// A single content entry in the Gemini conversation format.
#[derive(Debug, Clone, Serialize)]
pub struct Content {
    /// Role label: "user" or "model".
    pub role: String,
    /// Content parts. Kaiwa only sends text parts.
    pub parts: Vec<Part>,
}

impl Content {
    /// Creates a user-role content entry with a single text part.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            parts: vec![Part { text: text.into() }],
        }
    }
}

/// A text part within a content entry.
#[derive(Debug, Clone, Serialize)]
pub struct Part {
    pub text: String,
}

/// A tool declaration attached to a generation request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    /// The Google Search grounding tool. Serialized as an empty object.
    pub google_search: GoogleSearch,
}

impl Tool {
    /// The search-grounding tool declaration.
    pub fn google_search() -> Self {
        Self {
            google_search: GoogleSearch {},
        }
    }
}

/// Marker type for the search tool; the API expects `{}`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GoogleSearch {}

// --- Response types ---

/// A full response from the Gemini `generateContent` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    /// Response candidates. Kaiwa reads the first one.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// A single response candidate.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Generated content. Absent when the candidate was blocked.
    pub content: Option<CandidateContent>,

    /// Search-grounding metadata, present only when grounding produced
    /// results.
    pub grounding_metadata: Option<GroundingMetadata>,
}

/// Content block within a candidate.
#[derive(Debug, Clone, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

/// One part of a candidate's content. Non-text parts deserialize with
/// `text: None` and are skipped during normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
}

/// Grounding metadata attached to a candidate.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    /// Rendered search-entry-point widget, when the provider returned one.
    pub search_entry_point: Option<SearchEntryPoint>,

    /// Grounding chunks in provider order.
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

/// The search entry point returned alongside grounded responses.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchEntryPoint {
    pub rendered_content: Option<String>,
}

/// One grounding chunk. Chunks without a web source are skipped silently.
#[derive(Debug, Clone, Deserialize)]
pub struct GroundingChunk {
    pub web: Option<WebSource>,
}

/// A web source referenced by a grounding chunk.
#[derive(Debug, Clone, Deserialize)]
pub struct WebSource {
    pub uri: Option<String>,
    pub title: Option<String>,
}

// --- Error types ---

/// API error response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

/// Error detail within an API error response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub code: Option<i64>,
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_with_search_tool() {
        let req = GenerateContentRequest {
            contents: vec![Content::user("Hello")],
            tools: Some(vec![Tool::google_search()]),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "Hello");
        assert_eq!(json["tools"][0]["googleSearch"], serde_json::json!({}));
    }

    #[test]
    fn request_omits_tools_when_absent() {
        let req = GenerateContentRequest {
            contents: vec![Content::user("Hello")],
            tools: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("tools").is_none());
    }

    #[test]
    fn response_deserializes_with_grounding_metadata() {
        let json = r#"{
            "candidates": [{
                "content": {"parts": [{"text": "Answer."}], "role": "model"},
                "groundingMetadata": {
                    "searchEntryPoint": {"renderedContent": "<div>widget</div>"},
                    "groundingChunks": [
                        {"web": {"uri": "https://example.com/a", "title": "A"}},
                        {"retrievedContext": {"text": "no web source"}},
                        {"web": {"uri": "https://example.com/b"}}
                    ]
                }
            }]
        }"#;
        let resp: GenerateContentResponse = serde_json::from_str(json).unwrap();
        let candidate = &resp.candidates[0];
        let metadata = candidate.grounding_metadata.as_ref().unwrap();
        assert_eq!(metadata.grounding_chunks.len(), 3);
        assert!(metadata.grounding_chunks[1].web.is_none());
        assert_eq!(
            metadata
                .search_entry_point
                .as_ref()
                .unwrap()
                .rendered_content
                .as_deref(),
            Some("<div>widget</div>")
        );
    }

    #[test]
    fn response_deserializes_without_grounding_metadata() {
        let json = r#"{
            "candidates": [{"content": {"parts": [{"text": "Plain answer."}], "role": "model"}}]
        }"#;
        let resp: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert!(resp.candidates[0].grounding_metadata.is_none());
    }

    #[test]
    fn empty_response_deserializes_to_no_candidates() {
        let resp: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.candidates.is_empty());
    }

    #[test]
    fn api_error_deserializes() {
        let json = r#"{
            "error": {"code": 429, "message": "Resource exhausted", "status": "RESOURCE_EXHAUSTED"}
        }"#;
        let err: ApiErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(err.error.code, Some(429));
        assert_eq!(err.error.message, "Resource exhausted");
        assert_eq!(err.error.status.as_deref(), Some("RESOURCE_EXHAUSTED"));
    }

    /// Candidates with extra unknown fields (safety ratings, finish reason)
    /// still deserialize; unmodeled fields are ignored.
    #[test]
    fn response_tolerates_unknown_fields() {
        let json = r#"{
            "candidates": [{
                "content": {"parts": [{"text": "ok"}], "role": "model"},
                "finishReason": "STOP",
                "safetyRatings": []
            }],
            "usageMetadata": {"promptTokenCount": 3}
        }"#;
        let resp: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.candidates.len(), 1);
    }
}
