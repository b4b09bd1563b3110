// SPDX-FileCopyrightText: 2026 Kaiwa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared between the generation, auth, and gateway crates.

use serde::{Deserialize, Serialize};

/// Speaker of a single chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One message in a conversation. A conversation is an ordered sequence of
/// turns, oldest first; the order is never rearranged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub text: String,
}

/// Input to a single generation call, consumed exactly once.
///
/// Single-turn deployments send `Text`; multi-turn deployments re-send the
/// full client-held history as `Conversation` on every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatInput {
    Text(String),
    Conversation(Vec<ChatTurn>),
}

impl ChatInput {
    /// Whether the input is empty after trimming.
    ///
    /// A conversation is blank when it has no turns or when its final turn
    /// carries only whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            ChatInput::Text(text) => text.trim().is_empty(),
            ChatInput::Conversation(turns) => turns
                .last()
                .map(|turn| turn.text.trim().is_empty())
                .unwrap_or(true),
        }
    }
}

/// Per-call options for the generation orchestrator.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateOptions {
    /// Request web-search grounding from the provider.
    pub grounding: bool,
}

/// Normalized output of one generation call.
///
/// Derived entirely from the provider's response envelope. Citations keep
/// the provider's order and are not deduplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub text: String,
    pub citations: Vec<String>,
    /// Rendered search-entry-point markup, surfaced verbatim when the
    /// provider returned one. Never an empty-string sentinel.
    pub search_entry_point: Option<String>,
}

/// Identity attributes asserted by the identity provider after a
/// successful code exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Stable provider-issued subject id.
    pub subject: String,
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
}

/// Result of authenticating an inbound request.
///
/// Anonymous is a first-class state, not a failure: requests without a
/// session cookie (or with an expired one) resolve here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Anonymous,
    Authenticated(IdentityClaims),
}

impl Identity {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Identity::Authenticated(_))
    }
}
