// SPDX-FileCopyrightText: 2026 Kaiwa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Kaiwa chat backend.
//!
//! Exposes the chat endpoint (single-turn, multi-turn, and SSE streaming)
//! and the identity endpoints, with a configurable cross-origin layer.
//! The gateway mirrors the config values it needs in [`server::AppState`]
//! and [`server::ServerConfig`] rather than depending on the config crate.

pub mod auth;
pub mod chat;
pub mod error;
pub mod server;
pub mod sse;

pub use error::ErrorResponse;
pub use server::{AppState, ServerConfig, build_router, cors_layer, start_server};
