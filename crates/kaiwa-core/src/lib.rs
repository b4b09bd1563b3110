// SPDX-FileCopyrightText: 2026 Kaiwa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Kaiwa chat backend.
//!
//! This crate provides the error taxonomy and the domain types shared by
//! the generation, auth, and gateway crates. It has no HTTP or provider
//! dependencies of its own.

pub mod error;
pub mod types;

pub use error::KaiwaError;
pub use types::{
    ChatInput, ChatTurn, GenerateOptions, GenerationResult, Identity, IdentityClaims, Role,
};
