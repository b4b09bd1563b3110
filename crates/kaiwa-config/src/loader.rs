// SPDX-FileCopyrightText: 2026 Kaiwa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./kaiwa.toml` > `~/.config/kaiwa/kaiwa.toml` >
//! `/etc/kaiwa/kaiwa.toml` with environment variable overrides via the
//! `KAIWA_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::KaiwaConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/kaiwa/kaiwa.toml` (system-wide)
/// 3. `~/.config/kaiwa/kaiwa.toml` (user XDG config)
/// 4. `./kaiwa.toml` (local directory)
/// 5. `KAIWA_*` environment variables
pub fn load_config() -> Result<KaiwaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(KaiwaConfig::default()))
        .merge(Toml::file("/etc/kaiwa/kaiwa.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("kaiwa/kaiwa.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("kaiwa.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<KaiwaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(KaiwaConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<KaiwaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(KaiwaConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names. For example, `KAIWA_GEMINI_API_KEY`
/// must map to `gemini.api_key`, not `gemini.api.key`.
fn env_provider() -> Env {
    Env::prefixed("KAIWA_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: KAIWA_AUTH_JWT_SECRET -> "auth_jwt_secret"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("server_", "server.", 1)
            .replacen("gemini_", "gemini.", 1)
            .replacen("auth_", "auth.", 1)
            .replacen("cors_", "cors.", 1);
        mapped.into()
    })
}
