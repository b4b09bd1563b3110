// SPDX-FileCopyrightText: 2026 Kaiwa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Kaiwa chat backend.
//!
//! Provides TOML configuration parsing with strict validation
//! (`deny_unknown_fields`), XDG file hierarchy lookup, and environment
//! variable overrides. The resulting [`KaiwaConfig`] is immutable after
//! startup and passed explicitly to each component; nothing reads ambient
//! environment state at request time.
//!
//! # Usage
//!
//! ```no_run
//! let config = kaiwa_config::load_and_validate().expect("config errors");
//! println!("listening on {}:{}", config.server.host, config.server.port);
//! ```

pub mod loader;
pub mod model;
pub mod validation;

pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::KaiwaConfig;
pub use validation::{ConfigError, startup_warnings, validate_config};

/// Load configuration from the XDG hierarchy and validate it.
///
/// This is the high-level entry point that loads config from TOML files
/// plus env vars via Figment, then runs post-deserialization validation.
/// Returns either a valid `KaiwaConfig` or a list of errors.
pub fn load_and_validate() -> Result<KaiwaConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(vec![ConfigError::Load(Box::new(err))]),
    }
}

/// Load configuration from a specific TOML string and validate it.
///
/// Useful for testing and explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<KaiwaConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(vec![ConfigError::Load(Box::new(err))]),
    }
}

/// Print configuration errors to stderr, one per line.
pub fn render_errors(errors: &[ConfigError]) {
    for error in errors {
        eprintln!("error: {error}");
    }
}
