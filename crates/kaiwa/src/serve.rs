// SPDX-FileCopyrightText: 2026 Kaiwa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `kaiwa serve` command implementation.
//!
//! Wires the validated configuration into the generation orchestrator,
//! credential codec, OAuth client, and gateway, then runs the server.
//! Components receive their configuration explicitly; nothing reads
//! environment state after this point.

use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use kaiwa_auth::{GoogleOAuth, SessionCodec};
use kaiwa_config::KaiwaConfig;
use kaiwa_core::KaiwaError;
use kaiwa_gateway::{AppState, ServerConfig, start_server};
use kaiwa_gemini::ChatGenerator;

/// Runs the `kaiwa serve` command.
pub async fn run_serve(config: KaiwaConfig) -> Result<(), KaiwaError> {
    init_tracing(&config.server.log_level);

    info!("starting kaiwa serve");

    // Deployment risks (placeholder signing secret, missing provider
    // keys) are warnings, not startup failures.
    for warning in kaiwa_config::startup_warnings(&config) {
        warn!("{warning}");
    }

    let generator = Arc::new(ChatGenerator::from_config(&config.gemini)?);
    let codec = Arc::new(SessionCodec::new(
        &config.auth.jwt_secret,
        chrono::Duration::days(config.auth.session_ttl_days),
    ));
    let oauth = GoogleOAuth::from_config(&config.auth)?.map(Arc::new);

    let production = config.server.mode.is_production();
    let state = AppState {
        generator,
        codec,
        oauth,
        grounding: config.gemini.grounding,
        frontend_url: config.auth.frontend_url.clone(),
        session_max_age: config.auth.session_ttl_days * 86_400,
        secure_cookies: production,
    };

    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        allowed_origins: config.cors.origin_list(),
        development: !production,
    };

    start_server(&server_config, state).await
}

fn init_tracing(log_level: &str) {
    let filter =
        EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
