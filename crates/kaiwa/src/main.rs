// SPDX-FileCopyrightText: 2026 Kaiwa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Kaiwa - a chat backend relaying messages to Gemini, with
//! Google-identity login.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use clap::{Parser, Subcommand};

mod serve;

/// Kaiwa - a Gemini-backed chat API with Google login.
#[derive(Parser, Debug)]
#[command(name = "kaiwa", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Kaiwa API server.
    Serve,
    /// Load the configuration, report problems, and print a summary.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup; everything downstream
    // receives it explicitly.
    let config = match kaiwa_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            kaiwa_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("kaiwa serve: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Config) => {
            print_config_summary(&config);
        }
        None => {
            println!("kaiwa: use --help for available commands");
        }
    }
}

/// Prints the effective configuration without echoing secrets.
fn print_config_summary(config: &kaiwa_config::KaiwaConfig) {
    println!(
        "server: {}:{} ({:?})",
        config.server.host, config.server.port, config.server.mode
    );
    println!(
        "gemini: model={} grounding={} api_key={}",
        config.gemini.model,
        config.gemini.grounding,
        if config.gemini.api_key.is_some() {
            "set"
        } else {
            "unset"
        }
    );
    println!(
        "auth: google_client_id={} session_ttl_days={}",
        if config.auth.google_client_id.is_some() {
            "set"
        } else {
            "unset"
        },
        config.auth.session_ttl_days
    );
    println!("cors: allowed_origins={:?}", config.cors.origin_list());
    for warning in kaiwa_config::startup_warnings(config) {
        println!("warning: {warning}");
    }
}
