//! CLI module for lexa.
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing
//! - Version display
//! - Chat, ask, search, health and settings commands
//!
//! # Usage
//!
//! ```ignore
//! use lexa::cli::{parse_args, run};
//! use lexa::config::ClientConfig;
//!
//! let args = parse_args(std::env::args())?;
//! run(args.command, ClientConfig::from_env()).await?;
//! ```

pub mod args;
pub mod commands;
pub mod output;
pub mod version;

pub use args::{parse_args, ArgsError, CliArgs, CliCommand, USAGE};
pub use version::{version_line, VERSION};

use color_eyre::{eyre::WrapErr, Result};

use crate::adapters::ReqwestHttpClient;
use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::settings::SettingsStore;

/// Run a parsed command against the configured service.
pub async fn run(command: CliCommand, config: ClientConfig) -> Result<()> {
    let store = SettingsStore::default_location();

    match command {
        CliCommand::Version => {
            println!("{}", version_line());
            Ok(())
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            Ok(())
        }
        CliCommand::Settings { top_k, threshold } => {
            commands::run_settings(store.as_ref(), top_k, threshold)
        }
        command => {
            let http = ReqwestHttpClient::with_connect_timeout(config.request_timeout)
                .wrap_err("Failed to create HTTP client")?;
            let api = ApiClient::new(config.base_url.clone(), http);
            let settings = store.as_ref().map(SettingsStore::load).unwrap_or_default();
            tracing::debug!("Using {} with {:?}", api.base_url(), settings);

            match command {
                CliCommand::Ask(query) => commands::run_ask(api, settings, &query).await,
                CliCommand::Search { query, filters } => {
                    commands::run_search(api, settings, &query, &filters).await
                }
                CliCommand::Health => commands::run_health(api).await,
                _ => commands::run_chat(api, settings).await,
            }
        }
    }
}
