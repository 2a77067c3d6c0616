//! Command implementations for the OnCode CLI
//!
//! Each command module provides a `run` function that executes the command logic.

use std::path::PathBuf;

use anyhow::Result;

use crate::client::BackendClient;
use crate::config::OncodeConfig;
use crate::output::OutputConfig;

pub mod analyze;
pub mod chat;
pub mod code;
pub mod completions;
pub mod config;
pub mod extract;
pub mod history;
pub mod id;
pub mod ping;
pub mod session;
pub mod site;
pub mod sites;

/// State shared by every command: loaded settings plus resolved flags.
pub struct AppContext {
    pub config: OncodeConfig,
    pub config_path: PathBuf,
    /// Resolved rendering options for every command result.
    pub output: OutputConfig,
    /// `--backend-url` when given, otherwise the configured URL.
    pub backend_url: String,
}

impl AppContext {
    pub fn client(&self) -> Result<BackendClient> {
        Ok(BackendClient::new(&self.backend_url, &self.config.api_key)?)
    }
}
