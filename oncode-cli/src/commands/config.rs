//! Config command - Inspect and change persisted settings

use std::path::Path;

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;

use super::AppContext;
use crate::config::OncodeConfig;
use crate::output::{Output, OutputConfig, Outputter, SuccessMessage, TableOutput};

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current settings (API key masked)
    Show,
    /// Change one setting, e.g. `showHints false`
    Set {
        /// apiKey, backendUrl, autoAnalyze, showHints, showEdgeCases,
        /// output.format or output.color
        key: String,
        value: String,
    },
    /// Restore default settings
    Reset,
    /// Print the settings file location
    Path,
}

/// Settings as displayed: the key never leaves the machine in clear.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigView {
    pub path: String,
    pub api_key: String,
    pub backend_url: String,
    pub auto_analyze: bool,
    pub show_hints: bool,
    pub show_edge_cases: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_color: Option<bool>,
}

impl ConfigView {
    pub fn new(config: &OncodeConfig, path: &Path) -> Self {
        Self {
            path: path.display().to_string(),
            api_key: config.masked_api_key(),
            backend_url: config.backend_url.clone(),
            auto_analyze: config.settings.auto_analyze,
            show_hints: config.settings.show_hints,
            show_edge_cases: config.settings.show_edge_cases,
            output_format: config.output.format.clone(),
            output_color: config.output.color,
        }
    }
}

impl Outputter for ConfigView {
    fn to_table(&self, config: &OutputConfig) -> String {
        let mut pairs = vec![
            ("File", self.path.clone()),
            ("apiKey", self.api_key.clone()),
            ("backendUrl", self.backend_url.clone()),
            ("autoAnalyze", self.auto_analyze.to_string()),
            ("showHints", self.show_hints.to_string()),
            ("showEdgeCases", self.show_edge_cases.to_string()),
        ];
        if let Some(format) = &self.output_format {
            pairs.push(("output.format", format.clone()));
        }
        if let Some(color) = self.output_color {
            pairs.push(("output.color", color.to_string()));
        }
        TableOutput::format_key_value(&pairs, config)
    }
}

pub async fn run(ctx: &AppContext, action: ConfigAction) -> Result<()> {
    let path = ctx.config_path.as_path();
    match action {
        ConfigAction::Show => Output::new(ConfigView::new(&ctx.config, path), ctx.output).render(),
        ConfigAction::Set { key, value } => {
            let mut config = ctx.config.clone();
            config.set(&key, &value)?;
            config.save(path)?;
            Output::new(SuccessMessage::new(format!("Set {}", key)), ctx.output).render()
        }
        ConfigAction::Reset => {
            OncodeConfig::default().save(path)?;
            Output::new(
                SuccessMessage::new("Settings restored to defaults"),
                ctx.output,
            )
            .render()
        }
        ConfigAction::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}
