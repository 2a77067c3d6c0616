//! OnCode settings loaded from `settings.toml`.
//!
//! The file lives in the platform config directory
//! (`~/.config/oncode/settings.toml` on Linux) unless `--config` points
//! elsewhere. Every key is optional; a missing or broken file yields defaults.
//!
//! # Example Configuration
//!
//! ```toml
//! apiKey = "sk-..."
//! backendUrl = "http://127.0.0.1:8000"
//!
//! [settings]
//! autoAnalyze = true
//! showHints = true
//! showEdgeCases = false
//!
//! [output]
//! format = "json"
//! color = false
//! ```

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Backend used when no URL is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

const CONFIG_DIR: &str = "oncode";
const CONFIG_FILE: &str = "settings.toml";

/// Keys accepted by `oncode config set`.
pub const KEYS: &[&str] = &[
    "apiKey",
    "backendUrl",
    "autoAnalyze",
    "showHints",
    "showEdgeCases",
    "output.format",
    "output.color",
];

/// Root of the settings file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OncodeConfig {
    /// Sent to the backend as a bearer token when non-empty.
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    #[serde(default)]
    pub settings: Settings,

    /// CLI rendering preferences. Command-line flags win over these.
    #[serde(default, skip_serializing_if = "OutputSettings::is_empty")]
    pub output: OutputSettings,
}

/// Assistant behavior toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Analyze automatically whenever new code is loaded into a session.
    #[serde(default = "enabled")]
    pub auto_analyze: bool,

    #[serde(default = "enabled")]
    pub show_hints: bool,

    /// When off, suggestions and hints about edge cases are hidden.
    #[serde(default = "enabled")]
    pub show_edge_cases: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// `table` or `json`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
}

impl OutputSettings {
    fn is_empty(&self) -> bool {
        self.format.is_none() && self.color.is_none()
    }
}

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

fn enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_analyze: true,
            show_hints: true,
            show_edge_cases: true,
        }
    }
}

impl Default for OncodeConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            backend_url: default_backend_url(),
            settings: Settings::default(),
            output: OutputSettings::default(),
        }
    }
}

impl OncodeConfig {
    /// `<config_dir>/oncode/settings.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Load settings from `path`.
    ///
    /// A missing file is not an error. Read and parse failures are logged as
    /// warnings and the defaults are returned.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!("No settings file at {}", path.display());
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}", path.display(), e);
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
            }
        }
        Self::default()
    }

    /// Write settings to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize settings")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Update one key. Keys use the file's own spelling, see [`KEYS`].
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let key = key.strip_prefix("settings.").unwrap_or(key);
        match key {
            "apiKey" => self.api_key = value.trim().to_string(),
            "backendUrl" => {
                let url = value.trim().trim_end_matches('/');
                if url::Url::parse(url).is_err() {
                    bail!("Invalid backend URL: '{}'", value);
                }
                self.backend_url = url.to_string();
            }
            "autoAnalyze" => self.settings.auto_analyze = parse_bool(key, value)?,
            "showHints" => self.settings.show_hints = parse_bool(key, value)?,
            "showEdgeCases" => self.settings.show_edge_cases = parse_bool(key, value)?,
            "output.format" => {
                let format = value.trim().to_lowercase();
                if format != "table" && format != "json" {
                    bail!("Invalid output format '{}': expected table or json", value);
                }
                self.output.format = Some(format);
            }
            "output.color" => self.output.color = Some(parse_bool(key, value)?),
            _ => bail!("Unknown setting '{}'. Valid keys: {}", key, KEYS.join(", ")),
        }
        Ok(())
    }

    /// The API key with all but the last four characters hidden.
    pub fn masked_api_key(&self) -> String {
        let count = self.api_key.chars().count();
        if count == 0 {
            return "(not set)".to_string();
        }
        if count <= 4 {
            return "****".to_string();
        }
        let visible: String = self.api_key.chars().skip(count.saturating_sub(4)).collect();
        format!("{}{}", "*".repeat(count.saturating_sub(4).min(8)), visible)
    }

    pub fn default_format(&self) -> Option<&str> {
        self.output.format.as_deref()
    }

    pub fn use_color(&self) -> Option<bool> {
        self.output.color
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => bail!("Invalid value '{}' for {}: expected true or false", value, key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = OncodeConfig::default();
        assert_eq!(config.api_key, "");
        assert_eq!(config.backend_url, DEFAULT_BACKEND_URL);
        assert!(config.settings.auto_analyze);
        assert!(config.settings.show_hints);
        assert!(config.settings.show_edge_cases);
        assert!(config.default_format().is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
apiKey = "secret-key"
backendUrl = "http://localhost:9000"

[settings]
autoAnalyze = false
showEdgeCases = false

[output]
format = "json"
color = false
"#;
        let config: OncodeConfig = toml::from_str(toml_content).unwrap();

        assert_eq!(config.api_key, "secret-key");
        assert_eq!(config.backend_url, "http://localhost:9000");
        assert!(!config.settings.auto_analyze);
        assert!(config.settings.show_hints);
        assert!(!config.settings.show_edge_cases);
        assert_eq!(config.default_format(), Some("json"));
        assert_eq!(config.use_color(), Some(false));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let config: OncodeConfig = toml::from_str("theme = \"dark\"\n[settings]\nfoo = 1\n").unwrap();
        assert_eq!(config, OncodeConfig::default());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let config = OncodeConfig::load(&dir.path().join("nope.toml"));
        assert_eq!(config, OncodeConfig::default());
    }

    #[test]
    fn test_load_invalid_file_falls_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "apiKey = [not toml").unwrap();

        assert_eq!(OncodeConfig::load(&path), OncodeConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("settings.toml");

        let mut config = OncodeConfig::default();
        config.set("apiKey", "abc123").unwrap();
        config.set("showHints", "false").unwrap();
        config.save(&path).unwrap();

        let loaded = OncodeConfig::load(&path);
        assert_eq!(loaded, config);

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("apiKey = \"abc123\""));
        assert!(raw.contains("showHints = false"));
        assert!(!raw.contains("[output]"));
    }

    #[test]
    fn test_set_validates() {
        let mut config = OncodeConfig::default();

        assert!(config.set("showHints", "maybe").is_err());
        assert!(config.set("backendUrl", "not a url").is_err());
        assert!(config.set("output.format", "csv").is_err());
        assert!(config.set("colour", "true").is_err());

        config.set("settings.autoAnalyze", "off").unwrap();
        assert!(!config.settings.auto_analyze);

        config.set("backendUrl", "http://example.com:8000/").unwrap();
        assert_eq!(config.backend_url, "http://example.com:8000");
    }

    #[test]
    fn test_masked_api_key() {
        let mut config = OncodeConfig::default();
        assert_eq!(config.masked_api_key(), "(not set)");

        config.api_key = "sk-1234567890".to_string();
        assert_eq!(config.masked_api_key(), "********7890");

        config.api_key = "abc".to_string();
        assert_eq!(config.masked_api_key(), "****");

        config.api_key = "abcd".to_string();
        assert_eq!(config.masked_api_key(), "****");

        config.api_key = "abcde".to_string();
        assert_eq!(config.masked_api_key(), "*bcde");
    }
}
