//! JSON output for scripts and editor integrations.

use super::OutputConfig;
use serde::Serialize;

/// JSON output formatter
pub struct JsonOutput;

impl JsonOutput {
    /// Pretty-printed by default, a single line when `config.compact` is set.
    pub fn format<T: Serialize + ?Sized>(data: &T, config: &OutputConfig) -> String {
        let rendered = if config.compact {
            serde_json::to_string(data)
        } else {
            serde_json::to_string_pretty(data)
        };
        rendered.unwrap_or_else(|e| serde_json::json!({ "error": e.to_string() }).to_string())
    }
}
