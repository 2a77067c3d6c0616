//! Renderable views of backend results, shared by one-shot commands and the
//! interactive session.

use colored::Colorize;
use oncode_core::ConversationMessage;
use serde::Serialize;

use crate::client::Analysis;
use crate::config::Settings;
use crate::output::TableDisplay;

/// Conversation as shown to the user: system messages removed.
#[derive(Debug, Serialize)]
pub struct ConversationView {
    pub problem_id: String,
    pub messages: Vec<ConversationMessage>,
}

impl ConversationView {
    pub fn new(problem_id: impl Into<String>, history: &[ConversationMessage]) -> Self {
        Self {
            problem_id: problem_id.into(),
            messages: history.iter().filter(|m| m.is_visible()).cloned().collect(),
        }
    }

    /// Only the newest message, for printing replies in the session.
    pub fn latest(&self) -> Option<&ConversationMessage> {
        self.messages.last()
    }
}

/// `Assistant:` / `You:` label followed by the message text.
pub fn format_message(message: &ConversationMessage) -> String {
    let label = message.role.label();
    let label = if label == "Assistant" {
        format!("{}:", label).cyan().bold()
    } else {
        format!("{}:", label).green().bold()
    };
    format!("{} {}", label, message.content.trim_end())
}

impl TableDisplay for ConversationView {
    fn to_table(&self) -> String {
        let mut output = format!(
            "{} {}\n",
            "CONVERSATION:".cyan().bold(),
            self.problem_id.yellow()
        );
        output.push_str(&format!("{}\n", "-".repeat(60)));

        if self.messages.is_empty() {
            output.push_str(&"  No messages yet.".dimmed().to_string());
            return output;
        }

        let rendered: Vec<String> = self.messages.iter().map(format_message).collect();
        output.push_str(&rendered.join("\n\n"));
        output
    }
}

/// Analysis filtered by the user's display settings.
#[derive(Debug, Serialize)]
pub struct AnalysisView {
    pub suggestions: Vec<String>,
    pub hints: Vec<String>,
    /// Items dropped because they mention edge cases.
    #[serde(skip_serializing_if = "is_zero")]
    pub hidden_edge_cases: usize,
    #[serde(skip)]
    hints_enabled: bool,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

fn mentions_edge_case(line: &str) -> bool {
    let lower = line.to_lowercase();
    lower.contains("edge case") || lower.contains("edge-case") || lower.contains("corner case")
}

impl AnalysisView {
    pub fn new(analysis: Analysis, settings: &Settings) -> Self {
        let mut hidden = 0;
        let mut keep = |items: Vec<String>| -> Vec<String> {
            if settings.show_edge_cases {
                return items;
            }
            let before = items.len();
            let kept: Vec<String> = items.into_iter().filter(|s| !mentions_edge_case(s)).collect();
            hidden += before - kept.len();
            kept
        };

        let suggestions = keep(analysis.suggestions);
        let hints = if settings.show_hints {
            keep(analysis.hints)
        } else {
            Vec::new()
        };

        Self {
            suggestions,
            hints,
            hidden_edge_cases: hidden,
            hints_enabled: settings.show_hints,
        }
    }
}

impl TableDisplay for AnalysisView {
    fn to_table(&self) -> String {
        let mut output = format!("{}\n", "SUGGESTIONS:".cyan().bold());
        if self.suggestions.is_empty() {
            output.push_str(&format!("  {}\n", "None".dimmed()));
        }
        for suggestion in &self.suggestions {
            output.push_str(&format!("  {} {}\n", "•".yellow(), suggestion));
        }

        if self.hints_enabled {
            output.push_str(&format!("\n{}\n", "HINTS:".cyan().bold()));
            if self.hints.is_empty() {
                output.push_str(&format!("  {}\n", "None".dimmed()));
            }
            for hint in &self.hints {
                output.push_str(&format!("  {} {}\n", "?".green(), hint));
            }
        }

        if self.hidden_edge_cases > 0 {
            output.push_str(&format!(
                "\n{}\n",
                format!(
                    "{} edge-case item(s) hidden (showEdgeCases = false)",
                    self.hidden_edge_cases
                )
                .dimmed()
            ));
        }
        output.trim_end().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oncode_core::Role;

    fn analysis() -> Analysis {
        Analysis {
            suggestions: vec![
                "Use long long for the sum".to_string(),
                "Handle the edge case where n = 0".to_string(),
            ],
            hints: vec![
                "Think about prefix sums".to_string(),
                "Corner case: all values equal".to_string(),
            ],
        }
    }

    #[test]
    fn test_conversation_hides_system_messages() {
        let history = vec![
            ConversationMessage::new(Role::System, "You are a tutor."),
            ConversationMessage::new(Role::User, "Why TLE?"),
            ConversationMessage::new(Role::Assistant, "Your loop is O(n^2)."),
        ];
        let view = ConversationView::new("1A", &history);

        assert_eq!(view.messages.len(), 2);
        assert_eq!(view.latest().unwrap().content, "Your loop is O(n^2).");

        colored::control::set_override(false);
        let table = view.to_table();
        assert!(table.contains("You: Why TLE?"));
        assert!(table.contains("Assistant: Your loop is O(n^2)."));
        assert!(!table.contains("tutor"));
    }

    #[test]
    fn test_empty_conversation() {
        colored::control::set_override(false);
        let view = ConversationView::new("unknown", &[]);
        assert!(view.to_table().contains("No messages yet."));
    }

    #[test]
    fn test_analysis_with_everything_enabled() {
        let view = AnalysisView::new(analysis(), &Settings::default());
        assert_eq!(view.suggestions.len(), 2);
        assert_eq!(view.hints.len(), 2);
        assert_eq!(view.hidden_edge_cases, 0);
    }

    #[test]
    fn test_analysis_hides_edge_cases() {
        let settings = Settings {
            show_edge_cases: false,
            ..Settings::default()
        };
        let view = AnalysisView::new(analysis(), &settings);

        assert_eq!(view.suggestions, vec!["Use long long for the sum"]);
        assert_eq!(view.hints, vec!["Think about prefix sums"]);
        assert_eq!(view.hidden_edge_cases, 2);
    }

    #[test]
    fn test_analysis_hides_hints() {
        let settings = Settings {
            show_hints: false,
            ..Settings::default()
        };
        let view = AnalysisView::new(analysis(), &settings);
        assert!(view.hints.is_empty());

        colored::control::set_override(false);
        assert!(!view.to_table().contains("HINTS:"));
    }
}
