//! Data models for extracted problem pages and backend conversations.
//!
//! `ProblemData` is the record sent to the analysis backend. Its JSON shape
//! (camelCase field names, every field always present) is the contract the
//! backend deserializes, so field renames here are wire changes.

use serde::{Deserialize, Serialize};

/// Sample test cases scraped from a problem page.
///
/// `inputs[i]` and `outputs[i]` describe the same example. Both lists are kept
/// exactly as extracted, even when their lengths differ; use [`pairs`] for a
/// length-safe view.
///
/// [`pairs`]: SampleTests::pairs
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleTests {
    #[serde(default)]
    pub inputs: Vec<String>,
    #[serde(default)]
    pub outputs: Vec<String>,
}

impl SampleTests {
    pub fn new(inputs: Vec<String>, outputs: Vec<String>) -> Self {
        Self { inputs, outputs }
    }

    /// True when no sample input or output was found.
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty() && self.outputs.is_empty()
    }

    /// True when every input has a matching output.
    pub fn is_balanced(&self) -> bool {
        self.inputs.len() == self.outputs.len()
    }

    /// Positional (input, output) pairs, truncated to the shorter list.
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        self.inputs
            .iter()
            .zip(self.outputs.iter())
            .map(|(i, o)| (i.as_str(), o.as_str()))
            .collect()
    }
}

/// Normalized problem record produced by every site extractor.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemData {
    #[serde(default)]
    pub statement: String,
    #[serde(default)]
    pub input_spec: String,
    #[serde(default)]
    pub output_spec: String,
    #[serde(default)]
    pub sample_tests: SampleTests,
}

impl ProblemData {
    /// True when extraction found nothing at all.
    pub fn is_blank(&self) -> bool {
        self.statement.trim().is_empty()
            && self.input_spec.trim().is_empty()
            && self.output_spec.trim().is_empty()
            && self.sample_tests.is_empty()
    }
}

/// Author of a conversation message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    /// Any role the backend sends that we do not know about.
    #[serde(untagged)]
    Other(String),
}

impl Role {
    /// Display label used in the conversation view.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Assistant => "Assistant",
            _ => "You",
        }
    }
}

/// One entry of a problem's conversation history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub role: Role,
    pub content: String,
}

impl ConversationMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// System prompts are stored by the backend but never shown.
    pub fn is_visible(&self) -> bool {
        self.role != Role::System
    }
}
