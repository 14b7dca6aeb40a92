//! Title generation input and output types.

use serde::{Deserialize, Serialize};

use crate::llm::Message;

/// Conversation to be titled.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TitleGenerationInput {
    pub messages: Vec<Message>,
    /// Accepted for compatibility; the generated title is always capped at
    /// 200 characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Extra context appended to the transcript sent to the model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl TitleGenerationInput {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            ..Default::default()
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

/// A cleaned-up title and its heuristic quality score in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleGenerationOutput {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}
