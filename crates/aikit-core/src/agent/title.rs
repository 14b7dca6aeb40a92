//! Conversation title generation.
//!
//! [`TitleGenerator`] asks the model for a 3-6 word title based on the
//! opening of a conversation, then cleans the reply (quotes, "Chat with..."
//! style prefixes, overlong output) and scores it with a surface-level
//! confidence heuristic.

use std::sync::LazyLock;

use regex::Regex;

use aikit_types::agent::{AgentContext, AgentError};
use aikit_types::llm::Message;
use aikit_types::title::{TitleGenerationInput, TitleGenerationOutput};

use super::engine::Agent;

/// Only the opening messages are sent; intent is established early.
const MAX_MESSAGES_TO_ANALYZE: usize = 3;
const MAX_TITLE_CHARS: usize = 200;
const MIN_WORDS: usize = 3;
const MAX_WORDS: usize = 6;

/// Title used when the model returns nothing usable.
pub const FALLBACK_TITLE: &str = "New Chat";

/// System prompt for the title generation call.
const TITLE_SYSTEM_PROMPT: &str = r#"You are a helpful assistant that generates short, descriptive titles for chat conversations.

REQUIREMENTS:
- Title must be 3-6 words long
- Title must be at most 200 characters
- Do NOT use quotes around the title
- Do NOT use prefixes like "Chat with...", "Conversation about...", "Discussion on..."
- Use title case (capitalize main words)
- Be specific and descriptive based on the actual content
- Do NOT make assumptions or add information not present in the conversation

IMPORTANT:
- If it's just a simple greeting (like "hello", "hi there"), respond with "Casual Greeting"
- If the topic is unclear, respond with "General Discussion"
- Base the title ONLY on what was actually discussed

EXAMPLES:
Good: "Baking a Chocolate Cake"
Good: "React useEffect Hook Help"
Good: "Travel Plans to Paris"
Good: "Python List Comprehension Syntax"
Bad: "Chat with User about Baking"
Bad: "A Conversation about React"
Bad: "Discussion on Travel"

Return ONLY the title text, nothing else."#;

static LEADING_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(chat with|conversation about|discussion on)\s+")
        .expect("Invalid title prefix regex")
});

static GENERIC_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(chat|conversation|discussion)").expect("Invalid generic start regex")
});

/// Agent that produces a short title for a chat conversation.
#[derive(Debug, Clone, Copy, Default)]
pub struct TitleGenerator;

impl TitleGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Agent for TitleGenerator {
    type Input = TitleGenerationInput;
    type Output = TitleGenerationOutput;

    fn name(&self) -> &str {
        "title-generator"
    }

    fn description(&self) -> &str {
        "Generates short, descriptive titles for chat conversations (3-6 words)"
    }

    fn validate_input(&self, input: &TitleGenerationInput) -> Result<(), AgentError> {
        if input.messages.is_empty() {
            return Err(AgentError::Validation(
                "At least one message is required to generate a title".to_string(),
            ));
        }

        if !input.messages.iter().any(|m| !m.content.trim().is_empty()) {
            return Err(AgentError::Validation(
                "Messages must contain actual content".to_string(),
            ));
        }

        Ok(())
    }

    fn build_system_prompt(&self, _context: Option<&AgentContext>) -> Result<String, AgentError> {
        Ok(TITLE_SYSTEM_PROMPT.to_string())
    }

    fn build_messages(
        &self,
        input: &TitleGenerationInput,
        _context: Option<&AgentContext>,
    ) -> Result<Vec<Message>, AgentError> {
        let transcript = input
            .messages
            .iter()
            .take(MAX_MESSAGES_TO_ANALYZE)
            .map(|m| format!("{}: {}", m.role, m.content))
            .collect::<Vec<_>>()
            .join("\n\n");

        let mut prompt = format!("Generate a title for this conversation:\n\n{transcript}");

        if let Some(context) = input.context.as_deref().filter(|c| !c.is_empty()) {
            prompt.push_str("\n\nAdditional context: ");
            prompt.push_str(context);
        }

        Ok(vec![Message::user(prompt)])
    }

    fn parse_response(
        &self,
        text: &str,
        _context: Option<&AgentContext>,
    ) -> Result<TitleGenerationOutput, AgentError> {
        Ok(parse_title(text))
    }

    fn temperature(&self) -> f64 {
        0.5
    }

    fn max_tokens(&self) -> u32 {
        50
    }
}

/// Clean a raw model reply into a title and score it.
pub fn parse_title(text: &str) -> TitleGenerationOutput {
    let unquoted = strip_surrounding_quotes(text.trim());
    let unprefixed = LEADING_PREFIX.replace(unquoted, "");

    let mut title = unprefixed.trim().to_string();
    if title.is_empty() {
        title = FALLBACK_TITLE.to_string();
    }

    if title.chars().count() > MAX_TITLE_CHARS {
        let kept: String = title.chars().take(MAX_TITLE_CHARS - 3).collect();
        title = format!("{}...", kept.trim());
    }

    let confidence = title_confidence(&title);
    TitleGenerationOutput {
        title,
        confidence: Some(confidence),
    }
}

/// Heuristic quality score in `[0, 1]` from surface features of a title.
///
/// Penalties are independent and stack.
pub fn title_confidence(title: &str) -> f64 {
    let mut score: f64 = 1.0;

    let word_count = title.split_whitespace().count();
    if !(MIN_WORDS..=MAX_WORDS).contains(&word_count) {
        score -= 0.2;
    }

    if title.chars().count() < 10 {
        score -= 0.3;
    }

    let lower = title.to_lowercase();
    if title == FALLBACK_TITLE
        || lower.contains("general discussion")
        || lower.contains("casual greeting")
    {
        score -= 0.4;
    }

    if GENERIC_START.is_match(title) {
        score -= 0.2;
    }

    score.clamp(0.0, 1.0)
}

/// Remove one quote from each end, only when both ends carry one.
fn strip_surrounding_quotes(s: &str) -> &str {
    let is_quote = |c: char| c == '"' || c == '\'';
    let mut chars = s.chars();
    match (chars.next(), chars.next_back()) {
        (Some(first), Some(last)) if is_quote(first) && is_quote(last) => &s[1..s.len() - 1],
        _ => s,
    }
}
