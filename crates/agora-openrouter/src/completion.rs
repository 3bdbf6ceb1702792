//! Chat-completion request and response types.

use serde::{Deserialize, Serialize};

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message role (`system`, `user`, `assistant`)
    pub role: String,
    /// Message content
    pub content: String,
}

impl ChatMessage {
    /// Creates a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_owned(),
            content: content.into(),
        }
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_owned(),
            content: content.into(),
        }
    }
}

/// A chat-completion request body.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model identifier
    pub model: String,
    /// Conversation messages
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature
    pub temperature: f32,
    /// Whether to stream the response; always false here
    pub stream: bool,
}

/// A chat-completion response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Response identifier
    #[serde(default)]
    pub id: Option<String>,
    /// Model that produced the response
    #[serde(default)]
    pub model: Option<String>,
    /// Completion choices
    pub choices: Vec<ChatChoice>,
    /// Token usage, when reported
    #[serde(default)]
    pub usage: Option<ChatUsage>,
}

/// One completion choice.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    /// The assistant message
    pub message: ChatMessage,
    /// Why generation stopped
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Token usage accounting.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ChatUsage {
    /// Tokens in the prompt
    #[serde(default)]
    pub prompt_tokens: u32,
    /// Tokens in the completion
    #[serde(default)]
    pub completion_tokens: u32,
    /// Total tokens billed
    #[serde(default)]
    pub total_tokens: u32,
}

impl ChatResponse {
    /// Returns the content of the first choice, if any.
    pub fn content(&self) -> Option<&str> {
        self.choices
            .first()
            .map(|choice| choice.message.content.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_decodes() {
        let body = r#"{
            "id": "gen-1",
            "model": "anthropic/claude-3.5-haiku",
            "choices": [
                {
                    "message": { "role": "assistant", "content": "{\"overall\":\"positive\"}" },
                    "finish_reason": "stop"
                }
            ],
            "usage": { "prompt_tokens": 120, "completion_tokens": 18, "total_tokens": 138 }
        }"#;

        let response: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.content(), Some("{\"overall\":\"positive\"}"));
        assert_eq!(response.usage.unwrap().total_tokens, 138);
    }

    #[test]
    fn test_response_without_usage_decodes() {
        let body = r#"{
            "choices": [
                { "message": { "role": "assistant", "content": "hello" } }
            ]
        }"#;

        let response: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.content(), Some("hello"));
        assert!(response.usage.is_none());
    }
}
