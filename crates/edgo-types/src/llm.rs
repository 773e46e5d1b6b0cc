//! LLM request/response types for EDGO.
//!
//! These types model the data shapes for model provider interactions:
//! session turns, generation settings, chat requests, and stream items.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fallback reply when the model returns no text for a single-shot request.
pub const EMPTY_RESPONSE_FALLBACK: &str = "I'm sorry, I couldn't generate a response.";

/// Fallback reply when a single-shot request fails.
pub const CONNECTION_ERROR_FALLBACK: &str = "Connection error.";

/// Final stream item text when a stream fails midway.
pub const STREAM_ERROR_FALLBACK: &str =
    "I encountered a connection error. Please check your internet connection or API key.";

/// Placeholder text when a stream cannot be started at all.
pub const STREAM_START_FALLBACK: &str = "I'm having trouble connecting. Please try again.";

/// Author of a turn in a conversation.
///
/// Serialized with the wire names the remote API expects (`user` / `model`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Model => write!(f, "model"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "model" => Ok(Role::Model),
            other => Err(format!("invalid role: '{other}'")),
        }
    }
}

/// A single `{role, text}` pair in a session's replayable history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }
}

/// Sampling settings fixed for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            temperature: 0.7,
            max_output_tokens: 2000,
        }
    }
}

/// A fully assembled request: instruction, prior turns, and the new prompt.
///
/// `contents` already ends with the user turn being sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub system_instruction: String,
    pub contents: Vec<Turn>,
    pub generation: GenerationConfig,
}

/// One element of a reply stream as seen by the conversation layer.
///
/// A stream is zero or more `Fragment`s, optionally followed by exactly one
/// `TerminalError`, after which it ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamItem {
    /// A non-empty piece of reply text, in arrival order.
    Fragment(String),
    /// The stream failed; the payload is the human-readable fallback text.
    TerminalError(String),
}

/// Errors from model provider operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("stream error: {0}")]
    Stream(String),

    #[error("rate limited")]
    RateLimited,

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("response blocked: {0}")]
    Blocked(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("no data received for {0} seconds")]
    IdleTimeout(u64),
}

/// Errors from session lifecycle operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("chat session not initialized")]
    Uninitialized,

    #[error("failed to initialize session: {0}")]
    Initialization(#[source] LlmError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_roundtrip() {
        for role in [Role::User, Role::Model] {
            let parsed: Role = role.to_string().parse().unwrap();
            assert_eq!(role, parsed);
        }
    }

    #[test]
    fn test_role_serde_uses_wire_names() {
        assert_eq!(serde_json::to_string(&Role::Model).unwrap(), "\"model\"");
        let parsed: Role = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(parsed, Role::User);
    }

    #[test]
    fn test_role_rejects_assistant() {
        assert!("assistant".parse::<Role>().is_err());
    }

    #[test]
    fn test_generation_config_defaults() {
        let config = GenerationConfig::default();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert!((config.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(config.max_output_tokens, 2000);
    }

    #[test]
    fn test_turn_constructors() {
        assert_eq!(Turn::user("hi").role, Role::User);
        assert_eq!(Turn::model("hello").text, "hello");
    }

    #[test]
    fn test_session_error_display() {
        assert_eq!(
            SessionError::Uninitialized.to_string(),
            "chat session not initialized"
        );
        let err = SessionError::Initialization(LlmError::AuthenticationFailed);
        assert!(err.to_string().contains("authentication failed"));
    }
}
