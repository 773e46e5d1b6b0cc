//! Conversation message, education stage, and state types for EDGO.
//!
//! These types model a single counseling conversation as the presentation
//! layer sees it: an ordered transcript plus loading and stage flags.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

// Re-export Role from llm module (it's used in both chat and llm contexts).
pub use crate::llm::Role;

/// The education stage a student picks before the session starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EducationStage {
    Class10,
    Class12,
    Undergrad,
    #[default]
    Unselected,
}

impl EducationStage {
    /// The stages a student can actually pick, in display order.
    pub const SELECTABLE: [EducationStage; 3] = [
        EducationStage::Class10,
        EducationStage::Class12,
        EducationStage::Undergrad,
    ];

    /// Short subtitle shown next to the stage in pickers.
    pub fn focus(&self) -> &'static str {
        match self {
            EducationStage::Class10 => "Stream Selection",
            EducationStage::Class12 => "College & Courses",
            EducationStage::Undergrad => "Job Market Ready",
            EducationStage::Unselected => "",
        }
    }

    /// One-line pitch for the stage picker.
    pub fn blurb(&self) -> &'static str {
        match self {
            EducationStage::Class10 => {
                "Confused between Science, Commerce, or Arts? We help you analyze your strengths."
            }
            EducationStage::Class12 => {
                "Targeting JEE, NEET, or CUET? Let's shortlist the best colleges and courses for you."
            }
            EducationStage::Undergrad => {
                "Building your resume? Find high-paying career paths, internships, and skills."
            }
            EducationStage::Unselected => "",
        }
    }
}

impl fmt::Display for EducationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EducationStage::Class10 => write!(f, "Class 10"),
            EducationStage::Class12 => write!(f, "Class 12"),
            EducationStage::Undergrad => write!(f, "Undergraduate"),
            EducationStage::Unselected => write!(f, "Unselected"),
        }
    }
}

impl FromStr for EducationStage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match normalized.as_str() {
            "class10" | "10" => Ok(EducationStage::Class10),
            "class12" | "12" => Ok(EducationStage::Class12),
            "undergrad" | "undergraduate" | "ug" => Ok(EducationStage::Undergrad),
            "unselected" => Ok(EducationStage::Unselected),
            _ => Err(format!("invalid education stage: '{s}'")),
        }
    }
}

/// A single message in the transcript.
///
/// `id` never changes; `text` is rewritten in place while a reply streams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a message with a fresh id and the current time.
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    /// An empty model message reserved for a reply that has not arrived yet.
    pub fn placeholder() -> Self {
        Self::new(Role::Model, String::new())
    }
}

/// Everything the presentation layer needs to render a conversation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    pub messages: Vec<Message>,
    pub is_loading: bool,
    pub stage: EducationStage,
    pub has_started: bool,
}

impl ConversationState {
    /// Whether a "typing" indicator should show: a reply is pending and the
    /// last visible message is still the user's.
    pub fn awaiting_reply(&self) -> bool {
        self.is_loading
            && self
                .messages
                .last()
                .is_none_or(|m| m.role == Role::User || m.text.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_display() {
        assert_eq!(EducationStage::Class10.to_string(), "Class 10");
        assert_eq!(EducationStage::Undergrad.to_string(), "Undergraduate");
    }

    #[test]
    fn test_stage_from_str_accepts_cli_spellings() {
        assert_eq!("class-10".parse::<EducationStage>().unwrap(), EducationStage::Class10);
        assert_eq!("Class 12".parse::<EducationStage>().unwrap(), EducationStage::Class12);
        assert_eq!("12".parse::<EducationStage>().unwrap(), EducationStage::Class12);
        assert_eq!("undergrad".parse::<EducationStage>().unwrap(), EducationStage::Undergrad);
        assert_eq!(
            "Undergraduate".parse::<EducationStage>().unwrap(),
            EducationStage::Undergrad
        );
        assert!("phd".parse::<EducationStage>().is_err());
    }

    #[test]
    fn test_stage_display_roundtrip() {
        for stage in EducationStage::SELECTABLE {
            let parsed: EducationStage = stage.to_string().parse().unwrap();
            assert_eq!(stage, parsed);
        }
    }

    #[test]
    fn test_stage_default_is_unselected() {
        assert_eq!(EducationStage::default(), EducationStage::Unselected);
    }

    #[test]
    fn test_placeholder_is_empty_model_message() {
        let msg = Message::placeholder();
        assert_eq!(msg.role, Role::Model);
        assert!(msg.text.is_empty());
    }

    #[test]
    fn test_message_ids_are_unique() {
        let a = Message::new(Role::User, "a");
        let b = Message::new(Role::User, "a");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_initial_state() {
        let state = ConversationState::default();
        assert!(state.messages.is_empty());
        assert!(!state.is_loading);
        assert!(!state.has_started);
        assert_eq!(state.stage, EducationStage::Unselected);
    }

    #[test]
    fn test_awaiting_reply() {
        let mut state = ConversationState {
            is_loading: true,
            ..Default::default()
        };
        assert!(state.awaiting_reply());

        state.messages.push(Message::new(Role::User, "hi"));
        state.messages.push(Message::placeholder());
        assert!(state.awaiting_reply());

        state.messages.last_mut().unwrap().text.push_str("Hel");
        assert!(!state.awaiting_reply());
    }
}
