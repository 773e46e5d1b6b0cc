//! Configuration types for EDGO.
//!
//! `CounselorConfig` represents the optional `config.toml` in the data
//! directory. Every field has a default matching the hosted web app.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::llm::GenerationConfig;

/// Top-level configuration.
///
/// Loaded from `~/.edgo/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounselorConfig {
    /// Model identifier sent to the Gemini API.
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Base URL of the Generative Language API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Give up on a reply stream after this many seconds without a chunk.
    /// Unset means wait indefinitely.
    #[serde(default)]
    pub stream_idle_timeout_secs: Option<u64>,

    /// Append the stage-specific guidance block to the system instruction.
    #[serde(default)]
    pub per_stage_instructions: bool,

    /// Replace the built-in persona template with the contents of this file.
    /// The file must contain the `{career_database}` placeholder.
    #[serde(default)]
    pub persona_file: Option<PathBuf>,
}

fn default_model() -> String {
    GenerationConfig::default().model
}

fn default_temperature() -> f32 {
    GenerationConfig::default().temperature
}

fn default_max_output_tokens() -> u32 {
    GenerationConfig::default().max_output_tokens
}

fn default_api_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

impl Default for CounselorConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
            api_base_url: default_api_base_url(),
            stream_idle_timeout_secs: None,
            per_stage_instructions: false,
            persona_file: None,
        }
    }
}

/// Errors from reading configuration files.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
}

impl CounselorConfig {
    /// The sampling settings to bind every session to.
    pub fn generation(&self) -> GenerationConfig {
        GenerationConfig {
            model: self.model.clone(),
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
        }
    }

    pub fn stream_idle_timeout(&self) -> Option<Duration> {
        self.stream_idle_timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = CounselorConfig::default();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.max_output_tokens, 2000);
        assert!(config.stream_idle_timeout().is_none());
        assert!(!config.per_stage_instructions);
        assert!(config.persona_file.is_none());
    }

    #[test]
    fn test_deserialize_empty_uses_defaults() {
        let config: CounselorConfig = toml::from_str("").unwrap();
        assert_eq!(config, CounselorConfig::default());
    }

    #[test]
    fn test_deserialize_with_values() {
        let toml_str = r#"
model = "gemini-2.5-pro"
temperature = 0.2
stream_idle_timeout_secs = 30
per_stage_instructions = true
persona_file = "/tmp/persona.md"
"#;
        let config: CounselorConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.model, "gemini-2.5-pro");
        assert!((config.temperature - 0.2).abs() < f32::EPSILON);
        assert_eq!(config.max_output_tokens, 2000);
        assert_eq!(config.stream_idle_timeout(), Some(Duration::from_secs(30)));
        assert!(config.per_stage_instructions);
        assert_eq!(config.persona_file, Some(PathBuf::from("/tmp/persona.md")));
    }

    #[test]
    fn test_generation_mirrors_fields() {
        let config = CounselorConfig {
            model: "m".to_string(),
            temperature: 0.1,
            max_output_tokens: 10,
            ..Default::default()
        };
        let generation = config.generation();
        assert_eq!(generation.model, "m");
        assert_eq!(generation.max_output_tokens, 10);
    }
}
