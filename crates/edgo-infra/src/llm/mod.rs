//! Model provider implementations.

pub mod gemini;

use secrecy::SecretString;

use edgo_core::llm::box_provider::BoxChatModel;
use edgo_types::config::CounselorConfig;
use edgo_types::llm::LlmError;

use gemini::GeminiModel;

/// Build the configured chat model.
///
/// A missing key is not an error here: the model reports it from
/// `check_ready`, so the failure surfaces when a session is created.
pub fn build_chat_model(
    config: &CounselorConfig,
    api_key: Option<SecretString>,
) -> Result<BoxChatModel, LlmError> {
    let model = GeminiModel::new(api_key, &config.api_base_url)?;
    Ok(BoxChatModel::new(model))
}
