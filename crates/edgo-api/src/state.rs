//! Application state: configuration, prompt assembly, and model wiring.

use std::path::PathBuf;

use anyhow::Context;

use edgo_core::career::builtin_database;
use edgo_core::conversation::counselor::Counselor;
use edgo_core::prompt::{PERSONA_TEMPLATE, PromptAssembler};
use edgo_core::session::SessionAdapter;
use edgo_infra::config::{load_config, load_persona};
use edgo_infra::filesystem::resolve_data_dir;
use edgo_infra::llm::build_chat_model;
use edgo_infra::secret::resolve_api_key;
use edgo_types::config::CounselorConfig;

/// Everything a command needs, resolved once at startup.
pub struct AppState {
    pub data_dir: PathBuf,
    pub config: CounselorConfig,
    pub prompts: PromptAssembler,
}

impl AppState {
    /// Resolve the data directory, load `config.toml`, and assemble the
    /// system instruction.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        let config = load_config(&data_dir).await;

        let template = load_persona(&config, &data_dir)
            .await?
            .unwrap_or_else(|| PERSONA_TEMPLATE.to_string());
        let prompts = PromptAssembler::new(
            &template,
            &builtin_database(),
            config.per_stage_instructions,
        )
        .context("failed to assemble system instruction")?;

        tracing::debug!(
            data_dir = %data_dir.display(),
            model = %config.model,
            per_stage = config.per_stage_instructions,
            "application state initialized"
        );

        Ok(Self {
            data_dir,
            config,
            prompts,
        })
    }

    /// Build a counselor bound to the configured Gemini model.
    pub fn counselor(&self) -> anyhow::Result<Counselor> {
        let model = build_chat_model(&self.config, resolve_api_key())?;
        let session = SessionAdapter::new(model, self.config.generation())
            .with_idle_timeout(self.config.stream_idle_timeout());
        Ok(Counselor::new(session, self.prompts.clone()))
    }
}
