//! `edgo prompt`: print the system instruction the model will receive.

use anyhow::Result;

use edgo_types::chat::EducationStage;

use crate::state::AppState;

pub fn show_prompt(state: &AppState, stage: Option<EducationStage>, json: bool) -> Result<()> {
    let instruction = match stage {
        Some(stage) => state.prompts.system_instruction(stage),
        None => state.prompts.base().to_string(),
    };

    if json {
        let out = serde_json::json!({
            "stage": stage,
            "per_stage_instructions": state.config.per_stage_instructions,
            "system_instruction": instruction,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{instruction}");
    }

    Ok(())
}
