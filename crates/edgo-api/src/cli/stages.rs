//! `edgo stages`: list the education stages.

use anyhow::Result;
use console::style;
use serde::Serialize;

use edgo_types::chat::EducationStage;

#[derive(Debug, Serialize)]
struct StageRow {
    id: EducationStage,
    name: String,
    focus: &'static str,
    description: &'static str,
}

fn stage_rows() -> Vec<StageRow> {
    EducationStage::SELECTABLE
        .into_iter()
        .map(|stage| StageRow {
            id: stage,
            name: stage.to_string(),
            focus: stage.focus(),
            description: stage.blurb(),
        })
        .collect()
}

pub fn list_stages(json: bool) -> Result<()> {
    let rows = stage_rows();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!();
    for row in &rows {
        println!(
            "  {}  {}",
            style(&row.name).cyan().bold(),
            style(row.focus).dim()
        );
        println!("  {}", row.description);
        println!();
    }
    println!(
        "  Start with: {}",
        style("edgo chat --stage class-10").yellow()
    );
    println!();

    Ok(())
}
