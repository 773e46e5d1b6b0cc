//! Banners printed around a counseling session.

use console::style;

use edgo_core::prompt::WELCOME_TEXT;
use edgo_types::chat::EducationStage;

/// Printed once when `edgo chat` starts.
pub fn print_welcome_banner(model: &str, data_dir: &str) {
    println!();
    println!("  {} {}", style("✦").cyan(), style("EDGO AI").cyan().bold());
    println!(
        "  {}",
        style("Your personal career counselor. Confused about what to do after Class 10, 12, or College?").dim()
    );
    println!();
    println!("  {}  {}", style("Model:").bold(), style(model).dim());
    println!("  {}   {}", style("Data:").bold(), style(data_dir).dim());
    println!();
    println!("  {WELCOME_TEXT}");
    println!();
}

/// Printed after a stage is picked, before the greeting.
pub fn print_stage_header(stage: EducationStage) {
    println!();
    println!(
        "  {} {}",
        style("●").green(),
        style(format!("{stage} Counselor")).bold()
    );
    println!(
        "  {}",
        style("Type /help for commands, /home to switch stage, Ctrl+D to exit").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}
