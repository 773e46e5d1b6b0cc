//! Slash command parsing for the chat loop.

use console::style;

#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    Help,
    Clear,
    Exit,
    /// Leave the session and pick a stage again.
    Home,
    /// Show the numbered transcript.
    History,
    /// Rewrite message `number` (1-based, as shown by `/history`) and
    /// regenerate everything after it.
    Edit { number: usize, text: String },
    /// Recognized command with bad arguments; carries the usage hint.
    Invalid(String),
    Unknown(String),
}

const EDIT_USAGE: &str = "usage: /edit <number> <new text>";

/// Parse user input as a slash command. `None` if it does not start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let (cmd, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((cmd, arg)) => (cmd.to_lowercase(), arg.trim()),
        None => (trimmed.to_lowercase(), ""),
    };

    let command = match cmd.as_str() {
        "/help" | "/h" | "/?" => ChatCommand::Help,
        "/clear" | "/cls" => ChatCommand::Clear,
        "/exit" | "/quit" | "/q" => ChatCommand::Exit,
        "/home" | "/back" => ChatCommand::Home,
        "/history" => ChatCommand::History,
        "/edit" => parse_edit(arg),
        other => ChatCommand::Unknown(other.to_string()),
    };
    Some(command)
}

fn parse_edit(arg: &str) -> ChatCommand {
    let Some((number, text)) = arg.split_once(char::is_whitespace) else {
        return ChatCommand::Invalid(EDIT_USAGE.to_string());
    };
    match number.parse::<usize>() {
        Ok(number) if number > 0 && !text.trim().is_empty() => ChatCommand::Edit {
            number,
            text: text.trim().to_string(),
        },
        _ => ChatCommand::Invalid(EDIT_USAGE.to_string()),
    }
}

pub fn print_help() {
    let rows = [
        ("/help", "Show this help message"),
        ("/history", "Show the conversation with message numbers"),
        ("/edit <n> <text>", "Rewrite your message n and get a fresh answer"),
        ("/home", "End this session and choose another stage"),
        ("/clear", "Clear the screen"),
        ("/exit", "End the chat"),
    ];

    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    for (cmd, desc) in rows {
        println!("  {:<18} {}", style(cmd).cyan(), desc);
    }
    println!();
    println!(
        "  {}",
        style("Editing a message removes every message after it.").dim()
    );
    println!();
}
