//! Main chat loop orchestration.
//!
//! Coordinates the whole counseling lifecycle: stage picker, greeting,
//! input loop with streamed replies, slash commands, and returning home to
//! pick another stage.

use std::future::Future;
use std::time::Duration;

use console::style;
use crossterm::style::Color;
use dialoguer::{Confirm, Select};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};
use uuid::Uuid;

use edgo_core::conversation::counselor::{Counselor, ExchangeOutcome, StageOutcome};
use edgo_core::conversation::stream::ReplyEnd;
use edgo_types::chat::{EducationStage, Message, Role};

use crate::state::AppState;

use super::banner::{print_stage_header, print_welcome_banner};
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::{ChatRenderer, tail};

/// Teal used for EDGO's headings and emphasis.
const ACCENT: Color = Color::Rgb { r: 13, g: 148, b: 136 };

/// Width of the live reply preview next to the spinner.
const PREVIEW_CHARS: usize = 60;

/// Why a chat segment stopped reading input.
enum SessionExit {
    /// `/home`: reset and choose another stage.
    Home,
    Quit,
}

/// Run the interactive counseling loop.
///
/// `stage` skips the picker for the first session only.
pub async fn run_chat_loop(state: &AppState, stage: Option<EducationStage>) -> anyhow::Result<()> {
    let counselor = state.counselor()?;
    let renderer = ChatRenderer::new(Some(ACCENT));

    print_welcome_banner(&state.config.model, &state.data_dir.display().to_string());

    let mut requested = stage.filter(|s| *s != EducationStage::Unselected);
    loop {
        if !counselor.snapshot().has_started {
            let stage = match requested.take() {
                Some(stage) => stage,
                None => match pick_stage()? {
                    Some(stage) => stage,
                    None => break,
                },
            };
            start_stage(&counselor, &renderer, stage).await;
        }

        match chat_segment(&counselor, &renderer).await? {
            SessionExit::Quit => break,
            SessionExit::Home => {
                let reset = counselor.reset(|| {
                    Confirm::new()
                        .with_prompt("Start over? This conversation will be lost.")
                        .default(false)
                        .interact()
                        .unwrap_or(false)
                });
                if reset {
                    println!();
                } else {
                    println!("\n  {}\n", style("Continuing this conversation.").dim());
                }
            }
        }
    }

    println!("\n  {}", style("Session ended. All the best!").dim());
    info!("chat loop finished");
    Ok(())
}

/// Arrow-key stage picker. `None` when the user presses Esc.
fn pick_stage() -> anyhow::Result<Option<EducationStage>> {
    let items: Vec<String> = EducationStage::SELECTABLE
        .iter()
        .map(|stage| {
            format!(
                "{:<14} {}  {}",
                stage.to_string(),
                style(stage.focus()).cyan(),
                style(stage.blurb()).dim()
            )
        })
        .collect();

    let selection = Select::new()
        .with_prompt("Select your education stage")
        .items(&items)
        .default(0)
        .interact_opt()?;

    Ok(selection.map(|i| EducationStage::SELECTABLE[i]))
}

/// Open the session for `stage` and print the greeting.
async fn start_stage(counselor: &Counselor, renderer: &ChatRenderer, stage: EducationStage) {
    print_stage_header(stage);

    let spinner = thinking_spinner("preparing your counselor...");
    let outcome = counselor.select_stage(stage).await;
    spinner.finish_and_clear();

    match outcome {
        StageOutcome::Greeted { message_id } => {
            if let Some(message) = find_message(counselor, message_id) {
                renderer.print_reply(&message.text);
            }
        }
        StageOutcome::Failed => {
            eprintln!(
                "\n  {} Could not reach the counselor. Check that GEMINI_API_KEY is set, then type /home to try again.\n",
                style("!").yellow().bold()
            );
        }
        StageOutcome::Ignored => debug!(%stage, "stage selection ignored"),
    }
}

/// Read input until the user exits or asks to go home.
///
/// The readline owns the terminal, so it lives only for one segment and is
/// dropped before any dialoguer prompt.
async fn chat_segment(counselor: &Counselor, renderer: &ChatRenderer) -> anyhow::Result<SessionExit> {
    let prompt = format!("  {} ", style("You >").green().bold());
    let mut input = ChatInput::new(prompt)
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        let text = match input.read_line().await {
            InputEvent::Eof => return Ok(SessionExit::Quit),
            InputEvent::Interrupted => {
                println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
                continue;
            }
            InputEvent::Line(text) if text.is_empty() => continue,
            InputEvent::Line(text) => text,
        };

        if let Some(cmd) = commands::parse(&text) {
            match cmd {
                ChatCommand::Help => commands::print_help(),
                ChatCommand::Clear => input.clear(),
                ChatCommand::Exit => return Ok(SessionExit::Quit),
                ChatCommand::Home => return Ok(SessionExit::Home),
                ChatCommand::History => renderer.print_history(&counselor.snapshot().messages),
                ChatCommand::Edit { number, text } => {
                    match edit_target(&counselor.snapshot().messages, number) {
                        Ok(id) => {
                            println!(
                                "\n  {} Replaying from message {number}...",
                                style("↺").cyan().bold()
                            );
                            run_exchange(counselor, renderer, counselor.edit_message(id, &text))
                                .await;
                        }
                        Err(reason) => {
                            println!("\n  {} {reason}\n", style("!").yellow().bold());
                        }
                    }
                }
                ChatCommand::Invalid(usage) => {
                    println!("\n  {} {}\n", style("?").yellow().bold(), style(usage).dim());
                }
                ChatCommand::Unknown(name) => {
                    println!(
                        "\n  {} Unknown command: {}. Type /help for available commands.\n",
                        style("?").yellow().bold(),
                        style(name).dim()
                    );
                }
            }
            continue;
        }

        run_exchange(counselor, renderer, counselor.send_user_message(&text)).await;
    }
}

/// Drive one exchange while previewing the reply next to a spinner, then
/// print the finished reply.
async fn run_exchange<F>(counselor: &Counselor, renderer: &ChatRenderer, exchange: F)
where
    F: Future<Output = ExchangeOutcome>,
{
    let mut rx = counselor.subscribe();
    let spinner = thinking_spinner("thinking...");
    let mut exchange = std::pin::pin!(exchange);
    let mut watching = true;

    let outcome = loop {
        tokio::select! {
            outcome = &mut exchange => break outcome,
            changed = rx.changed(), if watching => {
                if changed.is_err() {
                    watching = false;
                    continue;
                }
                let preview = {
                    let store = rx.borrow_and_update();
                    store
                        .state()
                        .messages
                        .last()
                        .filter(|m| m.role == Role::Model && !m.text.is_empty())
                        .map(|m| tail(&m.text, PREVIEW_CHARS))
                };
                if let Some(preview) = preview {
                    spinner.set_message(preview);
                }
            }
        }
    };
    spinner.finish_and_clear();

    match outcome {
        ExchangeOutcome::Replied { message_id, end } => {
            let Some(message) = find_message(counselor, message_id) else {
                return;
            };
            match end {
                ReplyEnd::Completed => renderer.print_reply(&message.text),
                ReplyEnd::Empty | ReplyEnd::Failed => renderer.print_fallback(&message.text),
            }
        }
        ExchangeOutcome::Unavailable { message_id } => {
            if let Some(message) = find_message(counselor, message_id) {
                renderer.print_fallback(&message.text);
            }
            println!("  {}\n", style("Type /home to start a new session.").dim());
        }
        ExchangeOutcome::Ignored => {
            println!("\n  {}\n", style("Nothing to send.").dim());
        }
    }
}

/// Map a `/history` number to the id of the user message it names.
fn edit_target(messages: &[Message], number: usize) -> Result<Uuid, String> {
    let message = number
        .checked_sub(1)
        .and_then(|i| messages.get(i))
        .ok_or_else(|| format!("No message {number}. Type /history to see message numbers."))?;
    if message.role != Role::User {
        return Err(format!("Message {number} is from EDGO; only your own messages can be edited."));
    }
    Ok(message.id)
}

fn find_message(counselor: &Counselor, id: Uuid) -> Option<Message> {
    counselor.snapshot().messages.into_iter().find(|m| m.id == id)
}

fn thinking_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("  {spinner:.cyan} {msg}")
            .expect("static spinner template"),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transcript() -> Vec<Message> {
        vec![
            Message::new(Role::Model, "Namaste! What is your name?"),
            Message::new(Role::User, "Asha"),
            Message::new(Role::Model, "Hi Asha! Which subjects do you enjoy?"),
        ]
    }

    #[test]
    fn test_edit_target_user_message() {
        let messages = transcript();
        assert_eq!(edit_target(&messages, 2).unwrap(), messages[1].id);
    }

    #[test]
    fn test_edit_target_rejects_model_message() {
        let err = edit_target(&transcript(), 1).unwrap_err();
        assert!(err.contains("only your own messages"));
    }

    #[test]
    fn test_edit_target_out_of_range() {
        assert!(edit_target(&transcript(), 4).is_err());
        assert!(edit_target(&transcript(), 0).is_err());
    }
}
