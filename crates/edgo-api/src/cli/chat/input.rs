//! Async line input for the chat loop.
//!
//! Wraps `rustyline_async::Readline`. The readline owns the terminal while
//! it exists, so the loop drops it before showing dialoguer prompts.

use rustyline_async::{Readline, ReadlineError, ReadlineEvent};

#[derive(Debug, PartialEq)]
pub enum InputEvent {
    Line(String),
    /// Ctrl+D.
    Eof,
    /// Ctrl+C.
    Interrupted,
}

pub struct ChatInput {
    rl: Readline,
}

impl ChatInput {
    pub fn new(prompt: String) -> Result<Self, ReadlineError> {
        let (rl, _writer) = Readline::new(prompt)?;
        Ok(Self { rl })
    }

    /// Read one submitted line, trimmed.
    pub async fn read_line(&mut self) -> InputEvent {
        match self.rl.readline().await {
            Ok(ReadlineEvent::Line(line)) => {
                let line = line.trim().to_string();
                if !line.is_empty() {
                    self.rl.add_history_entry(line.clone());
                }
                InputEvent::Line(line)
            }
            Ok(ReadlineEvent::Eof) => InputEvent::Eof,
            Ok(ReadlineEvent::Interrupted) => InputEvent::Interrupted,
            Err(e) => {
                tracing::debug!(error = %e, "readline failed, treating as EOF");
                InputEvent::Eof
            }
        }
    }

    pub fn clear(&mut self) {
        let _ = self.rl.clear();
    }
}
