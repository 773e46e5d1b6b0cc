//! Terminal markdown rendering for counselor replies.
//!
//! While a reply streams, a spinner line shows its tail. Once complete the
//! whole reply is rendered through `termimad`.

use crossterm::style::Color;
use termimad::MadSkin;

use edgo_types::chat::{Message, Role};

/// Replies longer than this are cut in `/history`.
const HISTORY_PREVIEW_CHARS: usize = 100;

pub struct ChatRenderer {
    skin: MadSkin,
}

impl ChatRenderer {
    pub fn new(accent_color: Option<Color>) -> Self {
        let mut skin = MadSkin::default_dark();

        if let Some(color) = accent_color {
            let tc = to_termimad_color(color);
            skin.bold.set_fg(tc);
            skin.headers[0].set_fg(tc);
            skin.headers[1].set_fg(tc);
            skin.bullet.set_fg(tc);
        }
        skin.inline_code
            .set_fg(termimad::crossterm::style::Color::Yellow);

        Self { skin }
    }

    /// Render a complete reply as indented terminal text.
    pub fn render(&self, markdown: &str) -> String {
        let rendered = self.skin.term_text(markdown).to_string();
        indent(&rendered, "  ")
    }

    /// Print a finished counselor reply.
    pub fn print_reply(&self, text: &str) {
        println!();
        println!("  {}", console::style("EDGO").cyan().bold());
        print!("{}", self.render(text));
        println!();
    }

    /// Print a fallback reply (connection trouble) in warning style.
    pub fn print_fallback(&self, text: &str) {
        println!();
        println!(
            "  {} {}",
            console::style("!").yellow().bold(),
            console::style(text).yellow()
        );
        println!();
    }

    /// Print the numbered transcript.
    pub fn print_history(&self, messages: &[Message]) {
        println!();
        if messages.is_empty() {
            println!("  {}", console::style("No messages yet.").dim());
        }
        for (i, message) in messages.iter().enumerate() {
            let label = match message.role {
                Role::User => console::style("You ").green().bold(),
                Role::Model => console::style("EDGO").cyan().bold(),
            };
            println!(
                "  {:>3}. {} {}",
                console::style(i + 1).dim(),
                label,
                preview(&message.text, HISTORY_PREVIEW_CHARS)
            );
        }
        println!();
    }
}

/// Single-line preview: newlines collapsed, cut to `max` chars.
pub fn preview(text: &str, max: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max {
        return flat;
    }
    let cut: String = flat.chars().take(max.saturating_sub(3)).collect();
    format!("{cut}...")
}

/// The last `max` chars of `text` on one line, for the live spinner.
pub fn tail(text: &str, max: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let count = flat.chars().count();
    if count <= max {
        return flat;
    }
    let skipped: String = flat.chars().skip(count - max.saturating_sub(3)).collect();
    format!("...{skipped}")
}

fn indent(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| format!("{prefix}{line}\n"))
        .collect()
}

fn to_termimad_color(color: Color) -> termimad::crossterm::style::Color {
    use termimad::crossterm::style::Color as T;
    match color {
        Color::Cyan => T::Cyan,
        Color::Green => T::Green,
        Color::Yellow => T::Yellow,
        Color::Magenta => T::Magenta,
        Color::Rgb { r, g, b } => T::Rgb { r, g, b },
        _ => T::Cyan,
    }
}
