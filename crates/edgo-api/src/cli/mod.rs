//! CLI command definitions for the `edgo` binary.

pub mod careers;
pub mod chat;
pub mod prompt;
pub mod stages;

use clap::{Parser, Subcommand};

use edgo_types::chat::EducationStage;

/// EDGO: an AI career counselor for Indian students.
#[derive(Parser)]
#[command(name = "edgo", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive counseling session.
    Chat {
        /// Skip the picker: class-10, class-12, or undergrad.
        #[arg(long)]
        stage: Option<EducationStage>,
    },

    /// List the education stages.
    Stages,

    /// Show the built-in career table.
    Careers {
        /// Only show careers whose role or keywords contain this text.
        #[arg(long, short)]
        search: Option<String>,
    },

    /// Print the assembled system instruction.
    Prompt {
        /// Include the guidance block for this stage (when enabled in config).
        #[arg(long)]
        stage: Option<EducationStage>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chat_with_stage() {
        let cli = Cli::try_parse_from(["edgo", "chat", "--stage", "class-12"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Chat { stage: Some(EducationStage::Class12) }
        ));
    }

    #[test]
    fn test_parse_rejects_unknown_stage() {
        assert!(Cli::try_parse_from(["edgo", "chat", "--stage", "phd"]).is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["edgo", "careers", "--search", "law", "--json", "-vv"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Careers { search: Some(ref s) } if s == "law"));
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
