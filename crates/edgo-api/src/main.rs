//! EDGO terminal client entry point.
//!
//! Binary name: `edgo`
//!
//! Parses CLI arguments, sets up tracing, then dispatches to the command
//! handlers. Only `chat` talks to the model.

mod cli;
mod state;

use clap::Parser;
use console::style;

use edgo_observe::tracing_setup::{default_filter, init_tracing, shutdown_tracing};

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(default_filter(cli.verbose, cli.quiet), cli.otel) {
        eprintln!("Warning: failed to initialize tracing: {e}");
    }

    let result = run(cli).await;
    shutdown_tracing();

    if let Err(e) = &result {
        eprintln!("\n  {} {e:#}\n", style("Error:").red().bold());
        std::process::exit(1);
    }
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Stages => cli::stages::list_stages(cli.json)?,

        Commands::Careers { search } => cli::careers::list_careers(search.as_deref(), cli.json)?,

        Commands::Prompt { stage } => {
            let state = AppState::init().await?;
            cli::prompt::show_prompt(&state, stage, cli.json)?;
        }

        Commands::Chat { stage } => {
            let state = AppState::init().await?;
            cli::chat::loop_runner::run_chat_loop(&state, stage).await?;
        }
    }

    Ok(())
}
