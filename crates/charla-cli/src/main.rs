//! Charla CLI entry point.
//!
//! Binary name: `charla`
//!
//! Parses CLI arguments, initializes the database and services, then
//! dispatches to the appropriate command handler. Running with no
//! subcommand starts the interactive chat loop.

mod chat;
mod cli;
mod history;
mod models;
mod state;
mod status;

use clap::Parser;
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,charla=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Shell completions don't need app state
    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "charla", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init().await?;

    match cli.command {
        None => {
            chat::loop_runner::run_chat_loop(&state, None, "general".to_string()).await?;
        }

        Some(Commands::Chat { model, mode }) => {
            chat::loop_runner::run_chat_loop(&state, model, mode).await?;
        }

        Some(Commands::Status) => {
            status::status(&state, cli.json).await?;
        }

        Some(Commands::Models) => {
            models::list_models(&state, cli.json).await?;
        }

        Some(Commands::History) => {
            history::list_history(&state, cli.json).await?;
        }

        Some(Commands::Reset { force }) => {
            if !force {
                let confirmed = dialoguer::Confirm::new()
                    .with_prompt("Start a new conversation?")
                    .default(true)
                    .interact()?;
                if !confirmed {
                    return Ok(());
                }
            }
            let id = state.identity.reset().await?;
            if cli.json {
                println!(
                    "{}",
                    serde_json::json!({ "conversation_id": id.as_str() })
                );
            } else {
                println!(
                    "\n  {} New conversation {}\n",
                    console::style("*").cyan().bold(),
                    console::style(id.short()).dim()
                );
            }
        }

        Some(Commands::Completions { .. }) => unreachable!("handled above"),
    }

    Ok(())
}
