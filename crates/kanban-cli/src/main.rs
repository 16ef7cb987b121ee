mod cli;
mod context;
mod handlers;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::CliContext;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("KANBAN_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    let cli = Cli::parse();

    if let Commands::Completions { shell } = &cli.command {
        clap_complete::generate(*shell, &mut Cli::command(), "kanban", &mut std::io::stdout());
        return Ok(());
    }

    if let Err(e) = run(cli).await {
        tracing::debug!("Command failed: {:#}", e);
        output::output_error(&e.to_string());
    }
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let ctx = CliContext::load(&cli).await?;

    match cli.command {
        Commands::Board(board_cmd) => {
            handlers::board::handle(&ctx, board_cmd.action).await?;
        }
        Commands::List(list_cmd) => {
            handlers::list::handle(&ctx, list_cmd.action).await?;
        }
        Commands::Card(card_cmd) => {
            handlers::card::handle(&ctx, card_cmd.action).await?;
        }
        Commands::Drag(args) => {
            handlers::drag::handle(&ctx, args).await?;
        }
        Commands::Completions { .. } => {}
    }
    Ok(())
}
