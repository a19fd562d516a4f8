//! recap - Structured Markdown summaries for meeting transcripts
//!
//! Entry point for the recap CLI application.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use recap::cli::{Cli, Commands};
use recap::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        recap::cli::commands::print_completions(shell);
        return Ok(());
    }

    // Load configuration only for runtime commands.
    let settings = Settings::load()?;

    // Initialize logging; RUST_LOG wins, then --verbose, then the config file
    let default_level = if cli.verbose {
        "debug"
    } else {
        settings.general.log_level.as_str()
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::Summarize {
            source,
            prompt,
            output,
        } => {
            recap::cli::commands::summarize_transcript(&settings, source, prompt, output).await?;
        }
        Commands::Chunk {
            source,
            max_len,
            overlap,
            json,
        } => {
            recap::cli::commands::show_chunks(&settings, source, max_len, overlap, json)?;
        }
        Commands::Config(config_cmd) => {
            recap::cli::commands::config_command(&settings, config_cmd)?;
        }
        Commands::Completions { .. } => unreachable!(),
    }

    Ok(())
}
