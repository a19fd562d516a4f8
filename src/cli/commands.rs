//! CLI command implementations

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use serde::Serialize;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, ConfigCommand, TranscriptSource};
use crate::config::Settings;
use crate::input::read_transcript;
use crate::llm::build_client;
use crate::summarize::{ChunkOptions, Summarizer};

/// Summarize a transcript and print or save the Markdown result
pub async fn summarize_transcript(
    settings: &Settings,
    source: TranscriptSource,
    prompt: Option<String>,
    output: Option<PathBuf>,
) -> Result<()> {
    // Configuration problems surface before any input is read.
    settings.validate()?;
    let client = build_client(settings)?;
    let summarizer = Summarizer::from_settings(client, settings)?;

    let text = load_transcript(source)?;
    tracing::info!(chars = text.chars().count(), "Summarizing transcript");

    let summary = summarizer
        .summarize(&text, prompt.as_deref())
        .await
        .context("Summarization failed")?;

    if let Some(path) = output {
        std::fs::write(&path, format!("{}\n", summary))
            .with_context(|| format!("Failed to write summary to {}", path.display()))?;
        println!("Summary written to: {}", path.display());
    } else {
        println!("{}", summary);
    }

    Ok(())
}

#[derive(Serialize)]
struct ChunkReport {
    index: usize,
    chars: usize,
    overlap: usize,
    preview: String,
}

/// Print the chunk plan for a transcript
pub fn show_chunks(
    settings: &Settings,
    source: TranscriptSource,
    max_len: Option<usize>,
    overlap: Option<usize>,
    json: bool,
) -> Result<()> {
    let options = ChunkOptions::new(
        max_len.unwrap_or(settings.chunking.max_len),
        overlap.unwrap_or(settings.chunking.overlap_len),
    )?;

    let text = load_transcript(source)?;
    let chunks = options.split(&text);

    let reports: Vec<ChunkReport> = chunks
        .iter()
        .enumerate()
        .map(|(i, chunk)| ChunkReport {
            index: i + 1,
            chars: chunk.char_len(),
            overlap: chunk.overlap,
            preview: preview(chunk.body(), 48),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    println!(
        "{} chunk(s), max_len={}, overlap={}",
        reports.len(),
        options.max_len,
        options.overlap_len
    );
    println!();
    println!("{:<6} {:<8} {:<8} {}", "Chunk", "Chars", "Overlap", "Starts with");
    println!("{}", "-".repeat(72));
    for report in &reports {
        println!(
            "{:<6} {:<8} {:<8} {}",
            report.index, report.chars, report.overlap, report.preview
        );
    }

    Ok(())
}

/// Handle config subcommands
pub fn config_command(settings: &Settings, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            let mut redacted = settings.clone();
            if !redacted.llm.api_key.is_empty() {
                redacted.llm.api_key = "********".to_string();
            }
            println!("{}", toml::to_string_pretty(&redacted)?);
        }
        ConfigCommand::Path => {
            let path = Settings::config_path()?;
            println!("{}", path.display());
        }
        ConfigCommand::Init { force } => {
            let path = Settings::config_path()?;
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Settings::write_default(&path)?;
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

/// Print completion script for the requested shell to stdout.
pub fn print_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let command_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, command_name, &mut io::stdout());
}

// Helper functions

fn load_transcript(source: TranscriptSource) -> Result<String> {
    if let Some(text) = source.text {
        return Ok(text);
    }

    let path = source.file.unwrap_or_else(|| PathBuf::from("-"));
    if path == Path::new("-") && io::stdin().is_terminal() {
        tracing::info!("Reading transcript from stdin (end with Ctrl-D)");
    }

    read_transcript(&path)
        .with_context(|| format!("Failed to read transcript from {}", path.display()))
}

fn preview(text: &str, max_chars: usize) -> String {
    let flat: String = text
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect();
    let flat = flat.trim();

    if flat.chars().count() <= max_chars {
        flat.to_string()
    } else {
        let cut: String = flat.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
