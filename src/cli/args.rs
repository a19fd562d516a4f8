//! CLI argument definitions using clap

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// recap - Structured Markdown summaries for meeting transcripts
#[derive(Parser, Debug)]
#[command(name = "recap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize a transcript with the configured language model
    Summarize {
        #[command(flatten)]
        source: TranscriptSource,

        /// Extra instruction to steer the summary (e.g. "Focus on budget items")
        #[arg(short, long)]
        prompt: Option<String>,

        /// Write the summary to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show how a transcript would be chunked, without calling the model
    Chunk {
        #[command(flatten)]
        source: TranscriptSource,

        /// Maximum chunk length in characters (defaults to config)
        #[arg(long)]
        max_len: Option<usize>,

        /// Overlap carried into the next chunk (defaults to config)
        #[arg(long)]
        overlap: Option<usize>,

        /// Print the chunk plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        shell: Shell,
    },
}

/// Where the transcript comes from.
#[derive(Args, Debug)]
pub struct TranscriptSource {
    /// Transcript file (.txt, .md); `-` or omitted reads stdin
    #[arg(conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Transcript text passed directly
    #[arg(short, long)]
    pub text: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}
