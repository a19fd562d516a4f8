//! recap - Structured Markdown summaries for meeting transcripts of any length
//!
//! Long transcripts are split into overlapping chunks, summarized chunk by
//! chunk, and the partial summaries are reduced into one final recap.

pub mod cli;
pub mod config;
pub mod input;
pub mod llm;
pub mod summarize;

use thiserror::Error;

/// Main error type for recap
#[derive(Error, Debug)]
pub enum RecapError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Completion API returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Summarization failed at {stage}: {source}")]
    Summarization {
        stage: String,
        #[source]
        source: Box<RecapError>,
    },

    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RecapError {
    /// Wrap an error raised while running one stage of the summarization.
    pub fn at_stage(stage: impl Into<String>, source: RecapError) -> Self {
        RecapError::Summarization {
            stage: stage.into(),
            source: Box::new(source),
        }
    }
}

pub type Result<T> = std::result::Result<T, RecapError>;
