//! Single-pass and map-reduce summarization.

use futures::{stream, StreamExt, TryStreamExt};

use crate::config::Settings;
use crate::llm::{prompts, CompletionClient};
use crate::summarize::chunker::{Chunk, ChunkOptions};
use crate::{RecapError, Result};

/// Returned for empty or whitespace-only transcripts.
pub const NO_CONTENT: &str = "No content provided.";

/// Drives chunking and completion calls for one transcript at a time.
pub struct Summarizer {
    client: Box<dyn CompletionClient>,
    chunking: ChunkOptions,
    map_concurrency: usize,
}

impl Summarizer {
    /// Create a summarizer with a strictly sequential map phase.
    pub fn new(client: Box<dyn CompletionClient>, chunking: ChunkOptions) -> Self {
        Self {
            client,
            chunking,
            map_concurrency: 1,
        }
    }

    pub fn from_settings(client: Box<dyn CompletionClient>, settings: &Settings) -> Result<Self> {
        let chunking = ChunkOptions::new(
            settings.chunking.max_len,
            settings.chunking.overlap_len,
        )?;
        Ok(Self::new(client, chunking).with_map_concurrency(settings.chunking.map_concurrency))
    }

    /// Allow up to `n` map-phase calls in flight. Partial summaries keep
    /// chunk order either way.
    pub fn with_map_concurrency(mut self, n: usize) -> Self {
        self.map_concurrency = n.max(1);
        self
    }

    /// Summarize a transcript, optionally steered by a caller directive.
    ///
    /// Any failed completion call aborts the whole run; partial results are
    /// never returned.
    pub async fn summarize(&self, text: &str, directive: Option<&str>) -> Result<String> {
        if text.trim().is_empty() {
            tracing::info!("Transcript is empty, skipping summarization");
            return Ok(NO_CONTENT.to_string());
        }

        let directive = directive.map(str::trim).filter(|d| !d.is_empty());
        let chunks = self.chunking.split(text);

        if let [only] = chunks.as_slice() {
            tracing::info!("Using single-pass summarization");
            let messages = prompts::single_pass(&only.text, directive);
            return self
                .client
                .complete(&messages)
                .await
                .map_err(|e| RecapError::at_stage("single pass", e));
        }

        tracing::info!(
            chunks = chunks.len(),
            concurrency = self.map_concurrency,
            "Using map-reduce summarization"
        );

        let partials = self.map(&chunks, directive).await?;
        self.reduce(&partials).await
    }

    async fn map(&self, chunks: &[Chunk], directive: Option<&str>) -> Result<Vec<String>> {
        let total = chunks.len();

        stream::iter(chunks.iter().enumerate())
            .map(|(i, chunk)| async move {
                tracing::info!("Summarizing chunk {}/{}", i + 1, total);
                let messages = prompts::map_chunk(&chunk.text, i, total, directive);
                self.client
                    .complete(&messages)
                    .await
                    .map_err(|e| RecapError::at_stage(format!("chunk {}/{}", i + 1, total), e))
            })
            .buffered(self.map_concurrency)
            .try_collect()
            .await
    }

    async fn reduce(&self, partials: &[String]) -> Result<String> {
        tracing::info!("Combining {} chunk summaries", partials.len());
        let messages = prompts::reduce(partials);
        self.client
            .complete(&messages)
            .await
            .map_err(|e| RecapError::at_stage("reduce", e))
    }
}
