//! Transcript summarization
//!
//! Splits transcripts into bounded chunks and runs the single-pass or
//! map-reduce strategy over a [`CompletionClient`](crate::llm::CompletionClient).

pub mod chunker;
mod pipeline;

pub use chunker::{chunk, Chunk, ChunkOptions, DEFAULT_MAX_LEN, DEFAULT_OVERLAP_LEN};
pub use pipeline::{Summarizer, NO_CONTENT};
