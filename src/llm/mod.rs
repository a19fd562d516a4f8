//! LLM module for recap
//!
//! Talks to chat-completion endpoints and owns the summarization prompts.

mod client;
mod openai;
pub mod prompts;

pub use client::{build_client, ChatMessage, CompletionClient, Role};
pub use openai::OpenAiCompatClient;
