mod common;

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use common::transcript;
use recap::llm::{ChatMessage, CompletionClient, Role};
use recap::summarize::{ChunkOptions, Summarizer, NO_CONTENT};
use recap::{RecapError, Result};

/// Records user messages and replies with a numbered partial summary.
#[derive(Clone, Default)]
struct RecordingClient {
    user_messages: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl CompletionClient for RecordingClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].role, Role::User);

        let mut log = self.user_messages.lock().unwrap();
        log.push(messages[1].content.clone());
        Ok(format!("  partial {}  ", log.len()))
    }
}

struct FailingClient;

#[async_trait]
impl CompletionClient for FailingClient {
    async fn complete(&self, _messages: &[ChatMessage]) -> Result<String> {
        Err(RecapError::Upstream {
            status: 401,
            body: "invalid api key".to_string(),
        })
    }
}

fn summarizer(client: &RecordingClient) -> Summarizer {
    Summarizer::new(Box::new(client.clone()), ChunkOptions::default())
}

#[test]
fn thirty_thousand_char_transcript_takes_map_reduce_path() {
    let client = RecordingClient::default();
    let text = transcript(30, 999);
    assert!(text.chars().count() >= 30_000);

    let summary =
        tokio_test::block_on(summarizer(&client).summarize(&text, Some("Focus on budget items")))
            .unwrap();

    let calls = client.user_messages.lock().unwrap();
    let chunk_count = ChunkOptions::default().split(&text).len();
    assert!(chunk_count >= 3);
    assert_eq!(calls.len(), chunk_count + 1);
    assert_eq!(summary, format!("  partial {}  ", chunk_count + 1));

    let (reduce, maps) = calls.split_last().unwrap();
    for (i, call) in maps.iter().enumerate() {
        assert!(call.starts_with(&format!("This is chunk {}/{}", i + 1, chunk_count)));
        assert!(call.contains("\"Focus on budget items\""));
    }
    assert!(!reduce.contains("Focus on budget items"));
    assert!(reduce.contains(&format!("You are given {} chunk-level summaries", chunk_count)));
}

#[test]
fn single_huge_paragraph_is_sliced_and_reduced() {
    let client = RecordingClient::default();
    let text: String = "word ".chars().cycle().take(50_000).collect::<String>().replace(' ', "_");
    assert!(!text.contains("\n\n"));

    tokio_test::block_on(summarizer(&client).summarize(&text, None)).unwrap();

    let calls = client.user_messages.lock().unwrap();
    let chunks = ChunkOptions::default().split(&text);
    assert!(chunks.len() > 1);
    assert_eq!(calls.len(), chunks.len() + 1);
    for chunk in &chunks {
        assert!(chunk.body().chars().count() <= 12_000);
    }
}

#[test]
fn short_transcript_returns_single_call_result_unmodified() {
    let client = RecordingClient::default();
    let summary =
        tokio_test::block_on(summarizer(&client).summarize("Alice: ship it.", None)).unwrap();

    assert_eq!(summary, "  partial 1  ");
    assert_eq!(client.user_messages.lock().unwrap().len(), 1);
}

#[test]
fn whitespace_transcript_returns_sentinel() {
    let client = RecordingClient::default();
    let summary = tokio_test::block_on(summarizer(&client).summarize(" \n ", None)).unwrap();

    assert_eq!(summary, NO_CONTENT);
    assert!(client.user_messages.lock().unwrap().is_empty());
}

#[test]
fn upstream_failure_is_surfaced_with_cause() {
    let summarizer = Summarizer::new(Box::new(FailingClient), ChunkOptions::default());
    let err = tokio_test::block_on(summarizer.summarize(&transcript(30, 999), None)).unwrap_err();

    let message = err.to_string();
    assert!(message.contains("chunk 1/"), "unexpected error: {message}");
    assert!(message.contains("401"));
    assert!(message.contains("invalid api key"));
}
