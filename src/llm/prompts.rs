//! Prompts for single-pass, per-chunk, and reduction summaries.

use crate::llm::client::ChatMessage;

/// Separator placed between transcript chunks and partial summaries.
pub const SECTION_SEPARATOR: &str = "\n\n---\n";

/// Fixed system policy: output layout plus fidelity rules.
pub fn system_prompt() -> &'static str {
    "You are a meticulous meeting-notes summarizer.\n\
Return a **crisp, structured Markdown** summary using this layout:\n\
\n\
# TL;DR\n\
- 3-5 bullets focusing on outcomes, not chatter.\n\
\n\
# Action Items\n\
| Owner | Task | Due | Priority |\n\
|---|---|---|---|\n\
| ... | ... | ... | ... |\n\
\n\
# Decisions\n\
- ...\n\
\n\
# Risks / Blockers\n\
- ...\n\
\n\
# Next Steps (by Owner/Team)\n\
- Owner/Team: bullets\n\
\n\
Rules:\n\
- Be faithful to the transcript; no hallucinations.\n\
- If fields (owner/due date) are missing, write \"TBD\".\n\
- Keep it executive-friendly and skimmable.\n\
- Prefer bullets and tables; avoid long paragraphs.\n"
}

/// Quote a caller directive so the model can tell it apart from our own
/// instructions. Empty when there is no directive.
pub fn directive_block(directive: Option<&str>) -> String {
    match directive.map(str::trim).filter(|d| !d.is_empty()) {
        Some(d) => format!("\n\nCustom instruction from user:\n\"{}\"\n", d),
        None => String::new(),
    }
}

/// Messages for a transcript that fits in one chunk.
pub fn single_pass(transcript: &str, directive: Option<&str>) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(system_prompt()),
        ChatMessage::user(format!(
            "Summarize the following transcript. {}{}{}",
            directive_block(directive),
            SECTION_SEPARATOR,
            transcript
        )),
    ]
}

/// Messages for one map-phase call. `index` is zero-based.
pub fn map_chunk(
    chunk: &str,
    index: usize,
    total: usize,
    directive: Option<&str>,
) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(system_prompt()),
        ChatMessage::user(format!(
            "This is chunk {}/{} of a long transcript.\nSummarize faithfully. {}{}{}",
            index + 1,
            total,
            directive_block(directive),
            SECTION_SEPARATOR,
            chunk
        )),
    ]
}

/// Messages for the reduce call. The directive is deliberately absent; the
/// partial summaries already honor it.
pub fn reduce(partials: &[String]) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(system_prompt()),
        ChatMessage::user(format!(
            "You are given {} chunk-level summaries of one meeting.\n\
Synthesize them into ONE final, deduplicated summary following the exact Markdown layout.{}{}",
            partials.len(),
            SECTION_SEPARATOR,
            partials.join(SECTION_SEPARATOR)
        )),
    ]
}
