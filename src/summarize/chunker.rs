//! Paragraph-aware transcript chunking.
//!
//! Lengths are counted in `char`s so a slice never lands inside a UTF-8
//! sequence.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{RecapError, Result};

/// Default maximum chunk length in characters.
pub const DEFAULT_MAX_LEN: usize = 12_000;

/// Default number of characters carried over from the previous chunk.
pub const DEFAULT_OVERLAP_LEN: usize = 200;

static PARAGRAPH_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{2,}").expect("paragraph break pattern is valid"));

/// Chunk size bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkOptions {
    pub max_len: usize,
    pub overlap_len: usize,
}

impl Default for ChunkOptions {
    fn default() -> Self {
        Self {
            max_len: DEFAULT_MAX_LEN,
            overlap_len: DEFAULT_OVERLAP_LEN,
        }
    }
}

impl ChunkOptions {
    pub fn new(max_len: usize, overlap_len: usize) -> Result<Self> {
        if max_len == 0 {
            return Err(RecapError::Config(
                "chunk max length must be greater than 0".to_string(),
            ));
        }
        if overlap_len >= max_len {
            return Err(RecapError::Config(format!(
                "chunk overlap ({}) must be smaller than max length ({})",
                overlap_len, max_len
            )));
        }
        Ok(Self {
            max_len,
            overlap_len,
        })
    }

    pub fn split(&self, text: &str) -> Vec<Chunk> {
        chunk(text, self.max_len, self.overlap_len)
    }
}

/// One segment of a transcript.
///
/// `text` is the full chunk content, including the tail of the previous chunk
/// that was prepended for context. `overlap` is the length of that prefix in
/// characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub text: String,
    pub overlap: usize,
}

impl Chunk {
    /// Chunk content without the prepended overlap.
    pub fn body(&self) -> &str {
        let start = self
            .text
            .char_indices()
            .nth(self.overlap)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len());
        &self.text[start..]
    }

    /// Length of the full chunk in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Split `text` into chunks of at most `max_len` characters (before overlap).
///
/// Text that already fits is returned untouched as a single chunk, the empty
/// string included. Otherwise paragraphs (separated by two or more newlines)
/// are packed greedily; a paragraph longer than `max_len` is cut into windows
/// of `max_len` that advance by `max_len - overlap_len`. Every chunk after the
/// first is prefixed with the last `overlap_len` characters of its
/// predecessor.
///
/// Bounds are clamped so the function always terminates; use
/// [`ChunkOptions::new`] to reject invalid ones.
pub fn chunk(text: &str, max_len: usize, overlap_len: usize) -> Vec<Chunk> {
    let max_len = max_len.max(1);
    let overlap_len = overlap_len.min(max_len - 1);

    if char_len(text) <= max_len {
        return vec![Chunk {
            text: text.to_string(),
            overlap: 0,
        }];
    }

    let mut packer = Packer::new(max_len);
    let step = max_len - overlap_len;

    for paragraph in PARAGRAPH_BREAK.split(text) {
        let len = char_len(paragraph);
        if len > max_len {
            for fragment in windows(paragraph, max_len, step) {
                packer.push_fragment(fragment);
            }
        } else {
            packer.push_paragraph(paragraph, len);
        }
    }

    let bodies = packer.finish();
    tracing::debug!(
        chunks = bodies.len(),
        max_len,
        overlap_len,
        "Split transcript into chunks"
    );

    let mut chunks = Vec::with_capacity(bodies.len());
    for (i, body) in bodies.iter().enumerate() {
        let prefix = if i == 0 {
            ""
        } else {
            tail(&bodies[i - 1], overlap_len)
        };
        chunks.push(Chunk {
            text: format!("{}{}", prefix, body),
            overlap: char_len(prefix),
        });
    }
    chunks
}

/// Greedy paragraph packer.
struct Packer {
    max_len: usize,
    buf: String,
    buf_len: usize,
    done: Vec<String>,
}

impl Packer {
    fn new(max_len: usize) -> Self {
        Self {
            max_len,
            buf: String::new(),
            buf_len: 0,
            done: Vec::new(),
        }
    }

    fn push_paragraph(&mut self, paragraph: &str, len: usize) {
        if self.buf_len + 2 + len <= self.max_len {
            if !self.buf.is_empty() {
                self.append_separator();
            }
            self.append(paragraph, len);
        } else {
            self.flush();
            self.append(paragraph, len);
        }
    }

    fn push_fragment(&mut self, fragment: &str) {
        let len = char_len(fragment);
        if self.buf.is_empty() {
            self.append(fragment, len);
        } else if self.buf_len + 2 + len <= self.max_len {
            self.append_separator();
            self.append(fragment, len);
        } else {
            self.flush();
            self.append(fragment, len);
        }
    }

    fn append_separator(&mut self) {
        self.buf.push_str("\n\n");
        self.buf_len += 2;
    }

    fn append(&mut self, s: &str, len: usize) {
        self.buf.push_str(s);
        self.buf_len += len;
    }

    fn flush(&mut self) {
        let trimmed = self.buf.trim();
        if !trimmed.is_empty() {
            self.done.push(trimmed.to_string());
        }
        self.buf.clear();
        self.buf_len = 0;
    }

    fn finish(mut self) -> Vec<String> {
        self.flush();
        self.done
    }
}

/// Fixed-size windows over `s`, advancing by `step`, stopping once a window
/// reaches the end of the string.
fn windows(s: &str, size: usize, step: usize) -> Vec<&str> {
    let bounds: Vec<usize> = s
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(s.len()))
        .collect();
    let total = bounds.len() - 1;

    let mut out = Vec::new();
    let mut start = 0;
    while start < total {
        let end = (start + size).min(total);
        out.push(&s[bounds[start]..bounds[end]]);
        if end == total {
            break;
        }
        start += step;
    }
    out
}

/// The last `n` characters of `s` (all of `s` if it is shorter).
fn tail(s: &str, n: usize) -> &str {
    if n == 0 {
        return "";
    }
    s.char_indices()
        .rev()
        .nth(n - 1)
        .map(|(i, _)| &s[i..])
        .unwrap_or(s)
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
