//! Reading transcripts from files or stdin.

use std::io::Read;
use std::path::Path;

use crate::{RecapError, Result};

/// Read a transcript from `path`, or from stdin when `path` is `-`.
pub fn read_transcript(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut bytes = Vec::new();
        std::io::stdin().read_to_end(&mut bytes)?;
        return Ok(decode_text(bytes));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    if extension == "pdf" {
        return Err(RecapError::UnsupportedInput(format!(
            "{} is a PDF; extract its text first and pass a .txt or .md file",
            path.display()
        )));
    }

    // .txt, .md and anything else are read as UTF-8
    let bytes = std::fs::read(path)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Read transcript");
    Ok(decode_text(bytes))
}

/// Decode UTF-8, replacing invalid sequences instead of failing.
pub fn decode_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("Transcript is not valid UTF-8, replacing invalid bytes");
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    }
}
