use crate::types::{ChunkMethod, TextChunk};
use once_cell::sync::Lazy;
use regex::Regex;

/// Bullet or numbered-list marker at the start of a line
static BULLET_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:[-*+•]\s+|\d+[.)]\s+)").expect("valid bullet pattern"));

/// Split raw text into ordered, content-addressed chunks.
///
/// Lines are accumulated into the current chunk until the method-specific
/// boundary is crossed; finished chunks are trimmed and whitespace-only
/// accumulations are dropped. The final in-progress chunk is always
/// flushed at end of input. Pure: identical input yields identical output.
#[must_use]
pub fn parse_to_chunks(text: &str, method: ChunkMethod) -> Vec<TextChunk> {
    let mut builder = ChunkBuilder::default();

    for line in text.lines() {
        match method {
            ChunkMethod::Paragraph => {
                if line.trim().is_empty() {
                    builder.flush();
                } else if is_bullet_marker(line) {
                    builder.flush();
                    builder.push_line(line);
                } else {
                    builder.push_line(line);
                }
            }
            ChunkMethod::Bullet => {
                if is_bullet_marker(line) {
                    builder.flush();
                }
                builder.push_line(line);
            }
            ChunkMethod::Sentence => {
                builder.push_line(line);
                if ends_with_terminal_punctuation(&builder.accumulated()) {
                    builder.flush();
                }
            }
        }
    }
    builder.flush();

    let chunks = builder.into_chunks();
    log::debug!(
        "Parsed {} chunks with method '{}'",
        chunks.len(),
        method.as_str()
    );
    chunks
}

/// Check if a line opens a bullet or numbered-list item
#[must_use]
pub fn is_bullet_marker(line: &str) -> bool {
    BULLET_MARKER.is_match(line)
}

/// Accumulates lines and emits trimmed chunks in input order
#[derive(Default)]
struct ChunkBuilder {
    current: Vec<String>,
    chunks: Vec<TextChunk>,
}

impl ChunkBuilder {
    fn push_line(&mut self, line: &str) {
        self.current.push(line.to_string());
    }

    fn accumulated(&self) -> String {
        self.current.join("\n").trim().to_string()
    }

    fn flush(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let text = self.accumulated();
        self.current.clear();
        if text.is_empty() {
            return;
        }
        let source_index = self.chunks.len();
        self.chunks.push(TextChunk::new(text, source_index));
    }

    fn into_chunks(self) -> Vec<TextChunk> {
        self.chunks
    }
}

fn ends_with_terminal_punctuation(text: &str) -> bool {
    let trimmed = text.trim_end_matches(['"', '\'', '”', '’', ')', ']']);
    trimmed.ends_with(['.', '!', '?'])
}
