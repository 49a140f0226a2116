/*!
 * Reconstruction of the interleaved bilingual sequence and its LRC rendering.
 */

use std::fmt;

use crate::lrc::{format_timestamp, is_blank_text};
use super::matching::MatchedEntry;

/// Gap used to time the translation of the final line
pub const LAST_LINE_GAP_MS: u64 = 1_000;

/// One emitted output line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedLine {
    pub time_ms: u64,
    pub text: String,
}

impl MergedLine {
    pub fn new(time_ms: u64, text: impl Into<String>) -> Self {
        Self {
            time_ms,
            text: text.into(),
        }
    }

    pub fn is_blank(&self) -> bool {
        is_blank_text(&self.text)
    }
}

impl fmt::Display for MergedLine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", format_timestamp(self.time_ms), self.text)
    }
}

/// Build the output sequence from matched entries.
///
/// Entries are stable-sorted by time. A non-blank original line is followed
/// by its translation, stamped with the start of the next line (or one second
/// later for the last line). Blank lines are emitted alone, and a blank
/// original directly after another emitted blank line (original or
/// translation) is dropped.
pub fn reconstruct(mut entries: Vec<MatchedEntry>) -> Vec<MergedLine> {
    entries.sort_by_key(|entry| entry.time_ms);

    let mut lines = Vec::with_capacity(entries.len() * 2);
    let mut previous_blank = false;

    for (index, entry) in entries.iter().enumerate() {
        let original = MergedLine::new(entry.time_ms, entry.original.as_str());
        if original.is_blank() {
            if !previous_blank {
                lines.push(original);
                previous_blank = true;
            }
            continue;
        }

        let next_time_ms = match entries.get(index + 1) {
            Some(next) => next.time_ms,
            None => entry.time_ms.saturating_add(LAST_LINE_GAP_MS),
        };
        let translation = MergedLine::new(next_time_ms, entry.translation.as_str());

        // a blank translation line counts as the last emitted blank
        previous_blank = translation.is_blank();
        lines.push(original);
        lines.push(translation);
    }

    lines
}

/// Render lines as newline-joined LRC text without a trailing newline
pub fn serialize(lines: &[MergedLine]) -> String {
    lines
        .iter()
        .map(|line| line.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
