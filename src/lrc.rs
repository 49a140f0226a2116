use std::fmt;
use regex::Regex;
use once_cell::sync::Lazy;
use log::trace;

// @module: LRC track parsing and timestamp formatting

// @const: Leading `[mm:ss.fff]` tag followed by the line text
static TIMESTAMP_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[([0-9]+):([0-9]+)\.([0-9]{3})\](.*)").unwrap()
});

// @struct: Single timed lyric line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LrcEntry {
    // @field: Start time in ms
    pub time_ms: u64,

    // @field: Lyric text, trimmed; empty for interludes
    pub text: String,
}

impl LrcEntry {
    pub fn new(time_ms: u64, text: impl Into<String>) -> Self {
        LrcEntry {
            time_ms,
            text: text.into(),
        }
    }

    /// Whether this entry marks an interlude (empty or whitespace-only text)
    pub fn is_blank(&self) -> bool {
        is_blank_text(&self.text)
    }

    /// Parse a single LRC line, returning `None` when it carries no timestamp tag
    pub fn parse_line(line: &str) -> Option<Self> {
        let caps = TIMESTAMP_TAG_REGEX.captures(line)?;

        let minutes: u64 = caps[1].parse().ok()?;
        let seconds: u64 = caps[2].parse().ok()?;
        let millis: u64 = caps[3].parse().ok()?;

        let time_ms = minutes
            .checked_mul(60_000)?
            .checked_add(seconds.checked_mul(1_000)?)?
            .checked_add(millis)?;

        Some(LrcEntry {
            time_ms,
            text: caps[4].trim().to_string(),
        })
    }
}

impl fmt::Display for LrcEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", format_timestamp(self.time_ms), self.text)
    }
}

/// Blank text stands for a musical interlude
pub fn is_blank_text(text: &str) -> bool {
    text.trim().is_empty()
}

/// Parse LRC content into timed entries.
///
/// Lines without a leading `[mm:ss.fff]` tag (metadata tags such as `[ar:...]`,
/// two-digit fractions, plain text) are skipped without error. Entries keep
/// their input order; nothing is sorted here. `\n`, `\r\n` and bare `\r`
/// all end a line.
pub fn parse_lrc(content: &str) -> Vec<LrcEntry> {
    let entries: Vec<LrcEntry> = content
        .split(['\r', '\n'])
        .filter_map(LrcEntry::parse_line)
        .collect();

    trace!("Parsed {} timed lines from {} bytes of LRC", entries.len(), content.len());
    entries
}

/// Format milliseconds as an LRC tag: `[MM:SS.mmm]`
pub fn format_timestamp(ms: u64) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("[{:02}:{:02}.{:03}]", minutes, seconds, millis)
}
