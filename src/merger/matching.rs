/*!
 * Nearest-timestamp matching of translation lines onto original lines.
 *
 * Original lines are visited from last to first. Each one takes the closest
 * remaining translation line, which is then removed from the pool, so a
 * translation line is never used twice. Once the pool is empty the remaining
 * (earlier) original lines keep their own text.
 */

use crate::lrc::LrcEntry;

/// An original line paired with the text shown underneath it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedEntry {
    /// Start time of the original line in ms
    pub time_ms: u64,

    /// Original-language text
    pub original: String,

    /// Matched translation, or the original text when nothing was matched
    pub translation: String,

    /// Whether `translation` came from the translation track
    pub matched: bool,
}

impl MatchedEntry {
    fn unmatched(entry: &LrcEntry) -> Self {
        Self {
            time_ms: entry.time_ms,
            original: entry.text.clone(),
            translation: entry.text.clone(),
            matched: false,
        }
    }
}

/// Pair every original entry with its closest unused translation entry.
///
/// The result has one element per original entry, in the original order.
/// Ties on distance go to the translation entry that comes first in the
/// remaining pool.
pub fn match_translations(original: &[LrcEntry], translation: &[LrcEntry]) -> Vec<MatchedEntry> {
    let mut pool: Vec<&LrcEntry> = translation.iter().collect();
    let mut assigned: Vec<Option<&str>> = vec![None; original.len()];

    for (index, entry) in original.iter().enumerate().rev() {
        if pool.is_empty() {
            break;
        }

        // min_by_key keeps the first of several equal minima
        let closest = pool
            .iter()
            .enumerate()
            .min_by_key(|(_, candidate)| candidate.time_ms.abs_diff(entry.time_ms))
            .map(|(position, _)| position);

        if let Some(position) = closest {
            let taken = pool.remove(position);
            assigned[index] = Some(taken.text.as_str());
        }
    }

    original
        .iter()
        .zip(assigned)
        .map(|(entry, found)| match found {
            Some(text) => MatchedEntry {
                time_ms: entry.time_ms,
                original: entry.text.clone(),
                translation: text.to_string(),
                matched: true,
            },
            None => MatchedEntry::unmatched(entry),
        })
        .collect()
}
