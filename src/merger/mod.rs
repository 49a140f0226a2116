/*!
 * Bilingual LRC merging.
 *
 * Combines an original-language track and its translation into a single
 * interleaved LRC text:
 * - `matching`: nearest-timestamp pairing of translation lines
 * - `output`: sequence reconstruction and rendering
 *
 * Merging is a pure function over two strings and never fails.
 */

pub mod matching;
pub mod output;

use log::debug;

use crate::lrc::{parse_lrc, LrcEntry};

pub use matching::{match_translations, MatchedEntry};
pub use output::{reconstruct, serialize, MergedLine};

/// Merge an original LRC text with its translation.
///
/// An empty original yields the translation unchanged and an empty
/// translation yields the original unchanged. An original without a single
/// timed line is treated as unusable and the translation is returned as is.
pub fn merge_lrc(original: &str, translation: &str) -> String {
    if original.is_empty() {
        return translation.to_string();
    }
    if translation.is_empty() {
        return original.to_string();
    }

    let original_entries = parse_lrc(original);
    if original_entries.is_empty() {
        debug!("Original lyric has no timed lines, keeping translation as is");
        return translation.to_string();
    }
    let translation_entries = parse_lrc(translation);

    serialize(&merge_tracks(&original_entries, &translation_entries))
}

/// Merge already parsed tracks into output lines
pub fn merge_tracks(original: &[LrcEntry], translation: &[LrcEntry]) -> Vec<MergedLine> {
    let matched = match_translations(original, translation);

    let matched_count = matched.iter().filter(|entry| entry.matched).count();
    let interludes = original.iter().filter(|entry| entry.is_blank()).count();
    debug!(
        "Matched {} of {} original lines ({} interludes) against {} translated lines",
        matched_count,
        original.len(),
        interludes,
        translation.len()
    );

    reconstruct(matched)
}
