/*!
 * Tests for bilingual merging
 */

use std::collections::HashSet;

use bilyric::lrc::LrcEntry;
use bilyric::merger::{merge_lrc, merge_tracks, match_translations, MergedLine};
use crate::common;

/// Test the empty-input contract
#[test]
fn test_merge_lrc_withEmptyInputs_shouldReturnOtherSide() {
    assert_eq!(merge_lrc("", ""), "");
    assert_eq!(merge_lrc("", "[00:01.000]b"), "[00:01.000]b");
    assert_eq!(merge_lrc("[00:01.000]a", ""), "[00:01.000]a");
    assert_eq!(merge_lrc("garbage", "[00:01.000]b"), "[00:01.000]b");
    assert_eq!(merge_lrc("garbage", "also garbage"), "also garbage");
}

/// Test a single pair
#[test]
fn test_merge_lrc_withSinglePair_shouldTimeTranslationOneSecondLater() {
    let merged = merge_lrc("[00:00.000]hello", "[00:00.500]你好");
    assert_eq!(merged, "[00:00.000] hello\n[00:01.000] 你好");
}

/// Test a typical song where every line has a translation
#[test]
fn test_merge_lrc_withAlignedTracks_shouldInterleaveLines() {
    let original = "[00:01.000]one\n[00:04.000]two\n[00:07.000]three";
    let translation = "[00:01.050]uno\n[00:04.020]dos\n[00:06.990]tres";

    let merged = merge_lrc(original, translation);
    assert_eq!(merged, "[00:01.000] one\n\
                        [00:04.000] uno\n\
                        [00:04.000] two\n\
                        [00:07.000] dos\n\
                        [00:07.000] three\n\
                        [00:08.000] tres");
}

/// Test the back-to-front heuristic on a lyric with interludes
#[test]
fn test_merge_lrc_withInterludes_shouldReproduceGreedyMatching() {
    let merged = merge_lrc(common::ORIGINAL_LRC, common::TRANSLATION_LRC);

    // Blank lines take part in matching and consume translations, which leaves
    // the first two lines without one.
    let expected = [
        "[00:01.000] first line",
        "[00:05.000] first line",
        "[00:05.000] second line",
        "[00:09.000] second line",
        "[00:09.000] ",
        "[00:12.500] third line",
        "[00:13.500] troisième ligne",
    ]
    .join("\n");
    assert_eq!(merged, expected);
}

/// Test that consecutive blank originals collapse into one line
#[test]
fn test_merge_lrc_withConsecutiveBlanks_shouldEmitOneBlank() {
    let merged = merge_lrc(
        "[00:01.000]\n[00:02.000]  \n[00:03.000]\n[00:04.000]la",
        "[00:04.000]LA",
    );

    let lines: Vec<&str> = merged.lines().collect();
    assert_eq!(lines, vec!["[00:01.000] ", "[00:04.000] la", "[00:05.000] LA"]);
}

/// Test that blanks separated by text are both kept
#[test]
fn test_merge_lrc_withSeparatedBlanks_shouldKeepBoth() {
    let merged = merge_lrc("[00:01.000]\n[00:02.000]a\n[00:03.000]", "[00:02.000]A");

    // the trailing blank is visited first and takes the only translation
    let lines: Vec<&str> = merged.lines().collect();
    assert_eq!(lines, vec!["[00:01.000] ", "[00:02.000] a", "[00:03.000] a", "[00:03.000] "]);
}

/// Test that unsorted originals are emitted in time order
#[test]
fn test_merge_lrc_withUnsortedOriginal_shouldSortOutput() {
    let merged = merge_lrc("[00:05.000]b\n[00:01.000]a", "[00:05.000]B\n[00:01.000]A");
    assert_eq!(merged, "[00:01.000] a\n[00:05.000] A\n[00:05.000] b\n[00:06.000] B");
}

/// Test pool exhaustion falls back to the original text for the earliest lines
#[test]
fn test_merge_tracks_withShortTranslation_shouldFallBackForEarliestLines() {
    let original = vec![
        LrcEntry::new(0, "a"),
        LrcEntry::new(2_000, "b"),
        LrcEntry::new(4_000, "c"),
        LrcEntry::new(6_000, "d"),
    ];
    let translation = vec![LrcEntry::new(100, "A"), LrcEntry::new(2_100, "B")];

    let lines = merge_tracks(&original, &translation);
    assert_eq!(lines, vec![
        MergedLine::new(0, "a"),
        MergedLine::new(2_000, "a"),
        MergedLine::new(2_000, "b"),
        MergedLine::new(4_000, "b"),
        MergedLine::new(4_000, "c"),
        MergedLine::new(6_000, "A"),
        MergedLine::new(6_000, "d"),
        MergedLine::new(7_000, "B"),
    ]);
}

/// Test that no translation entry is ever used twice
#[test]
fn test_match_translations_withCrowdedTimestamps_shouldUseEachEntryOnce() {
    let original: Vec<LrcEntry> = (0..20)
        .map(|i| LrcEntry::new(i * 1_000, format!("o{}", i)))
        .collect();
    let translation: Vec<LrcEntry> = (0..8)
        .map(|i| LrcEntry::new(10_000 + i * 10, format!("t{}", i)))
        .collect();

    let matched = match_translations(&original, &translation);
    let used: Vec<&str> = matched.iter()
        .filter(|m| m.matched)
        .map(|m| m.translation.as_str())
        .collect();
    let unique: HashSet<&str> = used.iter().copied().collect();

    assert_eq!(used.len(), 8);
    assert_eq!(unique.len(), 8);
    // the last eight originals are visited first and drain the pool
    assert!(matched[..12].iter().all(|m| !m.matched));
    assert!(matched[12..].iter().all(|m| m.matched));
}

/// Test the equal-distance tie goes to the earlier pool entry
#[test]
fn test_match_translations_withTie_shouldPreferEarlierPoolEntry() {
    let original = vec![LrcEntry::new(1_000, "x")];
    let translation = vec![
        LrcEntry::new(1_500, "after"),
        LrcEntry::new(500, "before"),
    ];

    let matched = match_translations(&original, &translation);
    assert_eq!(matched[0].translation, "after");
}

/// Test the tie rule against the remaining pool after a removal
#[test]
fn test_match_translations_withTieAfterRemoval_shouldUseRemainingPoolOrder() {
    let original = vec![LrcEntry::new(1_000, "first"), LrcEntry::new(3_000, "second")];
    let translation = vec![
        LrcEntry::new(3_000, "exact"),
        LrcEntry::new(1_500, "after"),
        LrcEntry::new(500, "before"),
    ];

    let matched = match_translations(&original, &translation);
    assert_eq!(matched[1].translation, "exact");
    assert_eq!(matched[0].translation, "after");
}

/// Test that a blank translation line and a following blank original never stack
#[test]
fn test_merge_lrc_withBlankTranslationBeforeInterlude_shouldNotEmitTwoBlanks() {
    let merged = merge_lrc("[00:01.000]a\n[00:05.000]", "[00:01.000]\n[00:05.000]");
    // the blank translation of `a` already stands for the interlude
    assert_eq!(merged, "[00:01.000] a\n[00:05.000] ");
}

/// Test that blank translation lines from the catalog keep the output free of blank runs
#[test]
fn test_merge_lrc_withBlankTranslationInterludes_shouldNeverStackBlanks() {
    let original = "[00:01.000]one\n[00:04.000]\n[00:06.000]two\n[00:09.000]\n[00:10.000]three";
    let translation = "[00:01.000]uno\n[00:04.000]\n[00:06.000]\n[00:09.000]\n[00:10.000]tres";

    let merged = merge_lrc(original, translation);

    let texts: Vec<&str> = merged.lines().map(|line| line[11..].trim()).collect();
    assert!(texts.windows(2).all(|pair| !(pair[0].is_empty() && pair[1].is_empty())));
    assert!(merged.ends_with("[00:10.000] three\n[00:11.000] tres"));
}
