/*!
 * Lyric catalog providers.
 *
 * This module defines the interface every lyric catalog implements, plus the
 * two lookups the batch layer relies on:
 * - `fetch_lyric_url`: best-guess locator for a title and optional artist
 * - `download_lyrics`: original and translated LRC text for a locator
 *
 * Provider implementations:
 * - NetEase: NetEase Cloud Music web API
 */

use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::errors::ProviderError;

/// A catalog entry matching a lyric search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Identifier of the catalog that produced this result
    pub source_id: String,
    /// Matched song title
    pub title: String,
    /// Matched artist
    pub artist: String,
    /// Matched album
    pub album: String,
    /// Free-form note from the catalog
    #[serde(default)]
    pub comment: String,
    /// Locator needed to download the lyric, usually a URL
    pub download_info: String,
}

/// Original and translated LRC text of one song
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LyricPair {
    pub original: String,
    pub translation: String,
}

impl LyricPair {
    pub fn new(original: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            translation: translation.into(),
        }
    }

    /// The pair used in place of any failed download
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.original.is_empty() && self.translation.is_empty()
    }
}

/// Common trait for all lyric catalogs
///
/// Implementations must be shareable across tasks; the batch layer calls them
/// concurrently for different songs.
#[async_trait]
pub trait LyricProvider: Send + Sync + Debug {
    /// Search the catalog
    ///
    /// # Arguments
    /// * `title` - Song title
    /// * `artist` - Optional artist used to narrow the search
    ///
    /// # Returns
    /// * `Result<Vec<SearchResult>, ProviderError>` - Results in catalog order
    async fn search(&self, title: &str, artist: Option<&str>) -> Result<Vec<SearchResult>, ProviderError>;

    /// Download the original and translated lyric behind a locator
    async fn download(&self, locator: &str) -> Result<LyricPair, ProviderError>;

    /// Short identifier of this catalog
    fn source_id(&self) -> &str;
}

/// Order results so that exact title matches (trimmed, case-insensitive) come first.
///
/// The relative order inside both groups is preserved.
pub fn rank_results(results: Vec<SearchResult>, title: &str) -> Vec<SearchResult> {
    let target = title.trim().to_lowercase();
    let (mut exact, others): (Vec<_>, Vec<_>) = results
        .into_iter()
        .partition(|result| result.title.trim().to_lowercase() == target);

    exact.extend(others);
    exact
}

/// Find the best lyric locator for a song.
///
/// Returns an empty string when the catalog has no result for the song.
pub async fn fetch_lyric_url<P>(provider: &P, title: &str, artist: Option<&str>) -> Result<String, ProviderError>
where
    P: LyricProvider + ?Sized,
{
    let results = provider.search(title, artist).await?;
    debug!("{} returned {} results for '{}'", provider.source_id(), results.len(), title);

    Ok(rank_results(results, title)
        .into_iter()
        .next()
        .map(|result| result.download_info)
        .unwrap_or_default())
}

/// Download lyrics for a locator, never failing.
///
/// An empty locator or any provider error yields an empty pair, which the
/// merge step handles like missing lyrics.
pub async fn download_lyrics<P>(provider: &P, locator: &str) -> LyricPair
where
    P: LyricProvider + ?Sized,
{
    if locator.is_empty() {
        return LyricPair::empty();
    }

    match provider.download(locator).await {
        Ok(pair) => pair,
        Err(e) => {
            debug!("Lyric download from {} failed: {}", locator, e);
            LyricPair::empty()
        }
    }
}

pub mod netease;
