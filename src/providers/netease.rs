use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

use crate::app_config::ProviderConfig;
use crate::errors::ProviderError;
use super::{LyricPair, LyricProvider, SearchResult};

const SEARCH_PATH: &str = "/api/search/get";
const LYRIC_PATH: &str = "/api/song/lyric";

/// Songs returned per search page
const PAGE_SIZE: u64 = 10;

/// NetEase Cloud Music client for searching songs and downloading lyrics
#[derive(Debug)]
pub struct NetEase {
    /// HTTP client for API requests
    client: Client,
    /// Base URL of the catalog
    endpoint: Url,
    /// Maximum number of retry attempts
    max_retries: u32,
    /// Base backoff time in milliseconds for exponential backoff
    backoff_base_ms: u64,
}

/// Search response body
#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub result: Option<SearchBody>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchBody {
    #[serde(default)]
    pub songs: Vec<Song>,

    /// Total number of matches, across all pages
    #[serde(default, rename = "songCount")]
    pub song_count: u64,
}

#[derive(Debug, Deserialize)]
pub struct Song {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub artists: Vec<NamedItem>,
    #[serde(default)]
    pub album: Option<NamedItem>,
}

/// Artist or album reference
#[derive(Debug, Deserialize)]
pub struct NamedItem {
    #[serde(default)]
    pub name: String,
}

/// Lyric response body
#[derive(Debug, Default, Deserialize)]
pub struct LyricResponse {
    #[serde(default)]
    pub lrc: Option<LyricBody>,
    #[serde(default)]
    pub tlyric: Option<LyricBody>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LyricBody {
    #[serde(default)]
    pub lyric: Option<String>,
}

impl LyricResponse {
    /// Original and translated text, with missing parts as empty strings
    pub fn into_pair(self) -> LyricPair {
        let text = |body: Option<LyricBody>| body.and_then(|b| b.lyric).unwrap_or_default();
        LyricPair {
            original: text(self.lrc),
            translation: text(self.tlyric),
        }
    }
}

/// Parse a raw search response
pub fn parse_search_response(body: &str) -> Result<SearchResponse, ProviderError> {
    serde_json::from_str(body).map_err(|e| ProviderError::ParseError(e.to_string()))
}

/// Parse a raw lyric response
pub fn parse_lyric_response(body: &str) -> Result<LyricResponse, ProviderError> {
    serde_json::from_str(body).map_err(|e| ProviderError::ParseError(e.to_string()))
}

impl NetEase {
    /// Create a new client from provider configuration
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let endpoint = Url::parse(&config.endpoint)
            .map_err(|e| ProviderError::RequestFailed(format!("Invalid endpoint '{}': {}", config.endpoint, e)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| ProviderError::RequestFailed(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint,
            max_retries: config.retry_count,
            backoff_base_ms: config.retry_backoff_ms,
        })
    }

    /// Lyric locator for a song id
    pub fn lyric_url(&self, song_id: u64) -> Result<String, ProviderError> {
        let mut url = self.endpoint.join(LYRIC_PATH)
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        url.query_pairs_mut()
            .append_pair("id", &song_id.to_string())
            .append_pair("lv", "-1")
            .append_pair("kv", "-1")
            .append_pair("tv", "-1");

        Ok(url.into())
    }

    /// Map a catalog song to a search result
    pub fn to_search_result(&self, song: Song) -> Result<SearchResult, ProviderError> {
        Ok(SearchResult {
            source_id: self.source_id().to_string(),
            download_info: self.lyric_url(song.id)?,
            title: song.name,
            artist: song.artists.into_iter().next().map(|a| a.name).unwrap_or_default(),
            album: song.album.map(|a| a.name).unwrap_or_default(),
            comment: String::new(),
        })
    }

    /// Fetch one page of search results
    async fn search_page(&self, keyword: &str, offset: u64) -> Result<SearchBody, ProviderError> {
        let url = self.endpoint.join(SEARCH_PATH)
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let offset_value = offset.to_string();
        let mut form = vec![("s", keyword), ("type", "1")];
        if offset > 0 {
            form.push(("offset", offset_value.as_str()));
        }

        let body = self
            .send_with_retry(|| self.client.post(url.clone()).form(&form))
            .await?;

        Ok(parse_search_response(&body)?.result.unwrap_or_default())
    }

    /// Send a request, retrying transient failures with exponential backoff
    async fn send_with_retry<F>(&self, build: F) -> Result<String, ProviderError>
    where
        F: Fn() -> RequestBuilder,
    {
        let mut attempt = 0;

        loop {
            let result = Self::send_once(build()).await;

            match result {
                Ok(body) => return Ok(body),
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    let delay_ms = self.backoff_base_ms.saturating_mul(1 << attempt.min(16));
                    warn!("Request failed ({}), retrying in {}ms", e, delay_ms);
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn send_once(request: RequestBuilder) -> Result<String, ProviderError> {
        let response = request.send().await?;

        let status = response.status().as_u16();
        if !(200..400).contains(&status) {
            let message = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            return Err(ProviderError::ApiError { status_code: status, message });
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl LyricProvider for NetEase {
    async fn search(&self, title: &str, artist: Option<&str>) -> Result<Vec<SearchResult>, ProviderError> {
        let keyword = match artist {
            Some(artist) if !artist.trim().is_empty() => format!("{} {}", title, artist),
            _ => title.to_string(),
        };

        let first = self.search_page(&keyword, 0).await?;
        let song_count = first.song_count;
        let mut songs = first.songs;

        if song_count > PAGE_SIZE {
            debug!("{} matches for '{}', fetching second page", song_count, keyword);
            songs.extend(self.search_page(&keyword, PAGE_SIZE).await?.songs);
        }

        songs.into_iter()
            .map(|song| self.to_search_result(song))
            .collect()
    }

    async fn download(&self, locator: &str) -> Result<LyricPair, ProviderError> {
        let body = self.send_with_retry(|| self.client.get(locator)).await?;
        Ok(parse_lyric_response(&body)?.into_pair())
    }

    fn source_id(&self) -> &str {
        "netease"
    }
}
