/*!
 * # bilyric - Bilingual LRC lyric merger
 *
 * A Rust library for building bilingual, time-synchronized lyric files.
 *
 * ## Features
 *
 * - Parse `[mm:ss.fff]` LRC tracks
 * - Merge an original track with its translation by nearest timestamp
 * - Look up and download lyrics from the NetEase Cloud Music catalog
 * - Batch-process a directory of `<artist>-<title>.lrc` files concurrently
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `lrc`: LRC line parsing and timestamp formatting
 * - `merger`: Alignment and merge of two tracks:
 *   - `merger::matching`: Nearest-timestamp matching
 *   - `merger::output`: Sequence reconstruction and rendering
 * - `providers`: Lyric catalog interface and clients:
 *   - `providers::netease`: NetEase Cloud Music client
 * - `batch`: Concurrent per-song processing
 * - `app_controller`: Main application controller
 * - `app_config`: Configuration management
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod batch;
pub mod errors;
pub mod file_utils;
pub mod lrc;
pub mod merger;
pub mod providers;

// Re-export main types for easier usage
pub use app_config::Config;
pub use lrc::{parse_lrc, format_timestamp, LrcEntry};
pub use merger::{merge_lrc, MergedLine};
pub use providers::{LyricPair, LyricProvider, SearchResult};
pub use errors::{AppError, BatchError, ProviderError};
