use anyhow::{anyhow, Context, Result};
use log::{info, warn};
use std::path::Path;
use std::sync::Arc;
use indicatif::{ProgressBar, ProgressStyle};

use crate::app_config::Config;
use crate::batch::{BatchProcessor, BatchSummary, JobOutcome, JobStatus, SongJob};
use crate::file_utils::{parse_song_filename, FileManager};
use crate::merger::merge_lrc;
use crate::providers::netease::NetEase;
use crate::providers::{fetch_lyric_url, LyricProvider};

// @module: Application controller for lyric merging

/// Name of the per-run log written next to the generated files
pub const ISSUES_LOG_FILE: &str = "bilyric.issues.log";

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build song jobs from the `.lrc` files directly inside `data_dir`.
    ///
    /// Files whose names do not follow `<artist>-<title>.lrc` are skipped.
    pub fn discover_jobs(data_dir: &Path, output_dir: &Path) -> Result<Vec<SongJob>> {
        if !FileManager::dir_exists(data_dir) {
            return Err(anyhow!("Data directory does not exist: {:?}", data_dir));
        }

        let mut jobs = Vec::new();
        for path in FileManager::find_files(data_dir, "lrc")? {
            let Some(file_name) = path.file_name().map(|f| f.to_string_lossy().to_string()) else {
                continue;
            };

            match parse_song_filename(&file_name) {
                Some(song) => jobs.push(SongJob {
                    artist: song.artist,
                    title: song.title,
                    output_path: output_dir.join(&file_name),
                    file_name,
                }),
                None => warn!("Skipping file not named <artist>-<title>.lrc: {}", file_name),
            }
        }

        Ok(jobs)
    }

    /// Process every song in the data directory with the NetEase catalog
    pub async fn run_batch(&self, force_overwrite: bool) -> Result<BatchSummary> {
        let provider = Arc::new(NetEase::new(&self.config.provider)?);
        self.run_batch_with_provider(provider, force_overwrite).await
    }

    /// Process every song in the data directory with the given provider
    pub async fn run_batch_with_provider<P>(&self, provider: Arc<P>, force_overwrite: bool) -> Result<BatchSummary>
    where
        P: LyricProvider + ?Sized,
    {
        let start_time = std::time::Instant::now();

        let jobs = Self::discover_jobs(&self.config.data_dir, &self.config.output_dir)?;
        if jobs.is_empty() {
            warn!("No lyric files found in {:?}", self.config.data_dir);
            return Ok(BatchSummary::default());
        }

        FileManager::ensure_dir(&self.config.output_dir)?;
        info!("Processing {} songs with {} ({} at a time)",
            jobs.len(), provider.source_id(), self.config.concurrent_jobs);

        let progress_bar = ProgressBar::new(jobs.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} songs ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar.set_message("Merging lyrics");

        let processor = BatchProcessor::new(provider, self.config.concurrent_jobs)
            .with_force_overwrite(force_overwrite);

        let pb = progress_bar.clone();
        let outcomes = processor
            .run(jobs, move |completed, _total| pb.set_position(completed as u64))
            .await;

        progress_bar.finish_and_clear();

        let summary = BatchSummary::from_outcomes(&outcomes);
        info!("{} in {}", summary.summary(), Self::format_duration(start_time.elapsed()));

        let log_path = self.config.output_dir.join(ISSUES_LOG_FILE);
        if let Err(e) = Self::write_issues_log(&log_path, &summary, &outcomes) {
            warn!("Failed to write batch log: {}", e);
        }

        Ok(summary)
    }

    /// Merge two local LRC files, writing to `output` or returning the text
    pub fn merge_files(original: &Path, translation: &Path, output: Option<&Path>) -> Result<String> {
        let original_text = FileManager::read_to_string(original)?;
        let translation_text = FileManager::read_to_string(translation)?;

        let merged = merge_lrc(&original_text, &translation_text);

        if let Some(output) = output {
            FileManager::write_to_file(output, &merged)?;
            info!("Success: {}", output.display());
        }

        Ok(merged)
    }

    /// Best lyric locator for a song, empty when nothing matched
    pub async fn lookup(&self, title: &str, artist: Option<&str>) -> Result<String> {
        let provider = NetEase::new(&self.config.provider)?;
        let locator = fetch_lyric_url(&provider, title, artist)
            .await
            .with_context(|| format!("Lyric search failed for '{}'", title))?;
        Ok(locator)
    }

    /// Append the summary and every failure to the batch log
    fn write_issues_log(path: &Path, summary: &BatchSummary, outcomes: &[JobOutcome]) -> Result<()> {
        FileManager::append_to_log_file(path, &summary.summary())?;

        for outcome in outcomes {
            if let JobStatus::Failed(reason) = &outcome.status {
                FileManager::append_to_log_file(path, &format!("[ERROR] {} - {}", outcome.job.file_name, reason))?;
            }
        }

        Ok(())
    }

    // Format duration in a human-readable format
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;

        if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
