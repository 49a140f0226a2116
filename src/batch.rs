/*!
 * Batch lyric processing.
 *
 * Each song goes through lookup, download, merge and write. Songs are
 * processed concurrently up to a fixed limit; one failing song never stops
 * the others.
 */

use futures::stream::{self, StreamExt};
use log::{debug, error, info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use crate::errors::BatchError;
use crate::file_utils::FileManager;
use crate::merger::merge_lrc;
use crate::providers::{download_lyrics, fetch_lyric_url, LyricProvider};

/// One song to look up and merge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongJob {
    /// Artist, possibly empty
    pub artist: String,
    /// Song title
    pub title: String,
    /// Name of the source lyric file, reused for the output
    pub file_name: String,
    /// Where the merged lyric is written
    pub output_path: PathBuf,
}

/// Result of processing one song
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    /// A merged lyric was written
    Generated {
        /// Number of lines written
        lines: usize,
    },
    /// Output already existed and overwriting was not requested
    Skipped,
    /// The song could not be processed
    Failed(String),
}

/// A job together with how it ended
#[derive(Debug, Clone)]
pub struct JobOutcome {
    pub job: SongJob,
    pub status: JobStatus,
    pub duration: Duration,
}

/// Counts over a finished batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub generated: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[JobOutcome]) -> Self {
        outcomes.iter().fold(Self::default(), |mut summary, outcome| {
            match outcome.status {
                JobStatus::Generated { .. } => summary.generated += 1,
                JobStatus::Skipped => summary.skipped += 1,
                JobStatus::Failed(_) => summary.failed += 1,
            }
            summary
        })
    }

    pub fn total(&self) -> usize {
        self.generated + self.skipped + self.failed
    }

    pub fn summary(&self) -> String {
        format!(
            "Batch completed: {} generated, {} skipped, {} failed",
            self.generated, self.skipped, self.failed
        )
    }
}

/// Runs song jobs against a lyric provider
pub struct BatchProcessor<P: LyricProvider + ?Sized> {
    /// Catalog used for lookups and downloads
    provider: Arc<P>,

    /// Maximum number of songs in flight
    max_concurrent: usize,

    /// Whether existing output files are replaced
    force_overwrite: bool,
}

impl<P: LyricProvider + ?Sized> BatchProcessor<P> {
    pub fn new(provider: Arc<P>, max_concurrent: usize) -> Self {
        Self {
            provider,
            max_concurrent: max_concurrent.max(1),
            force_overwrite: false,
        }
    }

    pub fn with_force_overwrite(mut self, force_overwrite: bool) -> Self {
        self.force_overwrite = force_overwrite;
        self
    }

    /// Look up, download, merge and write a single song
    pub async fn process_job(&self, job: &SongJob) -> Result<JobStatus, BatchError> {
        if job.output_path.exists() && !self.force_overwrite {
            debug!("Output exists, skipping: {}", job.output_path.display());
            return Ok(JobStatus::Skipped);
        }

        let artist = Some(job.artist.as_str()).filter(|artist| !artist.is_empty());
        let locator = fetch_lyric_url(self.provider.as_ref(), &job.title, artist)
            .await
            .map_err(|source| BatchError::Search {
                title: job.title.clone(),
                source,
            })?;

        if locator.is_empty() {
            warn!("No catalog match for '{}' by '{}'", job.title, job.artist);
        }

        let lyrics = download_lyrics(self.provider.as_ref(), &locator).await;
        let merged = merge_lrc(&lyrics.original, &lyrics.translation);
        if merged.is_empty() {
            warn!("No lyric text for {}, writing an empty file", job.file_name);
        }

        FileManager::write_to_file(&job.output_path, &merged)
            .map_err(|e| BatchError::Write {
                path: job.output_path.display().to_string(),
                message: format!("{:#}", e),
            })?;

        Ok(JobStatus::Generated {
            lines: merged.lines().count(),
        })
    }

    /// Process all jobs, reporting `(completed, total)` after each one.
    ///
    /// Outcomes are returned in the order of `jobs`.
    pub async fn run(&self, jobs: Vec<SongJob>, progress_callback: impl Fn(usize, usize)) -> Vec<JobOutcome> {
        let total = jobs.len();
        let completed = AtomicUsize::new(0);
        let completed = &completed;
        let progress_callback = &progress_callback;

        let mut results = stream::iter(jobs.into_iter().enumerate())
            .map(|(index, job)| async move {
                let start_time = Instant::now();
                let status = match self.process_job(&job).await {
                    Ok(status) => status,
                    Err(e) => JobStatus::Failed(e.to_string()),
                };

                match &status {
                    JobStatus::Generated { .. } => info!("✓ Generated: {}", job.file_name),
                    JobStatus::Skipped => info!("Skipped (use -f to force overwrite): {}", job.file_name),
                    JobStatus::Failed(reason) => error!("✗ Failed: {} - {}", job.file_name, reason),
                }

                let current = completed.fetch_add(1, Ordering::SeqCst) + 1;
                progress_callback(current, total);

                (index, JobOutcome {
                    job,
                    status,
                    duration: start_time.elapsed(),
                })
            })
            .buffer_unordered(self.max_concurrent)
            .collect::<Vec<_>>()
            .await;

        // Sort results by job index to maintain input order
        results.sort_by_key(|(index, _)| *index);
        results.into_iter().map(|(_, outcome)| outcome).collect()
    }
}
