//! The artifact cleaner: one linear pass over a single directory.
//!
//! list regular files -> match names -> existence check -> delete.
//!
//! Progress is reported through a caller-supplied event callback as it
//! happens, so a fatal error part-way through leaves every message for the
//! files already handled visible to the user.

#![allow(missing_docs)]

use std::env;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::core::errors::{CleanError, Result};
use crate::scanner::deletion::{DeletionConfig, DeletionExecutor, DeletionOutcome};
use crate::scanner::listing::{CandidateFile, list_candidate_files};
use crate::scanner::patterns::ArtifactPattern;

/// Resolve `<cwd>/build/Debug/`.
pub fn default_target_dir() -> Result<PathBuf> {
    let cwd = env::current_dir().map_err(|source| CleanError::io(".", source))?;
    Ok(target_dir_under(&cwd))
}

/// `<root>/build/Debug/`, with the trailing separator kept for display.
pub fn target_dir_under(root: &Path) -> PathBuf {
    root.join("build").join("Debug").join("")
}

/// Progress notifications emitted during [`ArtifactCleaner::run`].
#[derive(Debug, Clone, Copy)]
pub enum CleanEvent<'a> {
    /// Emitted once, before the directory is listed.
    Cleaning { dir: &'a Path },
    /// A file name matched; emitted before the existence check.
    Deleting {
        file: &'a CandidateFile,
        dry_run: bool,
    },
    /// The deletion step for a matched file finished.
    Finished {
        file: &'a CandidateFile,
        outcome: DeletionOutcome,
    },
}

/// Summary of one cleanup run.
///
/// `deleted` and `bytes_freed` only count files actually removed; a dry run
/// fills `would_delete` and `bytes_reclaimable` instead.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CleanReport {
    pub directory: PathBuf,
    pub files_listed: usize,
    pub matched: usize,
    pub deleted: Vec<String>,
    pub would_delete: Vec<String>,
    pub vanished: Vec<String>,
    pub bytes_freed: u64,
    pub bytes_reclaimable: u64,
    pub dry_run: bool,
    #[serde(serialize_with = "serialize_millis")]
    pub duration: Duration,
}

impl CleanReport {
    fn record(&mut self, file: &CandidateFile, outcome: DeletionOutcome) {
        match outcome {
            DeletionOutcome::Deleted => {
                self.deleted.push(file.display_name());
                self.bytes_freed += file.size_bytes;
            }
            DeletionOutcome::DryRun => {
                self.would_delete.push(file.display_name());
                self.bytes_reclaimable += file.size_bytes;
            }
            DeletionOutcome::Vanished => self.vanished.push(file.display_name()),
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::trivially_copy_pass_by_ref)]
fn serialize_millis<S: serde::Serializer>(
    duration: &Duration,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_millis() as u64)
}

/// Deletes versioned artifacts from one directory.
#[derive(Debug, Clone)]
pub struct ArtifactCleaner {
    dir: PathBuf,
    pattern: ArtifactPattern,
    executor: DeletionExecutor,
}

impl ArtifactCleaner {
    /// Cleaner for `dir` with the default pattern, deleting for real.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            pattern: ArtifactPattern::default(),
            executor: DeletionExecutor::default(),
        }
    }

    #[must_use]
    pub fn with_pattern(mut self, pattern: ArtifactPattern) -> Self {
        self.pattern = pattern;
        self
    }

    #[must_use]
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.executor = DeletionExecutor::new(DeletionConfig { dry_run });
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn pattern(&self) -> &ArtifactPattern {
        &self.pattern
    }

    /// Run one cleanup pass.
    ///
    /// Listing and deletion errors abort the pass immediately; files already
    /// deleted stay deleted.
    pub fn run(&self, on_event: &mut dyn FnMut(&CleanEvent<'_>)) -> Result<CleanReport> {
        let start = Instant::now();
        let dry_run = self.executor.is_dry_run();

        on_event(&CleanEvent::Cleaning { dir: &self.dir });

        let files = list_candidate_files(&self.dir)?;
        let mut report = CleanReport {
            directory: self.dir.clone(),
            files_listed: files.len(),
            dry_run,
            ..CleanReport::default()
        };

        for file in files.iter().filter(|f| self.pattern.is_match(&f.name)) {
            report.matched += 1;
            on_event(&CleanEvent::Deleting { file, dry_run });

            let outcome = self.executor.delete(&file.path)?;
            report.record(file, outcome);
            on_event(&CleanEvent::Finished { file, outcome });
        }

        report.duration = start.elapsed();
        Ok(report)
    }
}
