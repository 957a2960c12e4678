//! Deletion executor: existence pre-flight, single-file removal, dry-run support.
//!
//! Pre-flight before each deletion: the path must still exist. A file that
//! disappeared since the listing (cleaned by another process, or a concurrent
//! build) is reported as [`DeletionOutcome::Vanished`] and is not an error.
//! Every other removal failure propagates. Nothing is checked after a
//! successful unlink.

#![allow(missing_docs)]

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::Serialize;

use crate::core::errors::{CleanError, Result};

/// Configuration for the deletion executor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeletionConfig {
    /// Whether to skip actual deletion (report what would be deleted).
    pub dry_run: bool,
}

/// What happened to one matched file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletionOutcome {
    Deleted,
    /// The file was already gone when we got to it.
    Vanished,
    DryRun,
}

/// Removes matched artifacts one at a time.
#[derive(Debug, Clone, Default)]
pub struct DeletionExecutor {
    config: DeletionConfig,
}

impl DeletionExecutor {
    pub fn new(config: DeletionConfig) -> Self {
        Self { config }
    }

    pub fn is_dry_run(&self) -> bool {
        self.config.dry_run
    }

    /// Delete one regular file after checking that it still exists.
    pub fn delete(&self, path: &Path) -> Result<DeletionOutcome> {
        if !path.exists() {
            return Ok(DeletionOutcome::Vanished);
        }

        if self.config.dry_run {
            return Ok(DeletionOutcome::DryRun);
        }

        match fs::remove_file(path) {
            Ok(()) => {}
            // Lost the race between the existence check and the unlink.
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Ok(DeletionOutcome::Vanished);
            }
            Err(err) => return Err(CleanError::io(path, err)),
        }

        // Whatever appears at `path` after the unlink belongs to someone else.
        Ok(DeletionOutcome::Deleted)
    }
}

// ──────────────────── tests ────────────────────
