//! Single-level directory listing that yields regular files only.
//!
//! Entry types come from the directory listing itself and are never resolved
//! through symlinks, so a link to a `.dll` is not a candidate.

#![allow(missing_docs)]

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::errors::{CleanError, Result};

/// A regular file found directly inside the target directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub path: PathBuf,
    pub name: OsString,
    pub size_bytes: u64,
}

impl CandidateFile {
    /// File name for display.
    pub fn display_name(&self) -> String {
        self.name.to_string_lossy().into_owned()
    }
}

/// List the regular files directly under `dir`, in listing order.
///
/// Fails if `dir` cannot be opened or iterated. Entries whose type cannot be
/// read (for example, removed mid-listing) are left out.
pub fn list_candidate_files(dir: &Path) -> Result<Vec<CandidateFile>> {
    let entries = fs::read_dir(dir).map_err(|source| CleanError::listing(dir, source))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| CleanError::listing(dir, source))?;
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if !file_type.is_file() {
            continue;
        }

        let size_bytes = entry.metadata().map_or(0, |meta| meta.len());
        files.push(CandidateFile {
            path: entry.path(),
            name: entry.file_name(),
            size_bytes,
        });
    }
    Ok(files)
}
