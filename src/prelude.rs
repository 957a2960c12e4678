//! Convenience re-exports for library consumers.
//!
//! ```rust,no_run
//! use clean_binaries::prelude::*;
//! ```

// Core
pub use crate::core::config::Config;
pub use crate::core::errors::{CleanError, Result};

// Scanner
pub use crate::scanner::cleaner::{
    ArtifactCleaner, CleanEvent, CleanReport, default_target_dir, target_dir_under,
};
pub use crate::scanner::deletion::{DeletionConfig, DeletionExecutor, DeletionOutcome};
pub use crate::scanner::listing::{CandidateFile, list_candidate_files};
pub use crate::scanner::patterns::{ArtifactPattern, DEFAULT_PATTERN};

// Logging
pub use crate::logger::activity::ActivityLog;
