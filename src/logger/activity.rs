//! Activity log: turns cleaner events into JSONL entries.
//!
//! A disabled log (no path configured) accepts every call and writes nothing.

#![allow(missing_docs)]

use std::path::Path;

use crate::core::config::LoggingConfig;
use crate::core::errors::CleanError;
use crate::logger::jsonl::{EventType, JsonlConfig, JsonlWriter, LogEntry, Severity};
use crate::scanner::cleaner::{CleanEvent, CleanReport};
use crate::scanner::deletion::DeletionOutcome;
use crate::scanner::patterns::ArtifactPattern;

/// Per-run activity log handle.
pub struct ActivityLog {
    writer: Option<JsonlWriter>,
}

impl ActivityLog {
    /// Open the log described by `config`, or a no-op log when no path is set.
    pub fn from_config(config: &LoggingConfig) -> Self {
        let writer = config.jsonl_path.as_ref().map(|path| {
            JsonlWriter::open(JsonlConfig {
                path: path.clone(),
                max_size_bytes: config.max_size_bytes,
                max_rotated_files: config.max_rotated_files,
            })
        });
        Self { writer }
    }

    pub fn run_started(
        &mut self,
        dir: &Path,
        pattern: &ArtifactPattern,
        dry_run: bool,
        config_hash: Option<String>,
    ) {
        let mut entry = LogEntry::new(EventType::RunStart, Severity::Info).with_path(dir);
        entry.pattern = Some(pattern.as_str().to_string());
        entry.dry_run = Some(dry_run);
        entry.config_hash = config_hash;
        self.write(&entry);
    }

    /// Record the outcome of one matched file. Other events are ignored.
    pub fn record(&mut self, event: &CleanEvent<'_>) {
        let CleanEvent::Finished { file, outcome } = event else {
            return;
        };
        let event_type = match outcome {
            DeletionOutcome::Deleted => EventType::ArtifactDelete,
            DeletionOutcome::Vanished => EventType::ArtifactVanished,
            DeletionOutcome::DryRun => EventType::ArtifactDryRun,
        };
        let mut entry = LogEntry::new(event_type, Severity::Info).with_path(&file.path);
        entry.size = Some(file.size_bytes);
        entry.ok = Some(true);
        self.write(&entry);
    }

    pub fn run_completed(&mut self, report: &CleanReport) {
        let mut entry =
            LogEntry::new(EventType::RunComplete, Severity::Info).with_path(&report.directory);
        entry.dry_run = Some(report.dry_run);
        entry.files_listed = Some(report.files_listed);
        entry.matched = Some(report.matched);
        entry.deleted = Some(report.deleted.len());
        entry.vanished = Some(report.vanished.len());
        entry.bytes_freed = Some(report.bytes_freed);
        if report.dry_run {
            entry.would_delete = Some(report.would_delete.len());
        }
        entry.duration_ms = Some(u64::try_from(report.duration.as_millis()).unwrap_or(u64::MAX));
        entry.ok = Some(true);
        self.write(&entry);
    }

    pub fn run_failed(&mut self, dir: &Path, error: &CleanError) {
        let mut entry = LogEntry::new(EventType::Error, Severity::Critical).with_path(dir);
        entry.ok = Some(false);
        entry.error_code = Some(error.code().to_string());
        entry.error_message = Some(error.to_string());
        self.write(&entry);
    }

    fn write(&mut self, entry: &LogEntry) {
        if let Some(writer) = self.writer.as_mut() {
            writer.write_entry(entry);
        }
    }
}
