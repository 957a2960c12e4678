//! Top-level CLI definition and dispatch.
//!
//! The directory being cleaned is always `<cwd>/build/Debug/`; no flag,
//! variable, or config key changes it.

use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use colored::{Colorize, control};
use serde_json::{Value, json};
use thiserror::Error;

use clean_binaries::core::config::Config;
use clean_binaries::core::errors::CleanError;
use clean_binaries::logger::activity::ActivityLog;
use clean_binaries::scanner::cleaner::{
    ArtifactCleaner, CleanEvent, CleanReport, default_target_dir,
};
use clean_binaries::scanner::deletion::DeletionOutcome;

/// Removes stale versioned DLLs (name.1234.dll) from ./build/Debug/.
#[derive(Debug, Parser)]
#[command(
    name = "clean-binaries",
    author,
    version,
    about = "Remove stale versioned DLL artifacts from ./build/Debug/",
    long_about = None
)]
pub struct Cli {
    /// Override config file path.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Report matching files without deleting them.
    #[arg(long)]
    dry_run: bool,
    /// Force JSON output mode.
    #[arg(long)]
    json: bool,
    /// Disable colored output.
    #[arg(long)]
    no_color: bool,
    /// Also report skipped files and a closing summary.
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,
    /// Quiet mode (errors only).
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Human,
    Json,
}

/// CLI error type with explicit exit-code mapping.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input or configuration.
    #[error("{0}")]
    User(String),
    /// Environment/runtime failure.
    #[error("{0}")]
    Runtime(String),
    /// JSON serialization failed.
    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
    /// Output write failed.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    /// Process exit code contract for the CLI.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::User(_) => 1,
            Self::Runtime(_) | Self::Io(_) => 2,
            Self::Json(_) => 3,
        }
    }
}

impl From<CleanError> for CliError {
    fn from(err: CleanError) -> Self {
        match err {
            CleanError::InvalidConfig { .. }
            | CleanError::MissingConfig { .. }
            | CleanError::ConfigParse { .. }
            | CleanError::InvalidPattern { .. } => Self::User(err.to_string()),
            _ => Self::Runtime(err.to_string()),
        }
    }
}

/// Run one cleanup pass over `<cwd>/build/Debug/`.
pub fn run(cli: &Cli) -> Result<(), CliError> {
    if cli.no_color || !io::stdout().is_terminal() {
        control::set_override(false);
    }

    let config = Config::load(cli.config.as_deref())?;
    let dry_run = cli.dry_run || config.cleaner.dry_run;
    let target = default_target_dir()?;

    let cleaner = ArtifactCleaner::new(target)
        .with_pattern(config.artifact_pattern()?)
        .dry_run(dry_run);

    let mut activity = ActivityLog::from_config(&config.logging);
    activity.run_started(
        cleaner.dir(),
        cleaner.pattern(),
        dry_run,
        config.stable_hash().ok(),
    );

    let mut printer = EventPrinter::new(output_mode(cli), cli.verbose, cli.quiet);
    let result = cleaner.run(&mut |event| {
        activity.record(event);
        printer.on_event(event);
    });

    match result {
        Ok(report) => {
            activity.run_completed(&report);
            printer.finish(&report)
        }
        Err(err) => {
            activity.run_failed(cleaner.dir(), &err);
            // Progress lines already printed must reach the terminal before the error.
            printer.flush_pending()?;
            Err(err.into())
        }
    }
}

// ──────────────────── output ────────────────────

/// Streams cleaner events to stdout as they happen.
///
/// The first write failure is held and surfaced from `finish`, since the
/// cleaner callback cannot return errors.
struct EventPrinter {
    mode: OutputMode,
    verbose: bool,
    quiet: bool,
    write_error: Option<CliError>,
}

impl EventPrinter {
    fn new(mode: OutputMode, verbose: bool, quiet: bool) -> Self {
        Self {
            mode,
            verbose,
            quiet,
            write_error: None,
        }
    }

    fn on_event(&mut self, event: &CleanEvent<'_>) {
        if self.write_error.is_some() {
            return;
        }
        let result = match self.mode {
            OutputMode::Human => self.print_human(event),
            OutputMode::Json => match event_payload(event) {
                Some(payload) => write_json_line(&payload),
                None => Ok(()),
            },
        };
        if let Err(err) = result {
            self.write_error = Some(err);
        }
    }

    fn print_human(&self, event: &CleanEvent<'_>) -> Result<(), CliError> {
        if self.quiet {
            return Ok(());
        }
        let mut stdout = io::stdout().lock();
        match event {
            CleanEvent::Cleaning { dir } => {
                writeln!(stdout, "{} {}", "Cleaning:".bold(), dir.display())?;
            }
            CleanEvent::Deleting { file, dry_run } => {
                let label = if *dry_run { "Would delete:" } else { "Deleting:" };
                writeln!(stdout, "{} {}", label.yellow(), file.display_name())?;
            }
            CleanEvent::Finished {
                file,
                outcome: DeletionOutcome::Vanished,
            } if self.verbose => {
                writeln!(
                    stdout,
                    "{} {}",
                    "Skipped (already gone):".dimmed(),
                    file.display_name()
                )?;
            }
            CleanEvent::Finished { .. } => {}
        }
        Ok(())
    }

    fn flush_pending(&mut self) -> Result<(), CliError> {
        if let Some(err) = self.write_error.take() {
            return Err(err);
        }
        io::stdout().flush()?;
        Ok(())
    }

    fn finish(mut self, report: &CleanReport) -> Result<(), CliError> {
        self.flush_pending()?;
        match self.mode {
            OutputMode::Human => {
                if self.verbose {
                    println!("{}", summary_line(report));
                }
            }
            OutputMode::Json => {
                let mut payload = serde_json::to_value(report)?;
                if let Value::Object(map) = &mut payload {
                    map.insert("event".to_string(), json!("summary"));
                }
                write_json_line(&payload)?;
            }
        }
        Ok(())
    }
}

fn event_payload(event: &CleanEvent<'_>) -> Option<Value> {
    match event {
        CleanEvent::Cleaning { dir } => Some(json!({
            "event": "cleaning",
            "directory": path_string(dir),
        })),
        CleanEvent::Deleting { file, dry_run } => Some(json!({
            "event": "deleting",
            "file": file.display_name(),
            "dry_run": dry_run,
        })),
        CleanEvent::Finished { file, outcome } => Some(json!({
            "event": "finished",
            "file": file.display_name(),
            "outcome": outcome,
            "size_bytes": file.size_bytes,
        })),
    }
}

fn summary_line(report: &CleanReport) -> String {
    let (verb, count, bytes) = if report.dry_run {
        ("Would delete", report.would_delete.len(), report.bytes_reclaimable)
    } else {
        ("Deleted", report.deleted.len(), report.bytes_freed)
    };
    let mut line = format!(
        "{verb} {count} of {} file(s), {bytes} byte(s) in {} ms",
        report.files_listed,
        report.duration.as_millis()
    );
    if !report.vanished.is_empty() {
        line.push_str(&format!("; {} already gone", report.vanished.len()));
    }
    line
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn write_json_line(payload: &Value) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, payload)?;
    writeln!(stdout)?;
    Ok(())
}

fn output_mode(cli: &Cli) -> OutputMode {
    let env_mode = std::env::var("CB_OUTPUT_FORMAT").ok();
    resolve_output_mode(cli.json, env_mode.as_deref())
}

/// `--json` wins, then `CB_OUTPUT_FORMAT`, then human output (also when piped).
fn resolve_output_mode(json_flag: bool, env_mode: Option<&str>) -> OutputMode {
    if json_flag {
        return OutputMode::Json;
    }
    match env_mode
        .map(str::trim)
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("json") => OutputMode::Json,
        _ => OutputMode::Human,
    }
}
