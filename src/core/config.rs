//! Configuration system: TOML file + env var overrides + defaults.
//!
//! Nothing here selects the directory being cleaned; that is always
//! `<cwd>/build/Debug/` for the binary.

#![allow(missing_docs)]

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::errors::{CleanError, Result};
use crate::scanner::patterns::{ArtifactPattern, DEFAULT_PATTERN};

/// Full configuration model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Config {
    pub cleaner: CleanerConfig,
    pub logging: LoggingConfig,
}

/// Matching and deletion behavior.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CleanerConfig {
    /// Report matches without deleting anything.
    pub dry_run: bool,
    /// Artifact name expression, matched from the start of the file name only.
    pub pattern: String,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            dry_run: false,
            pattern: DEFAULT_PATTERN.to_string(),
        }
    }
}

/// JSONL activity log settings. Logging is off unless `jsonl_path` is set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    pub jsonl_path: Option<PathBuf>,
    pub max_size_bytes: u64,
    pub max_rotated_files: u32,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            jsonl_path: None,
            max_size_bytes: 10 * 1024 * 1024, // 10 MiB
            max_rotated_files: 3,
        }
    }
}

impl Config {
    /// Default configuration path: `$HOME/.config/clean-binaries/config.toml`.
    #[must_use]
    pub fn default_path() -> PathBuf {
        let home_dir = env::var_os("HOME").map_or_else(
            || {
                eprintln!("[CB-CONFIG] WARNING: HOME not set, falling back to /tmp");
                PathBuf::from("/tmp")
            },
            PathBuf::from,
        );
        home_dir
            .join(".config")
            .join("clean-binaries")
            .join("config.toml")
    }

    /// Load config from default or explicit path, then apply env overrides.
    ///
    /// Missing config file is not an error when loading from default path; defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, |name| env::var(name).ok())
    }

    fn load_with_env<F>(path: Option<&Path>, lookup: F) -> Result<Self>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let path_buf = path.map_or_else(Self::default_path, Path::to_path_buf);
        let is_explicit_path = path.is_some();

        let mut cfg = if path_buf.exists() {
            let raw = fs::read_to_string(&path_buf).map_err(|source| CleanError::Io {
                path: path_buf.clone(),
                source,
            })?;
            toml::from_str(&raw)?
        } else if is_explicit_path {
            return Err(CleanError::MissingConfig { path: path_buf });
        } else {
            Self::default()
        };

        cfg.apply_env_overrides_from(lookup)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Compiled artifact pattern for this config.
    pub fn artifact_pattern(&self) -> Result<ArtifactPattern> {
        ArtifactPattern::new(&self.cleaner.pattern)
    }

    /// Deterministic hash of the effective config for the activity log.
    ///
    /// FNV-1a over canonical JSON, stable across processes and Rust releases.
    pub fn stable_hash(&self) -> Result<String> {
        let canonical = serde_json::to_string(self)?;
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        for byte in canonical.as_bytes() {
            hash ^= u64::from(*byte);
            hash = hash.wrapping_mul(0x0100_0000_01b3);
        }
        Ok(format!("{hash:016x}"))
    }

    fn apply_env_overrides_from<F>(&mut self, mut lookup: F) -> Result<()>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut var = |name: &str| lookup(name).filter(|raw| !raw.trim().is_empty());

        if let Some(raw) = var("CB_DRY_RUN") {
            self.cleaner.dry_run = parse_env("CB_DRY_RUN", &raw)?;
        }
        if let Some(raw) = var("CB_PATTERN") {
            self.cleaner.pattern = raw;
        }
        if let Some(raw) = var("CB_LOG_PATH") {
            self.logging.jsonl_path = Some(PathBuf::from(raw));
        }
        if let Some(raw) = var("CB_LOG_MAX_SIZE_BYTES") {
            self.logging.max_size_bytes = parse_env("CB_LOG_MAX_SIZE_BYTES", &raw)?;
        }
        if let Some(raw) = var("CB_LOG_MAX_ROTATED_FILES") {
            self.logging.max_rotated_files = parse_env("CB_LOG_MAX_ROTATED_FILES", &raw)?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        self.artifact_pattern()?;

        if self.logging.max_size_bytes == 0 {
            return Err(CleanError::InvalidConfig {
                details: "logging.max_size_bytes must be > 0".to_string(),
            });
        }
        if self
            .logging
            .jsonl_path
            .as_ref()
            .is_some_and(|p| p.as_os_str().is_empty())
        {
            return Err(CleanError::InvalidConfig {
                details: "logging.jsonl_path must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_env<T>(name: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|error| CleanError::ConfigParse {
            context: "env",
            details: format!("{name}={raw:?}: {error}"),
        })
}
