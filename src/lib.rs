#![forbid(unsafe_code)]

//! clean-binaries — removes stale versioned DLL artifacts from a build output
//! directory.
//!
//! One pass over one directory: list the regular files, keep the names that
//! match `<name>.<4 digits>.dll` (matched from the start of the name only),
//! and delete each match that still exists.
//!
//! # Library usage
//!
//! ```rust,no_run
//! use clean_binaries::prelude::*;
//!
//! # fn main() -> clean_binaries::core::errors::Result<()> {
//! let report = ArtifactCleaner::new("build/Debug").run(&mut |event| {
//!     if let CleanEvent::Deleting { file, .. } = event {
//!         println!("Deleting: {}", file.display_name());
//!     }
//! })?;
//! println!("{} deleted", report.deleted.len());
//! # Ok(())
//! # }
//! ```

pub mod prelude;

pub mod core;
pub mod logger;
pub mod scanner;
