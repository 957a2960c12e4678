//! Versioned-artifact name matching.
//!
//! A name matches when the pattern matches at the *start* of the file name.
//! The end of the name is never anchored, so `engine.0042.dll.bak` is still a
//! match for the default pattern.

#![allow(missing_docs)]

use std::ffi::OsStr;
use std::fmt;

use regex::Regex;

use crate::core::errors::{CleanError, Result};

/// Default naming rule: `<non-whitespace>*.<4 digits>.dll`.
pub const DEFAULT_PATTERN: &str = r"\S*\.\d{4}\.dll";

/// Compiled, start-anchored artifact name pattern.
#[derive(Clone)]
pub struct ArtifactPattern {
    source: String,
    compiled: Regex,
}

impl ArtifactPattern {
    /// Compile a user-supplied expression.
    ///
    /// The expression is wrapped as `^(?:expr)`; a trailing `$` is never added.
    pub fn new(expr: &str) -> Result<Self> {
        if expr.trim().is_empty() {
            return Err(CleanError::InvalidPattern {
                pattern: expr.to_string(),
                details: "pattern must not be empty".to_string(),
            });
        }

        let anchored = format!("^(?:{expr})");
        let compiled = Regex::new(&anchored).map_err(|err| CleanError::InvalidPattern {
            pattern: expr.to_string(),
            details: err.to_string(),
        })?;

        Ok(Self {
            source: expr.to_string(),
            compiled,
        })
    }

    /// The expression as supplied, without the added anchor.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Test a bare file name.
    #[must_use]
    pub fn is_match(&self, name: &OsStr) -> bool {
        self.compiled.is_match(&name.to_string_lossy())
    }
}

impl Default for ArtifactPattern {
    fn default() -> Self {
        Self::new(DEFAULT_PATTERN)
            .unwrap_or_else(|err| unreachable!("built-in pattern is valid: {err}"))
    }
}

impl fmt::Debug for ArtifactPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ArtifactPattern").field(&self.source).finish()
    }
}

impl PartialEq for ArtifactPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn matches(name: &str) -> bool {
        ArtifactPattern::default().is_match(OsStr::new(name))
    }

    #[test]
    fn four_digit_version_matches() {
        assert!(matches("engine.0042.dll"));
        assert!(matches("imgui_example_app.1234.dll"));
        assert!(matches("a.b.c.9999.dll"));
    }

    #[test]
    fn wrong_digit_counts_do_not_match() {
        assert!(!matches("foo.123.dll"));
        assert!(!matches("foo.12345.dll"));
        assert!(!matches("foo..dll"));
    }

    #[test]
    fn missing_dll_suffix_does_not_match() {
        assert!(!matches("engine.dll"));
        assert!(!matches("notes.txt"));
        assert!(!matches("engine.0042.pdb"));
        assert!(!matches("engine.0042.so"));
    }

    #[test]
    fn match_is_not_anchored_at_end() {
        assert!(matches("engine.0042.dll.bak"));
        assert!(matches("engine.0042.dllx"));
    }

    #[test]
    fn match_is_anchored_at_start() {
        // Whitespace before the version segment stops the prefix run.
        assert!(!matches("my engine.0042.dll"));
        assert!(!matches(" engine.0042.dll"));
    }

    #[test]
    fn match_is_case_sensitive() {
        assert!(!matches("ENGINE.0042.DLL"));
        assert!(matches("ENGINE.0042.dll"));
    }

    #[test]
    fn empty_prefix_matches() {
        assert!(matches(".0042.dll"));
    }

    #[test]
    fn custom_pattern_is_start_anchored() {
        let pattern = ArtifactPattern::new(r"lib\w+\.so\.\d+").unwrap();
        assert!(pattern.is_match(OsStr::new("libfoo.so.3")));
        assert!(pattern.is_match(OsStr::new("libfoo.so.3.old")));
        assert!(!pattern.is_match(OsStr::new("old-libfoo.so.3")));
        assert_eq!(pattern.as_str(), r"lib\w+\.so\.\d+");
    }

    #[test]
    fn alternation_stays_anchored() {
        // Without the group, `^a|b` would let `b` match anywhere.
        let pattern = ArtifactPattern::new("a|b").unwrap();
        assert!(pattern.is_match(OsStr::new("b.txt")));
        assert!(!pattern.is_match(OsStr::new("xb.txt")));
    }

    #[test]
    fn invalid_pattern_rejected() {
        let err = ArtifactPattern::new(r"\d{4").unwrap_err();
        assert_eq!(err.code(), "CB-1004");
    }

    #[test]
    fn empty_pattern_rejected() {
        assert!(ArtifactPattern::new("").is_err());
        assert!(ArtifactPattern::new("   ").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_prefix_still_matches() {
        use std::os::unix::ffi::OsStrExt;
        let name = OsStr::from_bytes(b"eng\xffine.0042.dll");
        assert!(ArtifactPattern::default().is_match(name));
    }

    proptest! {
        #[test]
        fn any_prefix_with_four_digits_matches(
            prefix in "[A-Za-z0-9_.+-]{0,16}",
            version in "[0-9]{4}",
            tail in "[A-Za-z.]{0,6}",
        ) {
            let name = format!("{prefix}.{version}.dll{tail}");
            prop_assert!(matches(&name), "expected match: {}", name);
        }

        #[test]
        fn other_digit_counts_never_match(
            prefix in "[A-Za-z_-]{1,12}",
            version in "[0-9]{1,3}|[0-9]{5,8}",
        ) {
            let name = format!("{prefix}.{version}.dll");
            prop_assert!(!matches(&name), "unexpected match: {}", name);
        }

        #[test]
        fn names_without_dll_never_match(
            prefix in "[A-Za-z_-]{1,12}",
            version in "[0-9]{4}",
            ext in "(exe|pdb|lib|so|txt)",
        ) {
            let name = format!("{prefix}.{version}.{ext}");
            prop_assert!(!matches(&name), "unexpected match: {}", name);
        }
    }
}
