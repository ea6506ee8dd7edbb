//! NDK version parsing
//!
//! NDK releases are identified by versions such as `23.1.7779620`. The
//! grammar accepted here is deliberately loose about the number of segments
//! (older packages use two, side-by-side NDKs use three) but strict about
//! shape:
//! - Optional leading `v`
//! - One or more dot-separated numeric segments: "25", "25.2", "25.2.9519653"
//! - Optional pre-release: "25.0.8141415-beta1" or "1.0beta"
//! - Optional build metadata: "25.2.9519653+ci.7"

use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result};
use regex::Regex;

use crate::error::{hints, StepError};

const VERSION_PATTERN: &str = r"^v?(?P<segments>[0-9]+(?:\.[0-9]+)*)(?:-?(?P<pre>[0-9A-Za-z\-~]+(?:\.[0-9A-Za-z\-~]+)*))?(?:\+(?P<meta>[0-9A-Za-z\-~]+(?:\.[0-9A-Za-z\-~]+)*))?$";

/// A validated NDK version
///
/// Only equality matters for reconciliation, so the trimmed input is kept
/// verbatim and compared against installed revisions as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NdkVersion {
    raw: String,
}

impl NdkVersion {
    /// Parse a version string like "23.1.7779620"
    pub fn parse(s: &str) -> Result<Self> {
        let raw = s.trim();
        let re = Regex::new(VERSION_PATTERN).context("Invalid NDK version grammar")?;

        let invalid = || {
            StepError::config_error_with_hint(
                format!("'{}' is not a valid NDK version", raw),
                hints::ndk_version(),
            )
        };

        let caps = re.captures(raw).ok_or_else(invalid)?;

        // Segments must fit the numeric range, e.g. no 30-digit build numbers
        for segment in caps["segments"].split('.') {
            segment.parse::<u64>().map_err(|_| invalid())?;
        }

        Ok(NdkVersion {
            raw: raw.to_string(),
        })
    }

    /// The version exactly as requested (trimmed)
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether an installed revision string names this version
    pub fn matches_revision(&self, revision: &str) -> bool {
        self.raw == revision.trim()
    }
}

impl fmt::Display for NdkVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for NdkVersion {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parse() {
        let v = NdkVersion::parse("23.1.7779620").unwrap();
        assert_eq!(v.as_str(), "23.1.7779620");

        let v = NdkVersion::parse(" 25.0.8141415-beta1+ci.7 ").unwrap();
        assert_eq!(v.to_string(), "25.0.8141415-beta1+ci.7");

        let v: NdkVersion = "22.1.7171670".parse().unwrap();
        assert_eq!(v.as_str(), "22.1.7171670");
    }

    #[test]
    fn test_version_parse_loose_segments() {
        for input in ["21", "v21.4", "1.0beta", "25.2.9519653.1"] {
            assert!(NdkVersion::parse(input).is_ok(), "{} should parse", input);
        }
    }

    #[test]
    fn test_invalid_version_is_config_error() {
        for input in ["abc", "", "1..2", "23.1.", ".23", "23.1 7", "r21e", "99999999999999999999999.1"] {
            let err = NdkVersion::parse(input).unwrap_err();
            let step_error = err.downcast_ref::<StepError>();
            assert!(
                matches!(step_error, Some(StepError::Config { .. })),
                "expected config error for {:?}",
                input
            );
        }
    }

    #[test]
    fn test_matches_revision() {
        let v = NdkVersion::parse("18.1.5063045").unwrap();
        assert!(v.matches_revision("18.1.5063045"));
        assert!(v.matches_revision(" 18.1.5063045\r"));
        assert!(!v.matches_revision("17.2.4988734"));
        assert!(!v.matches_revision(""));
    }
}
