//! Loose semver extraction and release-series predicates
//!
//! Release tags and package version fields carry arbitrary decoration
//! (`v2.5.0`, `2.5.0-1.x86_64`, `2.5.0~beta2`). We take the first
//! MAJOR.MINOR.PATCH triple and ignore the rest; a string with no triple
//! yields `None`, which callers must treat as "unknown, handle
//! conservatively", never as a failure.

use regex::Regex;
use semver::Version;
use std::sync::LazyLock;

static SEMVER_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"v?(\d+)\.(\d+)\.(\d+)").expect("semver pattern is valid"));

/// Extract the first `v?MAJOR.MINOR.PATCH` match from `text`.
///
/// Trailing suffixes (release numbers, pre-release labels, architecture
/// tags) are ignored. Returns `None` when no triple is present or a
/// component overflows u64.
pub fn parse_loose(text: &str) -> Option<Version> {
  let caps = SEMVER_RE.captures(text)?;
  let major = caps[1].parse().ok()?;
  let minor = caps[2].parse().ok()?;
  let patch = caps[3].parse().ok()?;
  Some(Version::new(major, minor, patch))
}

/// Two versions belong to the same release series when major and minor match.
#[allow(dead_code)] // Convenience predicate alongside is_previous_series
pub fn same_series(a: &Version, b: &Version) -> bool {
  a.major == b.major && a.minor == b.minor
}

/// `v` is in a previous series of `current`: same major, lower minor.
pub fn is_previous_series(v: &Version, current: &Version) -> bool {
  v.major == current.major && v.minor < current.minor
}
