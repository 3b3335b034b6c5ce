//! Retention policy: which artifacts survive a prune
//!
//! Pure decision logic, no filesystem access. Per package group:
//! 1. Entries greater than current are deleted outright, or retained when
//!    the allow-greater override is set; either way they leave the pool.
//! 2. Entries exactly matching current are kept.
//! 3. Of the previous-series entries (same major, lower minor), the single
//!    maximum version is kept as the rollback target. This is one global
//!    rollback point across all prior minor lines, not one per line.
//! 4. Entries whose version could not be parsed are kept. Unknown metadata
//!    is never grounds for deletion.
//! 5. Everything else is deleted.

use crate::core::version::is_previous_series;
use semver::Version;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// One candidate artifact: its parsed version (when the version field was
/// parseable) and its on-disk path.
#[derive(Debug, Clone)]
pub struct PackageEntry {
  pub version: Option<Version>,
  pub path: PathBuf,
}

impl PackageEntry {
  pub fn new(version: Option<Version>, path: impl Into<PathBuf>) -> Self {
    Self {
      version,
      path: path.into(),
    }
  }
}

/// Artifacts grouped by authoritative package name, one map per ecosystem.
pub type PackageGroups = BTreeMap<String, Vec<PackageEntry>>;

/// The outcome of a policy evaluation: disjoint keep/delete sets covering
/// every entry that entered the evaluation.
#[derive(Debug, Default)]
pub struct RetentionDecision {
  pub kept: BTreeSet<PathBuf>,
  pub deleted: BTreeSet<PathBuf>,
}

impl RetentionDecision {
  /// Union another decision into this one. Paths are unique across
  /// ecosystems, so the sets stay disjoint.
  pub fn merge(&mut self, other: RetentionDecision) {
    self.kept.extend(other.kept);
    self.deleted.extend(other.deleted);
  }
}

/// Compute keep/delete sets for all groups against the current version.
pub fn evaluate(groups: &PackageGroups, current: &Version, allow_greater: bool) -> RetentionDecision {
  let mut decision = RetentionDecision::default();

  for entries in groups.values() {
    // Entries newer than current leave the pool first. Unknown versions
    // cannot be compared and fall through to the conservative rules below.
    let mut pool: Vec<&PackageEntry> = Vec::with_capacity(entries.len());
    for entry in entries {
      match &entry.version {
        Some(v) if *v > *current => {
          if allow_greater {
            decision.kept.insert(entry.path.clone());
          } else {
            decision.deleted.insert(entry.path.clone());
          }
        }
        _ => pool.push(entry),
      }
    }

    // Exact current versions are always kept.
    for entry in &pool {
      if entry.version.as_ref() == Some(current) {
        decision.kept.insert(entry.path.clone());
      }
    }

    // Single rollback target: the maximum version among all previous-series
    // entries, across every prior minor line.
    let rollback = pool
      .iter()
      .filter(|e| e.version.as_ref().is_some_and(|v| is_previous_series(v, current)))
      .max_by_key(|e| e.version.as_ref());
    if let Some(entry) = rollback {
      decision.kept.insert(entry.path.clone());
    }

    for entry in &pool {
      if entry.version.is_none() {
        decision.kept.insert(entry.path.clone());
      }
    }

    for entry in &pool {
      if !decision.kept.contains(&entry.path) {
        decision.deleted.insert(entry.path.clone());
      }
    }
  }

  decision
}
