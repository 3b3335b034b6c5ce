//! Repository layout scanning and candidate grouping
//!
//! Fixed per-ecosystem directory conventions:
//! - RPM: `<root>/rpm/x86_64/*.rpm`
//! - DEB: `<root>/deb/pool/main/<first-letter-of-app>/<app>/*.deb`
//!
//! A directory that does not exist is an empty candidate list, not an
//! error. Files whose extracted package name differs from the requested
//! app are discarded before grouping, so co-located packages of other
//! applications are never inspected for deletion or retention.

use crate::core::error::{PruneError, PruneResult, ResultExt};
use crate::core::policy::{PackageEntry, PackageGroups};
use crate::repo::metadata::MetadataExtractor;
use std::path::{Path, PathBuf};

/// RPM artifact directory under the repository root
pub fn rpm_dir(root: &Path) -> PathBuf {
  root.join("rpm").join("x86_64")
}

/// DEB pool directory for an application under the repository root
pub fn deb_dir(root: &Path, app_name: &str) -> PathBuf {
  let initial: String = app_name.chars().take(1).map(|c| c.to_ascii_lowercase()).collect();
  root.join("deb").join("pool").join("main").join(initial).join(app_name)
}

/// List candidate artifact files in `dir` with the given extension.
///
/// Sorted for deterministic processing order.
pub fn list_artifacts(dir: &Path, extension: &str) -> PruneResult<Vec<PathBuf>> {
  if !dir.is_dir() {
    return Ok(Vec::new());
  }

  let mut files = Vec::new();
  let entries = std::fs::read_dir(dir).context(format!("Failed to list {}", dir.display()))?;
  for entry in entries {
    let entry = entry.with_context(|| format!("Failed to list {}", dir.display()))?;
    let path = entry.path();
    if path.is_file() && path.extension().is_some_and(|ext| ext == std::ffi::OsStr::new(extension)) {
      files.push(path);
    }
  }

  files.sort();
  Ok(files)
}

/// Extract metadata for every candidate file and group the ones belonging
/// to `app_name`.
///
/// A missing query tool propagates as fatal; a per-file query failure skips
/// that file with a warning and leaves it out of both keep and delete sets.
pub fn collect_group(
  files: &[PathBuf],
  app_name: &str,
  extractor: &dyn MetadataExtractor,
) -> PruneResult<PackageGroups> {
  let mut groups = PackageGroups::new();

  for path in files {
    let meta = match extractor.extract(path) {
      Ok(meta) => meta,
      Err(err @ PruneError::ToolMissing { .. }) => return Err(err),
      Err(err) => {
        eprintln!("⚠️  Skipping {}: {}", path.display(), err);
        continue;
      }
    };

    if meta.name != app_name {
      continue;
    }

    groups
      .entry(meta.name)
      .or_default()
      .push(PackageEntry::new(meta.version, path.clone()));
  }

  Ok(groups)
}
