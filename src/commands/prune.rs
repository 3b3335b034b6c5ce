//! Prune command: scan both ecosystems, decide retention, delete
//!
//! Order of operations is deliberate: the target tag is validated and the
//! tool-presence preconditions are checked before any file is touched, so
//! every fatal exit leaves the repository untouched. Deletion itself is
//! best-effort and per-file; one failed removal never blocks the rest.

use crate::core::error::{PruneError, PruneResult};
use crate::core::policy::{self, RetentionDecision};
use crate::core::version;
use crate::repo::metadata::{DebExtractor, Ecosystem, MetadataExtractor, RpmExtractor};
use crate::repo::scan;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Machine-readable run report for `--json`
#[derive(Debug, Serialize)]
struct PruneReport {
  app: String,
  current: String,
  allow_greater: bool,
  applied: bool,
  deleted: Vec<PathBuf>,
  failed: Vec<DeletionFailure>,
  kept: Vec<PathBuf>,
}

#[derive(Debug, Serialize)]
struct DeletionFailure {
  path: PathBuf,
  error: String,
}

/// Run the prune command
pub fn run_prune(
  repo_root: PathBuf,
  app_name: String,
  tag: String,
  allow_greater: Option<String>,
  dry_run: bool,
  json: bool,
) -> PruneResult<()> {
  execute(
    &repo_root,
    &app_name,
    &tag,
    allow_greater_enabled(allow_greater.as_deref()),
    !dry_run,
    json,
  )
}

/// Run the plan command (compute the decision, delete nothing)
pub fn run_plan(
  repo_root: PathBuf,
  app_name: String,
  tag: String,
  allow_greater: Option<String>,
  json: bool,
) -> PruneResult<()> {
  execute(
    &repo_root,
    &app_name,
    &tag,
    allow_greater_enabled(allow_greater.as_deref()),
    false,
    json,
  )
}

/// Interpret the allow-greater override: any non-empty, non-"0" value
/// enables it (a bare `--allow-greater` carries the value "1").
fn allow_greater_enabled(value: Option<&str>) -> bool {
  match value {
    None => false,
    Some(v) => !v.is_empty() && v != "0",
  }
}

fn execute(
  repo_root: &Path,
  app_name: &str,
  tag: &str,
  allow_greater: bool,
  apply: bool,
  json: bool,
) -> PruneResult<()> {
  if app_name.is_empty() {
    return Err(PruneError::Usage {
      message: "App name must not be empty".to_string(),
    });
  }

  let current = version::parse_loose(tag).ok_or_else(|| PruneError::VersionParse { tag: tag.to_string() })?;

  let rpm_extractor = RpmExtractor;
  let deb_extractor = DebExtractor;

  let rpm_dir = scan::rpm_dir(repo_root);
  let deb_dir = scan::deb_dir(repo_root, app_name);
  let rpm_files = scan::list_artifacts(&rpm_dir, Ecosystem::Rpm.extension())?;
  let deb_files = scan::list_artifacts(&deb_dir, Ecosystem::Deb.extension())?;

  // Fatal precondition: artifacts present without a verifiable metadata
  // source. Checked for both ecosystems before anything is extracted or
  // deleted. A missing tool with zero matching artifacts is fine.
  if !rpm_files.is_empty() && !rpm_extractor.tool_available() {
    return Err(PruneError::ToolMissing {
      ecosystem: Ecosystem::Rpm,
      dir: rpm_dir,
    });
  }
  if !deb_files.is_empty() && !deb_extractor.tool_available() {
    return Err(PruneError::ToolMissing {
      ecosystem: Ecosystem::Deb,
      dir: deb_dir,
    });
  }

  let mut decision = RetentionDecision::default();
  let rpm_groups = scan::collect_group(&rpm_files, app_name, &rpm_extractor)?;
  decision.merge(policy::evaluate(&rpm_groups, &current, allow_greater));
  let deb_groups = scan::collect_group(&deb_files, app_name, &deb_extractor)?;
  decision.merge(policy::evaluate(&deb_groups, &current, allow_greater));

  let mut report = PruneReport {
    app: app_name.to_string(),
    current: current.to_string(),
    allow_greater,
    applied: apply,
    deleted: Vec::new(),
    failed: Vec::new(),
    kept: decision.kept.iter().cloned().collect(),
  };

  if apply {
    for path in &decision.deleted {
      match fs::remove_file(path) {
        Ok(()) => {
          if !json {
            println!("Deleted: {}", path.display());
          }
          report.deleted.push(path.clone());
        }
        Err(err) => {
          if !json {
            println!("Failed to delete {}: {}", path.display(), err);
          }
          report.failed.push(DeletionFailure {
            path: path.clone(),
            error: err.to_string(),
          });
        }
      }
    }
  } else {
    report.deleted.extend(decision.deleted.iter().cloned());
    if !json {
      for path in &decision.deleted {
        println!("Would delete: {}", path.display());
      }
    }
  }

  if json {
    println!("{}", serde_json::to_string_pretty(&report)?);
  } else {
    println!("Kept files:");
    for path in &decision.kept {
      println!("{}", path.display());
    }
  }

  Ok(())
}
