//! Package metadata extraction via system packaging tools
//!
//! The artifact filename is never trusted as a metadata source: the
//! authoritative package name and version come from querying the system
//! `rpm` / `dpkg-deb` binaries. Subprocess calls sit behind the
//! [`MetadataExtractor`] trait so tests can substitute canned extractors.
//!
//! Two failure modes, deliberately distinct:
//! - the tool binary is absent: fatal for the whole run (an unverifiable
//!   metadata source is a wrong-file-deletion risk), surfaced as
//!   [`PruneError::ToolMissing`];
//! - the tool runs but rejects one file (corrupt archive, wrong format):
//!   recoverable, the caller skips that file with a warning.

use crate::core::error::{PruneError, PruneResult};
use crate::core::version;
use semver::Version;
use std::fmt;
use std::io;
use std::path::Path;
use std::process::Command;

/// A supported packaging ecosystem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ecosystem {
  Rpm,
  Deb,
}

impl Ecosystem {
  /// System binary that answers metadata queries for this ecosystem
  pub fn tool(self) -> &'static str {
    match self {
      Ecosystem::Rpm => "rpm",
      Ecosystem::Deb => "dpkg-deb",
    }
  }

  /// Artifact file extension (without the dot)
  pub fn extension(self) -> &'static str {
    match self {
      Ecosystem::Rpm => "rpm",
      Ecosystem::Deb => "deb",
    }
  }
}

impl fmt::Display for Ecosystem {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Ecosystem::Rpm => write!(f, "RPM"),
      Ecosystem::Deb => write!(f, "DEB"),
    }
  }
}

/// Authoritative metadata for one artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageMeta {
  /// Package name as reported by the packaging tool
  pub name: String,
  /// Parsed version; `None` when the version field held no usable triple
  pub version: Option<Version>,
}

/// Capability to derive (name, version) from an artifact on disk
pub trait MetadataExtractor {
  fn ecosystem(&self) -> Ecosystem;

  /// Whether the metadata-query tool can be spawned at all.
  ///
  /// Checked once per run, before any extraction or deletion.
  fn tool_available(&self) -> bool {
    pkg_cmd(self.ecosystem().tool()).arg("--version").output().is_ok()
  }

  /// Query the tool for this artifact's name and version.
  fn extract(&self, path: &Path) -> PruneResult<PackageMeta>;
}

/// Extractor backed by `rpm -qp`
pub struct RpmExtractor;

impl MetadataExtractor for RpmExtractor {
  fn ecosystem(&self) -> Ecosystem {
    Ecosystem::Rpm
  }

  fn extract(&self, path: &Path) -> PruneResult<PackageMeta> {
    let output = run_query(
      Ecosystem::Rpm,
      pkg_cmd("rpm").args(["-qp", "--qf", "%{NAME}|%{VERSION}-%{RELEASE}"]).arg(path),
      path,
    )?;

    let line = String::from_utf8_lossy(&output.stdout);
    parse_rpm_query_line(line.trim(), path)
  }
}

/// Extractor backed by `dpkg-deb -f`
pub struct DebExtractor;

impl DebExtractor {
  /// Read one control field. Fields are queried independently so a missing
  /// Version field still yields the Package name.
  fn control_field(&self, path: &Path, field: &str) -> PruneResult<String> {
    let output = run_query(
      Ecosystem::Deb,
      pkg_cmd("dpkg-deb").arg("-f").arg(path).arg(field),
      path,
    )?;

    let value = String::from_utf8_lossy(&output.stdout);
    Ok(value.trim().to_string())
  }
}

impl MetadataExtractor for DebExtractor {
  fn ecosystem(&self) -> Ecosystem {
    Ecosystem::Deb
  }

  fn extract(&self, path: &Path) -> PruneResult<PackageMeta> {
    let name = self.control_field(path, "Package")?;
    if name.is_empty() {
      return Err(PruneError::message(format!(
        "dpkg-deb reported an empty Package field for {}",
        path.display()
      )));
    }

    let raw_version = self.control_field(path, "Version")?;

    Ok(PackageMeta {
      name,
      version: version::parse_loose(&raw_version),
    })
  }
}

/// Parse the single `NAME|VERSION-RELEASE` line emitted by the rpm query.
fn parse_rpm_query_line(line: &str, path: &Path) -> PruneResult<PackageMeta> {
  let (name, version_release) = line.split_once('|').ok_or_else(|| {
    PruneError::message(format!(
      "unexpected rpm query output for {}: {:?}",
      path.display(),
      line
    ))
  })?;

  if name.is_empty() {
    return Err(PruneError::message(format!(
      "rpm reported an empty package name for {}",
      path.display()
    )));
  }

  Ok(PackageMeta {
    name: name.to_string(),
    version: version::parse_loose(version_release),
  })
}

/// Run a metadata query, distinguishing a missing tool from a failing one.
fn run_query(ecosystem: Ecosystem, cmd: &mut Command, path: &Path) -> PruneResult<std::process::Output> {
  let output = cmd.output().map_err(|e| {
    if e.kind() == io::ErrorKind::NotFound {
      PruneError::ToolMissing {
        ecosystem,
        dir: path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf(),
      }
    } else {
      PruneError::Io(e)
    }
  })?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    return Err(PruneError::message(format!(
      "{} query failed for {}: {}",
      ecosystem.tool(),
      path.display(),
      stderr.trim()
    )));
  }

  Ok(output)
}

/// Create a packaging-tool command with an isolated environment
///
/// - Clears environment variables
/// - Whitelists only PATH and HOME
/// - Forces the C locale for stable output
fn pkg_cmd(tool: &str) -> Command {
  let mut cmd = Command::new(tool);

  cmd.env_clear();
  if let Ok(path) = std::env::var("PATH") {
    cmd.env("PATH", path);
  }
  if let Ok(home) = std::env::var("HOME") {
    cmd.env("HOME", home);
  }
  cmd.env("LC_ALL", "C");

  cmd
}
