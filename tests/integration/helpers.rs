//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Fake `rpm`: answers `--version`, otherwise derives `NAME|VERSION-RELEASE`
/// from the queried filename (`<name>-<version>-<release>.x86_64.rpm`).
/// Files with "corrupt" in the name fail like a damaged archive. Only shell
/// builtins are used so the script runs with the bin dir as the entire PATH.
const FAKE_RPM: &str = r#"#!/bin/sh
if [ "$1" = "--version" ]; then
  echo "RPM version 4.99.fake"
  exit 0
fi
for f in "$@"; do :; done
base=${f##*/}
case "$base" in
  *corrupt*)
    echo "error: $base: not an rpm package" >&2
    exit 1
    ;;
esac
core=${base%.x86_64.rpm}
rel=${core##*-}
rest=${core%-*}
ver=${rest##*-}
name=${rest%-*}
printf '%s|%s-%s' "$name" "$ver" "$rel"
"#;

/// Fake `dpkg-deb`: answers `--version` and `-f <file> <field>` for the
/// Package and Version fields, derived from `<name>_<version>_amd64.deb`.
const FAKE_DPKG_DEB: &str = r#"#!/bin/sh
if [ "$1" = "--version" ]; then
  echo "Debian dpkg-deb fake"
  exit 0
fi
file=$2
field=$3
base=${file##*/}
case "$base" in
  *corrupt*)
    echo "dpkg-deb: error: $base is not a Debian format archive" >&2
    exit 2
    ;;
esac
name=${base%%_*}
rest=${base#*_}
ver=${rest%%_*}
case "$field" in
  Package) echo "$name" ;;
  Version) echo "$ver" ;;
  *) exit 2 ;;
esac
"#;

/// A release repository tree with fake packaging tools on a private PATH
pub struct TestRepo {
  _root: TempDir,
  pub path: PathBuf,
  /// Directory holding the fake rpm/dpkg-deb executables
  pub bin_dir: PathBuf,
  /// Empty directory usable as a PATH with no tools at all
  pub empty_bin_dir: PathBuf,
}

impl TestRepo {
  pub fn new(app: &str) -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().join("repo");

    std::fs::create_dir_all(path.join("rpm/x86_64"))?;
    let initial = app[..1].to_lowercase();
    std::fs::create_dir_all(path.join("deb/pool/main").join(&initial).join(app))?;

    let bin_dir = root.path().join("bin");
    std::fs::create_dir_all(&bin_dir)?;
    write_script(&bin_dir.join("rpm"), FAKE_RPM)?;
    write_script(&bin_dir.join("dpkg-deb"), FAKE_DPKG_DEB)?;

    let empty_bin_dir = root.path().join("empty-bin");
    std::fs::create_dir_all(&empty_bin_dir)?;

    Ok(Self {
      _root: root,
      path,
      bin_dir,
      empty_bin_dir,
    })
  }

  /// Drop an RPM artifact named `<name>-<version_release>.x86_64.rpm`
  pub fn add_rpm(&self, name: &str, version_release: &str) -> Result<PathBuf> {
    let file = self
      .path
      .join("rpm/x86_64")
      .join(format!("{}-{}.x86_64.rpm", name, version_release));
    std::fs::write(&file, b"fake rpm payload")?;
    Ok(file)
  }

  /// Drop a DEB artifact `<name>_<version>_amd64.deb` into `app`'s pool dir
  pub fn add_deb(&self, app: &str, name: &str, version: &str) -> Result<PathBuf> {
    let initial = app[..1].to_lowercase();
    let file = self
      .path
      .join("deb/pool/main")
      .join(&initial)
      .join(app)
      .join(format!("{}_{}_amd64.deb", name, version));
    std::fs::write(&file, b"fake deb payload")?;
    Ok(file)
  }

  pub fn repo_root(&self) -> &str {
    self.path.to_str().expect("temp path is valid UTF-8")
  }
}

/// Run the repo-prune binary with the given PATH (does not assert success)
pub fn run_repo_prune(path_env: &Path, args: &[&str]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_repo-prune");

  Command::new(bin)
    .args(args)
    .env("PATH", path_env)
    .output()
    .context("Failed to run repo-prune")
}

fn write_script(path: &Path, body: &str) -> Result<()> {
  std::fs::write(path, body)?;
  let mut perms = std::fs::metadata(path)?.permissions();
  perms.set_mode(0o755);
  std::fs::set_permissions(path, perms)?;
  Ok(())
}
