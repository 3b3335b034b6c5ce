//! Integration tests for the repo-prune binary
//!
//! Metadata queries are served by fake `rpm` / `dpkg-deb` executables on a
//! controlled PATH, so every flow runs without the real packaging tools.

mod helpers;
