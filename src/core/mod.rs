//! Core engine for repo-prune
//!
//! - **error**: error types with exit codes and contextual help messages
//! - **version**: loose semver extraction and release-series predicates
//! - **policy**: the pure retention decision algorithm

pub mod error;
pub mod policy;
pub mod version;
