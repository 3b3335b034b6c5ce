//! CLI commands for repo-prune
//!
//! - **prune**: compute retention and delete non-retained artifacts
//! - **plan**: compute retention and report without touching the repo

pub mod prune;

pub use prune::{run_plan, run_prune};
