//! Repository discovery: directory layouts and metadata extraction
//!
//! - **scan**: ecosystem directory conventions and candidate grouping
//! - **metadata**: name/version extraction via system packaging tools

pub mod metadata;
pub mod scan;
