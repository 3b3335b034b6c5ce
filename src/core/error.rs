//! Error types for repo-prune with contextual messages and exit codes
//!
//! Fatal errors abort the run before any file is removed; per-file
//! extraction and deletion failures are handled locally by the caller and
//! never surface here.

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::repo::metadata::Ecosystem;

/// Exit codes for repo-prune
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// Unexpected failure (I/O, subprocess plumbing)
  Failure = 1,
  /// Usage error (missing/malformed arguments)
  Usage = 2,
  /// Target version string cannot be parsed
  VersionParse = 3,
  /// RPM artifacts present but the rpm query tool is unavailable
  RpmToolMissing = 4,
  /// DEB artifacts present but the dpkg-deb query tool is unavailable
  DebToolMissing = 5,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for repo-prune
#[derive(Debug)]
pub enum PruneError {
  /// Invalid invocation arguments
  Usage { message: String },

  /// The target tag does not contain a vMAJOR.MINOR.PATCH version
  VersionParse { tag: String },

  /// A required metadata-query tool is absent while matching artifacts exist
  ToolMissing { ecosystem: Ecosystem, dir: PathBuf },

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl PruneError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    PruneError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      PruneError::Message { message, context, help } => PruneError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      PruneError::Io(e) => PruneError::Message {
        message: format!("{}: {}", ctx_str, e),
        context: None,
        help: None,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      PruneError::Usage { .. } => ExitCode::Usage,
      PruneError::VersionParse { .. } => ExitCode::VersionParse,
      PruneError::ToolMissing { ecosystem, .. } => match ecosystem {
        Ecosystem::Rpm => ExitCode::RpmToolMissing,
        Ecosystem::Deb => ExitCode::DebToolMissing,
      },
      PruneError::Io(_) => ExitCode::Failure,
      PruneError::Message { .. } => ExitCode::Failure,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      PruneError::VersionParse { .. } => {
        Some("Tags must look like v2.5.0 (an optional leading 'v', then MAJOR.MINOR.PATCH).".to_string())
      }
      PruneError::ToolMissing { ecosystem, .. } => Some(format!(
        "Install {} or remove the {} artifacts; pruning without verifiable metadata could delete the wrong files.",
        ecosystem.tool(),
        ecosystem
      )),
      PruneError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for PruneError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PruneError::Usage { message } => write!(f, "{}", message),
      PruneError::VersionParse { tag } => {
        write!(f, "Cannot parse current version from tag: {}", tag)
      }
      PruneError::ToolMissing { ecosystem, dir } => {
        write!(
          f,
          "{} artifacts exist under {} but '{}' is not available",
          ecosystem,
          dir.display(),
          ecosystem.tool()
        )
      }
      PruneError::Io(e) => write!(f, "I/O error: {}", e),
      PruneError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for PruneError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      PruneError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for PruneError {
  fn from(err: io::Error) -> Self {
    PruneError::Io(err)
  }
}

impl From<String> for PruneError {
  fn from(msg: String) -> Self {
    PruneError::message(msg)
  }
}

impl From<&str> for PruneError {
  fn from(msg: &str) -> Self {
    PruneError::message(msg)
  }
}

impl From<serde_json::Error> for PruneError {
  fn from(err: serde_json::Error) -> Self {
    PruneError::message(format!("JSON error: {}", err))
  }
}

impl From<std::string::FromUtf8Error> for PruneError {
  fn from(err: std::string::FromUtf8Error) -> Self {
    PruneError::message(format!("UTF-8 conversion error: {}", err))
  }
}

impl From<anyhow::Error> for PruneError {
  fn from(err: anyhow::Error) -> Self {
    PruneError::message(err.to_string())
  }
}

/// Result type alias for repo-prune
pub type PruneResult<T> = Result<T, PruneError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> PruneResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> PruneResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<PruneError>,
{
  fn context(self, ctx: impl Into<String>) -> PruneResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> PruneResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &PruneError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
