mod commands;
mod core;
mod repo;

use clap::{Parser, Subcommand};
use crate::core::error::{PruneError, print_error};
use std::path::PathBuf;

/// Rollback-safe pruning of RPM/DEB release repositories
#[derive(Parser)]
#[command(name = "repo-prune")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Compute retention for the current release and delete everything else
  Prune {
    /// Release repository root (contains rpm/ and deb/ trees)
    repo_root: PathBuf,
    /// Application whose packages are pruned; other packages are never touched
    app_name: String,
    /// Current release tag (v?MAJOR.MINOR.PATCH, trailing suffix ignored)
    tag: String,
    /// Retain artifacts newer than the tag; any non-empty value except "0" enables it
    #[arg(long, num_args = 0..=1, default_missing_value = "1", value_name = "FLAG")]
    allow_greater: Option<String>,
    /// Show what would be deleted without removing anything
    #[arg(long)]
    dry_run: bool,
    /// Output the run report in JSON format (useful for CI/automation)
    #[arg(long)]
    json: bool,
  },

  /// Compute and report the retention decision without deleting
  Plan {
    /// Release repository root (contains rpm/ and deb/ trees)
    repo_root: PathBuf,
    /// Application whose packages are pruned; other packages are never touched
    app_name: String,
    /// Current release tag (v?MAJOR.MINOR.PATCH, trailing suffix ignored)
    tag: String,
    /// Retain artifacts newer than the tag; any non-empty value except "0" enables it
    #[arg(long, num_args = 0..=1, default_missing_value = "1", value_name = "FLAG")]
    allow_greater: Option<String>,
    /// Output the run report in JSON format (useful for CI/automation)
    #[arg(long)]
    json: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();

  let result = match cli.command {
    Commands::Prune {
      repo_root,
      app_name,
      tag,
      allow_greater,
      dry_run,
      json,
    } => commands::run_prune(repo_root, app_name, tag, allow_greater, dry_run, json),
    Commands::Plan {
      repo_root,
      app_name,
      tag,
      allow_greater,
      json,
    } => commands::run_plan(repo_root, app_name, tag, allow_greater, json),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: PruneError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
