//! CLI output formatting utilities.
//!
//! Provides consistent formatting for terminal output including colored status
//! messages, duration formatting, Unicode symbols, and the console progress
//! reporter used during a build run.

use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, SystemTime};

use anyhow::Context;
use owo_colors::{OwoColorize, Stream};

use crossbuild_lib::execute::{BuildOutcome, BuildRequest};
use crossbuild_lib::report::{AggregateReport, Reporter, RunContext, format_mib};

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const ERROR: &str = "✗";
  pub const INFO: &str = "•";
  pub const ARROW: &str = "→";
}

const RULE_WIDTH: usize = 50;

pub fn format_duration(duration: Duration) -> String {
  let secs = duration.as_secs();
  let millis = duration.subsec_millis();

  if secs >= 60 {
    let mins = secs / 60;
    let remaining_secs = secs % 60;
    format!("{}m {}s", mins, remaining_secs)
  } else if secs > 0 {
    format!("{}.{:02}s", secs, millis / 10)
  } else {
    format!("{}ms", millis)
  }
}

pub fn print_success(message: &str) {
  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    message
  );
}

pub fn print_error(message: &str) {
  eprintln!(
    "{} {}",
    symbols::ERROR.if_supports_color(Stream::Stderr, |s| s.red()),
    message.if_supports_color(Stream::Stderr, |s| s.red())
  );
}

/// Like `print_error`, but on stdout for report lines that belong with the rest of the report.
pub fn print_failure(message: &str) {
  println!(
    "{} {}",
    symbols::ERROR.if_supports_color(Stream::Stdout, |s| s.red()),
    message.if_supports_color(Stream::Stdout, |s| s.red())
  );
}

pub fn print_info(message: &str) {
  println!(
    "{} {}",
    symbols::INFO.if_supports_color(Stream::Stdout, |s| s.blue()),
    message
  );
}

pub fn print_stat(label: &str, value: &str) {
  println!(
    "  {}: {}",
    label.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    value
  );
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}

/// Indent every line of a multi-line diagnostic.
pub fn indent(text: &str, prefix: &str) -> String {
  text
    .lines()
    .map(|line| format!("{}{}", prefix, line))
    .collect::<Vec<_>>()
    .join("\n")
}

/// Human-readable progress for a build run.
///
/// Each hook prints its lines while holding a lock, so output from targets
/// built concurrently never interleaves within a block.
#[derive(Default)]
pub struct ConsoleReporter {
  lock: Mutex<()>,
}

impl ConsoleReporter {
  fn guard(&self) -> MutexGuard<'_, ()> {
    self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
  }
}

impl Reporter for ConsoleReporter {
  fn run_started(&self, context: &RunContext) {
    let _guard = self.guard();
    print_info(&format!("Building {}", context.project_name));
    print_stat("Version", &context.version);
    print_stat("Time", &humantime::format_rfc3339_seconds(SystemTime::now()).to_string());
    print_stat("Toolchain", &context.toolchain);
    print_stat("Output", &context.output_dir.display().to_string());
    print_stat("Targets", &context.target_count.to_string());
    if context.jobs > 1 {
      print_stat("Jobs", &context.jobs.to_string());
    }
    println!("{}", "-".repeat(RULE_WIDTH));
  }

  fn target_started(&self, request: &BuildRequest) {
    let _guard = self.guard();
    println!();
    print_info(&format!("Building {}...", request.target));
    println!(
      "  {} {}",
      symbols::ARROW.if_supports_color(Stream::Stdout, |s| s.dimmed()),
      request.command_line()
    );
  }

  fn target_finished(&self, outcome: &BuildOutcome) {
    let _guard = self.guard();
    match (outcome.artifact_name(), outcome.artifact_size_bytes) {
      (Some(name), Some(size)) if outcome.is_success() => {
        print_success(&format!(
          "{}: {} ({}, {})",
          outcome.target,
          name,
          format_mib(size),
          format_duration(outcome.elapsed)
        ));
      }
      _ => {
        print_error(&format!("{}: build failed", outcome.target));
        if let Some(diagnostic) = &outcome.diagnostic_text {
          eprintln!("{}", indent(diagnostic, "    "));
        }
      }
    }
  }

  fn run_finished(&self, report: &AggregateReport, _outcomes: &[BuildOutcome]) {
    let _guard = self.guard();
    println!();
    println!("{}", "=".repeat(RULE_WIDTH));
    let summary = format!(
      "Build complete: {} succeeded, {} failed",
      report.success_count, report.failure_count
    );
    if report.is_success() {
      print_success(&summary);
    } else {
      print_failure(&summary);
    }
    print_stat("Output", &report.output_directory.display().to_string());
  }
}
