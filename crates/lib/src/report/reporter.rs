use std::path::PathBuf;

use crate::execute::{BuildOutcome, BuildRequest};

use super::AggregateReport;

/// Run-level facts announced before the first build starts.
#[derive(Debug, Clone)]
pub struct RunContext {
  pub project_name: String,
  pub version: String,
  pub toolchain: String,
  pub output_dir: PathBuf,
  pub target_count: usize,
  pub jobs: usize,
}

/// Receives progress as a run advances.
///
/// With `jobs > 1` the per-target hooks are called from concurrent tasks, so
/// implementations that write to a shared stream must serialize their output.
pub trait Reporter: Send + Sync {
  fn run_started(&self, _context: &RunContext) {}

  fn target_started(&self, _request: &BuildRequest) {}

  fn target_finished(&self, _outcome: &BuildOutcome) {}

  fn run_finished(&self, _report: &AggregateReport, _outcomes: &[BuildOutcome]) {}
}

/// Discards all progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl Reporter for NoopReporter {}
