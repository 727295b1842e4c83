//! Result aggregation.
//!
//! Folds per-target outcomes into the run's [`AggregateReport`], which decides
//! the process exit status. The fold is a commutative count, so it does not
//! depend on the order targets finished in.

pub mod reporter;

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::consts::BYTES_PER_MIB;
use crate::execute::BuildOutcome;

pub use reporter::{NoopReporter, Reporter, RunContext};

/// Terminal summary of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateReport {
  pub success_count: usize,
  pub failure_count: usize,
  /// The output directory, resolved to an absolute path.
  pub output_directory: PathBuf,
}

impl AggregateReport {
  /// True when no target failed. An empty run is a success.
  pub fn is_success(&self) -> bool {
    self.failure_count == 0
  }

  pub fn total(&self) -> usize {
    self.success_count + self.failure_count
  }

  /// Process exit status for this report: `0` if every target succeeded, `1` otherwise.
  pub fn exit_code(&self) -> i32 {
    if self.is_success() { 0 } else { 1 }
  }
}

/// Count successes and failures and resolve the output directory.
pub fn aggregate(outcomes: &[BuildOutcome], output_dir: &Path) -> AggregateReport {
  let success_count = outcomes.iter().filter(|o| o.is_success()).count();

  AggregateReport {
    success_count,
    failure_count: outcomes.len() - success_count,
    output_directory: absolute_dir(output_dir),
  }
}

/// Resolve a directory to an absolute path.
///
/// Existing directories are canonicalized (without UNC prefixes on Windows);
/// otherwise the path is made absolute against the current directory.
pub fn absolute_dir(path: &Path) -> PathBuf {
  dunce::canonicalize(path)
    .or_else(|_| std::path::absolute(path))
    .unwrap_or_else(|_| path.to_path_buf())
}

/// Format a byte count as mebibytes with two decimals, e.g. `5.20 MB`.
pub fn format_mib(bytes: u64) -> String {
  format!("{:.2} MB", bytes as f64 / BYTES_PER_MIB as f64)
}
