//! Top-level driver: matrix in, report out.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::config::Config;
use crate::execute::{BuildOutcome, BuildRequest, ExecuteConfig, Toolchain, execute_all};
use crate::report::{AggregateReport, Reporter, RunContext, absolute_dir, aggregate};

/// Errors that abort the whole run before any target is built.
#[derive(Debug, Error)]
pub enum RunError {
  #[error("failed to create output directory {path}: {source}")]
  OutputDir {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

/// Per-invocation inputs.
#[derive(Debug, Clone)]
pub struct RunOptions {
  /// Free-form version string, embedded verbatim.
  pub version: String,
  /// Where artifacts are written. Relative paths resolve against the current directory.
  pub output_dir: PathBuf,
  pub execute: ExecuteConfig,
}

/// Everything a run produced.
#[derive(Debug)]
pub struct RunResult {
  /// One outcome per target, in matrix order.
  pub outcomes: Vec<BuildOutcome>,
  pub report: AggregateReport,
}

/// Derive one build request per matrix entry.
pub fn build_requests(config: &Config, version: &str, output_dir: &std::path::Path) -> Vec<BuildRequest> {
  config
    .matrix
    .iter()
    .map(|target| BuildRequest {
      target: target.clone(),
      version: version.to_string(),
      output_dir: output_dir.to_path_buf(),
      project_name: config.project_name.clone(),
      toolchain: config.toolchain.clone(),
      version_symbol: config.version_symbol.clone(),
    })
    .collect()
}

/// Build every target in the configured matrix.
///
/// Creates the output directory (with parents) once, then builds each target.
/// Target failures are reported in the result; only setup failures return `Err`.
pub async fn run(
  config: &Config,
  options: &RunOptions,
  toolchain: Arc<dyn Toolchain>,
  reporter: Arc<dyn Reporter>,
) -> Result<RunResult, RunError> {
  tokio::fs::create_dir_all(&options.output_dir)
    .await
    .map_err(|source| RunError::OutputDir {
      path: options.output_dir.clone(),
      source,
    })?;

  // Absolute so `-o` stays correct when the toolchain runs in another directory.
  let output_dir = absolute_dir(&options.output_dir);

  info!(
    project = %config.project_name,
    version = %options.version,
    output_dir = %output_dir.display(),
    targets = config.matrix.len(),
    "starting run"
  );

  reporter.run_started(&RunContext {
    project_name: config.project_name.clone(),
    version: options.version.clone(),
    toolchain: config.toolchain.clone(),
    output_dir: output_dir.clone(),
    target_count: config.matrix.len(),
    jobs: options.execute.jobs,
  });

  let requests = build_requests(config, &options.version, &output_dir);
  let outcomes = execute_all(requests, toolchain, reporter.clone(), &options.execute).await;
  let report = aggregate(&outcomes, &output_dir);

  info!(
    succeeded = report.success_count,
    failed = report.failure_count,
    "run complete"
  );

  reporter.run_finished(&report, &outcomes);

  Ok(RunResult { outcomes, report })
}
