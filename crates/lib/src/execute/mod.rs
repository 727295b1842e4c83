//! Build execution module.
//!
//! This module runs the toolchain once per target. It handles:
//! - Building the per-target request (artifact name, env overlay, args)
//! - Invoking the toolchain and classifying its exit status
//! - Turning every per-target error into a failed outcome
//! - Optional bounded parallelism across targets

pub mod request;
pub mod toolchain;
pub mod types;

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info};

use crate::report::Reporter;

pub use request::{BuildRequest, artifact_name};
pub use toolchain::{CommandToolchain, Invocation, Toolchain, ToolchainOutput};
pub use types::{BuildOutcome, BuildStatus, ExecuteConfig, ExecuteError};

/// Build a single target.
///
/// Runs the toolchain to completion and classifies the result:
/// - exit code 0: success, the artifact is stat'ed for its size
/// - any other exit: failure, with captured stderr as diagnostic text
///
/// Never returns an error. A toolchain that cannot be spawned, or an artifact
/// missing after a successful exit, is recorded as a failed outcome.
pub async fn execute(request: &BuildRequest, toolchain: &dyn Toolchain, config: &ExecuteConfig) -> BuildOutcome {
  let started = Instant::now();
  let target = request.target.clone();
  let invocation = request.invocation(&config.project_dir);

  info!(target = %target, artifact = %request.artifact_name(), "building target");
  debug!(command = %invocation.command_line(), env = ?invocation.env, "toolchain invocation");

  let output = match toolchain.run(&invocation).await {
    Ok(output) => output,
    Err(source) => {
      let err = ExecuteError::Spawn {
        program: invocation.program.clone(),
        source,
      };
      info!(target = %target, error = %err, "toolchain did not run");
      return BuildOutcome::failure(target, err.to_string(), started.elapsed());
    }
  };

  if !output.success() {
    info!(target = %target, code = ?output.code, "toolchain failed");
    let diagnostic = diagnostic_text(&output);
    return BuildOutcome::failure(target, diagnostic, started.elapsed());
  }

  let artifact_path = request.artifact_path();
  match artifact_size(&artifact_path).await {
    Ok(size) => {
      info!(target = %target, size, "target built");
      BuildOutcome::success(target, artifact_path, size, started.elapsed())
    }
    Err(err) => {
      info!(target = %target, error = %err, "artifact check failed");
      BuildOutcome::failure(target, err.to_string(), started.elapsed())
    }
  }
}

/// Build every request, reporting progress as each target starts and finishes.
///
/// With `config.jobs <= 1` targets are built strictly in order. Otherwise up to
/// `jobs` builds run at once, capped at the number of requests. Either way exactly one outcome is returned per
/// request, in request order.
pub async fn execute_all(
  requests: Vec<BuildRequest>,
  toolchain: Arc<dyn Toolchain>,
  reporter: Arc<dyn Reporter>,
  config: &ExecuteConfig,
) -> Vec<BuildOutcome> {
  info!(targets = requests.len(), jobs = config.jobs, "starting matrix execution");

  if config.jobs <= 1 {
    let mut outcomes = Vec::with_capacity(requests.len());
    for request in &requests {
      reporter.target_started(request);
      let outcome = execute(request, toolchain.as_ref(), config).await;
      reporter.target_finished(&outcome);
      outcomes.push(outcome);
    }
    return outcomes;
  }

  let permits = config.jobs.min(requests.len()).min(Semaphore::MAX_PERMITS);
  let semaphore = Arc::new(Semaphore::new(permits));
  let mut join_set = JoinSet::new();

  for (index, request) in requests.iter().cloned().enumerate() {
    let toolchain = toolchain.clone();
    let reporter = reporter.clone();
    let semaphore = semaphore.clone();
    let config = config.clone();

    join_set.spawn(async move {
      // The semaphore is never closed; a failed acquire just runs unbounded.
      let _permit = semaphore.acquire().await.ok();
      reporter.target_started(&request);
      let outcome = execute(&request, toolchain.as_ref(), &config).await;
      reporter.target_finished(&outcome);
      (index, outcome)
    });
  }

  let mut slots: Vec<Option<BuildOutcome>> = vec![None; requests.len()];
  while let Some(joined) = join_set.join_next().await {
    match joined {
      Ok((index, outcome)) => slots[index] = Some(outcome),
      Err(e) => error!(error = %e, "build task panicked"),
    }
  }

  // A panicked task leaves its slot empty; it still gets exactly one outcome.
  slots
    .into_iter()
    .zip(requests)
    .map(|(slot, request)| {
      slot.unwrap_or_else(|| {
        let err = ExecuteError::TaskAborted(request.target.label());
        let outcome = BuildOutcome::failure(request.target, err.to_string(), std::time::Duration::ZERO);
        reporter.target_finished(&outcome);
        outcome
      })
    })
    .collect()
}

/// Size of a produced artifact, which must be a regular file.
async fn artifact_size(path: &std::path::Path) -> Result<u64, ExecuteError> {
  let metadata = tokio::fs::metadata(path)
    .await
    .map_err(|source| ExecuteError::ArtifactMissing {
      path: path.to_path_buf(),
      source,
    })?;
  if !metadata.is_file() {
    return Err(ExecuteError::ArtifactNotFile(path.to_path_buf()));
  }
  Ok(metadata.len())
}

/// Diagnostic text for a failed toolchain run.
///
/// Uses captured stderr; falls back to the exit status when stderr is empty so
/// a failure is never rendered without a cause.
fn diagnostic_text(output: &ToolchainOutput) -> String {
  let stderr = output.stderr.trim_end();
  if !stderr.is_empty() {
    return stderr.to_string();
  }
  match output.code {
    Some(code) => format!("toolchain exited with code {} and no error output", code),
    None => "toolchain was terminated by a signal".to_string(),
  }
}
