//! Types for per-target build execution.
//!
//! This module defines the outcome record produced for every target, the
//! errors that are folded into failed outcomes, and execution settings.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::matrix::TargetDescriptor;

/// Errors that can occur while building a single target.
///
/// These never escape the executor: each one is rendered into the
/// diagnostic text of a failed [`BuildOutcome`].
#[derive(Debug, Error)]
pub enum ExecuteError {
  /// The toolchain process could not be started.
  #[error("failed to run toolchain '{program}': {source}")]
  Spawn {
    program: String,
    #[source]
    source: std::io::Error,
  },

  /// The toolchain exited successfully but the artifact could not be inspected.
  #[error("toolchain reported success but artifact {path} is unreadable: {source}")]
  ArtifactMissing {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// The path exists but is not a regular file.
  #[error("artifact {0} is not a regular file")]
  ArtifactNotFile(PathBuf),

  /// The build task ended without producing an outcome.
  #[error("build task aborted: {0}")]
  TaskAborted(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildStatus {
  Success,
  Failure,
}

/// Record of one build attempt. Created once per target and never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct BuildOutcome {
  pub target: TargetDescriptor,
  pub status: BuildStatus,
  /// Set only on success.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub artifact_path: Option<PathBuf>,
  /// Set only on success.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub artifact_size_bytes: Option<u64>,
  /// Captured toolchain stderr, or the error that prevented the build. Set only on failure.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub diagnostic_text: Option<String>,
  #[serde(rename = "elapsed_ms", serialize_with = "serialize_millis")]
  pub elapsed: Duration,
}

impl BuildOutcome {
  pub fn success(target: TargetDescriptor, artifact_path: PathBuf, size: u64, elapsed: Duration) -> Self {
    Self {
      target,
      status: BuildStatus::Success,
      artifact_path: Some(artifact_path),
      artifact_size_bytes: Some(size),
      diagnostic_text: None,
      elapsed,
    }
  }

  pub fn failure(target: TargetDescriptor, diagnostic: impl Into<String>, elapsed: Duration) -> Self {
    Self {
      target,
      status: BuildStatus::Failure,
      artifact_path: None,
      artifact_size_bytes: None,
      diagnostic_text: Some(diagnostic.into()),
      elapsed,
    }
  }

  pub fn is_success(&self) -> bool {
    self.status == BuildStatus::Success
  }

  /// File name of the produced artifact, if any.
  pub fn artifact_name(&self) -> Option<String> {
    self
      .artifact_path
      .as_ref()
      .and_then(|p| p.file_name())
      .map(|n| n.to_string_lossy().to_string())
  }
}

fn serialize_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
  serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
}

/// Configuration for matrix execution.
#[derive(Debug, Clone)]
pub struct ExecuteConfig {
  /// Maximum number of targets built at once. `1` builds strictly in order.
  pub jobs: usize,

  /// Working directory of the toolchain process (the project being built).
  pub project_dir: PathBuf,
}

impl Default for ExecuteConfig {
  fn default() -> Self {
    Self {
      jobs: 1,
      project_dir: PathBuf::from("."),
    }
  }
}
