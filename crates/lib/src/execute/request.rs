//! Per-target build requests.
//!
//! A [`BuildRequest`] turns a target plus the run settings into the exact
//! artifact name, environment overlay and toolchain arguments for one build.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::consts::{ENV_CGO_ENABLED, ENV_TARGET_ARCH, ENV_TARGET_OS};
use crate::matrix::TargetDescriptor;

use super::toolchain::Invocation;

/// Compute the artifact filename for a target.
///
/// The format is `<project>_<os>_<arch>_<version><ext>`. Downstream tooling
/// identifies artifacts by this pattern.
pub fn artifact_name(project_name: &str, target: &TargetDescriptor, version: &str) -> String {
  format!(
    "{}_{}_{}_{}{}",
    project_name, target.operating_system, target.architecture, version, target.artifact_extension
  )
}

/// Everything needed to build one target. Lives for a single build.
#[derive(Debug, Clone)]
pub struct BuildRequest {
  pub target: TargetDescriptor,
  /// Embedded verbatim; not validated.
  pub version: String,
  pub output_dir: PathBuf,
  pub project_name: String,
  /// Program to invoke, e.g. `go`.
  pub toolchain: String,
  /// Symbol receiving the version, e.g. `main.Version`.
  pub version_symbol: String,
}

impl BuildRequest {
  pub fn artifact_name(&self) -> String {
    artifact_name(&self.project_name, &self.target, &self.version)
  }

  pub fn artifact_path(&self) -> PathBuf {
    self.output_dir.join(self.artifact_name())
  }

  /// Linker flags: strip symbol and debug tables, embed the version.
  pub fn ldflags(&self) -> String {
    format!("-s -w -X {}={}", self.version_symbol, self.version)
  }

  /// Target selection variables, with C interop disabled for a static binary.
  pub fn env_overlay(&self) -> BTreeMap<String, String> {
    BTreeMap::from([
      (ENV_TARGET_OS.to_string(), self.target.operating_system.clone()),
      (ENV_TARGET_ARCH.to_string(), self.target.architecture.clone()),
      (ENV_CGO_ENABLED.to_string(), "0".to_string()),
    ])
  }

  /// Toolchain arguments: `build -ldflags <flags> -o <path> .`
  pub fn args(&self) -> Vec<String> {
    vec![
      "build".to_string(),
      "-ldflags".to_string(),
      self.ldflags(),
      "-o".to_string(),
      self.artifact_path().to_string_lossy().to_string(),
      ".".to_string(),
    ]
  }

  /// The subprocess to run, with the toolchain working in `project_dir`.
  pub fn invocation(&self, project_dir: &Path) -> Invocation {
    Invocation {
      program: self.toolchain.clone(),
      args: self.args(),
      env: self.env_overlay(),
      cwd: project_dir.to_path_buf(),
    }
  }

  /// Shell-like rendering of the command for progress output.
  pub fn command_line(&self) -> String {
    self.invocation(Path::new(".")).command_line()
  }
}
