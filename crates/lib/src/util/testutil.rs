//! Test utilities for crossbuild-lib.
//!
//! Deterministic stand-ins for the toolchain and the progress reporter, plus
//! cross-platform helpers for tests that spawn real shell commands.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::execute::{BuildOutcome, BuildRequest, Invocation, Toolchain, ToolchainOutput};
use crate::report::{AggregateReport, Reporter, RunContext};

/// A toolchain that never spawns anything.
///
/// Decides success per call from the `GOOS` overlay and, on success, writes a
/// fixed-size artifact to the `-o` path like a real compiler would.
pub struct FakeToolchain {
  fail_all: bool,
  fail_os: HashSet<String>,
  unavailable: bool,
  write_artifact: bool,
  stderr: Option<String>,
  calls: Mutex<Vec<Invocation>>,
}

impl FakeToolchain {
  pub const ARTIFACT_SIZE: u64 = 2048;

  fn new(fail_all: bool) -> Self {
    Self {
      fail_all,
      fail_os: HashSet::new(),
      unavailable: false,
      write_artifact: true,
      stderr: None,
      calls: Mutex::new(Vec::new()),
    }
  }

  /// Exits 0 for every target.
  pub fn succeeding() -> Self {
    Self::new(false)
  }

  /// Exits 1 for every target.
  pub fn failing() -> Self {
    Self::new(true)
  }

  /// Cannot be spawned at all.
  pub fn unavailable() -> Self {
    Self {
      unavailable: true,
      ..Self::new(false)
    }
  }

  /// Exits 1 for targets whose OS is `os`.
  pub fn failing_for(mut self, os: &str) -> Self {
    self.fail_os.insert(os.to_string());
    self
  }

  /// Exits 0 without writing the artifact.
  pub fn without_artifact(mut self) -> Self {
    self.write_artifact = false;
    self
  }

  /// Stderr emitted on failure instead of the default message.
  pub fn with_stderr(mut self, stderr: &str) -> Self {
    self.stderr = Some(stderr.to_string());
    self
  }

  /// Every invocation seen so far, in call order.
  pub fn calls(&self) -> Vec<Invocation> {
    self.calls.lock().unwrap().clone()
  }
}

#[async_trait]
impl Toolchain for FakeToolchain {
  async fn run(&self, invocation: &Invocation) -> std::io::Result<ToolchainOutput> {
    self.calls.lock().unwrap().push(invocation.clone());

    if self.unavailable {
      return Err(std::io::Error::new(std::io::ErrorKind::NotFound, "program not found"));
    }

    let os = invocation.env.get("GOOS").cloned().unwrap_or_default();
    let arch = invocation.env.get("GOARCH").cloned().unwrap_or_default();

    if self.fail_all || self.fail_os.contains(&os) {
      let stderr = self
        .stderr
        .clone()
        .unwrap_or_else(|| format!("cannot build for {}/{}\n", os, arch));
      return Ok(ToolchainOutput { code: Some(1), stderr });
    }

    if let Some(path) = invocation.output_path().filter(|_| self.write_artifact) {
      tokio::fs::write(&path, vec![0u8; Self::ARTIFACT_SIZE as usize]).await?;
    }

    Ok(ToolchainOutput {
      code: Some(0),
      stderr: String::new(),
    })
  }
}

/// Records progress hooks as short strings.
#[derive(Default)]
pub struct RecordingReporter {
  events: Mutex<Vec<String>>,
}

impl RecordingReporter {
  pub fn events(&self) -> Vec<String> {
    self.events.lock().unwrap().clone()
  }

  fn push(&self, event: String) {
    self.events.lock().unwrap().push(event);
  }
}

impl Reporter for RecordingReporter {
  fn run_started(&self, context: &RunContext) {
    self.push(format!("run {} {}", context.project_name, context.target_count));
  }

  fn target_started(&self, request: &BuildRequest) {
    self.push(format!("start {}", request.target.label()));
  }

  fn target_finished(&self, outcome: &BuildOutcome) {
    let status = if outcome.is_success() { "success" } else { "failure" };
    self.push(format!("finish {} {}", outcome.target.label(), status));
  }

  fn run_finished(&self, report: &AggregateReport, _outcomes: &[BuildOutcome]) {
    self.push(format!("done {} {}", report.success_count, report.failure_count));
  }
}

/// Returns the shell command and args to execute a shell script.
#[cfg(unix)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("/bin/sh", vec!["-c".to_string(), script.to_string()])
}

#[cfg(windows)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("cmd.exe", vec!["/C".to_string(), script.to_string()])
}
