//! Toolchain invocation.
//!
//! The compiler is modeled as a capability: given a program, arguments and an
//! environment overlay, run it to completion and report the exit code and
//! captured stderr. [`CommandToolchain`] spawns a real subprocess; tests
//! substitute deterministic fakes.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

/// A fully specified toolchain call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
  pub program: String,
  pub args: Vec<String>,
  /// Merged on top of the inherited environment; these keys win on conflict.
  pub env: BTreeMap<String, String>,
  pub cwd: PathBuf,
}

impl Invocation {
  /// Render as a shell-like command line, quoting arguments with whitespace.
  pub fn command_line(&self) -> String {
    std::iter::once(self.program.as_str())
      .chain(self.args.iter().map(String::as_str))
      .map(|part| {
        if part.is_empty() || part.chars().any(char::is_whitespace) {
          format!("\"{}\"", part)
        } else {
          part.to_string()
        }
      })
      .collect::<Vec<_>>()
      .join(" ")
  }

  /// Value of the `-o` argument, if present.
  pub fn output_path(&self) -> Option<PathBuf> {
    let pos = self.args.iter().position(|a| a == "-o")?;
    self.args.get(pos + 1).map(PathBuf::from)
  }
}

/// What a finished toolchain process reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainOutput {
  /// `None` if the process was terminated by a signal.
  pub code: Option<i32>,
  pub stderr: String,
}

impl ToolchainOutput {
  pub fn success(&self) -> bool {
    self.code == Some(0)
  }
}

/// Runs a toolchain invocation to completion.
///
/// An `Err` means the process could not be run at all; a non-zero exit is
/// reported through [`ToolchainOutput::code`].
#[async_trait]
pub trait Toolchain: Send + Sync {
  async fn run(&self, invocation: &Invocation) -> std::io::Result<ToolchainOutput>;
}

/// Spawns the toolchain as a child process.
///
/// Unlike an isolated build shell the inherited environment is kept, so
/// `PATH`, `GOPATH`, `GOCACHE` and friends reach the compiler. The overlay is
/// applied on top.
#[derive(Debug, Default, Clone, Copy)]
pub struct CommandToolchain;

#[async_trait]
impl Toolchain for CommandToolchain {
  async fn run(&self, invocation: &Invocation) -> std::io::Result<ToolchainOutput> {
    let mut command = Command::new(&invocation.program);
    command
      .args(&invocation.args)
      .envs(&invocation.env)
      .current_dir(&invocation.cwd)
      .stdin(Stdio::null())
      .stdout(Stdio::piped())
      .stderr(Stdio::piped());

    debug!(program = %invocation.program, cwd = ?invocation.cwd, "spawning toolchain");

    let output = command.output().await?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.trim().is_empty() {
      debug!(stdout = %stdout.trim(), "toolchain stdout");
    }

    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    if !stderr.trim().is_empty() {
      debug!(stderr = %stderr.trim(), "toolchain stderr");
    }

    Ok(ToolchainOutput {
      code: output.status.code(),
      stderr,
    })
  }
}
