//! Implementation of the `crossbuild build` command.
//!
//! This command builds the project once per target in the matrix and exits
//! non-zero if any target failed.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crossbuild_lib::execute::{BuildOutcome, CommandToolchain, ExecuteConfig};
use crossbuild_lib::report::{AggregateReport, NoopReporter, Reporter};
use crossbuild_lib::{Config, RunOptions, run};

use crate::output::{ConsoleReporter, print_json};

pub struct BuildArgs {
  pub version: String,
  pub output: PathBuf,
  pub config: Option<PathBuf>,
  pub project_dir: PathBuf,
  pub toolchain: Option<String>,
  pub jobs: usize,
  pub json: bool,
}

#[derive(Serialize)]
struct BuildSummary<'a> {
  report: &'a AggregateReport,
  outcomes: &'a [BuildOutcome],
}

/// Execute the build command.
///
/// Loads the target matrix, creates the output directory, builds every target
/// and prints the report. Returns the process exit status: `0` if every target
/// succeeded, `1` otherwise.
pub fn cmd_build(args: BuildArgs) -> Result<i32> {
  let mut config = Config::load(&args.project_dir, args.config.as_deref()).context("Failed to load configuration")?;
  if let Some(toolchain) = args.toolchain {
    config.toolchain = toolchain;
  }

  let options = RunOptions {
    version: args.version,
    output_dir: args.output,
    execute: ExecuteConfig {
      jobs: args.jobs.max(1),
      project_dir: args.project_dir,
    },
  };

  let reporter: Arc<dyn Reporter> = if args.json {
    Arc::new(NoopReporter)
  } else {
    Arc::new(ConsoleReporter::default())
  };

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let result = rt
    .block_on(run(&config, &options, Arc::new(CommandToolchain), reporter))
    .context("Build failed")?;

  if args.json {
    print_json(&BuildSummary {
      report: &result.report,
      outcomes: &result.outcomes,
    })?;
  }

  info!(exit_code = result.report.exit_code(), "build command finished");

  Ok(result.report.exit_code())
}
