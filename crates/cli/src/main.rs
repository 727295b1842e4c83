mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crossbuild_lib::consts::DEFAULT_OUTPUT_DIR;

use cmd::{BuildArgs, cmd_build, cmd_targets};

/// crossbuild - Build one project for a matrix of target platforms
#[derive(Parser)]
#[command(name = "crossbuild")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose (debug) logging
  #[arg(long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Build every target in the matrix
  Build {
    /// Version string embedded in the binaries and their names, e.g. v1.0.0
    #[arg(short = 'v', long = "version")]
    version: String,

    /// Output directory for artifacts
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// Config file (default: crossbuild.toml in the project directory, if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Project directory the toolchain runs in
    #[arg(short = 'C', long = "project-dir", default_value = ".")]
    project_dir: PathBuf,

    /// Toolchain program, overriding config and environment
    #[arg(long)]
    toolchain: Option<String>,

    /// Number of targets to build at once
    #[arg(short, long, default_value_t = 1)]
    jobs: usize,

    /// Print outcomes and the report as JSON
    #[arg(long)]
    json: bool,
  },

  /// List the target matrix
  Targets {
    /// Config file (default: crossbuild.toml in the project directory, if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Project directory to look for crossbuild.toml in
    #[arg(short = 'C', long = "project-dir", default_value = ".")]
    project_dir: PathBuf,

    /// Print as JSON
    #[arg(long)]
    json: bool,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  // Logs go to stderr so they never mix with the report or JSON on stdout
  let default_level = if cli.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  match cli.command {
    Commands::Build {
      version,
      output,
      config,
      project_dir,
      toolchain,
      jobs,
      json,
    } => {
      let code = cmd_build(BuildArgs {
        version,
        output,
        config,
        project_dir,
        toolchain,
        jobs,
        json,
      })?;
      if code != 0 {
        std::process::exit(code);
      }
      Ok(())
    }
    Commands::Targets {
      config,
      project_dir,
      json,
    } => cmd_targets(&project_dir, config.as_deref(), json),
  }
}
