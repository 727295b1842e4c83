//! Implementation of the `crossbuild targets` command.
//!
//! Lists the effective target matrix and marks the entry matching this machine.

use std::path::Path;

use anyhow::{Context, Result};

use crossbuild_lib::Config;
use crossbuild_lib::execute::artifact_name;

use crate::output::{self, print_info, print_json, print_stat};

pub fn cmd_targets(project_dir: &Path, config_path: Option<&Path>, json: bool) -> Result<()> {
  let config = Config::load(project_dir, config_path).context("Failed to load configuration")?;
  let host = config.matrix.host_target();

  if json {
    let targets: Vec<_> = config
      .matrix
      .iter()
      .map(|t| {
        serde_json::json!({
          "os": t.operating_system,
          "arch": t.architecture,
          "ext": t.artifact_extension,
          "host": host == Some(t),
        })
      })
      .collect();
    return print_json(&serde_json::json!({
      "project_name": config.project_name,
      "toolchain": config.toolchain,
      "targets": targets,
    }));
  }

  print_info(&format!("Targets for {}", config.project_name));
  print_stat("Toolchain", &config.toolchain);
  print_stat("Count", &config.matrix.len().to_string());

  if config.matrix.is_empty() {
    println!();
    println!("No targets configured.");
    return Ok(());
  }

  println!();
  for target in &config.matrix {
    let marker = if host == Some(target) { " (host)" } else { "" };
    println!(
      "  {} {}{}  {}",
      output::symbols::INFO,
      target,
      marker,
      artifact_name(&config.project_name, target, "<version>")
    );
  }

  Ok(())
}
