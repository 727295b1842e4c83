//! Run configuration.
//!
//! Settings are layered: built-in defaults, then an optional `crossbuild.toml`,
//! then environment variables. CLI flags are applied last by the caller.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::consts::{
  CONFIG_FILE_NAME, DEFAULT_PROJECT_NAME, DEFAULT_TOOLCHAIN, DEFAULT_VERSION_SYMBOL, TOOLCHAIN_ENV_VAR,
};
use crate::matrix::{MatrixError, TargetDescriptor, TargetMatrix};

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse config {path}: {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: toml::de::Error,
  },

  /// TOML text parsed directly, with no file behind it.
  #[error("failed to parse config: {0}")]
  ParseText(#[source] toml::de::Error),

  #[error("invalid target matrix: {0}")]
  Matrix(#[from] MatrixError),
}

/// On-disk shape of `crossbuild.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
  project_name: Option<String>,
  toolchain: Option<String>,
  version_symbol: Option<String>,
  targets: Option<Vec<TargetDescriptor>>,
}

/// Effective settings for one run.
#[derive(Debug, Clone)]
pub struct Config {
  /// First component of every artifact filename.
  pub project_name: String,
  /// Program invoked to build each target.
  pub toolchain: String,
  /// Symbol the version string is written into via `-X`.
  pub version_symbol: String,
  pub matrix: TargetMatrix,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      project_name: DEFAULT_PROJECT_NAME.to_string(),
      toolchain: DEFAULT_TOOLCHAIN.to_string(),
      version_symbol: DEFAULT_VERSION_SYMBOL.to_string(),
      matrix: TargetMatrix::default(),
    }
  }
}

impl Config {
  /// Load the effective configuration for a project.
  ///
  /// If `explicit` is given the file must exist. Otherwise `crossbuild.toml`
  /// in `project_dir` is used when present and defaults apply when it is not.
  /// Environment overrides are applied on top.
  pub fn load(project_dir: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
    let mut config = match explicit {
      Some(path) => Self::from_file(path)?,
      None => {
        let implicit = project_dir.join(CONFIG_FILE_NAME);
        if implicit.is_file() {
          Self::from_file(&implicit)?
        } else {
          debug!(path = %implicit.display(), "no config file, using defaults");
          Self::default()
        }
      }
    };
    config.apply_env();
    Ok(config)
  }

  /// Parse a config file, filling omitted keys with defaults.
  pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    let config = Self::from_toml(&content).map_err(|e| match e {
      ConfigError::ParseText(source) => ConfigError::Parse {
        path: path.to_path_buf(),
        source,
      },
      other => other,
    })?;
    debug!(path = %path.display(), targets = config.matrix.len(), "loaded config file");
    Ok(config)
  }

  /// Parse config from TOML text.
  pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
    let file: ConfigFile = toml::from_str(content).map_err(ConfigError::ParseText)?;

    let defaults = Self::default();
    let matrix = match file.targets {
      Some(targets) => TargetMatrix::new(targets)?,
      None => defaults.matrix,
    };

    Ok(Self {
      project_name: file.project_name.unwrap_or(defaults.project_name),
      toolchain: file.toolchain.unwrap_or(defaults.toolchain),
      version_symbol: file.version_symbol.unwrap_or(defaults.version_symbol),
      matrix,
    })
  }

  /// Apply `CROSSBUILD_TOOLCHAIN` if set and non-empty.
  pub fn apply_env(&mut self) {
    if let Some(toolchain) = std::env::var(TOOLCHAIN_ENV_VAR).ok().filter(|t| !t.is_empty()) {
      debug!(toolchain = %toolchain, "toolchain overridden from environment");
      self.toolchain = toolchain;
    }
  }
}
