//! Target matrix.
//!
//! The matrix is the ordered, read-only list of platforms a project is built
//! for. It is fixed when the run starts: built from defaults or a config file,
//! validated once, and only iterated afterwards.

pub mod host;
pub mod target;

use std::collections::HashSet;

use thiserror::Error;

pub use target::TargetDescriptor;

/// Errors raised while validating a target matrix.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatrixError {
  /// Two entries name the same platform and would produce colliding artifacts.
  #[error("duplicate target in matrix: {os}/{arch}")]
  DuplicateTarget { os: String, arch: String },

  /// An entry has an empty OS or architecture name.
  #[error("target at index {index} has an empty {field}")]
  EmptyField { index: usize, field: &'static str },
}

/// Validated, ordered sequence of targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetMatrix {
  targets: Vec<TargetDescriptor>,
}

impl TargetMatrix {
  /// Build a matrix, rejecting duplicate `(os, arch)` pairs and empty names.
  pub fn new(targets: Vec<TargetDescriptor>) -> Result<Self, MatrixError> {
    let mut seen = HashSet::new();
    for (index, target) in targets.iter().enumerate() {
      if target.operating_system.is_empty() {
        return Err(MatrixError::EmptyField { index, field: "os" });
      }
      if target.architecture.is_empty() {
        return Err(MatrixError::EmptyField { index, field: "arch" });
      }
      if !seen.insert(target.key()) {
        return Err(MatrixError::DuplicateTarget {
          os: target.operating_system.clone(),
          arch: target.architecture.clone(),
        });
      }
    }
    Ok(Self { targets })
  }

  /// A matrix with no targets. Running it reports zero successes and zero failures.
  pub fn empty() -> Self {
    Self { targets: Vec::new() }
  }

  pub fn targets(&self) -> &[TargetDescriptor] {
    &self.targets
  }

  pub fn iter(&self) -> std::slice::Iter<'_, TargetDescriptor> {
    self.targets.iter()
  }

  pub fn len(&self) -> usize {
    self.targets.len()
  }

  pub fn is_empty(&self) -> bool {
    self.targets.is_empty()
  }

  /// Returns the entry matching the running machine, if the matrix has one.
  pub fn host_target(&self) -> Option<&TargetDescriptor> {
    let host = TargetDescriptor::host()?;
    self.targets.iter().find(|t| t.same_platform(&host))
  }
}

impl Default for TargetMatrix {
  /// The reference target set: Windows and Linux on amd64.
  fn default() -> Self {
    Self {
      targets: default_targets(),
    }
  }
}

impl<'a> IntoIterator for &'a TargetMatrix {
  type Item = &'a TargetDescriptor;
  type IntoIter = std::slice::Iter<'a, TargetDescriptor>;

  fn into_iter(self) -> Self::IntoIter {
    self.targets.iter()
  }
}

/// The reference target set used when no config declares one.
pub fn default_targets() -> Vec<TargetDescriptor> {
  vec![
    TargetDescriptor::new("windows", "amd64", ".exe"),
    TargetDescriptor::new("linux", "amd64", ""),
  ]
}
