use std::fmt;

use serde::{Deserialize, Serialize};

use super::host;

/// One entry of the target matrix.
///
/// Names follow the toolchain's own vocabulary (`linux`, `windows`, `darwin`,
/// `amd64`, `arm64`, ...) since they are passed through verbatim as target
/// selection variables. Identity is the `(operating_system, architecture)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetDescriptor {
  #[serde(rename = "os")]
  pub operating_system: String,
  #[serde(rename = "arch")]
  pub architecture: String,
  /// Appended to the artifact filename with no separator, e.g. `.exe`.
  #[serde(rename = "ext", default)]
  pub artifact_extension: String,
}

impl TargetDescriptor {
  pub fn new(
    operating_system: impl Into<String>,
    architecture: impl Into<String>,
    artifact_extension: impl Into<String>,
  ) -> Self {
    Self {
      operating_system: operating_system.into(),
      architecture: architecture.into(),
      artifact_extension: artifact_extension.into(),
    }
  }

  /// Describe the running machine as a target.
  ///
  /// Returns `None` if the OS or architecture has no toolchain name.
  pub fn host() -> Option<Self> {
    let os = host::host_os()?;
    let arch = host::host_arch()?;
    let ext = if os == "windows" { ".exe" } else { "" };
    Some(Self::new(os, arch, ext))
  }

  /// The identity pair of this target.
  pub fn key(&self) -> (&str, &str) {
    (&self.operating_system, &self.architecture)
  }

  /// Returns the `os/arch` label used in progress output (e.g., "linux/amd64").
  pub fn label(&self) -> String {
    format!("{}/{}", self.operating_system, self.architecture)
  }

  /// Returns true if this target names the same platform as `other`.
  pub fn same_platform(&self, other: &TargetDescriptor) -> bool {
    self.key() == other.key()
  }
}

impl fmt::Display for TargetDescriptor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.label())
  }
}
