//! Shared test helpers for CLI integration tests.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// A stand-in for `go build`.
///
/// Writes its arguments and target variables into the `-o` file and exits 0,
/// unless `$GOOS` appears in `$FAKE_FAIL_OS`, in which case it prints a
/// compiler-style error to stderr and exits 1.
#[cfg(unix)]
const FAKE_TOOLCHAIN: &str = r#"#!/bin/sh
args="$*"
out=""
while [ $# -gt 0 ]; do
  if [ "$1" = "-o" ]; then
    out="$2"
    shift
  fi
  shift
done
case " $FAKE_FAIL_OS " in
  *" $GOOS "*)
    echo "cannot build for $GOOS/$GOARCH: undefined: syscall.Foo" >&2
    exit 1
    ;;
esac
if [ "$CGO_ENABLED" != "0" ]; then
  echo "cgo was not disabled" >&2
  exit 2
fi
printf '%s\nGOOS=%s GOARCH=%s\n' "$args" "$GOOS" "$GOARCH" > "$out"
"#;

/// Isolated test environment.
///
/// Each test gets its own temporary directory holding the project directory,
/// the fake toolchain and any output directories.
pub struct TestEnv {
  pub temp: TempDir,
  pub toolchain: PathBuf,
}

impl TestEnv {
  #[cfg(unix)]
  pub fn new() -> Self {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    std::fs::create_dir_all(temp.path().join("project")).unwrap();

    let toolchain = temp.path().join("fake-go");
    std::fs::write(&toolchain, FAKE_TOOLCHAIN).unwrap();
    std::fs::set_permissions(&toolchain, std::fs::Permissions::from_mode(0o755)).unwrap();

    Self { temp, toolchain }
  }

  /// Directory the toolchain runs in.
  pub fn project_dir(&self) -> PathBuf {
    self.temp.path().join("project")
  }

  /// Path under the temp directory.
  pub fn path(&self, relative: &str) -> PathBuf {
    self.temp.path().join(relative)
  }

  /// Write `crossbuild.toml` into the project directory.
  pub fn write_config(&self, content: &str) {
    std::fs::write(self.project_dir().join("crossbuild.toml"), content).unwrap();
  }

  /// A `crossbuild build` command wired to the fake toolchain, run from the temp dir.
  pub fn build_cmd(&self, version: &str) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("crossbuild");
    cmd.current_dir(self.temp.path());
    cmd.env_remove("RUST_LOG");
    cmd.env_remove("FAKE_FAIL_OS");
    cmd.env("CROSSBUILD_TOOLCHAIN", &self.toolchain);
    cmd.arg("build").arg("--version").arg(version);
    cmd.arg("-C").arg(self.project_dir());
    cmd
  }
}

/// Sorted file names in a directory.
pub fn file_names(dir: &Path) -> Vec<String> {
  let mut names: Vec<String> = std::fs::read_dir(dir)
    .unwrap()
    .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
    .collect();
  names.sort();
  names
}
