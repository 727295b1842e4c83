//! Configuration layering tests.

use predicates::prelude::*;

use super::common::{TestEnv, file_names};

#[test]
fn config_file_renames_project() {
  let env = TestEnv::new();
  env.write_config("project_name = \"searchd\"\n");

  env.build_cmd("v0.9.0").assert().success();

  assert_eq!(
    file_names(&env.path("bin")),
    vec!["searchd_linux_amd64_v0.9.0", "searchd_windows_amd64_v0.9.0.exe"]
  );
}

#[test]
fn config_file_sets_version_symbol() {
  let env = TestEnv::new();
  env.write_config("version_symbol = \"example.com/searchd/internal/build.Version\"\n");

  env.build_cmd("v1").assert().success();

  let content = std::fs::read_to_string(env.path("bin/cpp_search_linux_amd64_v1")).unwrap();
  assert!(content.contains("-X example.com/searchd/internal/build.Version=v1"), "{}", content);
}

#[test]
fn explicit_config_path_is_used() {
  let env = TestEnv::new();
  let config = env.path("matrix.toml");
  std::fs::write(&config, "[[targets]]\nos = \"darwin\"\narch = \"arm64\"\n").unwrap();

  env.build_cmd("v1").arg("--config").arg(&config).assert().success();

  assert_eq!(file_names(&env.path("bin")), vec!["cpp_search_darwin_arm64_v1"]);
}

#[test]
fn missing_explicit_config_is_fatal() {
  let env = TestEnv::new();

  env
    .build_cmd("v1")
    .arg("--config")
    .arg(env.path("nope.toml"))
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to load configuration"));

  assert!(!env.path("bin").exists());
}

#[test]
fn duplicate_targets_are_rejected_before_building() {
  let env = TestEnv::new();
  env.write_config(
    r#"
[[targets]]
os = "linux"
arch = "amd64"

[[targets]]
os = "linux"
arch = "amd64"
ext = ".bin"
"#,
  );

  env
    .build_cmd("v1")
    .assert()
    .failure()
    .stderr(predicate::str::contains("duplicate target in matrix: linux/amd64"));

  assert!(!env.path("bin").exists());
}

#[test]
fn toolchain_flag_overrides_environment() {
  let env = TestEnv::new();

  // CROSSBUILD_TOOLCHAIN points at the working fake; the flag must win.
  env
    .build_cmd("v1")
    .arg("--toolchain")
    .arg("crossbuild-definitely-missing-go")
    .assert()
    .code(1)
    .stderr(predicate::str::contains("crossbuild-definitely-missing-go"));
}
