/// Config file looked up in the project directory when none is given.
pub const CONFIG_FILE_NAME: &str = "crossbuild.toml";

/// Overrides the toolchain program.
pub const TOOLCHAIN_ENV_VAR: &str = "CROSSBUILD_TOOLCHAIN";

pub const DEFAULT_PROJECT_NAME: &str = "cpp_search";
pub const DEFAULT_TOOLCHAIN: &str = "go";
pub const DEFAULT_OUTPUT_DIR: &str = "bin";

/// Program-level symbol the version string is embedded into.
pub const DEFAULT_VERSION_SYMBOL: &str = "main.Version";

/// Toolchain variable selecting the target operating system.
pub const ENV_TARGET_OS: &str = "GOOS";
/// Toolchain variable selecting the target architecture.
pub const ENV_TARGET_ARCH: &str = "GOARCH";
/// Toolchain variable controlling C interop. Set to `0` to force static linking.
pub const ENV_CGO_ENABLED: &str = "CGO_ENABLED";

pub const BYTES_PER_MIB: u64 = 1024 * 1024;
