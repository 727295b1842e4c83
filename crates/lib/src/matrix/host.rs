//! Host platform detection in toolchain vocabulary.

/// Maps the running operating system to its toolchain name.
///
/// Returns `None` if the OS has no known toolchain name.
pub fn host_os() -> Option<&'static str> {
  os_name(std::env::consts::OS)
}

/// Maps the running CPU architecture to its toolchain name.
///
/// Returns `None` if the architecture has no known toolchain name.
pub fn host_arch() -> Option<&'static str> {
  arch_name(std::env::consts::ARCH)
}

fn os_name(rust_os: &str) -> Option<&'static str> {
  match rust_os {
    "linux" => Some("linux"),
    "macos" => Some("darwin"),
    "windows" => Some("windows"),
    "freebsd" => Some("freebsd"),
    "netbsd" => Some("netbsd"),
    "openbsd" => Some("openbsd"),
    "android" => Some("android"),
    _ => None,
  }
}

fn arch_name(rust_arch: &str) -> Option<&'static str> {
  match rust_arch {
    "x86_64" => Some("amd64"),
    "x86" => Some("386"),
    "aarch64" => Some("arm64"),
    "arm" => Some("arm"),
    "riscv64" => Some("riscv64"),
    "powerpc64" => Some("ppc64"),
    "s390x" => Some("s390x"),
    _ => None,
  }
}
