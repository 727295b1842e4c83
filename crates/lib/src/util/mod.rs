//! Shared test helpers: fake toolchains, recording reporters and shell command builders.

pub mod testutil;
