//! CLI integration tests for crossbuild.
//!
//! These drive the real binary against a fake toolchain shell script, so they
//! only run on Unix.

#![cfg(unix)]

mod common;
mod config_tests;
