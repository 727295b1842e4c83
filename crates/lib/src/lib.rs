//! crossbuild-lib: Core types and logic for crossbuild
//!
//! This crate builds one project for a fixed matrix of target platforms:
//! - `matrix`: the ordered, validated list of targets
//! - `execute`: per-target toolchain invocation and outcome classification
//! - `report`: aggregation of outcomes into the run's final status
//! - `run`: the driver wiring the three together

pub mod config;
pub mod consts;
pub mod execute;
pub mod matrix;
pub mod report;
pub mod run;

#[cfg(test)]
mod util;

pub use config::{Config, ConfigError};
pub use run::{RunError, RunOptions, RunResult, run};
