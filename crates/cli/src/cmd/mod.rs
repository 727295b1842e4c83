mod build;
mod targets;

pub use build::{BuildArgs, cmd_build};
pub use targets::cmd_targets;
