mod build;
mod init;
mod plan;

pub use build::{BuildArgs, cmd_build};
pub use init::cmd_init;
pub use plan::cmd_plan;
