//! CLI command handlers.

mod describe;
mod run;
mod verify;

pub use describe::run_describe;
pub use run::{run_operation, RunArgs};
pub use verify::run_verify;
