//! CLI argument parsing and process setup

mod args;
mod logging;

pub use args::Args;
pub use logging::init_logging;
