//! CLI layer: argument definitions, command execution and output formatting.

pub mod commands;
pub mod output;
pub mod run;

pub use commands::Cli;
pub use run::{exit_code, run};
