//! CLI layer for recipe-rs.
//!
//! Provides the command-line interface using clap, with commands for
//! serving the HTTP API, asking one-off questions, and inspecting the
//! cookware configuration.

pub mod commands;
pub mod output;
pub mod parser;

pub use commands::execute;
pub use output::OutputFormat;
pub use parser::{Cli, Commands};
