//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::server::{DEFAULT_HOST, DEFAULT_PORT};

/// recipe-rs: a cooking assistant that routes questions through an LLM.
///
/// Answers recipe and cooking-technique questions, checks the cookware you
/// have on hand, and politely refuses anything unrelated to food.
#[derive(Parser, Debug)]
#[command(name = "recipe-rs")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API.
    ///
    /// Serves `POST /api/query` and `GET /health` until interrupted.
    #[command(after_help = r#"Examples:
  recipe-rs serve                       # Listen on 0.0.0.0:8000
  recipe-rs serve --host 127.0.0.1 -p 9000
"#)]
    Serve {
        /// Host to bind.
        #[arg(long, default_value = DEFAULT_HOST, env = "RECIPE_HOST")]
        host: String,

        /// Port to bind.
        #[arg(short, long, default_value_t = DEFAULT_PORT, env = "RECIPE_PORT")]
        port: u16,
    },

    /// Ask the assistant a single question.
    #[command(after_help = r#"Examples:
  recipe-rs query "How do I make chicken soup?"
  recipe-rs --format json query "Can I sear steak in a frying pan?"
"#)]
    Query {
        /// The question to ask.
        text: String,

        /// Override the prompt template directory.
        #[arg(long)]
        prompt_dir: Option<PathBuf>,
    },

    /// List the cookware configured as available.
    Cookware,

    /// Check whether the listed items are all available.
    #[command(name = "check-cookware")]
    #[command(after_help = r#"Examples:
  recipe-rs check-cookware Spatula Whisk
  recipe-rs --format json check-cookware Spatula Blender
"#)]
    CheckCookware {
        /// Required cookware items (exact, case-sensitive names).
        #[arg(required = true)]
        items: Vec<String>,
    },

    /// Write the default prompt templates for customization.
    #[command(name = "init-prompts")]
    InitPrompts {
        /// Target directory (defaults to `./prompts`).
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
}
