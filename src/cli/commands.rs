//! CLI command implementations.
//!
//! Contains the business logic for each CLI command.

// Allow certain patterns that improve readability in CLI output formatting
#![allow(clippy::format_push_string)]

use std::fmt::Write as FmtWrite;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::agent::config::AgentConfig;
use crate::agent::orchestrator::Orchestrator;
use crate::agent::prompt::PromptSet;
use crate::agent::response::QueryResponse;
use crate::agent::state::ERROR_KEY;
use crate::cli::output::OutputFormat;
use crate::cli::parser::{Cli, Commands};
use crate::core::validate_cookware;
use crate::error::{CommandError, Result};

/// Directory `init-prompts` writes to when none is given.
const DEFAULT_PROMPT_DIR: &str = "prompts";

/// Executes the CLI command and returns the output string.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);

    match &cli.command {
        Commands::Serve { host, port } => cmd_serve(host, *port),
        Commands::Query { text, prompt_dir } => {
            cmd_query(text, prompt_dir.as_deref(), cli.verbose, format)
        }
        Commands::Cookware => Ok(cmd_cookware(&AgentConfig::cookware_from_env(), format)),
        Commands::CheckCookware { items } => Ok(cmd_check_cookware(
            items,
            &AgentConfig::cookware_from_env(),
            format,
        )),
        Commands::InitPrompts { dir } => cmd_init_prompts(dir.as_deref(), format),
    }
}

/// Loads configuration and builds an orchestrator.
fn load_orchestrator(prompt_dir: Option<&Path>) -> Result<Orchestrator> {
    let mut builder = AgentConfig::builder();
    if let Some(dir) = prompt_dir {
        builder = builder.prompt_dir(dir);
    }
    dotenv::dotenv().ok();
    let config = builder.from_env().build().map_err(|e| {
        CommandError::ExecutionFailed(format!("Agent configuration error: {e}"))
    })?;

    Orchestrator::from_config(config).map_err(|e| {
        CommandError::ExecutionFailed(format!("Provider creation failed: {e}")).into()
    })
}

/// Creates a tokio runtime as the sync/async bridge.
fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new().map_err(|e| {
        CommandError::ExecutionFailed(format!("Failed to create async runtime: {e}")).into()
    })
}

fn cmd_serve(host: &str, port: u16) -> Result<String> {
    let orchestrator = Arc::new(load_orchestrator(None)?);
    let rt = runtime()?;

    rt.block_on(crate::server::serve(orchestrator, host, port))
        .map_err(|e| CommandError::ExecutionFailed(format!("HTTP server error: {e}")))?;

    Ok(String::new())
}

fn cmd_query(
    text: &str,
    prompt_dir: Option<&Path>,
    verbose: bool,
    format: OutputFormat,
) -> Result<String> {
    let orchestrator = load_orchestrator(prompt_dir)?;
    let debug = orchestrator.config().debug;
    let rt = runtime()?;

    let response = rt.block_on(orchestrator.process(text));

    match format {
        OutputFormat::Text => Ok(format_query_response(&response, verbose)),
        OutputFormat::Json => Ok(format.to_json(&response.with_debug(debug || verbose))),
    }
}

fn format_query_response(response: &QueryResponse, verbose: bool) -> String {
    let mut output = response.response.clone();
    output.push('\n');

    if verbose {
        let stages = response
            .debug_info
            .as_ref()
            .and_then(|d| d.get("stages"))
            .and_then(serde_json::Value::as_array)
            .map(|stages| {
                stages
                    .iter()
                    .filter_map(serde_json::Value::as_str)
                    .collect::<Vec<_>>()
                    .join(" → ")
            })
            .unwrap_or_default();
        let _ = write!(
            output,
            "\n---\nRelevant: {} | Stages: {}\n",
            if response.relevant { "yes" } else { "no" },
            if stages.is_empty() { "-" } else { stages.as_str() }
        );
        if let Some(error) = response
            .debug_info
            .as_ref()
            .and_then(|d| d.get(ERROR_KEY))
            .and_then(serde_json::Value::as_str)
        {
            let _ = writeln!(output, "Error: {error}");
        }
    }

    output
}

fn cmd_cookware(available: &[String], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = format!("Available cookware ({}):\n", available.len());
            for item in available {
                output.push_str(&format!("  {item}\n"));
            }
            output
        }
        OutputFormat::Json => format.to_json(&serde_json::json!({
            "available_cookware": available,
            "count": available.len(),
        })),
    }
}

fn cmd_check_cookware(items: &[String], available: &[String], format: OutputFormat) -> String {
    let validation = validate_cookware(items, available);

    match format {
        OutputFormat::Text => {
            let mut output = format!(
                "Can cook: {}\n",
                if validation.can_cook { "yes" } else { "no" }
            );
            if !validation.missing_tools.is_empty() {
                output.push_str(&format!("Missing: {}\n", validation.missing_tools.join(", ")));
            }
            output.push_str(&validation.explanation);
            output.push('\n');
            output
        }
        OutputFormat::Json => format.to_json(&validation),
    }
}

fn cmd_init_prompts(dir: Option<&Path>, format: OutputFormat) -> Result<String> {
    let target_dir = dir.map_or_else(|| PathBuf::from(DEFAULT_PROMPT_DIR), Path::to_path_buf);

    let written = PromptSet::write_defaults(&target_dir)?;

    match format {
        OutputFormat::Text => {
            if written.is_empty() {
                Ok(format!(
                    "All prompt templates already exist in: {}\n",
                    target_dir.display()
                ))
            } else {
                let mut output = format!(
                    "Wrote {} prompt template(s) to: {}\n",
                    written.len(),
                    target_dir.display()
                );
                for path in &written {
                    output.push_str(&format!(
                        "  {}\n",
                        path.file_name()
                            .and_then(|n| n.to_str())
                            .unwrap_or("unknown")
                    ));
                }
                output.push_str(
                    "\nEdit these files and set RECIPE_PROMPT_DIR to customize the assistant.\n",
                );
                Ok(output)
            }
        }
        OutputFormat::Json => {
            let written: Vec<String> = written
                .iter()
                .map(|p| p.to_string_lossy().into_owned())
                .collect();
            let json = serde_json::json!({
                "directory": target_dir.to_string_lossy(),
                "written": written,
                "count": written.len()
            });
            Ok(format.to_json(&json))
        }
    }
}
