//! CLI host for the Celum Mediabank node.

mod commands;
mod host;

use anyhow::Result;
use celum_core::config;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{run_describe, run_operation, run_verify, RunArgs};

#[derive(Debug, Parser)]
#[command(name = "celum")]
#[command(about = "Run Celum Mediabank node operations from the shell", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Run one operation over one or more items.
    Run {
        /// Operation name (e.g. getAsset, uploadBinary).
        operation: String,

        /// Parameters as JSON: an object for one item or an array of objects.
        #[arg(long, conflicts_with = "params_file")]
        params: Option<String>,

        /// Read the parameters JSON from a file.
        #[arg(long, value_name = "PATH")]
        params_file: Option<PathBuf>,

        /// Attach a file as binary property NAME to every item.
        #[arg(long = "binary", value_name = "NAME=PATH", value_parser = parse_binary_spec)]
        binaries: Vec<(String, PathBuf)>,

        /// Record per-item errors in the output instead of aborting.
        #[arg(long)]
        continue_on_fail: bool,
    },

    /// Print the node description (operations and fields) as JSON.
    Describe,

    /// Check the configured credentials against the API.
    Verify,
}

/// Parse `NAME=PATH`.
fn parse_binary_spec(s: &str) -> std::result::Result<(String, PathBuf), String> {
    match s.split_once('=') {
        Some((name, path)) if !name.is_empty() && !path.is_empty() => {
            Ok((name.to_string(), PathBuf::from(path)))
        }
        _ => Err(format!("expected NAME=PATH, got \"{s}\"")),
    }
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!(
            has_credentials = cfg.credentials.is_some(),
            http = ?cfg.http,
            "loaded config"
        );

        match cli.command {
            CliCommand::Run {
                operation,
                params,
                params_file,
                binaries,
                continue_on_fail,
            } => {
                let args = RunArgs {
                    operation,
                    params,
                    params_file,
                    binaries,
                    continue_on_fail,
                };
                run_operation(&cfg, args).await?
            }
            CliCommand::Describe => run_describe()?,
            CliCommand::Verify => run_verify(&cfg).await?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
