//! `celum run` – execute one operation over the given items.

use anyhow::{bail, Context, Result};
use celum_core::config::NodeConfig;
use serde_json::{Map, Value};
use std::fs;
use std::path::PathBuf;

use crate::cli::host::CliHost;

#[derive(Debug)]
pub struct RunArgs {
    pub operation: String,
    pub params: Option<String>,
    pub params_file: Option<PathBuf>,
    pub binaries: Vec<(String, PathBuf)>,
    pub continue_on_fail: bool,
}

/// Items from a params document: an object is one item, an array is many.
/// `operation` is set on every item.
pub(crate) fn items_from_json(text: Option<&str>, operation: &str) -> Result<Vec<Map<String, Value>>> {
    let doc = match text.map(str::trim).filter(|t| !t.is_empty()) {
        None => Value::Object(Map::new()),
        Some(t) => serde_json::from_str(t).context("parsing params JSON")?,
    };
    let raw = match doc {
        Value::Array(values) => values,
        other => vec![other],
    };
    raw.into_iter()
        .enumerate()
        .map(|(i, v)| match v {
            Value::Object(mut map) => {
                map.insert("operation".to_string(), Value::from(operation));
                Ok(map)
            }
            other => bail!("item {i} must be a JSON object, got {other}"),
        })
        .collect()
}

pub async fn run_operation(cfg: &NodeConfig, args: RunArgs) -> Result<()> {
    let text = match (&args.params, &args.params_file) {
        (Some(p), _) => Some(p.clone()),
        (None, Some(path)) => Some(
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?,
        ),
        (None, None) => None,
    };
    let items = items_from_json(text.as_deref(), &args.operation)?;
    tracing::info!(operation = %args.operation, items = items.len(), "running operation");

    let host = CliHost::new(cfg, items)
        .with_binaries(args.binaries)?
        .with_continue_on_fail(args.continue_on_fail);
    let outputs = celum_core::execute(&host)
        .await
        .with_context(|| format!("operation {} failed", args.operation))?;

    println!("{}", serde_json::to_string_pretty(&outputs)?);
    Ok(())
}
