//! Node entry point: description for the host and the per-item executor.

use crate::context::HostContext;
use crate::credentials::{credential_description, CredentialDescription};
use crate::error::{NodeError, Result};
use crate::operations::{self, Operation};
use crate::params::Params;
use crate::schema::{FieldOption, FieldSchema};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::Instrument;

pub const NODE_NAME: &str = "celumMediabank";

/// Output record for one input item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeOutput {
    pub json: Value,
    pub paired_item: PairedItem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PairedItem {
    pub item: usize,
}

impl NodeOutput {
    pub fn new(json: Value, item: usize) -> Self {
        Self {
            json,
            paired_item: PairedItem { item },
        }
    }
}

/// What the host needs to render the node: operation picker plus every
/// operation's fields, each scoped to its operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescription {
    pub display_name: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub credentials: Vec<CredentialDescription>,
    pub properties: Vec<FieldSchema>,
}

pub fn describe() -> NodeDescription {
    let registry = operations::registry();
    let picker = FieldSchema::options(
        "operation",
        "Operation",
        "getAsset",
        registry
            .iter()
            .map(|op| {
                let info = op.info();
                FieldOption {
                    action: Some(info.action.to_string()),
                    ..FieldOption::described(info.display_name, info.name, info.description)
                }
            })
            .collect(),
    );

    let mut properties = vec![picker];
    for op in registry {
        let name = op.info().name;
        properties.extend(op.fields().iter().map(|f| f.scoped_to_operation(name)));
    }

    NodeDescription {
        display_name: "Celum Mediabank",
        name: NODE_NAME,
        description: "Consume the Celum Mediabank API",
        credentials: vec![credential_description()],
        properties,
    }
}

async fn execute_item(ctx: &dyn HostContext, item: usize) -> Result<Value> {
    let operation = Params::new(ctx, item).string("operation")?;
    let op: &dyn Operation = operations::find(&operation)
        .ok_or_else(|| NodeError::parameter(format!("Unknown operation: {operation}")))?;
    op.execute(ctx, item)
        .instrument(tracing::info_span!("operation", name = %operation, item))
        .await
}

/// Run every input item in order.
///
/// With continue-on-fail a failing item yields `{error: message}` and the
/// run goes on; otherwise the first failure aborts the run.
pub async fn execute(ctx: &dyn HostContext) -> Result<Vec<NodeOutput>> {
    let count = ctx.item_count();
    let mut outputs = Vec::with_capacity(count);
    for item in 0..count {
        match execute_item(ctx, item).await {
            Ok(json) => outputs.push(NodeOutput::new(json, item)),
            Err(e) if ctx.continue_on_fail() => {
                tracing::warn!(item, kind = ?e.kind(), "item failed, continuing: {}", e);
                outputs.push(NodeOutput::new(json!({"error": e.to_string()}), item));
            }
            Err(e) => {
                tracing::error!(item, kind = ?e.kind(), "item failed: {}", e);
                return Err(e);
            }
        }
    }
    tracing::debug!(items = count, "node run finished");
    Ok(outputs)
}
