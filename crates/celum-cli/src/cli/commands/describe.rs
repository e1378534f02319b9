//! `celum describe` – print the node description.

use anyhow::Result;

pub fn run_describe() -> Result<()> {
    let desc = celum_core::describe();
    println!("{}", serde_json::to_string_pretty(&desc)?);
    Ok(())
}
