//! `celum verify` – credential check against the configured instance.

use anyhow::{bail, Context, Result};
use celum_core::client::ApiClient;
use celum_core::config::NodeConfig;

use crate::cli::host::CliHost;

pub async fn run_verify(cfg: &NodeConfig) -> Result<()> {
    let host = CliHost::new(cfg, Vec::new());
    let client = ApiClient::connect(&host)
        .await
        .context("resolving credentials from config")?;
    let base_url = client.credentials().base_url.clone();
    if client.verify().await.context("credential check request")? {
        println!("Credentials OK for {base_url}");
        Ok(())
    } else {
        bail!("{base_url} answered without a \"page\" field; check the base URL");
    }
}
