//! [`HostContext`] backed by the config file, JSON items and files on disk.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use celum_core::config::{CredentialsConfig, NodeConfig};
use celum_core::http::{CurlTransport, Transport};
use celum_core::{BinaryData, BinaryPayload, HostContext};
use serde_json::{json, Map, Value};
use std::fs::File;
use std::path::{Path, PathBuf};

pub struct CliHost {
    items: Vec<Map<String, Value>>,
    credentials: Option<CredentialsConfig>,
    binaries: Vec<(String, PathBuf)>,
    transport: CurlTransport,
    continue_on_fail: bool,
}

impl CliHost {
    pub fn new(cfg: &NodeConfig, items: Vec<Map<String, Value>>) -> Self {
        Self {
            items,
            credentials: cfg.credentials.clone(),
            binaries: Vec::new(),
            transport: CurlTransport::new(cfg.http.clone()),
            continue_on_fail: false,
        }
    }

    /// Attach `--binary` files. Each must open as a regular file now, so a
    /// bad path fails with its I/O error instead of a missing property.
    pub fn with_binaries(mut self, binaries: Vec<(String, PathBuf)>) -> Result<Self> {
        for (name, path) in &binaries {
            let meta = File::open(path)
                .and_then(|f| f.metadata())
                .with_context(|| format!("opening binary \"{name}\" at {}", path.display()))?;
            if !meta.is_file() {
                bail!("binary \"{name}\" at {} is not a regular file", path.display());
            }
        }
        self.binaries = binaries;
        Ok(self)
    }

    pub fn with_continue_on_fail(mut self, enabled: bool) -> Self {
        self.continue_on_fail = enabled;
        self
    }
}

#[async_trait]
impl HostContext for CliHost {
    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn parameter(&self, name: &str, item: usize) -> Option<Value> {
        self.items.get(item)?.get(name).cloned()
    }

    async fn credentials(&self, _name: &str) -> Option<Value> {
        self.credentials
            .as_ref()
            .map(|c| json!({"apiKey": c.api_key, "baseUrl": c.base_url}))
    }

    async fn binary(&self, item: usize, property: &str) -> Option<BinaryData> {
        if item >= self.items.len() {
            return None;
        }
        let (_, path) = self.binaries.iter().find(|(name, _)| name == property)?;
        match open_binary(path) {
            Ok(data) => Some(data),
            Err(e) => {
                tracing::warn!(path = %path.display(), "cannot open binary: {}", e);
                None
            }
        }
    }

    fn transport(&self) -> &dyn Transport {
        &self.transport
    }

    fn continue_on_fail(&self) -> bool {
        self.continue_on_fail
    }
}

/// Stream `path` with its size as content length.
fn open_binary(path: &Path) -> std::io::Result<BinaryData> {
    let file = File::open(path)?;
    let length = file.metadata()?.len();
    Ok(BinaryData {
        mime_type: Some(mime_from_path(path).to_string()),
        file_name: path.file_name().map(|n| n.to_string_lossy().into_owned()),
        payload: BinaryPayload::Stream {
            reader: Box::new(file),
            length: Some(length),
        },
    })
}

pub fn mime_from_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "tif" | "tiff" => "image/tiff",
        "svg" => "image/svg+xml",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "json" => "application/json",
        "xml" => "application/xml",
        "txt" => "text/plain",
        "csv" => "text/csv",
        "html" | "htm" => "text/html",
        "mp4" => "video/mp4",
        "mov" => "video/quicktime",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        _ => "application/octet-stream",
    }
}
