//! Host context: everything an operation needs from the workflow runtime.
//!
//! The node does not know how the host stores parameters, secrets or binary
//! data. It only depends on this trait, passed explicitly to every handler.

use crate::http::Transport;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::io::Read;

/// Binary payload attached to an input item.
pub enum BinaryPayload {
    /// Whole payload in memory.
    Buffer(Vec<u8>),
    /// Payload read on demand. `length` is sent as `Content-Length` when known.
    Stream {
        reader: Box<dyn Read + Send>,
        length: Option<u64>,
    },
}

impl BinaryPayload {
    /// Known size in bytes, if any.
    pub fn len_hint(&self) -> Option<u64> {
        match self {
            BinaryPayload::Buffer(b) => Some(b.len() as u64),
            BinaryPayload::Stream { length, .. } => *length,
        }
    }

    /// Drain the payload into memory (multipart bodies need the whole file).
    pub fn into_bytes(self) -> std::io::Result<Vec<u8>> {
        match self {
            BinaryPayload::Buffer(b) => Ok(b),
            BinaryPayload::Stream { mut reader, length } => {
                let mut buf = Vec::with_capacity(length.unwrap_or(0) as usize);
                reader.read_to_end(&mut buf)?;
                Ok(buf)
            }
        }
    }
}

impl fmt::Debug for BinaryPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinaryPayload::Buffer(b) => write!(f, "Buffer({} bytes)", b.len()),
            BinaryPayload::Stream { length, .. } => write!(f, "Stream(length={:?})", length),
        }
    }
}

/// A named binary property of an input item.
#[derive(Debug)]
pub struct BinaryData {
    pub mime_type: Option<String>,
    pub file_name: Option<String>,
    pub payload: BinaryPayload,
}

impl BinaryData {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            mime_type: None,
            file_name: None,
            payload: BinaryPayload::Buffer(bytes),
        }
    }

    pub fn with_mime_type(mut self, mime: impl Into<String>) -> Self {
        self.mime_type = Some(mime.into());
        self
    }
}

/// Capabilities the host runtime provides to the node for one run.
#[async_trait]
pub trait HostContext: Send + Sync {
    /// Number of input items in this run.
    fn item_count(&self) -> usize;

    /// Resolved value of parameter `name` for item `item`, if set.
    fn parameter(&self, name: &str, item: usize) -> Option<Value>;

    /// Opaque credential object stored under `name` (`apiKey`, `baseUrl`).
    async fn credentials(&self, name: &str) -> Option<Value>;

    /// Binary property `property` of item `item`.
    async fn binary(&self, item: usize, property: &str) -> Option<BinaryData>;

    /// HTTP client layer used for every outgoing call.
    fn transport(&self) -> &dyn Transport;

    /// Whether per-item failures are recorded instead of aborting the run.
    fn continue_on_fail(&self) -> bool {
        false
    }
}
