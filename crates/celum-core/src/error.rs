//! Error taxonomy for node operations.
//!
//! Handlers fail fast with [`NodeError::Parameter`] before touching the
//! network. Everything the transport or the remote API reports is passed
//! through to the per-item wrapper in [`crate::node`], which decides whether to
//! record it against the item or abort the run.

use thiserror::Error;

/// Error returned by credential resolution, request execution and operation handlers.
#[derive(Debug, Error)]
pub enum NodeError {
    /// Malformed or missing parameter (bad JSON, missing binary, missing handle).
    #[error("{0}")]
    Parameter(String),

    /// The host could not supply usable credentials.
    #[error("credentials \"{name}\" unavailable: {reason}")]
    AuthConfig { name: String, reason: String },

    /// Remote API answered outside 2xx while strict status checking was on.
    #[error("API request failed with status {status}: {body}")]
    ApiRequest { status: u32, body: String },

    /// Transport-level failure (DNS, connection reset, timeout).
    #[error("{0}")]
    Network(#[from] curl::Error),

    /// Reading a streamed binary payload failed.
    #[error("binary stream: {0}")]
    Io(#[from] std::io::Error),

    /// The blocking transfer task could not complete (panic or runtime shutdown).
    #[error("transport: {0}")]
    Transport(String),
}

impl NodeError {
    pub fn parameter(msg: impl Into<String>) -> Self {
        NodeError::Parameter(msg.into())
    }

    pub fn auth_config(name: impl Into<String>, reason: impl Into<String>) -> Self {
        NodeError::AuthConfig {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Coarse classification used in log events and CLI diagnostics.
    pub fn kind(&self) -> ErrorKind {
        match self {
            NodeError::Parameter(_) => ErrorKind::Parameter,
            NodeError::AuthConfig { .. } => ErrorKind::AuthConfig,
            NodeError::ApiRequest { status, .. } => ErrorKind::Api(*status),
            NodeError::Network(e) => classify_curl_error(e),
            NodeError::Io(_) | NodeError::Transport(_) => ErrorKind::Other,
        }
    }
}

/// High-level classification of a [`NodeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Parameter,
    AuthConfig,
    /// Non-2xx status from the API or upload target.
    Api(u32),
    /// Connect or transfer timed out.
    Timeout,
    /// Network-level failure (connection reset, DNS, etc.).
    Connection,
    Other,
}

/// Classify a curl error for diagnostics.
pub fn classify_curl_error(e: &curl::Error) -> ErrorKind {
    if e.is_operation_timedout() {
        return ErrorKind::Timeout;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
    {
        return ErrorKind::Connection;
    }
    ErrorKind::Other
}

pub type Result<T> = std::result::Result<T, NodeError>;
