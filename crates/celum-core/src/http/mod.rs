//! HTTP plumbing: request/response types, the [`Transport`] seam, header
//! handling and query-string building.
//!
//! Operations never talk to curl directly. They build an [`HttpRequest`] and
//! hand it to whatever transport the host supplies; [`CurlTransport`] is the
//! production implementation.

mod curl;
pub mod headers;
pub mod query;

pub use self::curl::CurlTransport;
pub use headers::{mask_header_value, masked_headers, parse_header_lines, HeaderMap};
pub use query::{build_url, QueryParams};

use crate::context::BinaryPayload;
use crate::error::Result;
use async_trait::async_trait;
use std::fmt;

/// HTTP methods used by the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of an outgoing request.
pub enum RequestBody {
    Empty,
    /// Serialized JSON document.
    Json(Vec<u8>),
    /// Raw bytes, sent as-is (buffered or streamed).
    Raw(BinaryPayload),
    /// Single-file multipart form. Always buffered.
    Multipart {
        field: String,
        file_name: String,
        content_type: String,
        data: Vec<u8>,
    },
}

impl fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestBody::Empty => f.write_str("Empty"),
            RequestBody::Json(b) => write!(f, "Json({} bytes)", b.len()),
            RequestBody::Raw(p) => write!(f, "Raw({:?})", p),
            RequestBody::Multipart {
                field,
                file_name,
                content_type,
                data,
            } => write!(
                f,
                "Multipart(field={field}, file={file_name}, type={content_type}, {} bytes)",
                data.len()
            ),
        }
    }
}

/// A fully resolved request: absolute URL, header list, body.
#[derive(Debug)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    /// Header name/value pairs in the order they should be sent.
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }
}

/// Response as returned by the transport: status, parsed headers, raw body.
#[derive(Debug, Clone, Default)]
pub struct HttpResponse {
    pub status: u32,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The host's HTTP client layer. Timeouts and cancellation live here, not in
/// the operations.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}
