//! libcurl-backed [`Transport`].
//!
//! Each request gets its own `Easy` handle and runs on tokio's blocking pool,
//! so the async caller is suspended rather than blocked while the transfer
//! is in flight.

use super::headers::parse_header_lines;
use super::{HttpRequest, HttpResponse, Method, RequestBody, Transport};
use crate::config::HttpConfig;
use crate::context::BinaryPayload;
use crate::error::{NodeError, Result};
use async_trait::async_trait;
use curl::easy::{Easy, Form, List, ReadError};
use std::io::{Cursor, Read};
use std::str;
use std::sync::{Arc, Mutex};

/// Production transport built on the curl crate.
#[derive(Debug, Clone, Default)]
pub struct CurlTransport {
    config: HttpConfig,
}

impl CurlTransport {
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Transport for CurlTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let config = self.config.clone();
        tokio::task::spawn_blocking(move || perform(&config, request))
            .await
            .map_err(|e| NodeError::Transport(e.to_string()))?
    }
}

/// Runs one request to completion on the current thread.
fn perform(config: &HttpConfig, request: HttpRequest) -> Result<HttpResponse> {
    let HttpRequest {
        method,
        url,
        headers,
        body,
    } = request;

    let mut easy = Easy::new();
    easy.url(&url)?;
    easy.connect_timeout(config.connect_timeout())?;
    easy.timeout(config.timeout())?;

    let mut list = List::new();
    for (k, v) in &headers {
        list.append(&format!("{}: {}", k.trim(), v.trim()))?;
    }
    // Suppress curl's own `Expect: 100-continue` on bodies.
    list.append("Expect:")?;

    let mut upload: Option<Box<dyn Read + Send>> = None;
    match body {
        RequestBody::Empty => match method {
            Method::Get => easy.get(true)?,
            other => easy.custom_request(other.as_str())?,
        },
        RequestBody::Json(bytes) => {
            easy.post(true)?;
            easy.post_fields_copy(&bytes)?;
            if method != Method::Post {
                easy.custom_request(method.as_str())?;
            }
        }
        RequestBody::Raw(payload) => {
            easy.upload(true)?;
            if let Some(len) = payload.len_hint() {
                easy.in_filesize(len)?;
            }
            if method != Method::Put {
                easy.custom_request(method.as_str())?;
            }
            upload = Some(match payload {
                BinaryPayload::Buffer(b) => Box::new(Cursor::new(b)),
                BinaryPayload::Stream { reader, .. } => reader,
            });
        }
        RequestBody::Multipart {
            field,
            file_name,
            content_type,
            data,
        } => {
            let mut form = Form::new();
            form.part(&field)
                .buffer(&file_name, data)
                .content_type(&content_type)
                .add()
                .map_err(|e| NodeError::Transport(format!("multipart form: {e}")))?;
            easy.httppost(form)?;
            if method != Method::Post {
                easy.custom_request(method.as_str())?;
            }
        }
    }
    easy.http_headers(list)?;

    let mut header_lines: Vec<String> = Vec::new();
    let mut response_body: Vec<u8> = Vec::new();
    let read_error: Arc<Mutex<Option<std::io::Error>>> = Arc::new(Mutex::new(None));
    let read_error_cb = Arc::clone(&read_error);

    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(s) = str::from_utf8(data) {
                header_lines.push(s.trim_end().to_string());
            }
            true
        })?;
        transfer.write_function(|data| {
            response_body.extend_from_slice(data);
            Ok(data.len())
        })?;
        if let Some(mut reader) = upload {
            transfer.read_function(move |buf| match reader.read(buf) {
                Ok(n) => Ok(n),
                Err(e) => {
                    if let Ok(mut slot) = read_error_cb.lock() {
                        slot.replace(e);
                    }
                    Err(ReadError::Abort)
                }
            })?;
        }
        if let Err(e) = transfer.perform() {
            if e.is_aborted_by_callback() || e.is_read_error() {
                if let Some(io_err) = read_error.lock().ok().and_then(|mut s| s.take()) {
                    return Err(NodeError::Io(io_err));
                }
            }
            return Err(NodeError::Network(e));
        }
    }

    let status = easy.response_code()?;
    tracing::debug!(%method, %url, status, bytes = response_body.len(), "transfer complete");

    Ok(HttpResponse {
        status,
        headers: parse_header_lines(&header_lines),
        body: response_body,
    })
}
