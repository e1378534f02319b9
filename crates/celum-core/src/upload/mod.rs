//! Binary upload to an externally supplied upload URL.
//!
//! Raw mode sends the payload as the PUT body, streaming it when the host
//! hands over a reader. Form-data mode POSTs a single-file multipart form,
//! which is always buffered.

mod presigned;

pub use presigned::is_presigned_url;

use crate::client::{decode_body, ApiClient};
use crate::context::BinaryData;
use crate::credentials::CELUM_AUTH;
use crate::error::{NodeError, Result};
use crate::http::{HttpRequest, HttpResponse, Method, RequestBody};
use std::str::FromStr;

pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";
pub const DEFAULT_FILE_NAME: &str = "file";

/// How the binary is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyContentType {
    /// PUT with the raw bytes as body.
    Raw,
    /// POST multipart/form-data.
    FormData,
}

impl FromStr for BodyContentType {
    type Err = NodeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "raw" => Ok(BodyContentType::Raw),
            "formData" => Ok(BodyContentType::FormData),
            other => Err(NodeError::parameter(format!(
                "Unsupported body content type \"{other}\" (expected \"raw\" or \"formData\")"
            ))),
        }
    }
}

/// Where and how to upload.
#[derive(Debug, Clone)]
pub struct UploadTarget {
    pub url: String,
    pub content_type: BodyContentType,
    /// Multipart field name (form-data mode only).
    pub form_field: String,
    /// Skip auth headers when the URL is recognized as presigned.
    pub detect_presigned: bool,
}

impl UploadTarget {
    /// Whether the API key header is attached for this target.
    pub fn sends_api_key(&self) -> bool {
        !(self.detect_presigned && is_presigned_url(&self.url))
    }
}

/// Build the upload request for `binary` without sending it.
pub fn build_upload_request(
    client: &ApiClient<'_>,
    target: &UploadTarget,
    binary: BinaryData,
) -> Result<HttpRequest> {
    let mime_type = binary
        .mime_type
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string());
    let file_name = binary
        .file_name
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string());

    let mut request = match target.content_type {
        BodyContentType::Raw => HttpRequest::new(Method::Put, target.url.clone())
            .header("Content-Type", mime_type)
            .body(RequestBody::Raw(binary.payload)),
        BodyContentType::FormData => {
            let data = binary.payload.into_bytes()?;
            HttpRequest::new(Method::Post, target.url.clone()).body(RequestBody::Multipart {
                field: target.form_field.clone(),
                file_name,
                content_type: mime_type,
                data,
            })
        }
    };

    if target.sends_api_key() {
        request.headers.extend(CELUM_AUTH.apply(client.credentials()));
    }
    Ok(request)
}

/// Upload `binary` to `target`. Statuses outside 2xx are errors.
pub async fn upload_binary(
    client: &ApiClient<'_>,
    target: &UploadTarget,
    binary: BinaryData,
) -> Result<HttpResponse> {
    let size = binary.payload.len_hint();
    let request = build_upload_request(client, target, binary)?;
    let with_key = target.sends_api_key();
    tracing::debug!(
        method = %request.method,
        url = %target.url,
        ?size,
        with_api_key = with_key,
        "uploading binary"
    );

    let response = client.context().transport().send(request).await?;
    if !response.is_success() {
        let body = decode_body(&response.body);
        let body = match body {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };
        tracing::warn!(url = %target.url, status = response.status, "upload rejected");
        return Err(NodeError::ApiRequest {
            status: response.status,
            body,
        });
    }
    Ok(response)
}
