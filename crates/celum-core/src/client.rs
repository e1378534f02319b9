//! Authenticated request executor for the Celum Mediabank API.
//!
//! [`ApiClient`] resolves credentials once per item and turns an [`ApiCall`]
//! (method, path, JSON body, query) into an HTTP request carrying the API
//! key. The decoded result is either the response body or, on request, a
//! diagnostic envelope with status, headers and a masked copy of the request.

use crate::context::HostContext;
use crate::credentials::{self, Credentials, CELUM_AUTH};
use crate::error::{NodeError, Result};
use crate::http::{
    build_url, masked_headers, HttpRequest, HttpResponse, Method, QueryParams, RequestBody,
};
use crate::params::Params;
use serde_json::{json, Map, Value};

/// One JSON call against the API.
#[derive(Debug, Clone)]
pub struct ApiCall {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    pub query: QueryParams,
}

impl ApiCall {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            query: QueryParams::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Post, path).with_body(body)
    }

    pub fn patch(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Patch, path).with_body(body)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }
}

/// How the response is checked and shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseOptions {
    /// Return `{body, headers, statusCode}` instead of the bare body.
    pub full_response: bool,
    /// Attach a masked copy of the outgoing request under `request`.
    pub full_request: bool,
    /// Fail with [`NodeError::ApiRequest`] on statuses outside 2xx.
    pub throw_on_error: bool,
}

impl Default for ResponseOptions {
    fn default() -> Self {
        Self {
            full_response: false,
            full_request: false,
            throw_on_error: true,
        }
    }
}

impl ResponseOptions {
    /// Read the `returnFullResponse`, `returnFullRequest` and `throwOnError`
    /// switches. Operations that do not declare a switch get its default.
    pub fn from_params(params: &Params<'_>) -> Result<Self> {
        let d = Self::default();
        Ok(Self {
            full_response: params.bool_or("returnFullResponse", d.full_response)?,
            full_request: params.bool_or("returnFullRequest", d.full_request)?,
            throw_on_error: params.bool_or("throwOnError", d.throw_on_error)?,
        })
    }
}

/// Request executor bound to one item's host context and credentials.
pub struct ApiClient<'a> {
    ctx: &'a dyn HostContext,
    credentials: Credentials,
}

impl<'a> ApiClient<'a> {
    /// Resolve credentials from the host.
    pub async fn connect(ctx: &'a dyn HostContext) -> Result<Self> {
        let credentials = credentials::resolve(ctx).await?;
        Ok(Self::with_credentials(ctx, credentials))
    }

    pub fn with_credentials(ctx: &'a dyn HostContext, credentials: Credentials) -> Self {
        Self { ctx, credentials }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn context(&self) -> &'a dyn HostContext {
        self.ctx
    }

    /// Issue `call` with default options (strict status, bare body).
    pub async fn request(&self, call: ApiCall) -> Result<Value> {
        self.request_with(call, ResponseOptions::default()).await
    }

    pub async fn request_with(&self, call: ApiCall, opts: ResponseOptions) -> Result<Value> {
        let url = build_url(&self.credentials.base_url, &call.path, &call.query)?;

        let mut headers = CELUM_AUTH.apply(&self.credentials);
        headers.push(("Content-Type".to_string(), "application/json".to_string()));

        let request_details = opts
            .full_request
            .then(|| request_envelope(&call, &url, &headers));

        tracing::debug!(
            method = %call.method,
            path = %call.path,
            url = %url,
            has_body = call.body.is_some(),
            has_api_key = !self.credentials.api_key.is_empty(),
            "API request"
        );

        let mut request = HttpRequest::new(call.method, url.clone());
        request.headers = headers;
        if let Some(body) = &call.body {
            let bytes = serde_json::to_vec(body)
                .map_err(|e| NodeError::parameter(format!("request body: {e}")))?;
            request = request.body(RequestBody::Json(bytes));
        }

        let response = match self.ctx.transport().send(request).await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(method = %call.method, url = %url, kind = ?e.kind(), "API request failed: {}", e);
                return Err(e);
            }
        };
        tracing::debug!(status = response.status, "API response received");

        let body = decode_body(&response.body);
        if opts.throw_on_error && !response.is_success() {
            tracing::warn!(method = %call.method, url = %url, status = response.status, "API returned error status");
            return Err(NodeError::ApiRequest {
                status: response.status,
                body: serialize_body(&body),
            });
        }

        Ok(shape_response(body, &response, opts, request_details))
    }

    /// Run the credential type's test request; valid when the body carries
    /// the declared success key.
    pub async fn verify(&self) -> Result<bool> {
        let test = credentials::credential_description().test;
        let mut query = QueryParams::new();
        for (key, value) in &test.query {
            query.push(*key, *value);
        }
        let body = self
            .request(ApiCall::get(test.path).with_query(query))
            .await?;
        let valid = body.get(test.success_key).is_some();
        if valid {
            tracing::info!("{}", test.success_message);
        }
        Ok(valid)
    }
}

/// Decode a response body: empty → null, JSON → value, otherwise text.
pub fn decode_body(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

fn serialize_body(body: &Value) -> String {
    match body {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn request_envelope(call: &ApiCall, url: &str, headers: &[(String, String)]) -> Value {
    let mut map = Map::new();
    map.insert("method".into(), json!(call.method.as_str()));
    map.insert("url".into(), json!(url));
    map.insert("headers".into(), masked_headers(headers));
    if let Some(body) = &call.body {
        map.insert("body".into(), body.clone());
    }
    if !call.query.is_empty() {
        map.insert("queryParams".into(), call.query.to_json());
    }
    Value::Object(map)
}

fn shape_response(
    body: Value,
    response: &HttpResponse,
    opts: ResponseOptions,
    request: Option<Value>,
) -> Value {
    if opts.full_response {
        let mut map = Map::new();
        map.insert("body".into(), body);
        map.insert("headers".into(), response.headers.to_json());
        map.insert("statusCode".into(), json!(response.status));
        if let Some(req) = request {
            map.insert("request".into(), req);
        }
        return Value::Object(map);
    }
    match request {
        Some(req) => {
            let mut map = match body {
                Value::Object(m) => m,
                other => {
                    let mut m = Map::new();
                    m.insert("data".into(), other);
                    m
                }
            };
            map.insert("request".into(), req);
            Value::Object(map)
        }
        None => body,
    }
}
