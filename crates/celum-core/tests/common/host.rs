//! In-memory host and recording transport for operation tests.
//!
//! The transport records every request (body drained to bytes) and answers
//! from a queue of canned responses, defaulting to `200 {}`.

use async_trait::async_trait;
use celum_core::http::{HeaderMap, HttpRequest, HttpResponse, Method, RequestBody, Transport};
use celum_core::{BinaryData, HostContext, Result};
use serde_json::{json, Map, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

pub const API_KEY: &str = "abcdef123456";
pub const BASE_URL: &str = "https://acme.celum.cloud/content-api/v1";

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    /// (field, file name, content type) for multipart bodies.
    pub multipart: Option<(String, String, String)>,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

#[derive(Default)]
struct Inner {
    responses: Mutex<VecDeque<HttpResponse>>,
    requests: Mutex<Vec<Recorded>>,
}

#[derive(Clone, Default)]
pub struct RecordingTransport {
    inner: Arc<Inner>,
}

impl RecordingTransport {
    pub fn push_response(&self, status: u32, body: Value) {
        let mut headers = HeaderMap::new();
        headers.append("Content-Type", "application/json");
        let body = if body.is_null() {
            Vec::new()
        } else {
            serde_json::to_vec(&body).unwrap()
        };
        self.inner
            .responses
            .lock()
            .unwrap()
            .push_back(HttpResponse {
                status,
                headers,
                body,
            });
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.inner.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
        } = request;
        let (body, multipart) = match body {
            RequestBody::Empty => (Vec::new(), None),
            RequestBody::Json(b) => (b, None),
            RequestBody::Raw(payload) => (payload.into_bytes()?, None),
            RequestBody::Multipart {
                field,
                file_name,
                content_type,
                data,
            } => (data, Some((field, file_name, content_type))),
        };
        self.inner.requests.lock().unwrap().push(Recorded {
            method,
            url,
            headers,
            body,
            multipart,
        });
        let canned = self.inner.responses.lock().unwrap().pop_front();
        Ok(canned.unwrap_or_else(|| HttpResponse {
            status: 200,
            headers: HeaderMap::new(),
            body: b"{}".to_vec(),
        }))
    }
}

/// Host with JSON items, optional credentials and in-memory binaries.
pub struct TestHost {
    items: Vec<Map<String, Value>>,
    credentials: Option<Value>,
    binaries: HashMap<(usize, String), (Vec<u8>, Option<String>, Option<String>)>,
    transport: Box<dyn Transport>,
    pub recorder: RecordingTransport,
    continue_on_fail: bool,
}

impl TestHost {
    /// One host item per JSON object in `items`.
    pub fn new(items: Vec<Value>) -> Self {
        let recorder = RecordingTransport::default();
        Self {
            items: items
                .into_iter()
                .map(|v| match v {
                    Value::Object(m) => m,
                    other => panic!("item must be an object: {other}"),
                })
                .collect(),
            credentials: Some(json!({"apiKey": API_KEY, "baseUrl": format!("{BASE_URL}/")})),
            binaries: HashMap::new(),
            transport: Box::new(recorder.clone()),
            recorder,
            continue_on_fail: false,
        }
    }

    pub fn single(item: Value) -> Self {
        Self::new(vec![item])
    }

    /// Route requests to `transport` instead of the recorder.
    pub fn with_transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Box::new(transport);
        self
    }

    pub fn with_credentials(mut self, credentials: Option<Value>) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn with_binary(
        mut self,
        item: usize,
        property: &str,
        bytes: &[u8],
        mime_type: Option<&str>,
        file_name: Option<&str>,
    ) -> Self {
        self.binaries.insert(
            (item, property.to_string()),
            (
                bytes.to_vec(),
                mime_type.map(str::to_string),
                file_name.map(str::to_string),
            ),
        );
        self
    }

    pub fn continuing_on_fail(mut self) -> Self {
        self.continue_on_fail = true;
        self
    }

    pub fn respond(self, status: u32, body: Value) -> Self {
        self.recorder.push_response(status, body);
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.recorder.requests()
    }
}

#[async_trait]
impl HostContext for TestHost {
    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn parameter(&self, name: &str, item: usize) -> Option<Value> {
        self.items.get(item)?.get(name).cloned()
    }

    async fn credentials(&self, _name: &str) -> Option<Value> {
        self.credentials.clone()
    }

    async fn binary(&self, item: usize, property: &str) -> Option<BinaryData> {
        let (bytes, mime, name) = self.binaries.get(&(item, property.to_string()))?;
        let mut data = BinaryData::from_bytes(bytes.clone());
        data.mime_type = mime.clone();
        data.file_name = name.clone();
        Some(data)
    }

    fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    fn continue_on_fail(&self) -> bool {
        self.continue_on_fail
    }
}
