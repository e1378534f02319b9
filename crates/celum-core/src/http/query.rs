//! Query parameters and absolute URL construction.

use crate::error::{NodeError, Result};
use serde_json::{Map, Value};

/// Ordered query parameters. Array values are sent as repeated keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    pairs: Vec<(String, Value)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.pairs.push((key.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Flatten into `(key, value)` string pairs, expanding arrays in order.
    pub fn expanded(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        for (key, value) in &self.pairs {
            match value {
                Value::Array(items) => {
                    for item in items {
                        out.push((key.clone(), scalar_to_string(item)));
                    }
                }
                other => out.push((key.clone(), scalar_to_string(other))),
            }
        }
        out
    }

    /// JSON object form for the diagnostic request envelope.
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        for (key, value) in &self.pairs {
            map.insert(key.clone(), value.clone());
        }
        Value::Object(map)
    }
}

fn scalar_to_string(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Concatenate `base_url` and `path`, then append the query string.
///
/// `base_url` is expected to be normalized already (no trailing slash).
pub fn build_url(base_url: &str, path: &str, query: &QueryParams) -> Result<String> {
    let joined = format!("{}{}", base_url, path);
    if query.is_empty() {
        return Ok(joined);
    }
    let mut url = url::Url::parse(&joined)
        .map_err(|e| NodeError::parameter(format!("invalid request URL {joined}: {e}")))?;
    {
        let mut pairs = url.query_pairs_mut();
        for (k, v) in query.expanded() {
            pairs.append_pair(&k, &v);
        }
    }
    Ok(url.to_string())
}
