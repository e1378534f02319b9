//! Response header parsing and secret masking for diagnostic envelopes.

use serde_json::{Map, Value};

/// Header names whose values are masked before they appear in output.
const SENSITIVE_HEADERS: &[&str] = &[
    "x-api-key",
    "api-key",
    "apikey",
    "authorization",
    "proxy-authorization",
];

const VISIBLE_PREFIX: usize = 4;
const MIN_MASK: usize = 8;

/// Response headers keyed by lowercase name. Repeated headers keep every value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    entries: Vec<(String, Vec<String>)>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, name: &str, value: &str) {
        let name = name.trim().to_ascii_lowercase();
        let value = value.trim().to_string();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((name, vec![value])),
        }
    }

    /// First value for `name` (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .and_then(|(_, v)| v.first())
            .map(String::as_str)
    }

    /// JSON form used in the full-response envelope: single values as
    /// strings, repeated values as arrays.
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        for (name, values) in &self.entries {
            let v = if values.len() == 1 {
                Value::String(values[0].clone())
            } else {
                Value::Array(values.iter().cloned().map(Value::String).collect())
            };
            map.insert(name.clone(), v);
        }
        Value::Object(map)
    }
}

/// Parse collected raw header lines into a [`HeaderMap`].
///
/// Status lines reset the map so that only the final response's headers
/// survive (e.g. after `100 Continue` or a redirect).
pub fn parse_header_lines(lines: &[String]) -> HeaderMap {
    let mut map = HeaderMap::new();
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            map = HeaderMap::new();
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            map.append(name, value);
        }
    }
    map
}

pub fn is_sensitive_header(name: &str) -> bool {
    SENSITIVE_HEADERS
        .iter()
        .any(|s| s.eq_ignore_ascii_case(name.trim()))
}

/// Mask a secret: first four characters kept, the rest replaced with
/// asterisks (at least eight). Values of four characters or fewer are fully
/// replaced.
pub fn mask_header_value(value: &str) -> String {
    let len = value.chars().count();
    if len <= VISIBLE_PREFIX {
        return "*".repeat(MIN_MASK);
    }
    let prefix: String = value.chars().take(VISIBLE_PREFIX).collect();
    let stars = (len - VISIBLE_PREFIX).max(MIN_MASK);
    format!("{}{}", prefix, "*".repeat(stars))
}

/// JSON object of request headers with sensitive values masked.
pub fn masked_headers(headers: &[(String, String)]) -> Value {
    let mut map = Map::new();
    for (name, value) in headers {
        let v = if is_sensitive_header(name) {
            mask_header_value(value)
        } else {
            value.clone()
        };
        map.insert(name.clone(), Value::String(v));
    }
    Value::Object(map)
}
