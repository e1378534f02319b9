//! Typed access to an item's parameters.

use crate::context::HostContext;
use crate::error::{NodeError, Result};
use serde_json::Value;

/// Parameter reader bound to one item.
pub struct Params<'a> {
    ctx: &'a dyn HostContext,
    item: usize,
}

impl<'a> Params<'a> {
    pub fn new(ctx: &'a dyn HostContext, item: usize) -> Self {
        Self { ctx, item }
    }

    fn raw(&self, name: &str) -> Option<Value> {
        self.ctx
            .parameter(name, self.item)
            .filter(|v| !v.is_null())
    }

    fn missing(name: &str) -> NodeError {
        NodeError::parameter(format!("Missing required parameter \"{name}\""))
    }

    fn invalid(name: &str, expected: &str, got: &Value) -> NodeError {
        NodeError::parameter(format!(
            "Parameter \"{name}\" must be {expected}, got {got}"
        ))
    }

    /// Required string. Numbers and booleans are stringified.
    pub fn string(&self, name: &str) -> Result<String> {
        let v = self.raw(name).ok_or_else(|| Self::missing(name))?;
        match v {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            other => Err(Self::invalid(name, "a string", &other)),
        }
    }

    pub fn string_or(&self, name: &str, default: &str) -> Result<String> {
        match self.raw(name) {
            None => Ok(default.to_string()),
            Some(_) => self.string(name),
        }
    }

    /// Required non-negative integer; numeric strings are accepted.
    pub fn u64(&self, name: &str) -> Result<u64> {
        let v = self.raw(name).ok_or_else(|| Self::missing(name))?;
        match &v {
            Value::Number(n) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| *f >= 0.0 && f.fract() == 0.0).map(|f| f as u64))
                .ok_or_else(|| Self::invalid(name, "a non-negative integer", &v)),
            Value::String(s) => s
                .trim()
                .parse::<u64>()
                .map_err(|_| Self::invalid(name, "a non-negative integer", &v)),
            _ => Err(Self::invalid(name, "a non-negative integer", &v)),
        }
    }

    pub fn u64_or(&self, name: &str, default: u64) -> Result<u64> {
        match self.raw(name) {
            None => Ok(default),
            Some(_) => self.u64(name),
        }
    }

    pub fn bool_or(&self, name: &str, default: bool) -> Result<bool> {
        match self.raw(name) {
            None => Ok(default),
            Some(Value::Bool(b)) => Ok(b),
            Some(Value::String(s)) if s.eq_ignore_ascii_case("true") => Ok(true),
            Some(Value::String(s)) if s.eq_ignore_ascii_case("false") => Ok(false),
            Some(other) => Err(Self::invalid(name, "a boolean", &other)),
        }
    }

    /// Multi-option list. A single string is treated as a one-element list.
    pub fn string_list_or(&self, name: &str, default: &[&str]) -> Result<Vec<String>> {
        match self.raw(name) {
            None => Ok(default.iter().map(|s| s.to_string()).collect()),
            Some(Value::String(s)) if s.is_empty() => Ok(Vec::new()),
            Some(Value::String(s)) => Ok(vec![s]),
            Some(Value::Array(items)) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s),
                    other => Err(Self::invalid(name, "a list of strings", &other)),
                })
                .collect(),
            Some(other) => Err(Self::invalid(name, "a list of strings", &other)),
        }
    }

    /// JSON-typed parameter: an already-decoded value or a JSON string.
    /// Empty strings count as absent.
    pub fn json(&self, name: &str, label: &str) -> Result<Option<Value>> {
        match self.raw(name) {
            None => Ok(None),
            Some(Value::String(s)) => parse_json_text(&s, label),
            Some(other) => Ok(Some(other)),
        }
    }
}

/// Decode free-form JSON text, reporting failures against `label`.
pub fn parse_json_text(text: &str, label: &str) -> Result<Option<Value>> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(text)
        .map(Some)
        .map_err(|e| NodeError::parameter(format!("Invalid JSON in {label}: {e}")))
}

/// Parse a comma-separated id list, dropping blank and non-numeric entries.
pub fn parse_id_list(input: &str) -> Vec<i64> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(leading_integer)
        .collect()
}

/// Integer prefix of `s` (`"12abc"` → 12), or None if it has no leading digits.
fn leading_integer(s: &str) -> Option<i64> {
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}
