//! Celum Mediabank API credentials and authentication headers.
//!
//! The credential type is fixed at compile time: an API key sent as
//! `X-API-KEY` and a base URL that every request path is appended to.

use crate::context::HostContext;
use crate::error::{NodeError, Result};
use crate::schema::FieldSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Name under which the host stores the credential object.
pub const CREDENTIAL_NAME: &str = "celumMediabankApi";

pub const DEFAULT_BASE_URL: &str = "https://your-instance.celum.cloud/content-api/v1";

/// Path probed when checking credentials.
pub const VERIFY_PATH: &str = "/collections";

/// Resolved credentials for one item execution.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub api_key: String,
    pub base_url: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: normalize_base_url(&base_url.into()),
        }
    }

    /// Build from the host's opaque credential object.
    pub fn from_value(name: &str, value: Value) -> Result<Self> {
        let raw: Credentials = serde_json::from_value(value)
            .map_err(|e| NodeError::auth_config(name, format!("malformed credential object: {e}")))?;
        if raw.api_key.trim().is_empty() {
            return Err(NodeError::auth_config(name, "API key is empty"));
        }
        if raw.base_url.trim().is_empty() {
            return Err(NodeError::auth_config(name, "base URL is empty"));
        }
        Ok(Self::new(raw.api_key, raw.base_url.trim()))
    }
}

/// Strip a single trailing slash from the base URL.
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.strip_suffix('/').unwrap_or(base_url).to_string()
}

/// Resolve [`CREDENTIAL_NAME`] from the host.
pub async fn resolve(ctx: &dyn HostContext) -> Result<Credentials> {
    let value = ctx
        .credentials(CREDENTIAL_NAME)
        .await
        .ok_or_else(|| NodeError::auth_config(CREDENTIAL_NAME, "not configured"))?;
    Credentials::from_value(CREDENTIAL_NAME, value)
}

/// Static description of how credentials authenticate a request.
#[derive(Debug, Clone, Copy)]
pub struct AuthConfig {
    /// Headers carrying the API key.
    pub api_key_headers: &'static [&'static str],
}

/// Authentication used by the Celum Mediabank API.
pub const CELUM_AUTH: AuthConfig = AuthConfig {
    api_key_headers: &["X-API-KEY"],
};

impl AuthConfig {
    /// Header name/value pairs for `creds`.
    pub fn apply(&self, creds: &Credentials) -> Vec<(String, String)> {
        self.api_key_headers
            .iter()
            .map(|name| (name.to_string(), creds.api_key.clone()))
            .collect()
    }
}

/// Credential type as presented to the host: the fields it asks the user
/// for and the request that validates them.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialDescription {
    pub name: &'static str,
    pub display_name: &'static str,
    pub documentation_url: &'static str,
    pub required: bool,
    pub properties: Vec<FieldSchema>,
    pub test: CredentialTest,
}

/// `GET {baseUrl}{path}?page=1&size=1`, valid when the body carries `page`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialTest {
    pub method: &'static str,
    pub path: &'static str,
    pub query: Vec<(&'static str, u64)>,
    pub success_key: &'static str,
    pub success_message: &'static str,
}

pub fn credential_description() -> CredentialDescription {
    CredentialDescription {
        name: CREDENTIAL_NAME,
        display_name: "Celum Mediabank API",
        documentation_url: "https://docs.celum.com",
        required: true,
        properties: vec![
            FieldSchema::string("apiKey", "API Key", "")
                .password()
                .required()
                .describe("The API key for Celum Mediabank API authentication"),
            FieldSchema::string("baseUrl", "Base URL", DEFAULT_BASE_URL)
                .required()
                .describe(
                    "The base URL for your Celum Mediabank API instance (e.g., https://your-instance.celum.cloud/content-api/v1)",
                ),
        ],
        test: CredentialTest {
            method: "GET",
            path: VERIFY_PATH,
            query: vec![("page", 1), ("size", 1)],
            success_key: "page",
            success_message: "Credentials validated successfully",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldType;
    use serde_json::json;

    #[test]
    fn trailing_slash_is_stripped() {
        assert_eq!(normalize_base_url("https://x/api/"), "https://x/api");
        assert_eq!(normalize_base_url("https://x/api"), "https://x/api");
        let c = Credentials::new("k", "https://x/api/");
        assert_eq!(c.base_url, "https://x/api");
    }

    #[test]
    fn from_value_reads_camel_case_fields() {
        let c = Credentials::from_value(
            CREDENTIAL_NAME,
            json!({"apiKey": "abcdef123456", "baseUrl": "https://x/api/"}),
        )
        .unwrap();
        assert_eq!(c.api_key, "abcdef123456");
        assert_eq!(c.base_url, "https://x/api");
    }

    #[test]
    fn from_value_rejects_missing_or_empty_fields() {
        let err = Credentials::from_value(CREDENTIAL_NAME, json!({"baseUrl": "https://x"}))
            .unwrap_err();
        assert!(matches!(err, NodeError::AuthConfig { .. }));
        let err = Credentials::from_value(
            CREDENTIAL_NAME,
            json!({"apiKey": "  ", "baseUrl": "https://x"}),
        )
        .unwrap_err();
        assert!(err.to_string().contains("API key is empty"));
    }

    #[test]
    fn auth_config_sets_api_key_header() {
        let c = Credentials::new("secret-key", "https://x");
        assert_eq!(
            CELUM_AUTH.apply(&c),
            vec![("X-API-KEY".to_string(), "secret-key".to_string())]
        );
    }

    #[test]
    fn description_declares_secret_key_and_default_base_url() {
        let desc = credential_description();
        assert_eq!(desc.name, CREDENTIAL_NAME);
        assert_eq!(desc.properties.len(), 2);

        let api_key = &desc.properties[0];
        assert_eq!(api_key.name, "apiKey");
        assert_eq!(api_key.field_type, FieldType::String);
        assert!(api_key.required);
        assert_eq!(api_key.type_options.as_ref().and_then(|t| t.password), Some(true));

        let base_url = &desc.properties[1];
        assert_eq!(base_url.name, "baseUrl");
        assert!(base_url.required);
        assert_eq!(base_url.default, json!(DEFAULT_BASE_URL));
        assert!(base_url.type_options.is_none());
    }

    #[test]
    fn description_serializes_test_request() {
        let v = serde_json::to_value(credential_description()).unwrap();
        assert_eq!(v["displayName"], "Celum Mediabank API");
        assert_eq!(v["properties"][0]["typeOptions"]["password"], true);
        assert_eq!(
            v["test"],
            json!({
                "method": "GET",
                "path": "/collections",
                "query": [["page", 1], ["size", 1]],
                "successKey": "page",
                "successMessage": "Credentials validated successfully",
            })
        );
    }

    #[test]
    fn debug_redacts_api_key() {
        let c = Credentials::new("secret-key", "https://x");
        assert!(!format!("{:?}", c).contains("secret-key"));
    }
}
