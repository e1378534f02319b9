//! Declarative field schemas for operation parameters.
//!
//! Pure data: the host renders these as form fields. Serialized in the
//! camelCase shape hosts expect (`displayName`, `typeOptions`, ...).

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Options,
    MultiOptions,
    Json,
}

/// One selectable value of an options / multiOptions field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldOption {
    pub name: String,
    pub value: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl FieldOption {
    pub fn new(name: &str, value: impl Into<Value>) -> Self {
        Self {
            name: name.to_string(),
            value: value.into(),
            description: None,
            action: None,
        }
    }

    pub fn described(name: &str, value: impl Into<Value>, description: &str) -> Self {
        Self {
            description: Some(description.to_string()),
            ..Self::new(name, value)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_value: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_value: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<bool>,
}

/// Conditions under which a field is shown: parameter name → accepted values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DisplayOptions {
    pub show: BTreeMap<String, Vec<Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSchema {
    pub display_name: String,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub default: Value,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_options: Option<TypeOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_options: Option<DisplayOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl FieldSchema {
    fn new(field_type: FieldType, name: &str, display_name: &str, default: Value) -> Self {
        Self {
            display_name: display_name.to_string(),
            name: name.to_string(),
            field_type,
            default,
            required: false,
            description: String::new(),
            options: Vec::new(),
            type_options: None,
            display_options: None,
            placeholder: None,
            hint: None,
        }
    }

    pub fn string(name: &str, display_name: &str, default: &str) -> Self {
        Self::new(FieldType::String, name, display_name, Value::from(default))
    }

    pub fn number(name: &str, display_name: &str, default: i64) -> Self {
        Self::new(FieldType::Number, name, display_name, Value::from(default))
    }

    pub fn boolean(name: &str, display_name: &str, default: bool) -> Self {
        Self::new(FieldType::Boolean, name, display_name, Value::from(default))
    }

    pub fn json(name: &str, display_name: &str, default: &str) -> Self {
        Self::new(FieldType::Json, name, display_name, Value::from(default))
    }

    pub fn options(name: &str, display_name: &str, default: &str, options: Vec<FieldOption>) -> Self {
        Self {
            options,
            ..Self::new(FieldType::Options, name, display_name, Value::from(default))
        }
    }

    pub fn multi_options(
        name: &str,
        display_name: &str,
        default: &[&str],
        options: Vec<FieldOption>,
    ) -> Self {
        Self {
            options,
            ..Self::new(
                FieldType::MultiOptions,
                name,
                display_name,
                Value::from(default.to_vec()),
            )
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn describe(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn min(mut self, min: i64) -> Self {
        self.type_options.get_or_insert_with(Default::default).min_value = Some(min);
        self
    }

    pub fn max(mut self, max: i64) -> Self {
        self.type_options.get_or_insert_with(Default::default).max_value = Some(max);
        self
    }

    pub fn password(mut self) -> Self {
        self.type_options.get_or_insert_with(Default::default).password = Some(true);
        self
    }

    pub fn placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }

    pub fn hint(mut self, hint: &str) -> Self {
        self.hint = Some(hint.to_string());
        self
    }

    /// Show only when `param` has one of `values`.
    pub fn show_when(mut self, param: &str, values: Vec<Value>) -> Self {
        self.display_options
            .get_or_insert_with(Default::default)
            .show
            .insert(param.to_string(), values);
        self
    }

    /// Copy with `show.operation = [operation]` added. Existing conditions win
    /// on key collisions.
    pub fn scoped_to_operation(&self, operation: &str) -> Self {
        let mut field = self.clone();
        let display = field.display_options.get_or_insert_with(Default::default);
        display
            .show
            .entry("operation".to_string())
            .or_insert_with(|| vec![Value::from(operation)]);
        field
    }
}

/// The three diagnostic switches shared by several operations.
pub fn diagnostic_fields() -> Vec<FieldSchema> {
    vec![
        full_response_field(),
        FieldSchema::boolean("returnFullRequest", "Return Full Request Payload", false).describe(
            "Whether to include the full request payload (method, URL, headers, body, query params) in the output",
        ),
        FieldSchema::boolean("throwOnError", "Throw Error on Non-2xx Status Codes", true).describe(
            "Whether to throw an error and fail execution when the API returns a 3xx, 4xx, or 5xx status code",
        ),
    ]
}

pub fn full_response_field() -> FieldSchema {
    FieldSchema::boolean("returnFullResponse", "Return Response Headers and Body", false)
        .describe("Whether to return response headers and body separately")
}

pub fn locale_field() -> FieldSchema {
    FieldSchema::string("locale", "Locale", "en")
        .describe("Locale for localized values (e.g., \"en\", \"de\", \"fr\")")
}
