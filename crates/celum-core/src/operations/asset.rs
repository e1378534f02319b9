//! Asset operations: get, search, create, update, delete.

use super::filter_types::{self, DEFAULT_FILTER_TYPE};
use super::{Operation, OperationInfo};
use crate::client::{ApiCall, ApiClient, ResponseOptions};
use crate::context::HostContext;
use crate::error::{NodeError, Result};
use crate::http::QueryParams;
use crate::params::{parse_id_list, Params};
use crate::schema::{diagnostic_fields, locale_field, FieldOption, FieldSchema};
use async_trait::async_trait;
use serde_json::{json, Map, Value};

const DEFAULT_INCLUSIONS: &[&str] = &[
    "informationFields",
    "informationFieldPermissions",
    "fileProperties",
];

const INFO_FIELD_VALUES_LABEL: &str = "Information Field Values";

fn asset_id_field(description: &str) -> FieldSchema {
    FieldSchema::number("assetId", "Asset ID", 1)
        .min(1)
        .required()
        .describe(description)
}

fn info_field_values_field(description: &str) -> FieldSchema {
    FieldSchema::json("informationFieldValues", INFO_FIELD_VALUES_LABEL, "[]").describe(description)
}

/// `informationFieldValues` as a non-empty array, or None when blank or empty.
fn information_field_values(params: &Params<'_>) -> Result<Option<Vec<Value>>> {
    match params.json("informationFieldValues", INFO_FIELD_VALUES_LABEL)? {
        None => Ok(None),
        Some(Value::Array(values)) if values.is_empty() => Ok(None),
        Some(Value::Array(values)) => Ok(Some(values)),
        Some(other) => Err(NodeError::parameter(format!(
            "{INFO_FIELD_VALUES_LABEL} must be a JSON array, got {other}"
        ))),
    }
}

pub struct GetAsset;

#[async_trait]
impl Operation for GetAsset {
    fn info(&self) -> OperationInfo {
        OperationInfo {
            name: "getAsset",
            display_name: "Get Asset",
            description: "Get a specific asset by ID",
            action: "Get asset",
        }
    }

    fn fields(&self) -> Vec<FieldSchema> {
        let mut fields = vec![
            asset_id_field("ID of the asset to retrieve"),
            locale_field(),
            FieldSchema::multi_options(
                "inclusions",
                "Inclusions",
                DEFAULT_INCLUSIONS,
                vec![
                    FieldOption::described("Information Fields", "informationFields", "Include asset information fields"),
                    FieldOption::described(
                        "Information Field Permissions",
                        "informationFieldPermissions",
                        "Include permissions for information fields",
                    ),
                    FieldOption::described("File Properties", "fileProperties", "Include file properties"),
                    FieldOption::described("External References", "externalReferences", "Include external references"),
                    FieldOption::described("Download Formats", "downloadFormats", "Include available download formats"),
                    FieldOption::described("Permissions", "permissions", "Include asset permissions"),
                ],
            )
            .describe("Specify what additional data to include in the response"),
            FieldSchema::string("informationFields", "Information Field IDs", "").describe(
                "Comma-separated list of specific information field IDs to include (e.g., \"643,644,645\")",
            ),
            FieldSchema::string("downloadFormats", "Download Format IDs", "")
                .describe("Comma-separated list of specific download format IDs to include"),
            FieldSchema::multi_options(
                "permissions",
                "Permissions",
                &[],
                [
                    ("All", "all"),
                    ("Edit Name", "editName"),
                    ("Edit Metadata", "editMetadata"),
                    ("Edit Availability", "editAvailability"),
                    ("Delete", "delete"),
                    ("Manage Version", "manageVersion"),
                    ("Download", "download"),
                    ("Download Original", "downloadOriginal"),
                    ("Add Version", "addVersion"),
                    ("Assign Asset Type", "assignAssetType"),
                    ("Add To Other", "addToOther"),
                    ("View Metadata", "viewMetadata"),
                ]
                .into_iter()
                .map(|(name, value)| FieldOption::new(name, value))
                .collect(),
            )
            .describe("Specify which permissions to evaluate"),
        ];
        fields.extend(diagnostic_fields());
        fields
    }

    async fn execute(&self, ctx: &dyn HostContext, item: usize) -> Result<Value> {
        let params = Params::new(ctx, item);
        let asset_id = params.u64("assetId")?;
        let locale = params.string_or("locale", "en")?;
        let inclusions = params.string_list_or("inclusions", DEFAULT_INCLUSIONS)?;
        let information_fields = parse_id_list(&params.string_or("informationFields", "")?);
        let download_formats = parse_id_list(&params.string_or("downloadFormats", "")?);
        let permissions = params.string_list_or("permissions", &[])?;
        let opts = ResponseOptions::from_params(&params)?;

        let mut query = QueryParams::new();
        if !locale.is_empty() {
            query.push("locale", locale);
        }
        if !inclusions.is_empty() {
            query.push("inclusions", inclusions);
        }
        if !information_fields.is_empty() {
            query.push("informationFields", information_fields);
        }
        if !download_formats.is_empty() {
            query.push("downloadFormats", download_formats);
        }
        if !permissions.is_empty() {
            query.push("permissions", permissions);
        }

        let client = ApiClient::connect(ctx).await?;
        client
            .request_with(ApiCall::get(format!("/assets/{asset_id}")).with_query(query), opts)
            .await
    }
}

pub struct SearchAssets;

#[async_trait]
impl Operation for SearchAssets {
    fn info(&self) -> OperationInfo {
        OperationInfo {
            name: "searchAssets",
            display_name: "Search Assets",
            description: "Search for assets using full-text or field filters",
            action: "Search assets",
        }
    }

    fn fields(&self) -> Vec<FieldSchema> {
        vec![
            FieldSchema::string("searchText", "Search Text", "")
                .required()
                .describe("Text to search for (e.g., UUID, asset name, or metadata)"),
            FieldSchema::options(
                "filterType",
                "Filter Type",
                DEFAULT_FILTER_TYPE,
                filter_types::filter_type_options(),
            )
            .required()
            .describe("Type of filter to apply"),
            FieldSchema::number("page", "Page", 0)
                .min(0)
                .describe("Page number (0-indexed)"),
            FieldSchema::number("size", "Page Size", 20)
                .min(1)
                .max(100)
                .describe("Number of results per page"),
            FieldSchema::options(
                "sortField",
                "Sort Field",
                "creation.date",
                vec![
                    FieldOption::described("Creation Date", "creation.date", "Sort by when the asset was created"),
                    FieldOption::described("Modification Date", "modification.date", "Sort by when the asset was last modified"),
                    FieldOption::described("Name", "name", "Sort by asset name"),
                    FieldOption::described("ID", "id", "Sort by asset ID"),
                    FieldOption::described("Filename", "currentVersion.filename", "Sort by current version filename"),
                    FieldOption::described("File Size", "currentVersion.filesize", "Sort by current version file size"),
                    FieldOption::described("File Category", "currentVersion.fileCategory", "Sort by current version file category"),
                    FieldOption::described("File Extension", "currentVersion.fileExtension", "Sort by current version file extension"),
                    FieldOption::described("Created By User ID", "creation.userId", "Sort by creator user ID"),
                    FieldOption::described("Modified By User ID", "modification.userId", "Sort by modifier user ID"),
                ],
            )
            .describe("Field to sort by"),
            FieldSchema::options(
                "sortOrder",
                "Sort Order",
                "DESC",
                vec![
                    FieldOption::new("Ascending", "ASC"),
                    FieldOption::new("Descending", "DESC"),
                ],
            )
            .describe("Sort order"),
        ]
    }

    async fn execute(&self, ctx: &dyn HostContext, item: usize) -> Result<Value> {
        let params = Params::new(ctx, item);
        let search_text = params.string("searchText")?;
        let filter_type = params.string_or("filterType", DEFAULT_FILTER_TYPE)?;
        let page = params.u64_or("page", 0)?;
        let size = params.u64_or("size", 20)?;
        let sort_field = params.string_or("sortField", "creation.date")?;
        let sort_order = params.string_or("sortOrder", "DESC")?;

        if !filter_types::is_known(&filter_type) {
            tracing::warn!(%filter_type, "unrecognized filter type, sending as given");
        }

        let body = json!({
            "filter": {"type": filter_type, "text": search_text},
            "sorting": [{"field": sort_field, "order": sort_order}],
            "page": page,
            "size": size,
        });
        let client = ApiClient::connect(ctx).await?;
        client.request(ApiCall::post("/assets/search", body)).await
    }
}

pub struct CreateAsset;

#[async_trait]
impl Operation for CreateAsset {
    fn info(&self) -> OperationInfo {
        OperationInfo {
            name: "createAsset",
            display_name: "Create Asset",
            description: "Create a new asset",
            action: "Create asset",
        }
    }

    fn fields(&self) -> Vec<FieldSchema> {
        vec![
            FieldSchema::string("name", "Asset Name", "")
                .required()
                .describe("Name of the asset to create"),
            FieldSchema::number("parentId", "Parent Collection ID", 1)
                .min(1)
                .required()
                .describe("ID of the parent collection where the asset will be created"),
            FieldSchema::number("typeId", "Asset Type ID", 1)
                .min(1)
                .required()
                .describe("ID of the asset type"),
            FieldSchema::string("uploadHandle", "Upload Handle", "").describe(
                "Upload handle from the upload request. Leave empty to create a placeholder asset without a file.",
            ),
            info_field_values_field(
                "Array of information field values. Example: [{\"id\": 643, \"type\": \"TEXT\", \"value\": {\"op\": \"SET\", \"value\": \"example\"}}]",
            ),
        ]
    }

    async fn execute(&self, ctx: &dyn HostContext, item: usize) -> Result<Value> {
        let params = Params::new(ctx, item);
        let name = params.string("name")?;
        let parent_id = params.u64("parentId")?;
        let type_id = params.u64("typeId")?;
        let upload_handle = params.string_or("uploadHandle", "")?;
        let field_values = information_field_values(&params)?;

        let mut body = Map::new();
        body.insert("name".into(), json!(name));
        body.insert("parentId".into(), json!(parent_id));
        body.insert("typeId".into(), json!(type_id));
        if !upload_handle.is_empty() {
            body.insert("uploadHandle".into(), json!(upload_handle));
        }
        if let Some(values) = field_values {
            body.insert("informationFieldValues".into(), Value::Array(values));
        }

        let client = ApiClient::connect(ctx).await?;
        client.request(ApiCall::post("/assets", Value::Object(body))).await
    }
}

pub struct UpdateAsset;

impl UpdateAsset {
    /// Sparse PATCH body from the item's parameters.
    fn body(params: &Params<'_>) -> Result<Map<String, Value>> {
        let mut body = Map::new();

        let name = params.string_or("name", "")?;
        if !name.is_empty() {
            body.insert("name".into(), json!(name));
        }

        let lock = params.string_or("lockOperation", "")?;
        match lock.as_str() {
            "" => {}
            "SET" | "CLEAR" => {
                body.insert("lock".into(), json!({"op": lock}));
            }
            other => {
                return Err(NodeError::parameter(format!(
                    "Lock Operation must be SET or CLEAR, got \"{other}\""
                )))
            }
        }

        if let Some(values) = information_field_values(params)? {
            body.insert("informationFieldValues".into(), Value::Array(values));
        }

        match params.json("parentIds", "Parent IDs")? {
            None => {}
            Some(Value::Object(parent_ids)) => {
                if !parent_ids.contains_key("op") {
                    return Err(NodeError::parameter(
                        "Parent IDs must contain an \"op\" key (e.g. {\"op\": \"MODIFY\", \"add\": [1]})",
                    ));
                }
                body.insert("parentIds".into(), Value::Object(parent_ids));
            }
            Some(other) => {
                return Err(NodeError::parameter(format!(
                    "Parent IDs must be a JSON object, got {other}"
                )))
            }
        }

        match params.json("availability", "Availability")? {
            None => {}
            Some(Value::Object(availability)) => {
                body.insert("availability".into(), Value::Object(availability));
            }
            Some(other) => {
                return Err(NodeError::parameter(format!(
                    "Availability must be a JSON object, got {other}"
                )))
            }
        }

        Ok(body)
    }
}

#[async_trait]
impl Operation for UpdateAsset {
    fn info(&self) -> OperationInfo {
        OperationInfo {
            name: "updateAsset",
            display_name: "Update Asset",
            description: "Update asset metadata, name, or lock status",
            action: "Update asset",
        }
    }

    fn fields(&self) -> Vec<FieldSchema> {
        vec![
            asset_id_field("ID of the asset to update"),
            FieldSchema::string("name", "Asset Name", "").describe("New name for the asset"),
            FieldSchema::options(
                "lockOperation",
                "Lock Operation",
                "",
                vec![
                    FieldOption::described("Clear Lock", "CLEAR", "Remove the lock from the asset"),
                    FieldOption::described("Set Lock", "SET", "Lock the asset"),
                ],
            )
            .describe("Lock operation to perform on the asset"),
            info_field_values_field(
                "Array of information field updates. Each field should have: id, type, and value with op (SET/MODIFY/etc). Example: [{\"id\": 643, \"type\": \"TEXT\", \"value\": {\"op\": \"SET\", \"value\": \"example\"}}]",
            ),
            FieldSchema::json("parentIds", "Parent IDs", "").describe(
                "Parent collection changes. Must include \"op\". Example: {\"op\": \"MODIFY\", \"add\": [1, 2], \"remove\": [3]}",
            ),
            FieldSchema::json("availability", "Availability", "")
                .describe("Availability settings forwarded as given, e.g. {\"from\": \"2024-01-01T00:00:00Z\"}"),
        ]
    }

    async fn execute(&self, ctx: &dyn HostContext, item: usize) -> Result<Value> {
        let params = Params::new(ctx, item);
        let asset_id = params.u64("assetId")?;
        let body = Self::body(&params)?;
        if body.is_empty() {
            tracing::debug!(asset_id, "update has no fields; sending empty PATCH");
        }

        let client = ApiClient::connect(ctx).await?;
        client
            .request(ApiCall::patch(format!("/assets/{asset_id}"), Value::Object(body)))
            .await
    }
}

pub struct DeleteAsset;

#[async_trait]
impl Operation for DeleteAsset {
    fn info(&self) -> OperationInfo {
        OperationInfo {
            name: "deleteAsset",
            display_name: "Delete Asset",
            description: "Delete an asset by ID",
            action: "Delete asset",
        }
    }

    fn fields(&self) -> Vec<FieldSchema> {
        vec![asset_id_field("ID of the asset to delete")]
    }

    async fn execute(&self, ctx: &dyn HostContext, item: usize) -> Result<Value> {
        let params = Params::new(ctx, item);
        let asset_id = params.u64("assetId")?;

        let client = ApiClient::connect(ctx).await?;
        let response = client
            .request(ApiCall::delete(format!("/assets/{asset_id}")))
            .await?;

        let mut out = match response {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        out.insert("success".into(), Value::Bool(true));
        out.insert(
            "message".into(),
            json!(format!("Asset {asset_id} deleted successfully")),
        );
        Ok(Value::Object(out))
    }
}
