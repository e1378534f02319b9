//! Upload flow: request a location, push the bytes, register a version.

use super::{Operation, OperationInfo};
use crate::client::{ApiCall, ApiClient, ResponseOptions};
use crate::context::HostContext;
use crate::error::{NodeError, Result};
use crate::params::Params;
use crate::schema::{full_response_field, FieldOption, FieldSchema};
use crate::upload::{self, BodyContentType, UploadTarget};
use async_trait::async_trait;
use serde_json::{json, Map, Value};

fn version_call(asset_id: u64, filename: &str, upload_handle: &str) -> ApiCall {
    ApiCall::post(
        format!("/assets/{asset_id}/versions"),
        json!({"filename": filename, "uploadHandle": upload_handle}),
    )
}

pub struct CreateAssetVersion;

#[async_trait]
impl Operation for CreateAssetVersion {
    fn info(&self) -> OperationInfo {
        OperationInfo {
            name: "createAssetVersion",
            display_name: "Create Asset Version",
            description: "Add a new version to an existing asset",
            action: "Create asset version",
        }
    }

    fn fields(&self) -> Vec<FieldSchema> {
        vec![
            FieldSchema::number("assetId", "Asset ID", 1)
                .min(1)
                .required()
                .describe("ID of the asset to add a version to"),
            FieldSchema::string("filename", "Filename", "")
                .required()
                .describe("Filename for the new version"),
            FieldSchema::string("uploadHandle", "Upload Handle", "")
                .required()
                .describe("Upload handle from the upload request"),
        ]
    }

    async fn execute(&self, ctx: &dyn HostContext, item: usize) -> Result<Value> {
        let params = Params::new(ctx, item);
        let asset_id = params.u64("assetId")?;
        let filename = params.string("filename")?;
        let upload_handle = params.string("uploadHandle")?;

        let client = ApiClient::connect(ctx).await?;
        client
            .request(version_call(asset_id, &filename, &upload_handle))
            .await
    }
}

pub struct RequestUploadLocation;

#[async_trait]
impl Operation for RequestUploadLocation {
    fn info(&self) -> OperationInfo {
        OperationInfo {
            name: "requestUploadLocation",
            display_name: "Request Upload Location",
            description: "Request an upload URL and handle for file uploads",
            action: "Request upload location",
        }
    }

    fn fields(&self) -> Vec<FieldSchema> {
        vec![
            FieldSchema::string("filename", "Filename", "")
                .required()
                .describe("Name of the file to upload"),
            FieldSchema::number("filesize", "File Size", 1)
                .min(1)
                .required()
                .describe("Size of the file in bytes"),
            full_response_field(),
        ]
    }

    async fn execute(&self, ctx: &dyn HostContext, item: usize) -> Result<Value> {
        let params = Params::new(ctx, item);
        let filename = params.string("filename")?;
        let filesize = params.u64("filesize")?;
        let opts = ResponseOptions {
            full_response: params.bool_or("returnFullResponse", false)?,
            ..ResponseOptions::default()
        };

        let client = ApiClient::connect(ctx).await?;
        client
            .request_with(
                ApiCall::post("/upload", json!({"filename": filename, "filesize": filesize})),
                opts,
            )
            .await
    }
}

pub struct UploadBinary;

/// Follow-up version creation, validated before any bytes are sent.
struct VersionRequest {
    asset_id: u64,
    filename: String,
    upload_handle: String,
}

impl VersionRequest {
    fn from_params(params: &Params<'_>) -> Result<Option<Self>> {
        if !params.bool_or("createVersion", false)? {
            return Ok(None);
        }
        let upload_handle = params.string_or("uploadHandle", "")?;
        if upload_handle.trim().is_empty() {
            return Err(NodeError::parameter(
                "Upload handle is required when creating a version",
            ));
        }
        let asset_id = params.u64("assetId")?;
        let filename = params.string_or("filename", "")?;
        if filename.trim().is_empty() {
            return Err(NodeError::parameter(
                "Filename is required when creating a version",
            ));
        }
        Ok(Some(Self {
            asset_id,
            filename,
            upload_handle,
        }))
    }
}

#[async_trait]
impl Operation for UploadBinary {
    fn info(&self) -> OperationInfo {
        OperationInfo {
            name: "uploadBinary",
            display_name: "Upload Binary",
            description: "Upload a binary file and optionally create a new asset version",
            action: "Upload binary file",
        }
    }

    fn fields(&self) -> Vec<FieldSchema> {
        let when_versioning = || vec![Value::Bool(true)];
        vec![
            FieldSchema::string("uploadUrl", "Upload URL", "")
                .required()
                .describe("The upload URL from the upload location request (where to upload the binary file)")
                .placeholder("https://upload.example.com/path/to/upload"),
            FieldSchema::string("binaryPropertyName", "Binary Property", "data")
                .required()
                .describe("Name of the binary property that contains the file to upload")
                .hint("The binary property name from the input item"),
            FieldSchema::options(
                "bodyContentType",
                "Body Content Type",
                "raw",
                vec![
                    FieldOption::described("Raw Binary", "raw", "Upload as raw binary data (PUT request)"),
                    FieldOption::described("Form-Data", "formData", "Upload as form-data/multipart (POST request)"),
                ],
            )
            .describe("How to send the binary file"),
            FieldSchema::string("formFieldName", "Form Field Name", "file")
                .required()
                .describe("Name of the form field for the file (used when Body Content Type is Form-Data)")
                .show_when("bodyContentType", vec![json!("formData")]),
            FieldSchema::boolean("detectPresignedUrl", "Detect Presigned URL", true).describe(
                "Whether to omit the API key header when the upload URL is a presigned object-storage URL",
            ),
            FieldSchema::boolean("createVersion", "Create Version After Upload", false)
                .describe("Whether to create a new asset version after uploading the file"),
            FieldSchema::string("uploadHandle", "Upload Handle", "")
                .required()
                .describe("The upload handle from the upload location request (required for version creation)")
                .show_when("createVersion", when_versioning()),
            FieldSchema::number("assetId", "Asset ID", 1)
                .min(1)
                .required()
                .describe("ID of the asset to add a version to")
                .show_when("createVersion", when_versioning()),
            FieldSchema::string("filename", "Filename", "")
                .required()
                .describe("Filename for the version (required when creating version)")
                .show_when("createVersion", when_versioning()),
        ]
    }

    async fn execute(&self, ctx: &dyn HostContext, item: usize) -> Result<Value> {
        let params = Params::new(ctx, item);
        let upload_url = params.string_or("uploadUrl", "")?;
        if upload_url.trim().is_empty() {
            return Err(NodeError::parameter("Upload URL is required"));
        }
        let property = params.string_or("binaryPropertyName", "data")?;
        let content_type: BodyContentType = params.string_or("bodyContentType", "raw")?.parse()?;
        let target = UploadTarget {
            url: upload_url.clone(),
            content_type,
            form_field: params.string_or("formFieldName", "file")?,
            detect_presigned: params.bool_or("detectPresignedUrl", true)?,
        };
        let version = VersionRequest::from_params(&params)?;

        let binary = ctx.binary(item, &property).await.ok_or_else(|| {
            NodeError::parameter(format!("No binary data found in property \"{property}\""))
        })?;

        let client = ApiClient::connect(ctx).await?;
        upload::upload_binary(&client, &target, binary).await?;

        let mut out = Map::new();
        out.insert("uploadUrl".into(), json!(upload_url));
        out.insert("uploaded".into(), Value::Bool(true));

        match version {
            None => {
                out.insert("versionCreated".into(), Value::Bool(false));
            }
            Some(v) => {
                let created = client
                    .request(version_call(v.asset_id, &v.filename, &v.upload_handle))
                    .await
                    .inspect_err(|e| {
                        tracing::warn!(
                            asset_id = v.asset_id,
                            "upload succeeded but version creation failed: {}",
                            e
                        )
                    })?;
                out.insert("uploadHandle".into(), json!(v.upload_handle));
                out.insert("version".into(), created);
                out.insert("versionCreated".into(), Value::Bool(true));
            }
        }
        Ok(Value::Object(out))
    }
}
