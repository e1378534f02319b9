//! Asset type lookup.

use super::{Operation, OperationInfo};
use crate::client::{ApiCall, ApiClient};
use crate::context::HostContext;
use crate::error::Result;
use crate::http::QueryParams;
use crate::params::Params;
use crate::schema::{locale_field, FieldSchema};
use async_trait::async_trait;
use serde_json::Value;

pub struct GetAssetType;

#[async_trait]
impl Operation for GetAssetType {
    fn info(&self) -> OperationInfo {
        OperationInfo {
            name: "getAssetType",
            display_name: "Get Asset Type",
            description: "Get asset type definition with information fields",
            action: "Get asset type",
        }
    }

    fn fields(&self) -> Vec<FieldSchema> {
        vec![
            FieldSchema::number("assetTypeId", "Asset Type ID", 1)
                .min(1)
                .required()
                .describe("ID of the asset type to retrieve"),
            locale_field(),
        ]
    }

    async fn execute(&self, ctx: &dyn HostContext, item: usize) -> Result<Value> {
        let params = Params::new(ctx, item);
        let asset_type_id = params.u64("assetTypeId")?;
        let locale = params.string_or("locale", "en")?;

        let mut query = QueryParams::new();
        if !locale.is_empty() {
            query.push("locale", locale);
        }
        let client = ApiClient::connect(ctx).await?;
        client
            .request(ApiCall::get(format!("/asset-types/{asset_type_id}")).with_query(query))
            .await
    }
}
