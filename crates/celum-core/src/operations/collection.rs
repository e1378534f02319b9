//! Collection operations.

use super::{Operation, OperationInfo};
use crate::client::{ApiCall, ApiClient, ResponseOptions};
use crate::context::HostContext;
use crate::error::Result;
use crate::http::QueryParams;
use crate::params::{parse_id_list, Params};
use crate::schema::{diagnostic_fields, locale_field, FieldSchema};
use async_trait::async_trait;
use serde_json::{json, Value};

fn collection_id_field(name: &str, display_name: &str, description: &str) -> FieldSchema {
    FieldSchema::number(name, display_name, 1)
        .min(1)
        .required()
        .describe(description)
}

pub struct SearchCollections;

impl SearchCollections {
    fn query(params: &Params<'_>) -> Result<QueryParams> {
        let locale = params.string_or("locale", "en")?;
        // Accepts a number or free text; only the leading integer counts.
        let parent_id = parse_id_list(&params.string_or("parentId", "")?)
            .into_iter()
            .next()
            .filter(|id| *id > 0);
        let search_text = params.string_or("searchText", "")?;
        let recursive = params.bool_or("recursive", false)?;
        let page = params.u64_or("page", 1)?;
        let size = params.u64_or("size", 20)?;

        let mut query = QueryParams::new();
        if !locale.is_empty() {
            query.push("locale", locale);
        }
        if let Some(id) = parent_id {
            query.push("parentId", id);
        }
        let search_text = search_text.trim();
        if !search_text.is_empty() {
            query.push("searchText", search_text);
        }
        if recursive {
            query.push("recursive", true);
        }
        if page >= 1 {
            query.push("page", page);
        }
        if size > 0 {
            query.push("size", size);
        }
        Ok(query)
    }
}

#[async_trait]
impl Operation for SearchCollections {
    fn info(&self) -> OperationInfo {
        OperationInfo {
            name: "searchCollections",
            display_name: "Search Collections",
            description: "Search for collections by name or parent",
            action: "Search collections",
        }
    }

    fn fields(&self) -> Vec<FieldSchema> {
        let mut fields = vec![
            locale_field(),
            FieldSchema::string("parentId", "Parent Collection ID", "").describe(
                "Filter collections by parent collection ID. Enter a number or use an expression.",
            ),
            FieldSchema::string("searchText", "Search Text", "").describe("Search collections by name"),
            FieldSchema::boolean("recursive", "Recursive", false)
                .describe("Include sub-collections in the search"),
            FieldSchema::number("page", "Page", 1)
                .min(1)
                .describe("Page number (1-indexed, starts at 1)"),
            FieldSchema::number("size", "Page Size", 20)
                .min(1)
                .max(100)
                .describe("Number of results per page"),
        ];
        fields.extend(diagnostic_fields());
        fields
    }

    async fn execute(&self, ctx: &dyn HostContext, item: usize) -> Result<Value> {
        let params = Params::new(ctx, item);
        let query = Self::query(&params)?;
        let opts = ResponseOptions::from_params(&params)?;
        tracing::debug!(query = %query.to_json(), "searching collections");

        let client = ApiClient::connect(ctx).await?;
        client
            .request_with(ApiCall::get("/collections").with_query(query), opts)
            .await
    }
}

pub struct GetCollection;

#[async_trait]
impl Operation for GetCollection {
    fn info(&self) -> OperationInfo {
        OperationInfo {
            name: "getCollection",
            display_name: "Get Collection",
            description: "Get a specific collection by ID",
            action: "Get collection",
        }
    }

    fn fields(&self) -> Vec<FieldSchema> {
        let mut fields = vec![
            collection_id_field("collectionId", "Collection ID", "ID of the collection to retrieve"),
            locale_field(),
        ];
        fields.extend(diagnostic_fields());
        fields
    }

    async fn execute(&self, ctx: &dyn HostContext, item: usize) -> Result<Value> {
        let params = Params::new(ctx, item);
        let collection_id = params.u64("collectionId")?;
        let locale = params.string_or("locale", "en")?;
        let opts = ResponseOptions::from_params(&params)?;

        let mut query = QueryParams::new();
        if !locale.is_empty() {
            query.push("locale", locale);
        }
        let client = ApiClient::connect(ctx).await?;
        client
            .request_with(
                ApiCall::get(format!("/collections/{collection_id}")).with_query(query),
                opts,
            )
            .await
    }
}

pub struct CreateCollection;

#[async_trait]
impl Operation for CreateCollection {
    fn info(&self) -> OperationInfo {
        OperationInfo {
            name: "createCollection",
            display_name: "Create Collection",
            description: "Create a new collection",
            action: "Create collection",
        }
    }

    fn fields(&self) -> Vec<FieldSchema> {
        let mut fields = vec![
            FieldSchema::string("name", "Collection Name", "")
                .required()
                .describe("Name of the collection to create"),
            collection_id_field(
                "parentId",
                "Parent Collection ID",
                "ID of the parent collection where the new collection will be created",
            ),
        ];
        fields.extend(diagnostic_fields());
        fields
    }

    async fn execute(&self, ctx: &dyn HostContext, item: usize) -> Result<Value> {
        let params = Params::new(ctx, item);
        let name = params.string("name")?;
        let parent_id = params.u64("parentId")?;
        let opts = ResponseOptions::from_params(&params)?;

        let client = ApiClient::connect(ctx).await?;
        client
            .request_with(
                ApiCall::post("/collections", json!({"name": name, "parentId": parent_id})),
                opts,
            )
            .await
    }
}
