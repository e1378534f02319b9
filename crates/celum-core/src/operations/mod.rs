//! Operation handlers and the static registry.
//!
//! Each operation maps its declared parameters onto one REST call (two for
//! uploadBinary) and returns the JSON that becomes the item's output.

mod asset;
mod asset_type;
mod collection;
pub mod filter_types;
mod upload;

pub use asset::{CreateAsset, DeleteAsset, GetAsset, SearchAssets, UpdateAsset};
pub use asset_type::GetAssetType;
pub use collection::{CreateCollection, GetCollection, SearchCollections};
pub use upload::{CreateAssetVersion, RequestUploadLocation, UploadBinary};

use crate::context::HostContext;
use crate::error::Result;
use crate::schema::FieldSchema;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::OnceLock;

/// Name and labels shown in the host's operation picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationInfo {
    pub name: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub action: &'static str,
}

#[async_trait]
pub trait Operation: Send + Sync {
    fn info(&self) -> OperationInfo;

    fn fields(&self) -> Vec<FieldSchema>;

    /// Run for item `item`. Parameter errors are returned before any request is sent.
    async fn execute(&self, ctx: &dyn HostContext, item: usize) -> Result<Value>;
}

/// Every supported operation, in picker order.
pub fn registry() -> &'static [Box<dyn Operation>] {
    static REGISTRY: OnceLock<Vec<Box<dyn Operation>>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        vec![
            Box::new(CreateAsset),
            Box::new(CreateAssetVersion),
            Box::new(DeleteAsset),
            Box::new(GetAsset),
            Box::new(SearchAssets),
            Box::new(UpdateAsset),
            Box::new(RequestUploadLocation),
            Box::new(UploadBinary),
            Box::new(SearchCollections),
            Box::new(GetCollection),
            Box::new(CreateCollection),
            Box::new(GetAssetType),
        ]
    })
}

pub fn find(name: &str) -> Option<&'static dyn Operation> {
    registry()
        .iter()
        .find(|op| op.info().name == name)
        .map(|op| op.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn registry_has_twelve_unique_operations() {
        let names: HashSet<_> = registry().iter().map(|op| op.info().name).collect();
        assert_eq!(names.len(), 12);
        for name in [
            "getAsset",
            "searchAssets",
            "createAsset",
            "updateAsset",
            "deleteAsset",
            "createAssetVersion",
            "requestUploadLocation",
            "uploadBinary",
            "searchCollections",
            "createCollection",
            "getCollection",
            "getAssetType",
        ] {
            assert!(find(name).is_some(), "missing {name}");
        }
        assert!(find("listEverything").is_none());
    }

    #[test]
    fn field_names_are_unique_per_operation() {
        for op in registry() {
            let fields = op.fields();
            let names: HashSet<_> = fields.iter().map(|f| f.name.as_str()).collect();
            assert_eq!(names.len(), fields.len(), "{}", op.info().name);
        }
    }
}
