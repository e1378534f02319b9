//! Search filter types accepted by `POST /assets/search`.

use crate::schema::FieldOption;

/// (display name, value, description) of every filter type.
pub const FILTER_TYPES: &[(&str, &str, &str)] = &[
    ("Full Text", "ASSET_FULLTEXT", "Search across all text fields (most common)"),
    ("Asset Name", "ASSET_NAME", "Filter by asset name"),
    ("Asset ID", "ASSET_ID", "Filter by specific asset ID"),
    ("Asset ID Range", "ASSET_ID_RANGE", "Filter by asset ID range"),
    ("File Name", "ASSET_FILE_NAME", "Filter by current version filename"),
    ("File Extension", "ASSET_FILE_EXTENSION", "Filter by file extension"),
    ("File Extension Empty", "ASSET_FILE_EXTENSION_EMPTY", "Find assets with no file extension"),
    ("File Category", "ASSET_FILE_CATEGORY", "Filter by file category"),
    ("Checksum", "ASSET_CHECKSUM", "Filter by file checksum"),
    ("Asset Type ID", "ASSET_TYPE_ID", "Filter by asset type"),
    ("Parent Collection ID", "ASSET_PARENT_ID", "Filter by parent collection"),
    ("Collection Type ID", "ASSET_COLLECTION_TYPE_ID", "Filter by collection type"),
    ("Creation Date (Exact)", "ASSET_CREATION_DATE_EQUALITY", "Filter by exact creation date"),
    ("Creation Date Range", "ASSET_CREATION_DATE_RANGE", "Filter by creation date range"),
    ("Modification Date (Exact)", "ASSET_MODIFICATION_DATE_EQUALITY", "Filter by exact modification date"),
    ("Modification Date Range", "ASSET_MODIFICATION_DATE_RANGE", "Filter by modification date range"),
    ("Version Creation Date Range", "ASSET_VERSIONED_DATE_RANGE", "Filter by current version creation date range"),
    ("Version Creation Date (Exact)", "ASSET_VERSIONED_DATE_EQUALITY", "Filter by exact current version creation date"),
    ("Availability Date Range", "ASSET_AVAILABILITY_DATE_RANGE", "Filter by availability date range"),
    ("Expiration Date Range", "ASSET_EXPIRATION_DATE_RANGE", "Filter by expiration date range"),
    ("Created By User ID", "ASSET_CREATION_USER_ID", "Filter by creator user ID"),
    ("Modified By User ID", "ASSET_MODIFICATION_USER_ID", "Filter by modifier user ID"),
    ("Version Created By User ID", "ASSET_VERSIONED_USER_ID", "Filter by version creator user ID"),
    ("Availability", "ASSET_AVAILABILITY", "Filter by asset availability status"),
    ("Content", "ASSET_CONTENT", "Filter by asset content"),
    ("Text Information Field", "ASSET_TEXT_INFORMATION_FIELD", "Filter by text information field value"),
    ("Text Area Information Field", "ASSET_TEXT_AREA_INFORMATION_FIELD", "Filter by text area information field value"),
    ("Localized Text Information Field", "ASSET_LOCALIZED_TEXT_INFORMATION_FIELD", "Filter by localized text information field"),
    ("Localized Text Area Information Field", "ASSET_LOCALIZED_TEXT_AREA_INFORMATION_FIELD", "Filter by localized text area information field"),
    ("Date Information Field (Exact)", "ASSET_DATE_INFORMATION_FIELD_EQUALITY", "Filter by exact date information field value"),
    ("Date Information Field Range", "ASSET_DATE_INFORMATION_FIELD_RANGE", "Filter by date information field range"),
    ("Number Information Field (Exact)", "ASSET_NUMBER_INFORMATION_FIELD_EQUALITY", "Filter by exact number information field value"),
    ("Number Information Field Range", "ASSET_NUMBER_INFORMATION_FIELD_RANGE", "Filter by number information field range"),
    ("Double Information Field (Exact)", "ASSET_DOUBLE_INFORMATION_FIELD_EQUALITY", "Filter by exact double information field value"),
    ("Double Information Field Range", "ASSET_DOUBLE_INFORMATION_FIELD_RANGE", "Filter by double information field range"),
    ("Boolean Information Field", "ASSET_BOOLEAN_INFORMATION_FIELD", "Filter by boolean information field value"),
    ("Dropdown Information Field", "ASSET_DROPDOWN_INFORMATION_FIELD_EQUALITY", "Filter by dropdown information field value"),
    ("Collection Reference Information Field", "ASSET_COLLECTION_REFERENCE_INFORMATION_FIELD_EQUALITY", "Filter by collection reference information field"),
    ("Collection Reference Information Field Names", "ASSET_COLLECTION_REFERENCE_INFORMATION_FIELD_NAMES", "Filter by collection reference field names"),
    ("Tag Reference Information Field", "ASSET_TAG_REFERENCE_INFORMATION_FIELD_EQUALITY", "Filter by tag reference information field"),
    ("Tag Reference Information Field Names", "ASSET_TAG_REFERENCE_INFORMATION_FIELD_NAMES", "Filter by tag reference field names"),
    ("Information Field Empty", "ASSET_INFORMATION_FIELD_EMPTY", "Find assets with empty information field"),
    ("Text File Property", "ASSET_TEXT_FILE_PROPERTY", "Filter by text file property"),
    ("Number File Property (Exact)", "ASSET_NUMBER_FILE_PROPERTY_EQUALITY", "Filter by exact number file property value"),
    ("Number File Property Range", "ASSET_NUMBER_FILE_PROPERTY_RANGE", "Filter by number file property range"),
    ("Double File Property (Exact)", "ASSET_DOUBLE_FILE_PROPERTY_EQUALITY", "Filter by exact double file property value"),
    ("Double File Property Range", "ASSET_DOUBLE_FILE_PROPERTY_RANGE", "Filter by double file property range"),
    ("Date File Property (Exact)", "ASSET_DATE_FILE_PROPERTY_EQUALITY", "Filter by exact date file property value"),
    ("Date File Property Range", "ASSET_DATE_FILE_PROPERTY_RANGE", "Filter by date file property range"),
    ("Boolean File Property", "ASSET_BOOLEAN_FILE_PROPERTY", "Filter by boolean file property"),
    ("Logical (AND/OR/NOT)", "ASSET_LOGICAL", "Combine multiple filters with logical operators"),
    ("Negation", "ASSET_NEGATION", "Negate another filter"),
];

pub const DEFAULT_FILTER_TYPE: &str = "ASSET_FULLTEXT";

pub fn is_known(value: &str) -> bool {
    FILTER_TYPES.iter().any(|(_, v, _)| *v == value)
}

pub fn filter_type_options() -> Vec<FieldOption> {
    FILTER_TYPES
        .iter()
        .map(|(name, value, description)| FieldOption::described(name, *value, description))
        .collect()
}
