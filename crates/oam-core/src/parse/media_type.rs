use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::schema::SchemaOrRef;

/// A named example attached to an OpenAPI 3 media type.
///
/// The `x-*` fields carry response-selection settings for the mock server.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Example {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,

    /// Raw rule list; entries are validated one by one during conversion.
    #[serde(rename = "x-rules", skip_serializing_if = "Option::is_none")]
    pub rules: Option<serde_json::Value>,

    #[serde(rename = "x-rules-operator", skip_serializing_if = "Option::is_none")]
    pub rules_operator: Option<String>,

    #[serde(rename = "x-disable-templating", skip_serializing_if = "Option::is_none")]
    pub disable_templating: Option<bool>,
}

/// A media type object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MediaType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaOrRef>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub examples: IndexMap<String, Example>,
}
