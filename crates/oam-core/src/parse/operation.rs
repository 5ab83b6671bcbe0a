use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::response::Response;
use crate::model::HttpMethod;

/// An API operation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Operation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Swagger 2.0 only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub produces: Option<Vec<String>>,

    /// Swagger 2.0 only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumes: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub responses: IndexMap<String, Response>,
}

impl Operation {
    /// Route documentation: the first non-empty of `summary` and `description`.
    pub fn documentation(&self) -> &str {
        [&self.summary, &self.description]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|text| !text.is_empty())
            .unwrap_or("")
    }
}

/// A path item: its operations in declaration order.
///
/// Keys outside the supported method set (`parameters`, `summary`, `trace`,
/// vendor extensions, ...) are not materialised as operations.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "IndexMap<String, serde_json::Value>")]
pub struct PathItem {
    pub operations: Vec<(HttpMethod, Operation)>,
    #[serde(skip)]
    pub skipped_keys: Vec<String>,
}

impl TryFrom<IndexMap<String, serde_json::Value>> for PathItem {
    type Error = serde_json::Error;

    fn try_from(entries: IndexMap<String, serde_json::Value>) -> Result<Self, Self::Error> {
        let mut item = PathItem::default();
        for (key, value) in entries {
            match HttpMethod::from_key(&key) {
                Some(method) => {
                    let op: Operation = serde_json::from_value(value)?;
                    item.operations.push((method, op));
                }
                None => item.skipped_keys.push(key),
            }
        }
        Ok(item)
    }
}
