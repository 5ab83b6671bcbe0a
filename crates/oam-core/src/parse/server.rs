use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::Header;

/// A server variable for URL templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerVariable {
    /// Usually a string; YAML documents sometimes write bare numbers (`8080`).
    pub default: serde_json::Value,
}

impl ServerVariable {
    /// The default value as it should be spliced into a URL.
    pub fn default_text(&self) -> String {
        match &self.default {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

/// A server URL definition, including the mock proxy extensions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Server {
    pub url: String,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub variables: IndexMap<String, ServerVariable>,

    #[serde(rename = "x-proxy-mode", skip_serializing_if = "Option::is_none")]
    pub proxy_mode: Option<bool>,

    #[serde(rename = "x-proxy-host", skip_serializing_if = "Option::is_none")]
    pub proxy_host: Option<String>,

    #[serde(rename = "x-proxy-req-headers", skip_serializing_if = "Option::is_none")]
    pub proxy_req_headers: Option<Vec<Header>>,

    #[serde(rename = "x-proxy-res-headers", skip_serializing_if = "Option::is_none")]
    pub proxy_res_headers: Option<Vec<Header>>,
}
