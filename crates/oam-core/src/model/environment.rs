use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::status::StatusCode;

/// HTTP method of a mock route. Only these methods are imported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
        HttpMethod::Head,
        HttpMethod::Options,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Patch => "patch",
            HttpMethod::Delete => "delete",
            HttpMethod::Head => "head",
            HttpMethod::Options => "options",
        }
    }

    /// Match a path item key. Keys are compared as declared, so `GET` is not a method.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == key)
    }
}

/// A header key/value pair. An empty value is left for the user or the
/// serving engine to fill in.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Header {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: String,
}

impl Header {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn content_type(value: impl Into<String>) -> Self {
        Self::new("Content-Type", value)
    }
}

/// Part of the incoming request a rule inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleTarget {
    Body,
    Query,
    Header,
    Cookie,
    Params,
    RequestNumber,
}

/// A response selection predicate, evaluated by the serving engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseRule {
    pub target: RuleTarget,
    #[serde(default)]
    pub modifier: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub is_regex: bool,
}

/// How a response's rules combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RulesOperator {
    #[default]
    #[serde(rename = "OR")]
    Or,
    #[serde(rename = "AND")]
    And,
}

impl RulesOperator {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "OR" => Some(RulesOperator::Or),
            "AND" => Some(RulesOperator::And),
            _ => None,
        }
    }
}

/// One candidate response of a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResponse {
    pub uuid: Uuid,
    /// Literal text or a template containing placeholder tokens.
    pub body: String,
    pub latency: u64,
    pub status_code: StatusCode,
    pub label: String,
    /// Always starts with a `Content-Type` entry.
    pub headers: Vec<Header>,
    pub file_path: String,
    pub send_file_as_body: bool,
    pub rules: Vec<ResponseRule>,
    pub rules_operator: RulesOperator,
    pub disable_templating: bool,
}

/// One path + method operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub uuid: Uuid,
    pub documentation: String,
    pub method: HttpMethod,
    /// Path template without leading slash, parameters in `:name` form.
    pub endpoint: String,
    /// Never empty.
    pub responses: Vec<RouteResponse>,
    pub enabled: bool,
    pub random_response: bool,
}

/// A complete mock API, ready for the serving engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    pub uuid: Uuid,
    pub last_migration: u32,
    pub name: String,
    pub endpoint_prefix: String,
    pub latency: u64,
    pub port: u16,
    pub routes: Vec<Route>,
    pub proxy_mode: bool,
    pub proxy_host: String,
    pub proxy_req_headers: Vec<Header>,
    pub proxy_res_headers: Vec<Header>,
    pub https: bool,
    pub cors: bool,
    pub headers: Vec<Header>,
}
