use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::components::{Components, SchemaRegistry};
use super::operation::PathItem;
use super::schema::SchemaOrRef;
use super::server::Server;

/// Info object describing the API.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Info {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Info {
    /// The title, unless it is absent or empty.
    pub fn title_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => fallback,
        }
    }
}

/// Top-level Swagger 2.0 document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwaggerSpec {
    /// `"2.0"`, though unquoted YAML turns it into a number.
    pub swagger: serde_json::Value,

    pub info: Info,

    /// `host[:port]`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(rename = "basePath", skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub produces: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumes: Option<Vec<String>>,

    pub paths: IndexMap<String, PathItem>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub definitions: IndexMap<String, SchemaOrRef>,
}

/// Top-level OpenAPI 3.x document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenApiSpec {
    /// `"3.0.3"`; unquoted YAML such as `3.0` arrives as a number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openapi: Option<serde_json::Value>,

    pub info: Info,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,

    pub paths: IndexMap<String, PathItem>,

    #[serde(default)]
    pub components: Components,
}

impl OpenApiSpec {
    /// The `openapi` field as text, whether it was written quoted or not.
    pub fn version_text(&self) -> Option<String> {
        match self.openapi.as_ref()? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

/// A dereferenced document of either supported version.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiDocument {
    Swagger(SwaggerSpec),
    OpenApi(OpenApiSpec),
}

impl ApiDocument {
    pub fn version(&self) -> SpecVersion {
        match self {
            ApiDocument::Swagger(_) => SpecVersion::Swagger2,
            ApiDocument::OpenApi(_) => SpecVersion::OpenApi3,
        }
    }

    pub fn paths(&self) -> &IndexMap<String, PathItem> {
        match self {
            ApiDocument::Swagger(spec) => &spec.paths,
            ApiDocument::OpenApi(spec) => &spec.paths,
        }
    }

    /// The named schemas `$ref` nodes resolve against.
    pub fn schemas(&self) -> SchemaRegistry<'_> {
        match self {
            ApiDocument::Swagger(spec) => {
                SchemaRegistry::new(SchemaRegistry::SWAGGER_PREFIX, &spec.definitions)
            }
            ApiDocument::OpenApi(spec) => {
                SchemaRegistry::new(SchemaRegistry::OPENAPI_PREFIX, &spec.components.schemas)
            }
        }
    }
}

/// Which description format a document follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecVersion {
    Swagger2,
    OpenApi3,
}
