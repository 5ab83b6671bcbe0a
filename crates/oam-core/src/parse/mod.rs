pub mod components;
pub mod media_type;
pub mod operation;
pub mod ref_resolve;
pub mod response;
pub mod schema;
pub mod server;
pub mod spec;

use serde_json::Value;

use crate::error::{ConvertError, ParseError, ResolveError};
use ref_resolve::RefResolver;
use spec::{ApiDocument, OpenApiSpec, SpecVersion, SwaggerSpec};

/// Source text encoding of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    /// YAML, which also accepts JSON input.
    Yaml,
}

impl SourceFormat {
    /// Pick a format from a file extension; anything but `.json` is read as YAML.
    pub fn from_extension(ext: Option<&str>) -> Self {
        match ext {
            Some(ext) if ext.eq_ignore_ascii_case("json") => SourceFormat::Json,
            _ => SourceFormat::Yaml,
        }
    }
}

/// Parse a raw document from YAML.
///
/// Non-string mapping keys (`200:` under `responses`) are turned into strings.
pub fn from_yaml(input: &str) -> Result<Value, ParseError> {
    let yaml: serde_yaml_ng::Value = serde_yaml_ng::from_str(input)?;
    Ok(serde_json::to_value(yaml)?)
}

/// Parse a raw document from JSON.
pub fn from_json(input: &str) -> Result<Value, ParseError> {
    Ok(serde_json::from_str(input)?)
}

/// Parse a raw document in the given format.
pub fn from_str(input: &str, format: SourceFormat) -> Result<Value, ParseError> {
    match format {
        SourceFormat::Json => from_json(input),
        SourceFormat::Yaml => from_yaml(input),
    }
}

/// Resolve internal `$ref`s, leaving named schema refs and circular ones in place.
pub fn dereference(raw: &Value) -> Result<Value, ResolveError> {
    RefResolver::new(raw).resolve_document()
}

/// Classify a document: a top-level `swagger` field marks Swagger 2.0,
/// everything else is treated as OpenAPI 3.
pub fn detect_version(document: &Value) -> SpecVersion {
    if document.get("swagger").is_some() {
        SpecVersion::Swagger2
    } else {
        SpecVersion::OpenApi3
    }
}

/// Deserialize a dereferenced document into the typed model of its version.
pub fn load_document(document: Value) -> Result<ApiDocument, ParseError> {
    if !document.is_object() {
        return Err(ParseError::Malformed(
            "document root must be a mapping".to_string(),
        ));
    }
    for field in ["info", "paths"] {
        if document.get(field).is_none() {
            return Err(ParseError::Malformed(format!(
                "missing required field `{field}`"
            )));
        }
    }

    match detect_version(&document) {
        SpecVersion::Swagger2 => {
            let spec: SwaggerSpec = serde_json::from_value(document)?;
            Ok(ApiDocument::Swagger(spec))
        }
        SpecVersion::OpenApi3 => {
            let spec: OpenApiSpec = serde_json::from_value(document)?;
            match spec.version_text().as_deref() {
                Some(v) if v.starts_with("3.") => {}
                other => log::warn!(
                    "document has no `swagger` field and `openapi` is {other:?}; reading it as OpenAPI 3"
                ),
            }
            Ok(ApiDocument::OpenApi(spec))
        }
    }
}

/// Parse, dereference and load a document held in memory.
pub fn parse_document(input: &str, format: SourceFormat) -> Result<ApiDocument, ConvertError> {
    let raw = from_str(input, format)?;
    let resolved = dereference(&raw)?;
    Ok(load_document(resolved)?)
}
