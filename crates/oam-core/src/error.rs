use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed document: {0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("reference target not found: {0}")]
    RefTargetNotFound(String),

    #[error("external references are not supported: {0}")]
    ExternalRef(String),

    #[error("invalid reference format: {0}")]
    InvalidRefFormat(String),
}

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("resolve error: {0}")]
    Resolve(#[from] ResolveError),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("OpenAPI 3 document declares no servers; cannot derive port or path prefix")]
    MissingServer,

    #[error("server variable `{0}` is referenced in the URL but not declared")]
    UndeclaredServerVariable(String),

    #[error("invalid server URL `{url}`: {source}")]
    InvalidServerUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}
