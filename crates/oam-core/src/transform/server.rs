use url::Url;

use super::params::substitute_server_variables;
use crate::error::ConvertError;
use crate::model::Header;
use crate::parse::spec::{OpenApiSpec, SwaggerSpec};

const SWAGGER_DEFAULT_NAME: &str = "Swagger import";
const OPENAPI_DEFAULT_NAME: &str = "OpenAPI import";

/// Environment fields derived from the document's server description.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServerMetadata {
    pub name: String,
    /// `None` keeps the environment's default port.
    pub port: Option<u16>,
    pub endpoint_prefix: String,
    pub proxy: ProxySettings,
}

/// Proxy configuration read from `x-proxy-*` server extensions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProxySettings {
    pub mode: bool,
    pub host: String,
    pub req_headers: Vec<Header>,
    pub res_headers: Vec<Header>,
}

/// Swagger 2.0: port from `host`, prefix from `basePath`.
pub fn swagger_metadata(spec: &SwaggerSpec) -> ServerMetadata {
    let port = spec
        .host
        .as_deref()
        .and_then(|host| host.split(':').nth(1))
        .and_then(|port| port.trim().parse::<u16>().ok());

    ServerMetadata {
        name: spec.info.title_or(SWAGGER_DEFAULT_NAME).to_string(),
        port,
        endpoint_prefix: spec
            .base_path
            .as_deref()
            .map(strip_leading_slash)
            .unwrap_or_default()
            .to_string(),
        proxy: ProxySettings::default(),
    }
}

/// OpenAPI 3: everything comes from the first server entry; others are ignored.
pub fn openapi_metadata(spec: &OpenApiSpec) -> Result<ServerMetadata, ConvertError> {
    let server = spec.servers.first().ok_or(ConvertError::MissingServer)?;
    if spec.servers.len() > 1 {
        log::debug!(
            "using server {} and ignoring {} other(s)",
            server.url,
            spec.servers.len() - 1
        );
    }

    let raw_url = substitute_server_variables(&server.url, &server.variables)?;
    let url = parse_server_url(&raw_url)?;

    Ok(ServerMetadata {
        name: spec.info.title_or(OPENAPI_DEFAULT_NAME).to_string(),
        port: url.port(),
        endpoint_prefix: strip_leading_slash(url.path()).to_string(),
        proxy: ProxySettings {
            mode: server.proxy_mode == Some(true),
            host: server.proxy_host.clone().unwrap_or_default(),
            req_headers: server.proxy_req_headers.clone().unwrap_or_default(),
            res_headers: server.proxy_res_headers.clone().unwrap_or_default(),
        },
    })
}

/// Parse a server URL. Relative URLs (`/v1`) are read against a placeholder
/// base so only their path is kept.
fn parse_server_url(raw: &str) -> Result<Url, ConvertError> {
    let invalid = |source: url::ParseError| ConvertError::InvalidServerUrl {
        url: raw.to_string(),
        source,
    };
    match Url::parse(raw) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse("http://localhost/")
            .and_then(|base| base.join(raw))
            .map_err(invalid),
        Err(e) => Err(invalid(e)),
    }
}

/// Drop a single leading `/`.
pub fn strip_leading_slash(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}
