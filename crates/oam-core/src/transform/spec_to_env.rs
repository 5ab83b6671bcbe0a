use super::example::ExampleSynthesizer;
use super::responses::{ContentSource, ResponseExtractor};
use super::routes::extract_routes;
use super::server::{ServerMetadata, openapi_metadata, swagger_metadata};
use crate::config::ConvertOptions;
use crate::error::ConvertError;
use crate::model::{Environment, Route};
use crate::model::builder::build_environment;
use crate::parse::spec::ApiDocument;

/// Convert a dereferenced document into a mock environment.
pub fn convert(document: &ApiDocument) -> Result<Environment, ConvertError> {
    convert_with_options(document, &ConvertOptions::default())
}

/// Convert with explicit options.
pub fn convert_with_options(
    document: &ApiDocument,
    options: &ConvertOptions,
) -> Result<Environment, ConvertError> {
    // Phase 1: server metadata
    let (metadata, source) = match document {
        ApiDocument::Swagger(spec) => (
            swagger_metadata(spec),
            ContentSource::Swagger {
                produces: spec.produces.as_deref(),
                consumes: spec.consumes.as_deref(),
            },
        ),
        ApiDocument::OpenApi(spec) => (openapi_metadata(spec)?, ContentSource::OpenApi),
    };

    // Phase 2: routes and their responses
    let synthesizer = ExampleSynthesizer::new(options.max_depth).with_schemas(document.schemas());
    let extractor = ResponseExtractor::new(source, synthesizer);
    let routes = extract_routes(document.paths(), &extractor);

    // Phase 3: fill the skeleton
    let environment = assemble(build_environment(options), metadata, routes);

    log::info!(
        "converted {:?} document `{}`: {} routes, {} responses",
        document.version(),
        environment.name,
        environment.routes.len(),
        environment
            .routes
            .iter()
            .map(|r| r.responses.len())
            .sum::<usize>()
    );
    Ok(environment)
}

fn assemble(
    skeleton: Environment,
    metadata: ServerMetadata,
    routes: Vec<Route>,
) -> Environment {
    Environment {
        name: metadata.name,
        endpoint_prefix: metadata.endpoint_prefix,
        port: metadata
            .port
            .filter(|port| *port != 0)
            .unwrap_or(skeleton.port),
        routes,
        proxy_mode: metadata.proxy.mode,
        proxy_host: metadata.proxy.host,
        proxy_req_headers: metadata.proxy.req_headers,
        proxy_res_headers: metadata.proxy.res_headers,
        ..skeleton
    }
}
