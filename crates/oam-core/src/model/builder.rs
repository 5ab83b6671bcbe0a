//! Default-valued skeleton records with fresh identifiers.

use uuid::Uuid;

use super::environment::{Environment, Header, HttpMethod, Route, RouteResponse, RulesOperator};
use super::status::StatusCode;
use crate::config::ConvertOptions;

/// Data format revision of the produced environment records.
pub const HIGHEST_MIGRATION_ID: u32 = 10;

/// A 200 response with an empty JSON object body and no headers yet.
pub fn build_route_response() -> RouteResponse {
    RouteResponse {
        uuid: Uuid::new_v4(),
        body: "{}".to_string(),
        latency: 0,
        status_code: StatusCode::OK,
        label: String::new(),
        headers: Vec::new(),
        file_path: String::new(),
        send_file_as_body: false,
        rules: Vec::new(),
        rules_operator: RulesOperator::Or,
        disable_templating: false,
    }
}

/// The fallback response for an operation with no usable status code.
pub fn build_default_route_response() -> RouteResponse {
    RouteResponse {
        body: String::new(),
        headers: vec![Header::content_type("application/json")],
        ..build_route_response()
    }
}

/// An enabled `GET` route with no responses.
pub fn build_route() -> Route {
    Route {
        uuid: Uuid::new_v4(),
        documentation: String::new(),
        method: HttpMethod::Get,
        endpoint: String::new(),
        responses: Vec::new(),
        enabled: true,
        random_response: false,
    }
}

/// An empty environment: no routes, CORS on, a JSON `Content-Type` header.
pub fn build_environment(options: &ConvertOptions) -> Environment {
    Environment {
        uuid: Uuid::new_v4(),
        last_migration: HIGHEST_MIGRATION_ID,
        name: "New environment".to_string(),
        endpoint_prefix: String::new(),
        latency: 0,
        port: options.default_port,
        routes: Vec::new(),
        proxy_mode: false,
        proxy_host: String::new(),
        proxy_req_headers: Vec::new(),
        proxy_res_headers: Vec::new(),
        https: false,
        cors: true,
        headers: vec![Header::content_type("application/json")],
    }
}
