use indexmap::IndexMap;
use serde_json::Value;

use super::example::{ExampleSynthesizer, render_body};
use super::headers::{JSON_CONTENT_TYPE, build_response_headers};
use crate::model::builder::{build_default_route_response, build_route_response};
use crate::model::{Header, ResponseRule, RouteResponse, RulesOperator, StatusCode};
use crate::parse::media_type::Example;
use crate::parse::operation::Operation;
use crate::parse::response::Response;
use crate::parse::schema::SchemaOrRef;

/// Where a response's content types and JSON schema come from.
#[derive(Debug, Clone, Copy)]
pub enum ContentSource<'a> {
    /// Swagger 2.0: `produces`/`consumes` lists, with document-level fallbacks.
    Swagger {
        produces: Option<&'a [String]>,
        consumes: Option<&'a [String]>,
    },
    /// OpenAPI 3: the keys of each response's `content` map.
    OpenApi,
}

/// Reads an operation's declared responses into route responses.
pub struct ResponseExtractor<'a> {
    source: ContentSource<'a>,
    synthesizer: ExampleSynthesizer<'a>,
}

impl<'a> ResponseExtractor<'a> {
    pub fn new(source: ContentSource<'a>, synthesizer: ExampleSynthesizer<'a>) -> Self {
        Self {
            source,
            synthesizer,
        }
    }

    /// All responses of an operation, in declaration order. Keys that are not
    /// registered status codes (`default`, `4XX`) are skipped; if none remain,
    /// a single empty 200 response is returned.
    pub fn extract(&self, op: &Operation) -> Vec<RouteResponse> {
        let responses: Vec<RouteResponse> = op
            .responses
            .iter()
            .filter_map(|(key, response)| match StatusCode::from_key(key) {
                Some(status) => Some((status, response)),
                None => {
                    log::debug!("skipping response key `{key}`: not a known status code");
                    None
                }
            })
            .flat_map(|(status, response)| self.extract_status(op, status, response))
            .collect();

        if responses.is_empty() {
            vec![build_default_route_response()]
        } else {
            responses
        }
    }

    fn extract_status(
        &self,
        op: &Operation,
        status: StatusCode,
        response: &Response,
    ) -> Vec<RouteResponse> {
        let content_types = self.content_types(op, response);
        let headers = build_response_headers(&content_types, response.headers.keys());

        let json = content_types
            .iter()
            .any(|ct| ct == JSON_CONTENT_TYPE)
            .then(|| self.json_content(response))
            .unwrap_or_default();

        match json.examples {
            Some(examples) if !examples.is_empty() => examples
                .iter()
                .map(|(name, example)| {
                    example_response(status, name, example, response, headers.clone())
                })
                .collect(),
            _ => vec![RouteResponse {
                body: self.schema_body(json.schema),
                status_code: status,
                label: response.description.clone(),
                headers,
                ..build_route_response()
            }],
        }
    }

    fn content_types(&self, op: &Operation, response: &Response) -> Vec<String> {
        match self.source {
            ContentSource::Swagger { produces, consumes } => op
                .produces
                .as_deref()
                .or(op.consumes.as_deref())
                .or(produces)
                .or(consumes)
                .unwrap_or_default()
                .to_vec(),
            ContentSource::OpenApi => response.content.keys().cloned().collect(),
        }
    }

    fn json_content<'r>(&self, response: &'r Response) -> JsonContent<'r> {
        match self.source {
            ContentSource::Swagger { .. } => JsonContent {
                schema: response.schema.as_ref(),
                examples: None,
            },
            ContentSource::OpenApi => match response.content.get(JSON_CONTENT_TYPE) {
                Some(media) => JsonContent {
                    schema: media.schema.as_ref(),
                    examples: Some(&media.examples),
                },
                None => JsonContent::default(),
            },
        }
    }

    fn schema_body(&self, schema: Option<&SchemaOrRef>) -> String {
        match schema {
            Some(SchemaOrRef::Schema(s)) if s.is_empty() => String::new(),
            Some(node) => render_body(&self.synthesizer.synthesize(node)),
            None => String::new(),
        }
    }
}

/// The `application/json` part of a response.
#[derive(Default)]
struct JsonContent<'r> {
    schema: Option<&'r SchemaOrRef>,
    examples: Option<&'r IndexMap<String, Example>>,
}

/// One response per named example; its value is the body, verbatim.
fn example_response(
    status: StatusCode,
    name: &str,
    example: &Example,
    response: &Response,
    headers: Vec<Header>,
) -> RouteResponse {
    RouteResponse {
        body: example.value.as_ref().map(render_body).unwrap_or_default(),
        status_code: status,
        label: if name.is_empty() {
            response.description.clone()
        } else {
            name.to_string()
        },
        headers,
        rules: parse_rules(name, example.rules.as_ref()),
        rules_operator: parse_rules_operator(name, example.rules_operator.as_deref()),
        disable_templating: example.disable_templating.unwrap_or(false),
        ..build_route_response()
    }
}

/// Keep the well-formed entries of an `x-rules` list.
fn parse_rules(example: &str, raw: Option<&Value>) -> Vec<ResponseRule> {
    let entries = match raw {
        None | Some(Value::Null) => return Vec::new(),
        Some(Value::Array(entries)) => entries,
        Some(other) => {
            log::warn!("example `{example}`: x-rules must be a list, got {other}");
            return Vec::new();
        }
    };
    entries
        .iter()
        .filter_map(
            |entry| match serde_json::from_value::<ResponseRule>(entry.clone()) {
                Ok(rule) => Some(rule),
                Err(e) => {
                    log::warn!("example `{example}`: dropping invalid rule {entry}: {e}");
                    None
                }
            },
        )
        .collect()
}

fn parse_rules_operator(example: &str, raw: Option<&str>) -> RulesOperator {
    match raw {
        None => RulesOperator::default(),
        Some(keyword) => RulesOperator::from_keyword(keyword).unwrap_or_else(|| {
            log::warn!("example `{example}`: unknown x-rules-operator `{keyword}`, using OR");
            RulesOperator::default()
        }),
    }
}
