use oam_core::config::ConvertOptions;
use oam_core::error::ConvertError;
use oam_core::model::{Environment, Header, HttpMethod, Route, RulesOperator, RuleTarget};
use oam_core::parse::{self, SourceFormat};
use oam_core::transform;

const PETSTORE: &str = include_str!("fixtures/petstore-swagger.yaml");
const USERS: &str = include_str!("fixtures/users-openapi.yaml");

fn convert_yaml(input: &str) -> Environment {
    let document = parse::parse_document(input, SourceFormat::Yaml).expect("should parse");
    transform::convert(&document).expect("should convert")
}

fn route<'a>(env: &'a Environment, method: HttpMethod, endpoint: &str) -> &'a Route {
    env.routes
        .iter()
        .find(|r| r.method == method && r.endpoint == endpoint)
        .unwrap_or_else(|| panic!("missing route {method:?} {endpoint}"))
}

/// Serialised form with every generated id blanked out.
fn without_ids(env: &Environment) -> serde_json::Value {
    let mut value = serde_json::to_value(env).unwrap();
    value["uuid"] = serde_json::Value::Null;
    for route in value["routes"].as_array_mut().unwrap() {
        route["uuid"] = serde_json::Value::Null;
        for response in route["responses"].as_array_mut().unwrap() {
            response["uuid"] = serde_json::Value::Null;
        }
    }
    value
}

// --- Swagger 2.0 ---

#[test]
fn swagger_server_metadata() {
    let env = convert_yaml(PETSTORE);
    assert_eq!(env.name, "Swagger Petstore");
    assert_eq!(env.port, 4001);
    assert_eq!(env.endpoint_prefix, "v2");
    assert!(!env.proxy_mode);
    assert_eq!(env.headers, vec![Header::content_type("application/json")]);
}

#[test]
fn swagger_routes_in_declaration_order() {
    let env = convert_yaml(PETSTORE);
    let routes: Vec<(HttpMethod, &str, &str)> = env
        .routes
        .iter()
        .map(|r| (r.method, r.endpoint.as_str(), r.documentation.as_str()))
        .collect();
    assert_eq!(
        routes,
        vec![
            (HttpMethod::Get, "pets", "List all pets"),
            (HttpMethod::Post, "pets", "Create a pet"),
            (HttpMethod::Get, "pets/:petId", "Info for a specific pet"),
        ]
    );
}

#[test]
fn swagger_synthesized_body() {
    let env = convert_yaml(PETSTORE);
    let list = route(&env, HttpMethod::Get, "pets");
    assert_eq!(list.responses.len(), 1, "`default` is not a status code");

    let ok = &list.responses[0];
    assert_eq!(ok.status_code.as_u16(), 200);
    assert_eq!(ok.label, "A list of pets");
    assert_eq!(
        ok.headers,
        vec![
            Header::content_type("application/json"),
            Header::new("X-Total-Count", ""),
        ]
    );
    insta::assert_snapshot!(ok.body, @r#"
    [
      {
        "id": {{faker 'random.number'}},
        "name": "",
        "status": "{{oneOf (array 'available' 'pending' 'sold')}}",
        "weight": {{faker 'random.float'}},
        "vaccinated": {{faker 'random.boolean'}},
        "birthday": "{{date '2019' (now) 'yyyy-MM-dd'}}",
        "owner": {
          "email": "{{faker 'internet.email'}}",
          "pets": [
            ""
          ]
        }
      }
    ]
    "#);
}

#[test]
fn swagger_operation_content_type_overrides_document() {
    let env = convert_yaml(PETSTORE);
    let create = route(&env, HttpMethod::Post, "pets");
    assert_eq!(create.responses.len(), 1);
    assert_eq!(create.responses[0].status_code.as_u16(), 201);
    assert_eq!(create.responses[0].body, "", "non-JSON responses get no body");
    assert_eq!(
        create.responses[0].headers,
        vec![Header::content_type("application/xml")]
    );
}

#[test]
fn swagger_default_values_are_used() {
    let env = convert_yaml(PETSTORE);
    let show = route(&env, HttpMethod::Get, "pets/:petId");
    let statuses: Vec<u16> = show.responses.iter().map(|r| r.status_code.as_u16()).collect();
    assert_eq!(statuses, vec![200, 404]);
    assert_eq!(
        show.responses[1].body,
        "{\n  \"code\": {{faker 'random.number'}},\n  \"message\": \"Something went wrong\"\n}"
    );
}

// --- OpenAPI 3 ---

#[test]
fn openapi_server_metadata() {
    let env = convert_yaml(USERS);
    assert_eq!(env.name, "Users API");
    assert_eq!(env.port, 5003);
    assert_eq!(env.endpoint_prefix, "api/v1");
    assert!(env.proxy_mode);
    assert_eq!(env.proxy_host, "https://users.example.com");
    assert_eq!(env.proxy_req_headers, vec![Header::new("X-Api-Key", "secret")]);
    assert!(env.proxy_res_headers.is_empty());
}

#[test]
fn openapi_routes() {
    let env = convert_yaml(USERS);
    let routes: Vec<(HttpMethod, &str)> = env
        .routes
        .iter()
        .map(|r| (r.method, r.endpoint.as_str()))
        .collect();
    assert_eq!(
        routes,
        vec![
            (HttpMethod::Get, "users"),
            (HttpMethod::Post, "users"),
            (HttpMethod::Get, "users/:id/posts/:postId"),
            (HttpMethod::Patch, "users/:id/posts/:postId"),
            (HttpMethod::Options, "users/:id/posts/:postId"),
            (HttpMethod::Get, "export"),
        ]
    );
    assert_eq!(route(&env, HttpMethod::Get, "users").documentation, "List users");
    assert!(env.routes.iter().all(|r| !r.responses.is_empty()));
}

#[test]
fn every_response_starts_with_content_type() {
    for input in [PETSTORE, USERS] {
        let env = convert_yaml(input);
        for response in env.routes.iter().flat_map(|r| &r.responses) {
            assert_eq!(
                response.headers.first().map(|h| h.key.as_str()),
                Some("Content-Type")
            );
        }
    }
}

#[test]
fn openapi_wildcard_statuses_are_dropped() {
    let env = convert_yaml(USERS);
    let list = route(&env, HttpMethod::Get, "users");
    assert_eq!(list.responses.len(), 1);

    let ok = &list.responses[0];
    let header_keys: Vec<&str> = ok.headers.iter().map(|h| h.key.as_str()).collect();
    assert_eq!(header_keys, vec!["Content-Type", "X-Page", "X-Per-Page"]);
    insta::assert_snapshot!(ok.body, @r#"
    {
      "total": {{faker 'random.number'}},
      "items": [
        {
          "id": {{faker 'random.number'}},
          "uuid": "{{faker 'random.uuid'}}",
          "email": "{{faker 'internet.email'}}",
          "name": "",
          "role": "{{oneOf (array 'admin' 'member' 'guest')}}",
          "score": {{faker 'random.float'}},
          "active": {{faker 'random.boolean'}},
          "createdAt": "{{faker 'date.recent' 365}}",
          "manager": ""
        }
      ]
    }
    "#);
}

#[test]
fn openapi_named_examples() {
    let env = convert_yaml(USERS);
    let create = route(&env, HttpMethod::Post, "users");
    let labels: Vec<(u16, &str)> = create
        .responses
        .iter()
        .map(|r| (r.status_code.as_u16(), r.label.as_str()))
        .collect();
    assert_eq!(
        labels,
        vec![(201, "admin"), (201, "guest"), (201, "raw"), (400, "Problem")]
    );

    let admin = &create.responses[0];
    assert_eq!(admin.body, "{\n  \"id\": 1,\n  \"role\": \"admin\"\n}");
    assert_eq!(admin.rules.len(), 1);
    assert_eq!(admin.rules[0].target, RuleTarget::Body);
    assert_eq!(admin.rules[0].modifier, "role");
    assert_eq!(admin.rules[0].value, "admin");
    assert_eq!(admin.rules_operator, RulesOperator::And);

    let guest = &create.responses[1];
    assert_eq!(guest.body, "{\n  \"id\": 2,\n  \"role\": \"guest\"\n}");
    assert!(guest.rules.is_empty());
    assert_eq!(guest.rules_operator, RulesOperator::Or);
    assert!(!guest.disable_templating);

    let raw = &create.responses[2];
    assert_eq!(raw.body, "{{faker 'random.uuid'}}");
    assert!(raw.disable_templating);

    let problem = &create.responses[3];
    assert_eq!(problem.body, "");
    assert_eq!(
        problem.headers,
        vec![Header::content_type("application/problem+json")]
    );

    let ids: std::collections::HashSet<_> = create.responses.iter().map(|r| r.uuid).collect();
    assert_eq!(ids.len(), create.responses.len());
}

#[test]
fn openapi_composition_uses_first_member() {
    let env = convert_yaml(USERS);
    let post = route(&env, HttpMethod::Get, "users/:id/posts/:postId");
    assert_eq!(
        post.responses[0].body,
        "{\n  \"title\": \"Hello\",\n  \"tags\": [\n    \"\"\n  ]\n}"
    );
}

#[test]
fn openapi_fallback_and_empty_responses() {
    let env = convert_yaml(USERS);

    let patch = route(&env, HttpMethod::Patch, "users/:id/posts/:postId");
    assert_eq!(patch.responses.len(), 1);
    assert_eq!(patch.responses[0].status_code.as_u16(), 200);
    assert_eq!(patch.responses[0].body, "");

    let options = route(&env, HttpMethod::Options, "users/:id/posts/:postId");
    assert_eq!(options.responses[0].status_code.as_u16(), 204);
    assert_eq!(options.responses[0].label, "No content");
    assert_eq!(
        options.responses[0].headers,
        vec![Header::content_type("application/json")]
    );

    let export = route(&env, HttpMethod::Get, "export");
    assert_eq!(export.responses[0].body, "");
    assert_eq!(
        export.responses[0].headers,
        vec![Header::content_type("text/csv")]
    );
}

#[test]
fn openapi_without_servers_is_an_error() {
    let yaml = r#"
openapi: 3.0.0
info:
  title: Serverless
paths: {}
"#;
    let document = parse::parse_document(yaml, SourceFormat::Yaml).unwrap();
    assert!(matches!(
        transform::convert(&document),
        Err(ConvertError::MissingServer)
    ));
}

#[test]
fn openapi_undeclared_server_variable_is_an_error() {
    let yaml = r#"
openapi: 3.0.0
info:
  title: Broken
servers:
  - url: "http://localhost:{port}/"
paths: {}
"#;
    let document = parse::parse_document(yaml, SourceFormat::Yaml).unwrap();
    match transform::convert(&document) {
        Err(ConvertError::UndeclaredServerVariable(name)) => assert_eq!(name, "port"),
        other => panic!("expected an undeclared variable error, got {other:?}"),
    }
}

// --- cross-cutting ---

/// `count` schemas, each linking to every schema including itself.
fn interlinked_document(count: usize) -> String {
    let names: Vec<String> = (0..count).map(|i| format!("Node{i}")).collect();
    let schemas: serde_json::Map<String, serde_json::Value> = names
        .iter()
        .map(|name| {
            let links: serde_json::Map<String, serde_json::Value> = names
                .iter()
                .map(|other| {
                    let link = serde_json::json!({"$ref": format!("#/components/schemas/{other}")});
                    (other.to_lowercase(), link)
                })
                .chain([("label".to_string(), serde_json::json!({"type": "string"}))])
                .collect();
            (name.clone(), serde_json::json!({"type": "object", "properties": links}))
        })
        .collect();
    serde_json::json!({
        "openapi": "3.0.3",
        "info": {"title": "Graph"},
        "servers": [{"url": "http://localhost:4010"}],
        "paths": {"/nodes": {"get": {"responses": {"200": {
            "description": "root",
            "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Node0"}}}
        }}}}},
        "components": {"schemas": schemas}
    })
    .to_string()
}

#[test]
fn interlinked_schemas_terminate_with_bounded_bodies() {
    let input = interlinked_document(12);
    let started = std::time::Instant::now();
    let document = parse::parse_document(&input, SourceFormat::Json).unwrap();
    let env = transform::convert(&document).unwrap();
    assert!(
        started.elapsed() < std::time::Duration::from_secs(10),
        "conversion took {:?}",
        started.elapsed()
    );

    let body = &env.routes[0].responses[0].body;
    assert!(body.len() < 256 * 1024, "body is {} bytes", body.len());
    let value: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(value["node0"], "", "self link is a cycle");
    assert_eq!(value["node1"]["node0"], "", "back link is a cycle");
    assert_eq!(value["node1"]["node1"], "");
    assert!(value["node1"]["node2"].is_object());
}

#[test]
fn self_referencing_definition_terminates() {
    let yaml = r##"
swagger: "2.0"
info:
  title: Tree
produces: [application/json]
paths:
  /tree:
    get:
      responses:
        "200":
          description: ok
          schema:
            $ref: "#/definitions/Tree"
definitions:
  Tree:
    properties:
      value:
        type: integer
      children:
        type: array
        items:
          $ref: "#/definitions/Tree"
      alias:
        $ref: "#/definitions/Alias"
  Alias:
    $ref: "#/definitions/Tree"
"##;
    let env = convert_yaml(yaml);
    assert_eq!(
        env.routes[0].responses[0].body,
        "{\n  \"value\": {{faker 'random.number'}},\n  \"children\": [\n    \"\"\n  ],\n  \"alias\": \"\"\n}"
    );
}

#[test]
fn conversion_is_deterministic_apart_from_ids() {
    for input in [PETSTORE, USERS] {
        let first = convert_yaml(input);
        let second = convert_yaml(input);
        assert_ne!(first.uuid, second.uuid);
        assert_eq!(without_ids(&first), without_ids(&second));
    }
}

#[test]
fn environment_wire_format_is_camel_case() {
    let env = convert_yaml(USERS);
    let value = serde_json::to_value(&env).unwrap();
    assert_eq!(value["endpointPrefix"], "api/v1");
    assert_eq!(value["proxyMode"], true);
    assert!(value["lastMigration"].is_u64());
    let response = &value["routes"][1]["responses"][0];
    assert_eq!(response["statusCode"], 201);
    assert_eq!(response["rulesOperator"], "AND");
    assert_eq!(response["rules"][0]["isRegex"], false);
}

#[test]
fn options_control_port_and_depth() {
    let yaml = r#"
swagger: "2.0"
info:
  title: Nested
paths:
  /tree:
    get:
      produces: [application/json]
      responses:
        "200":
          description: ok
          schema:
            type: object
            properties:
              a:
                type: object
                properties:
                  b:
                    type: object
                    properties:
                      c:
                        type: integer
"#;
    let document = parse::parse_document(yaml, SourceFormat::Yaml).unwrap();
    let options = ConvertOptions {
        default_port: 8080,
        max_depth: 2,
    };
    let env = transform::convert_with_options(&document, &options).unwrap();
    assert_eq!(env.port, 8080, "no host port falls back to the configured default");
    assert_eq!(
        env.routes[0].responses[0].body,
        "{\n  \"a\": {\n    \"b\": {\n      \"c\": \"\"\n    }\n  }\n}"
    );
}

#[tokio::test]
async fn import_file_reads_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("petstore.yaml");
    std::fs::write(&path, PETSTORE).unwrap();

    let env = oam_core::import_file(&path, &ConvertOptions::default())
        .await
        .unwrap();
    assert_eq!(env.name, "Swagger Petstore");
    assert_eq!(env.routes.len(), 3);

    let missing = dir.path().join("absent.json");
    let err = oam_core::import_file(&missing, &ConvertOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ConvertError::Io { .. }));
}
