//! Example body synthesis.
//!
//! A schema describes the shape of a value; the synthesizer turns it into a
//! representative value in which leaves are placeholder tokens (`{{faker ...}}`)
//! that the serving engine expands per request.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::parse::components::SchemaRegistry;
use crate::parse::schema::{Schema, SchemaOrRef, TypeSet};

pub const NUMBER_TOKEN: &str = "{{faker 'random.number'}}";
pub const FLOAT_TOKEN: &str = "{{faker 'random.float'}}";
pub const BOOLEAN_TOKEN: &str = "{{faker 'random.boolean'}}";
pub const DATE_TOKEN: &str = "{{date '2019' (now) 'yyyy-MM-dd'}}";
pub const DATE_TIME_TOKEN: &str = "{{faker 'date.recent' 365}}";
pub const EMAIL_TOKEN: &str = "{{faker 'internet.email'}}";
pub const UUID_TOKEN: &str = "{{faker 'random.uuid'}}";

/// Matches the number, float and boolean tokens when they sit inside JSON quotes.
static QUOTED_PRIMITIVE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""(\{\{faker 'random\.(?:number|boolean|float)'\}\})""#).unwrap()
});

/// What a schema node generates, after `type`/`format` have been read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Integer,
    Number(NumberFormat),
    String(StringFormat),
    Boolean,
    Array,
    Object,
    /// `null`, a missing type, or a keyword nothing generates for.
    Unsupported,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberFormat {
    Float,
    Double,
    Unspecified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringFormat {
    Date,
    DateTime,
    Email,
    Uuid,
    Unspecified,
}

impl Shape {
    /// Read the generator for a schema. A type list contributes its first entry;
    /// an untyped schema with `properties` is an object.
    pub fn of(schema: &Schema) -> Shape {
        let keyword = schema.schema_type.as_ref().and_then(TypeSet::primary);
        let format = schema.format.as_deref();
        match keyword {
            Some("integer") => Shape::Integer,
            Some("number") => Shape::Number(match format {
                Some("float") => NumberFormat::Float,
                Some("double") => NumberFormat::Double,
                _ => NumberFormat::Unspecified,
            }),
            Some("string") => Shape::String(match format {
                Some("date") => StringFormat::Date,
                Some("date-time") => StringFormat::DateTime,
                Some("email") => StringFormat::Email,
                Some("uuid") => StringFormat::Uuid,
                _ => StringFormat::Unspecified,
            }),
            Some("boolean") => Shape::Boolean,
            Some("array") => Shape::Array,
            Some("object") => Shape::Object,
            Some(_) => Shape::Unsupported,
            None if !schema.properties.is_empty() => Shape::Object,
            None => Shape::Unsupported,
        }
    }

    /// The leaf value for scalar shapes; `None` for containers.
    fn leaf(self) -> Option<&'static str> {
        match self {
            Shape::Integer | Shape::Number(NumberFormat::Unspecified) => Some(NUMBER_TOKEN),
            Shape::Number(NumberFormat::Float | NumberFormat::Double) => Some(FLOAT_TOKEN),
            Shape::String(StringFormat::Date) => Some(DATE_TOKEN),
            Shape::String(StringFormat::DateTime) => Some(DATE_TIME_TOKEN),
            Shape::String(StringFormat::Email) => Some(EMAIL_TOKEN),
            Shape::String(StringFormat::Uuid) => Some(UUID_TOKEN),
            Shape::String(StringFormat::Unspecified) | Shape::Unsupported => Some(""),
            Shape::Boolean => Some(BOOLEAN_TOKEN),
            Shape::Array | Shape::Object => None,
        }
    }
}

/// Values generated per body before the rest is left empty.
pub const MAX_NODES_PER_BODY: usize = 2_000;

/// Recursive schema-to-value synthesizer.
///
/// Named `$ref` nodes are looked up in the document's schemas as they are
/// reached. A reference already being expanded on the current path is a cycle
/// and synthesizes to an empty string. `max_depth` bounds nesting and
/// [`MAX_NODES_PER_BODY`] bounds the total size of one body.
#[derive(Debug, Clone, Copy)]
pub struct ExampleSynthesizer<'a> {
    max_depth: usize,
    schemas: SchemaRegistry<'a>,
}

/// Per-body walk state.
struct Walk {
    visiting: Vec<String>,
    remaining: usize,
    truncated: bool,
}

impl Walk {
    /// Spend one unit of the node budget; false once it is used up.
    fn take(&mut self) -> bool {
        if self.remaining == 0 {
            if !self.truncated {
                log::debug!("body exceeds {MAX_NODES_PER_BODY} nodes; truncating");
                self.truncated = true;
            }
            return false;
        }
        self.remaining -= 1;
        true
    }
}

impl<'a> ExampleSynthesizer<'a> {
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            schemas: SchemaRegistry::empty(),
        }
    }

    /// Resolve `$ref` nodes against `schemas`.
    pub fn with_schemas(self, schemas: SchemaRegistry<'a>) -> Self {
        Self { schemas, ..self }
    }

    pub fn synthesize(&self, node: &SchemaOrRef) -> Value {
        let mut walk = Walk {
            visiting: Vec::new(),
            remaining: MAX_NODES_PER_BODY,
            truncated: false,
        };
        self.synthesize_at(node, 0, &mut walk)
    }

    fn synthesize_at(&self, node: &SchemaOrRef, depth: usize, walk: &mut Walk) -> Value {
        if !walk.take() {
            return empty();
        }
        match node {
            SchemaOrRef::Schema(schema) => self.synthesize_schema(schema, depth, walk),
            SchemaOrRef::Ref { ref_path } => {
                if walk.visiting.iter().any(|open| open == ref_path) {
                    log::debug!("not synthesizing circular reference {ref_path}");
                    return empty();
                }
                let Some(target) = self.schemas.get(ref_path) else {
                    log::debug!("no schema registered for {ref_path}");
                    return empty();
                };
                walk.visiting.push(ref_path.clone());
                let value = self.synthesize_at(target, depth, walk);
                walk.visiting.pop();
                value
            }
        }
    }

    /// First match wins: enum, example, default, composition, then type/format.
    fn synthesize_schema(&self, schema: &Schema, depth: usize, walk: &mut Walk) -> Value {
        if depth > self.max_depth {
            log::debug!("schema nesting exceeds {}; truncating", self.max_depth);
            return empty();
        }
        if !schema.enum_values.is_empty() {
            return Value::String(one_of_token(&schema.enum_values));
        }
        if let Some(example) = &schema.example {
            return example.clone();
        }
        if let Some(default) = &schema.default_value {
            return default.clone();
        }
        // Only the first member is explored; allOf members are not merged.
        if let Some(member) = schema.first_composed() {
            return self.synthesize_at(member, depth + 1, walk);
        }

        let shape = Shape::of(schema);
        if let Some(leaf) = shape.leaf() {
            return Value::String(leaf.to_string());
        }
        match shape {
            Shape::Array => {
                let item = match schema.items.as_deref() {
                    Some(items) => self.synthesize_at(items, depth + 1, walk),
                    None => empty(),
                };
                if schema.collection_format.as_deref() == Some("csv") {
                    item
                } else {
                    Value::Array(vec![item])
                }
            }
            _ => {
                let fields: Map<String, Value> = schema
                    .properties
                    .iter()
                    .map(|(name, prop)| (name.clone(), self.synthesize_at(prop, depth + 1, walk)))
                    .collect();
                Value::Object(fields)
            }
        }
    }
}

fn empty() -> Value {
    Value::String(String::new())
}

/// `{{oneOf (array 'a' 'b')}}`, values in declaration order.
fn one_of_token(values: &[Value]) -> String {
    let items: Vec<String> = values
        .iter()
        .map(|value| match value {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        })
        .collect();
    format!("{{{{oneOf (array '{}')}}}}", items.join("' '"))
}

/// Render a synthesized or example value as a response body.
///
/// A top-level string is the body text itself; anything else is pretty-printed
/// JSON in which number, float and boolean tokens are left unquoted.
pub fn render_body(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => {
            let json = serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string());
            unquote_primitive_tokens(&json)
        }
    }
}

/// Strip the JSON quotes around number, float and boolean tokens.
pub fn unquote_primitive_tokens(json: &str) -> String {
    QUOTED_PRIMITIVE_REGEX.replace_all(json, "$1").into_owned()
}
