use std::borrow::Cow;

use serde_json::{Map, Value};

use crate::error::ResolveError;

/// Pointer prefixes of named schema definitions.
const SCHEMA_DEFINITION_PREFIXES: [&str; 2] = ["/components/schemas/", "/definitions/"];

/// Resolves internal `$ref` pointers in a raw document.
///
/// References to named schema definitions (`#/components/schemas/Pet`,
/// `#/definitions/Pet`) are checked and left in place; they are looked up by
/// name while synthesizing, so a densely linked schema graph is never copied.
/// Every other reference is replaced by a copy of its target. One whose target
/// is already being resolved further up the stack would expand forever and is
/// left in place as a `{"$ref": ...}` node.
pub struct RefResolver<'a> {
    root: &'a Value,
    visiting: Vec<String>,
}

impl<'a> RefResolver<'a> {
    pub fn new(root: &'a Value) -> Self {
        Self {
            root,
            visiting: Vec::new(),
        }
    }

    /// Resolve the whole document.
    pub fn resolve_document(&mut self) -> Result<Value, ResolveError> {
        self.resolve_value(self.root)
    }

    fn resolve_value(&mut self, value: &'a Value) -> Result<Value, ResolveError> {
        match value {
            Value::Object(map) => {
                if let Some(Value::String(ref_path)) = map.get("$ref") {
                    return self.resolve_ref(ref_path, value);
                }
                let mut resolved = Map::with_capacity(map.len());
                for (key, child) in map {
                    resolved.insert(key.clone(), self.resolve_value(child)?);
                }
                Ok(Value::Object(resolved))
            }
            Value::Array(items) => items
                .iter()
                .map(|item| self.resolve_value(item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            scalar => Ok(scalar.clone()),
        }
    }

    fn resolve_ref(&mut self, ref_path: &str, node: &'a Value) -> Result<Value, ResolveError> {
        if is_schema_definition(parse_ref_pointer(ref_path)?) {
            self.lookup(ref_path)?;
            return Ok(node.clone());
        }
        if self.visiting.iter().any(|open| open == ref_path) {
            log::debug!("leaving circular reference {ref_path} unresolved");
            return Ok(node.clone());
        }
        let target = self.lookup(ref_path)?;
        self.visiting.push(ref_path.to_string());
        let resolved = self.resolve_value(target);
        self.visiting.pop();
        resolved
    }

    fn lookup(&self, ref_path: &str) -> Result<&'a Value, ResolveError> {
        let pointer = parse_ref_pointer(ref_path)?;
        self.root
            .pointer(pointer)
            .ok_or_else(|| ResolveError::RefTargetNotFound(ref_path.to_string()))
    }
}

/// Extract the JSON pointer from a local `$ref` like `#/components/schemas/Foo`.
fn parse_ref_pointer(ref_path: &str) -> Result<&str, ResolveError> {
    let pointer = ref_path
        .strip_prefix('#')
        .ok_or_else(|| ResolveError::ExternalRef(ref_path.to_string()))?;
    if !pointer.is_empty() && !pointer.starts_with('/') {
        return Err(ResolveError::InvalidRefFormat(ref_path.to_string()));
    }
    Ok(pointer)
}

/// True for a pointer naming one whole schema definition.
fn is_schema_definition(pointer: &str) -> bool {
    SCHEMA_DEFINITION_PREFIXES
        .iter()
        .filter_map(|prefix| pointer.strip_prefix(*prefix))
        .any(|name| !name.is_empty() && !name.contains('/'))
}

/// Decode `~1` and `~0` in one JSON pointer segment.
pub fn unescape_pointer_token(token: &str) -> Cow<'_, str> {
    if token.contains('~') {
        Cow::Owned(token.replace("~1", "/").replace("~0", "~"))
    } else {
        Cow::Borrowed(token)
    }
}
