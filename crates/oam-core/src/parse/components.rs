use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::ref_resolve::unescape_pointer_token;
use super::schema::SchemaOrRef;

/// OpenAPI 3 components. Only schemas are kept: every other component kind is
/// inlined at its use site during dereferencing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Components {
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub schemas: IndexMap<String, SchemaOrRef>,
}

/// Named schemas that `$ref` nodes point into, looked up while synthesizing.
#[derive(Debug, Clone, Copy)]
pub struct SchemaRegistry<'a> {
    prefix: &'static str,
    schemas: Option<&'a IndexMap<String, SchemaOrRef>>,
}

impl<'a> SchemaRegistry<'a> {
    pub const SWAGGER_PREFIX: &'static str = "#/definitions/";
    pub const OPENAPI_PREFIX: &'static str = "#/components/schemas/";

    pub fn new(prefix: &'static str, schemas: &'a IndexMap<String, SchemaOrRef>) -> Self {
        Self {
            prefix,
            schemas: Some(schemas),
        }
    }

    /// A registry that resolves nothing.
    pub fn empty() -> Self {
        Self {
            prefix: "",
            schemas: None,
        }
    }

    pub fn get(&self, ref_path: &str) -> Option<&'a SchemaOrRef> {
        let name = ref_path.strip_prefix(self.prefix)?;
        if name.is_empty() || name.contains('/') {
            return None;
        }
        self.schemas?.get(&*unescape_pointer_token(name))
    }
}

impl Default for SchemaRegistry<'_> {
    fn default() -> Self {
        Self::empty()
    }
}
