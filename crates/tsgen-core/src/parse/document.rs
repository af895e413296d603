use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::operation::PathItem;
use super::schema::{Schema, lenient_schema_map};

/// Components object. Only the reusable schemas are consulted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Components {
    #[serde(
        default,
        deserialize_with = "lenient_schema_map",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub schemas: IndexMap<String, Schema>,
}

/// An OpenAPI 3 or Swagger 2 document, reduced to the sections the generator
/// reads: `definitions`, `components.schemas` and `paths`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openapi: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub swagger: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_schema_map",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub definitions: IndexMap<String, Schema>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Components>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub paths: IndexMap<String, PathItem>,
}

impl Document {
    /// Schemas under `components.schemas`, if that section exists.
    pub fn component_schemas(&self) -> Option<&IndexMap<String, Schema>> {
        self.components.as_ref().map(|c| &c.schemas)
    }

    /// Look up a named definition: `definitions` first, then `components.schemas`.
    pub fn lookup_definition(&self, name: &str) -> Option<&Schema> {
        self.definitions
            .get(name)
            .or_else(|| self.component_schemas()?.get(name))
    }

    /// Declared document version, whichever of `openapi` / `swagger` is present.
    pub fn version(&self) -> Option<&str> {
        self.openapi.as_deref().or(self.swagger.as_deref())
    }

    /// A copy of this document whose `paths` only keep keys starting with at
    /// least one of `prefixes`. Definitions and components pass through
    /// untouched; an empty prefix list keeps every path.
    pub fn filter_paths<S: AsRef<str>>(&self, prefixes: &[S]) -> Document {
        if prefixes.is_empty() {
            return self.clone();
        }
        let paths = self
            .paths
            .iter()
            .filter(|(path, _)| prefixes.iter().any(|p| path.starts_with(p.as_ref())))
            .map(|(path, item)| (path.clone(), item.clone()))
            .collect();
        Document {
            paths,
            ..self.clone()
        }
    }
}
