use indexmap::IndexMap;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// The `type` field can be a single type or an array of types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeSet {
    Single(String),
    Multiple(Vec<String>),
}

/// `additionalProperties` can be a boolean or a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Bool(bool),
    Schema(Box<Schema>),
}

/// A JSON Schema node as found in `definitions`, `components.schemas` and
/// operation payloads. Only the keywords the generator understands are kept;
/// everything else is ignored on input.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub ref_path: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<TypeSet>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    // Object properties
    #[serde(
        default,
        deserialize_with = "lenient_schema_map",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub properties: IndexMap<String, Schema>,

    #[serde(
        default,
        deserialize_with = "required_names",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub required: Vec<String>,

    #[serde(
        rename = "additionalProperties",
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<AdditionalProperties>,

    // Array items
    #[serde(
        default,
        deserialize_with = "lenient_items",
        skip_serializing_if = "Option::is_none"
    )]
    pub items: Option<Box<Schema>>,

    // Composition
    #[serde(
        rename = "allOf",
        default,
        deserialize_with = "lenient_schema_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub all_of: Vec<Schema>,
}

/// Primitive type tags. Anything the generator does not map lands in `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    Integer,
    String,
    Boolean,
    Unknown,
}

/// Structural classification of a [`Schema`], in resolution priority order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SchemaKind<'a> {
    /// `$ref` to a named definition.
    Reference(&'a str),
    /// `allOf` whose first part is a `$ref`; carries that part's target name.
    Composed(&'a str),
    /// `type: array`, with its item schema if declared.
    Array(Option<&'a Schema>),
    /// Object with a truthy `additionalProperties` marker; carries the value
    /// type's target name when the marker is itself a `$ref`.
    Record(Option<&'a str>),
    /// Object with explicit properties.
    Object(&'a IndexMap<String, Schema>, &'a [String]),
    /// Object without properties or any usable marker.
    OpenObject,
    Primitive(PrimitiveKind),
}

impl Schema {
    /// A schema consisting only of a `$ref`.
    pub fn reference(ref_path: impl Into<String>) -> Self {
        Self {
            ref_path: Some(ref_path.into()),
            ..Self::default()
        }
    }

    /// The single effective type keyword. A `["T", "null"]` pair counts as `T`;
    /// any other multi-type set has no effective type.
    pub fn primary_type(&self) -> Option<&str> {
        match self.schema_type.as_ref()? {
            TypeSet::Single(t) => Some(t.as_str()),
            TypeSet::Multiple(types) => {
                let mut non_null = types.iter().filter(|t| *t != "null");
                match (non_null.next(), non_null.next()) {
                    (Some(t), None) => Some(t.as_str()),
                    _ => None,
                }
            }
        }
    }

    pub fn is_reference(&self) -> bool {
        self.ref_path.is_some()
    }

    pub fn kind(&self) -> SchemaKind<'_> {
        if let Some(ref_path) = &self.ref_path {
            return SchemaKind::Reference(ref_name(ref_path));
        }
        if let Some(ref_path) = self.all_of.first().and_then(|p| p.ref_path.as_deref()) {
            return SchemaKind::Composed(ref_name(ref_path));
        }

        let ty = self.primary_type();
        if ty == Some("array") {
            return SchemaKind::Array(self.items.as_deref());
        }

        let object_like = match ty {
            Some("object") => true,
            None => !self.properties.is_empty() || self.additional_properties.is_some(),
            Some(_) => false,
        };
        if object_like {
            match &self.additional_properties {
                Some(AdditionalProperties::Bool(true)) => return SchemaKind::Record(None),
                Some(AdditionalProperties::Schema(value)) => {
                    return SchemaKind::Record(value.ref_path.as_deref().map(ref_name));
                }
                _ => {}
            }
            if self.properties.is_empty() {
                return SchemaKind::OpenObject;
            }
            return SchemaKind::Object(&self.properties, &self.required);
        }

        let primitive = match ty {
            Some("integer") => PrimitiveKind::Integer,
            Some("string") => PrimitiveKind::String,
            Some("boolean") => PrimitiveKind::Boolean,
            _ => PrimitiveKind::Unknown,
        };
        SchemaKind::Primitive(primitive)
    }

    /// Call `f` with the target name of every `$ref` in this tree, depth-first,
    /// in declaration order.
    pub fn for_each_ref<'a>(&'a self, f: &mut impl FnMut(&'a str)) {
        if let Some(ref_path) = &self.ref_path {
            f(ref_name(ref_path));
        }
        if let Some(items) = &self.items {
            items.for_each_ref(f);
        }
        for prop in self.properties.values() {
            prop.for_each_ref(f);
        }
        for part in &self.all_of {
            part.for_each_ref(f);
        }
        if let Some(AdditionalProperties::Schema(value)) = &self.additional_properties {
            value.for_each_ref(f);
        }
    }
}

/// Extract the definition name from a `$ref` path: its last `/` segment.
///
/// `#/definitions/User` and `#/components/schemas/User` both yield `User`.
pub fn ref_name(ref_path: &str) -> &str {
    ref_path.rsplit('/').next().unwrap_or(ref_path)
}

/// `required` is a list of names in JSON Schema, but some Swagger 2 documents
/// put `required: true` on a property. A flag carries no names.
fn required_names<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Required {
        Names(Vec<String>),
        Flag(bool),
    }

    Ok(match Required::deserialize(deserializer)? {
        Required::Names(names) => names,
        Required::Flag(_) => Vec::new(),
    })
}

/// A schema position that also accepts values outside the model, such as a
/// boolean schema or tuple-form `items`. Those read as an empty schema, which
/// resolves to `any`.
#[derive(Deserialize)]
#[serde(untagged)]
enum LenientSchema {
    Schema(Schema),
    Other(IgnoredAny),
}

impl From<LenientSchema> for Schema {
    fn from(value: LenientSchema) -> Self {
        match value {
            LenientSchema::Schema(schema) => schema,
            LenientSchema::Other(_) => Schema::default(),
        }
    }
}

pub(crate) fn lenient_items<'de, D>(deserializer: D) -> Result<Option<Box<Schema>>, D::Error>
where
    D: Deserializer<'de>,
{
    let schema = LenientSchema::deserialize(deserializer)?.into();
    Ok(Some(Box::new(schema)))
}

pub(crate) fn lenient_schema_map<'de, D>(
    deserializer: D,
) -> Result<IndexMap<String, Schema>, D::Error>
where
    D: Deserializer<'de>,
{
    let map = IndexMap::<String, LenientSchema>::deserialize(deserializer)?;
    Ok(map.into_iter().map(|(k, v)| (k, v.into())).collect())
}

fn lenient_schema_list<'de, D>(deserializer: D) -> Result<Vec<Schema>, D::Error>
where
    D: Deserializer<'de>,
{
    let parts = Vec::<LenientSchema>::deserialize(deserializer)?;
    Ok(parts.into_iter().map(Schema::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Schema {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_ref_name() {
        assert_eq!(ref_name("#/definitions/User"), "User");
        assert_eq!(ref_name("#/components/schemas/Pet"), "Pet");
        assert_eq!(ref_name("Plain"), "Plain");
    }

    #[test]
    fn test_kind_reference_wins_over_type() {
        let s = parse(r##"{"$ref": "#/definitions/User", "type": "object"}"##);
        assert_eq!(s.kind(), SchemaKind::Reference("User"));
    }

    #[test]
    fn test_kind_composed_needs_leading_ref() {
        let s = parse(r##"{"allOf": [{"$ref": "#/definitions/Base"}, {"type": "object"}]}"##);
        assert_eq!(s.kind(), SchemaKind::Composed("Base"));

        let s = parse(r#"{"allOf": [{"type": "string"}], "type": "integer"}"#);
        assert_eq!(s.kind(), SchemaKind::Primitive(PrimitiveKind::Integer));
    }

    #[test]
    fn test_kind_record_markers() {
        let s = parse(r#"{"type": "object", "additionalProperties": true}"#);
        assert_eq!(s.kind(), SchemaKind::Record(None));

        let s = parse(
            r##"{"type": "object", "additionalProperties": {"$ref": "#/definitions/Tag"}}"##,
        );
        assert_eq!(s.kind(), SchemaKind::Record(Some("Tag")));

        let s = parse(r#"{"type": "object", "additionalProperties": {"type": "string"}}"#);
        assert_eq!(s.kind(), SchemaKind::Record(None));

        let s = parse(r#"{"type": "object", "additionalProperties": false}"#);
        assert_eq!(s.kind(), SchemaKind::OpenObject);
    }

    #[test]
    fn test_kind_object_without_type() {
        let s = parse(r#"{"properties": {"id": {"type": "integer"}}}"#);
        assert!(matches!(s.kind(), SchemaKind::Object(props, _) if props.len() == 1));
    }

    #[test]
    fn test_nullable_type_set() {
        let s = parse(r#"{"type": ["string", "null"]}"#);
        assert_eq!(s.kind(), SchemaKind::Primitive(PrimitiveKind::String));

        let s = parse(r#"{"type": ["string", "integer"]}"#);
        assert_eq!(s.kind(), SchemaKind::Primitive(PrimitiveKind::Unknown));
    }

    #[test]
    fn test_required_flag_is_tolerated() {
        let s = parse(r#"{"type": "string", "required": true}"#);
        assert!(s.required.is_empty());
    }

    #[test]
    fn test_tuple_items_read_as_any() {
        let s = parse(r#"{"type": "array", "items": [{"type": "string"}, {"type": "integer"}]}"#);
        assert_eq!(s.kind(), SchemaKind::Array(Some(&Schema::default())));
    }

    #[test]
    fn test_boolean_schemas_read_as_empty() {
        let s = parse(
            r##"{
                "properties": {"anything": true, "id": {"type": "integer"}},
                "allOf": [false, {"$ref": "#/definitions/Base"}]
            }"##,
        );
        assert_eq!(s.properties["anything"], Schema::default());
        assert_eq!(
            s.properties["id"].kind(),
            SchemaKind::Primitive(PrimitiveKind::Integer)
        );
        assert_eq!(s.all_of.len(), 2);
        assert!(s.all_of[1].is_reference());
    }

    #[test]
    fn test_for_each_ref_walks_every_position() {
        let s = parse(
            r##"{
                "type": "object",
                "properties": {
                    "owner": {"$ref": "#/definitions/User"},
                    "tags": {"type": "array", "items": {"$ref": "#/definitions/Tag"}},
                    "meta": {"type": "object", "additionalProperties": {"$ref": "#/definitions/Meta"}},
                    "base": {"allOf": [{"$ref": "#/definitions/Base"}]}
                }
            }"##,
        );
        let mut names = Vec::new();
        s.for_each_ref(&mut |name| names.push(name));
        assert_eq!(names, ["User", "Tag", "Meta", "Base"]);
    }
}
