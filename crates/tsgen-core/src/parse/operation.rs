use std::borrow::Borrow;
use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::schema::{Schema, TypeSet, lenient_items};

/// HTTP methods recognised as operation keys inside a path item.
pub const HTTP_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// A path item: the operations declared under one path, in document order.
///
/// Keys that are not HTTP methods (`summary`, `parameters`, `x-*`, ...) are
/// skipped while reading.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathItem {
    pub operations: IndexMap<String, Operation>,
}

impl Serialize for PathItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.operations.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PathItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PathItemVisitor;

        impl<'de> Visitor<'de> for PathItemVisitor {
            type Value = PathItem;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a path item object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<PathItem, A::Error> {
                let mut operations = IndexMap::new();
                while let Some(key) = map.next_key::<String>()? {
                    if HTTP_METHODS.contains(&key.to_ascii_lowercase().as_str()) {
                        let op: Operation = map.next_value()?;
                        operations.insert(key, op);
                    } else {
                        map.next_value::<IgnoredAny>()?;
                    }
                }
                Ok(PathItem { operations })
            }
        }

        deserializer.deserialize_map(PathItemVisitor)
    }
}

/// An API operation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Operation {
    #[serde(rename = "operationId", skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterOrRef>,

    #[serde(rename = "requestBody", skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub responses: IndexMap<StatusCode, ResponseOrRef>,
}

impl Operation {
    /// The inline response declared for `status`, if any.
    pub fn response(&self, status: &str) -> Option<&Response> {
        match self.responses.get(status)? {
            ResponseOrRef::Response(r) => Some(r),
            ResponseOrRef::Ref { .. } => None,
        }
    }

    /// Inline (non-`$ref`) parameters in declaration order.
    pub fn inline_parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters.iter().filter_map(|p| match p {
            ParameterOrRef::Parameter(param) => Some(param),
            ParameterOrRef::Ref { .. } => None,
        })
    }
}

/// A response status key. YAML documents often write `200:` unquoted, which
/// arrives as an integer, so both forms are accepted and kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StatusCode(String);

impl StatusCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for StatusCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StatusCode {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for StatusCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for StatusCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct StatusVisitor;

        impl Visitor<'_> for StatusVisitor {
            type Value = StatusCode;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a status code string or integer")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<StatusCode, E> {
                Ok(StatusCode(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<StatusCode, E> {
                Ok(StatusCode(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<StatusCode, E> {
                Ok(StatusCode(v.to_string()))
            }
        }

        deserializer.deserialize_any(StatusVisitor)
    }
}

/// An API parameter.
///
/// OpenAPI 3 carries the type in `schema`; Swagger 2 non-body parameters put
/// `type`, `format` and `items` on the parameter itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,

    #[serde(rename = "in", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub param_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_items",
        skip_serializing_if = "Option::is_none"
    )]
    pub items: Option<Box<Schema>>,
}

impl Parameter {
    /// The parameter's schema, assembled from the Swagger 2 inline keywords
    /// when no `schema` is present.
    pub fn effective_schema(&self) -> Schema {
        if let Some(schema) = &self.schema {
            return schema.clone();
        }
        Schema {
            schema_type: self.param_type.clone().map(TypeSet::Single),
            format: self.format.clone(),
            items: self.items.clone(),
            ..Schema::default()
        }
    }
}

/// A reference or inline parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Parameter(Parameter),
}

/// A media type object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MediaType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}

/// A request body definition.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RequestBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub content: IndexMap<String, MediaType>,

    #[serde(default)]
    pub required: bool,
}

impl RequestBody {
    pub fn json_schema(&self) -> Option<&Schema> {
        json_content_schema(&self.content)
    }
}

/// A response definition.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Response {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub content: IndexMap<String, MediaType>,

    /// Swagger 2 puts the body schema directly on the response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}

impl Response {
    pub fn json_schema(&self) -> Option<&Schema> {
        json_content_schema(&self.content).or(self.schema.as_ref())
    }
}

/// A reference or inline response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Response(Response),
}

/// Pick the JSON body schema out of a content map: `application/json`, then
/// any other JSON media type, then `*/*`.
fn json_content_schema(content: &IndexMap<String, MediaType>) -> Option<&Schema> {
    fn pick(media: &MediaType) -> Option<&Schema> {
        media.schema.as_ref()
    }
    content
        .get("application/json")
        .and_then(pick)
        .or_else(|| {
            content
                .iter()
                .filter(|(mime, _)| mime.contains("json"))
                .find_map(|(_, media)| pick(media))
        })
        .or_else(|| content.get("*/*").and_then(pick))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_item_keeps_method_order_and_skips_other_keys() {
        let json = r#"{
            "summary": "users",
            "parameters": [{"name": "tenant", "in": "header"}],
            "post": {},
            "x-internal": true,
            "get": {}
        }"#;
        let item: PathItem = serde_json::from_str(json).unwrap();
        let methods: Vec<&str> = item.operations.keys().map(String::as_str).collect();
        assert_eq!(methods, ["post", "get"]);
    }

    #[test]
    fn test_integer_status_key_from_yaml() {
        let yaml = "responses:\n  200:\n    description: ok\n  '404':\n    description: missing\n";
        let op: Operation = serde_yaml_ng::from_str(yaml).unwrap();
        assert!(op.response("200").is_some());
        assert!(op.response("404").is_some());
    }

    #[test]
    fn test_swagger2_parameter_schema() {
        let json = r#"{"name": "ids", "in": "query", "type": "array", "items": {"type": "integer"}}"#;
        let p: Parameter = serde_json::from_str(json).unwrap();
        let schema = p.effective_schema();
        assert_eq!(schema.primary_type(), Some("array"));
        assert_eq!(
            schema.items.as_ref().and_then(|i| i.primary_type()),
            Some("integer")
        );
    }

    #[test]
    fn test_parameter_ref_is_not_inline() {
        let json = r##"{"parameters": [{"$ref": "#/components/parameters/Limit"}, {"name": "q", "in": "query"}]}"##;
        let op: Operation = serde_json::from_str(json).unwrap();
        let names: Vec<&str> = op.inline_parameters().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["q"]);
    }

    #[test]
    fn test_json_schema_selection() {
        let json = r#"{
            "description": "ok",
            "content": {
                "text/plain": {"schema": {"type": "string"}},
                "application/problem+json": {"schema": {"type": "integer"}}
            }
        }"#;
        let r: Response = serde_json::from_str(json).unwrap();
        assert_eq!(r.json_schema().and_then(|s| s.primary_type()), Some("integer"));

        let json = r#"{"description": "ok", "schema": {"type": "boolean"}}"#;
        let r: Response = serde_json::from_str(json).unwrap();
        assert_eq!(r.json_schema().and_then(|s| s.primary_type()), Some("boolean"));

        let json = r#"{"content": {"*/*": {"schema": {"type": "string"}}}}"#;
        let r: Response = serde_json::from_str(json).unwrap();
        assert_eq!(r.json_schema().and_then(|s| s.primary_type()), Some("string"));
    }
}
