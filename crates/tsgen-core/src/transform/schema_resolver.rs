use indexmap::IndexMap;

use crate::ir::{IrField, IrType};
use crate::parse::schema::{PrimitiveKind, Schema, SchemaKind};

/// Convert a parsed `Schema` to an `IrType`.
///
/// A `$ref` always resolves to the bare target name and is never expanded,
/// which keeps recursion bounded by the nesting depth of the tree itself even
/// when named definitions reference each other in a cycle.
pub fn resolve(schema: &Schema) -> IrType {
    match schema.kind() {
        SchemaKind::Reference(name) => IrType::Ref(name.to_string()),
        // Only the leading reference of an `allOf` is kept, as a bare name.
        SchemaKind::Composed(name) => IrType::Ref(name.to_string()),
        SchemaKind::Array(items) => {
            let item = items.map(resolve).unwrap_or(IrType::Any);
            IrType::Array(Box::new(item))
        }
        SchemaKind::Record(value_ref) => {
            let value = value_ref
                .map(|name| IrType::Ref(name.to_string()))
                .unwrap_or(IrType::Any);
            IrType::Map(Box::new(value))
        }
        SchemaKind::Object(properties, required) => IrType::Object(fields(properties, required)),
        SchemaKind::OpenObject => IrType::Map(Box::new(IrType::Any)),
        SchemaKind::Primitive(kind) => resolve_primitive(kind),
    }
}

/// Map a primitive type tag to its IR type.
pub fn resolve_primitive(kind: PrimitiveKind) -> IrType {
    match kind {
        PrimitiveKind::Integer => IrType::Number,
        PrimitiveKind::String => IrType::String,
        PrimitiveKind::Boolean => IrType::Boolean,
        PrimitiveKind::Unknown => IrType::Any,
    }
}

/// Resolve every property in declaration order. Names in `required` that are
/// not properties are ignored.
pub fn fields(properties: &IndexMap<String, Schema>, required: &[String]) -> Vec<IrField> {
    properties
        .iter()
        .map(|(name, prop)| IrField {
            name: name.clone(),
            field_type: resolve(prop),
            required: required.contains(name),
            description: prop.description.clone(),
        })
        .collect()
}
