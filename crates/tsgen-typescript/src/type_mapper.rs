use tsgen_core::ir::{IrField, IrType};

/// Indentation unit of generated code.
pub const INDENT: &str = "  ";

/// Map an `IrType` to its TypeScript type expression.
///
/// `depth` is the nesting level of the line the expression appears on; inline
/// object members are indented one level deeper and the closing brace is
/// aligned with that line.
pub fn ir_type_to_ts(ir_type: &IrType, depth: usize) -> String {
    match ir_type {
        IrType::Number => "number".to_string(),
        IrType::String => "string".to_string(),
        IrType::Boolean => "boolean".to_string(),
        IrType::Any => "any".to_string(),
        IrType::Ref(name) => name.clone(),
        IrType::Array(inner) => format!("{}[]", ir_type_to_ts(inner, depth)),
        IrType::Map(value_type) => {
            format!("Record<string, {}>", ir_type_to_ts(value_type, depth))
        }
        IrType::Object(fields) => {
            let mut out = String::from("{\n");
            for field in fields {
                out.push_str(&field_line(field, depth + 1));
            }
            out.push_str(&INDENT.repeat(depth));
            out.push('}');
            out
        }
    }
}

/// Render one object member, with its doc line, at the given depth.
pub fn field_line(field: &IrField, depth: usize) -> String {
    let indent = INDENT.repeat(depth);
    let mut out = String::new();
    if let Some(doc) = &field.description {
        out.push_str(&format!("{indent}/** {} */\n", escape_jsdoc(doc)));
    }
    out.push_str(&format!(
        "{indent}{}{}: {};\n",
        property_key(&field.name),
        if field.required { "" } else { "?" },
        ir_type_to_ts(&field.field_type, depth)
    ));
    out
}

/// Quote a property name unless it is a plain identifier.
pub fn property_key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        format!("\"{}\"", name.replace('\\', "\\\\").replace('"', "\\\""))
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// Escape `*/` sequences that would prematurely close JSDoc comment blocks.
pub fn escape_jsdoc(value: &str) -> String {
    value.replace("*/", "*\\/")
}
