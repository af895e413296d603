use minijinja::{Environment, context};
use tsgen_core::ir::IrInterface;

use crate::generator::TypeScriptError;
use crate::type_mapper::{escape_jsdoc, ir_type_to_ts, property_key};

const TEMPLATE_NAME: &str = "interface.ts.j2";

/// Renders one `export interface` block per declaration.
pub struct InterfaceEmitter {
    env: Environment<'static>,
}

impl InterfaceEmitter {
    pub fn new() -> Result<Self, TypeScriptError> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.add_filter("escape_jsdoc", |value: String| escape_jsdoc(&value));
        env.add_template(
            TEMPLATE_NAME,
            include_str!("../../templates/interface.ts.j2"),
        )?;
        Ok(Self { env })
    }

    /// Render a declaration: optional doc line, header, one line per field in
    /// declaration order, closing brace. No trailing newline.
    pub fn render(&self, decl: &IrInterface) -> Result<String, TypeScriptError> {
        let tmpl = self.env.get_template(TEMPLATE_NAME)?;

        let fields: Vec<minijinja::Value> = decl
            .fields
            .iter()
            .map(|f| {
                context! {
                    key => property_key(&f.name),
                    ts_type => ir_type_to_ts(&f.field_type, 1),
                    required => f.required,
                    description => f.description.clone(),
                }
            })
            .collect();

        let rendered = tmpl.render(context! {
            name => decl.name.clone(),
            description => decl.description.clone(),
            fields => fields,
        })?;
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsgen_core::ir::{DeclarationOrigin, IrField, IrType};

    fn decl(fields: Vec<IrField>, description: Option<&str>) -> IrInterface {
        IrInterface {
            name: "User".into(),
            description: description.map(String::from),
            fields,
            origin: DeclarationOrigin::Definition,
        }
    }

    #[test]
    fn test_render_required_and_optional() {
        let emitter = InterfaceEmitter::new().unwrap();
        let out = emitter
            .render(&decl(
                vec![
                    IrField {
                        name: "id".into(),
                        field_type: IrType::Number,
                        required: true,
                        description: Some("Primary key".into()),
                    },
                    IrField {
                        name: "email".into(),
                        field_type: IrType::String,
                        required: false,
                        description: None,
                    },
                ],
                Some("A registered user"),
            ))
            .unwrap();
        assert_eq!(
            out,
            "/** A registered user */\nexport interface User {\n  /** Primary key */\n  id: number;\n  email?: string;\n}"
        );
    }

    #[test]
    fn test_render_without_fields() {
        let emitter = InterfaceEmitter::new().unwrap();
        let out = emitter.render(&decl(Vec::new(), None)).unwrap();
        assert_eq!(out, "export interface User {\n}");
    }

    #[test]
    fn test_render_escapes_comment_terminator() {
        let emitter = InterfaceEmitter::new().unwrap();
        let out = emitter
            .render(&decl(Vec::new(), Some("ends */ early")))
            .unwrap();
        assert!(out.starts_with("/** ends *\\/ early */\n"));
    }
}
