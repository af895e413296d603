use std::collections::HashSet;

use indexmap::IndexMap;

use crate::ir::{DeclarationOrigin, Diagnostic, IrField, IrInterface, IrSpec};
use crate::parse::document::Document;
use crate::parse::operation::{Operation, ParameterOrRef};
use crate::parse::schema::Schema;

use super::naming::derive_name;
use super::reachability::{Reachability, collect_reachable};
use super::schema_resolver::{fields, resolve};

/// Status whose JSON body gets a response declaration.
const SUCCESS_STATUS: &str = "200";

/// Transform a parsed document into the ordered list of declarations to emit.
///
/// Reachable `definitions` come first, then reachable `components.schemas`,
/// then per path and method a request declaration (when parameters exist) and
/// a response declaration (when the `200` JSON body is not a bare `$ref`).
pub fn transform(doc: &Document) -> IrSpec {
    // Phase 1: Collect the definitions the API surface can observe
    let reachable = collect_reachable(doc);

    let mut builder = IrBuilder::default();
    for name in &reachable.unresolved {
        builder.diagnostics.push(Diagnostic::UnresolvedReference { name: name.clone() });
    }

    // Phase 2: Named definitions, gated by reachability
    builder.push_named(&doc.definitions, &reachable, DeclarationOrigin::Definition);
    if let Some(schemas) = doc.component_schemas() {
        builder.push_named(schemas, &reachable, DeclarationOrigin::ComponentSchema);
    }
    let named = builder.declarations.len();
    let skipped = doc.definitions.len() + doc.component_schemas().map_or(0, |s| s.len()) - named;
    log::debug!("emitting {named} named definitions, pruned {skipped} unreachable");

    // Phase 3: Per-operation request and response declarations
    for (path, item) in &doc.paths {
        for (method, op) in &item.operations {
            builder.push_operation(path, method, op);
        }
    }

    builder.finish()
}

#[derive(Default)]
struct IrBuilder {
    declarations: Vec<IrInterface>,
    diagnostics: Vec<Diagnostic>,
    seen: HashSet<String>,
}

impl IrBuilder {
    fn push(&mut self, decl: IrInterface) {
        if !self.seen.insert(decl.name.clone()) {
            log::debug!("duplicate declaration name {}", decl.name);
            self.diagnostics.push(Diagnostic::DuplicateName {
                name: decl.name.clone(),
            });
        }
        self.declarations.push(decl);
    }

    fn push_named(
        &mut self,
        table: &IndexMap<String, Schema>,
        reachable: &Reachability,
        origin: DeclarationOrigin,
    ) {
        for (name, schema) in table {
            if reachable.contains(name) {
                self.push(interface(name.clone(), schema, origin.clone()));
            }
        }
    }

    fn push_operation(&mut self, path: &str, method: &str, op: &Operation) {
        if !op.parameters.is_empty() {
            let request = self.request_interface(path, method, op);
            self.push(request);
        }

        let body = op
            .response(SUCCESS_STATUS)
            .and_then(|r| r.json_schema())
            .filter(|schema| !schema.is_reference());
        if let Some(schema) = body {
            let origin = DeclarationOrigin::Response {
                path: path.to_string(),
                method: method.to_string(),
            };
            self.push(interface(derive_name(path, method, false), schema, origin));
        }
    }

    /// Gather an operation's parameters into one object declaration. A
    /// parameter's own description takes precedence over its schema's.
    ///
    /// Fields are keyed by parameter name: a repeated name (`id` in both path
    /// and query) keeps its first position, takes the last declaration's type
    /// and is required when any of the declarations is.
    fn request_interface(&mut self, path: &str, method: &str, op: &Operation) -> IrInterface {
        let mut fields: IndexMap<String, IrField> = IndexMap::with_capacity(op.parameters.len());
        for param in &op.parameters {
            let param = match param {
                ParameterOrRef::Parameter(p) => p,
                ParameterOrRef::Ref { ref_path } => {
                    self.diagnostics.push(Diagnostic::ParameterReference {
                        path: path.to_string(),
                        method: method.to_string(),
                        ref_path: ref_path.clone(),
                    });
                    continue;
                }
            };
            let schema = param.effective_schema();
            let mut field = IrField {
                name: param.name.clone(),
                field_type: resolve(&schema),
                required: param.required,
                description: param.description.clone().or(schema.description),
            };
            if let Some(previous) = fields.get(&param.name) {
                log::debug!("parameter {} repeated in {method} {path}", param.name);
                field.required |= previous.required;
            }
            fields.insert(param.name.clone(), field);
        }

        IrInterface {
            name: derive_name(path, method, true),
            description: None,
            fields: fields.into_values().collect(),
            origin: DeclarationOrigin::Request {
                path: path.to_string(),
                method: method.to_string(),
            },
        }
    }

    fn finish(self) -> IrSpec {
        IrSpec {
            declarations: self.declarations,
            diagnostics: self.diagnostics,
        }
    }
}

/// Build a declaration from an object schema: its properties, required set
/// and description.
fn interface(name: String, schema: &Schema, origin: DeclarationOrigin) -> IrInterface {
    IrInterface {
        name,
        description: schema.description.clone(),
        fields: fields(&schema.properties, &schema.required),
        origin,
    }
}
