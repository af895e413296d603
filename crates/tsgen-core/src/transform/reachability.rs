use std::collections::{HashSet, VecDeque};

use indexmap::IndexSet;

use crate::parse::document::Document;
use crate::parse::operation::{Operation, ResponseOrRef};
use crate::parse::schema::Schema;

/// The named definitions observable from the API surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reachability {
    /// Every referenced name, in discovery order.
    pub names: IndexSet<String>,
    /// Referenced names with no matching definition, in discovery order.
    pub unresolved: Vec<String>,
}

impl Reachability {
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

/// Compute the transitive closure of definitions referenced by the document's
/// operations.
///
/// Seeds are the `$ref`s found anywhere in parameter, request body and
/// response schemas. Each seeded name is then looked up (`definitions` first,
/// then `components.schemas`) and scanned for further references until no new
/// names appear. Cycles terminate because each name is processed once.
pub fn collect_reachable(doc: &Document) -> Reachability {
    let mut names: IndexSet<String> = IndexSet::new();
    let mut queue: VecDeque<String> = VecDeque::new();

    for item in doc.paths.values() {
        for op in item.operations.values() {
            for schema in operation_schemas(op) {
                schema.for_each_ref(&mut |name| discover(name, &mut names, &mut queue));
            }
        }
    }
    log::debug!("{} definitions referenced directly by operations", names.len());

    let mut processed: HashSet<String> = HashSet::new();
    let mut unresolved = Vec::new();
    while let Some(name) = queue.pop_front() {
        if !processed.insert(name.clone()) {
            continue;
        }
        match doc.lookup_definition(&name) {
            Some(schema) => {
                schema.for_each_ref(&mut |found| discover(found, &mut names, &mut queue));
            }
            None => unresolved.push(name),
        }
    }

    Reachability { names, unresolved }
}

fn discover(name: &str, names: &mut IndexSet<String>, queue: &mut VecDeque<String>) {
    if names.insert(name.to_string()) {
        queue.push_back(name.to_string());
    }
}

/// Every schema an operation exposes: parameters, request body, responses.
fn operation_schemas(op: &Operation) -> Vec<Schema> {
    let mut schemas: Vec<Schema> = op
        .inline_parameters()
        .map(|p| p.effective_schema())
        .collect();
    if let Some(schema) = op.request_body.as_ref().and_then(|b| b.json_schema()) {
        schemas.push(schema.clone());
    }
    for response in op.responses.values() {
        if let ResponseOrRef::Response(r) = response
            && let Some(schema) = r.json_schema()
        {
            schemas.push(schema.clone());
        }
    }
    schemas
}
