pub mod naming;
pub mod reachability;
pub mod schema_resolver;
pub mod spec_to_ir;

pub use reachability::{Reachability, collect_reachable};
pub use spec_to_ir::transform;
