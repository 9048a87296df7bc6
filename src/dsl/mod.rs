//! Route documents: the authored, serialized form of step definitions.

pub mod parser;
pub mod schema;

pub use parser::{parse_route, DslFormat};
pub use schema::{RouteSchema, StepDefinitionSchema, StepSchema};
