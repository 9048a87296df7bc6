pub mod compiled_route;
pub mod compiler;

pub use compiled_route::{CompiledRoute, CompiledStep, CompiledStepEntry};
pub use compiler::RouteCompiler;
