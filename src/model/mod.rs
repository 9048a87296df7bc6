//! Step definitions: declarative, serializable route steps that compile into
//! executable units against a [`RouteContext`].

pub mod custom_load_balancer;
pub mod enrich;

pub use custom_load_balancer::CustomLoadBalancerDefinition;
pub use enrich::EnrichDefinition;

use crate::context::RouteContext;
use crate::error::CompileResult;

/// A route step before compilation.
///
/// `compile` never mutates the definition; compiling the same definition
/// twice yields two independent units with the same configuration.
pub trait StepDefinition {
    /// The executable unit this step compiles into.
    type Output;

    /// Short name used in route documents, e.g. `enrich`.
    fn kind(&self) -> &'static str;

    /// Human readable label, e.g. `enrich[svc:pricing]`.
    fn label(&self) -> String;

    fn compile(&self, context: &dyn RouteContext) -> CompileResult<Self::Output>;
}

/// `Some(value)` when the attribute is set to a non-blank string.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
