use std::time::Instant;

use crate::context::RouteContext;
use crate::dsl::{parse_route, DslFormat, RouteSchema, StepDefinitionSchema, StepSchema};
use crate::error::CompileError;
use crate::model::StepDefinition;

use super::compiled_route::{CompiledRoute, CompiledStep, CompiledStepEntry};

/// Drives step compilation during route activation.
///
/// Compilation is one-shot: the first failing step aborts the route and the
/// error names that step. Nothing is retried.
pub struct RouteCompiler;

impl RouteCompiler {
    /// Parse a route document and compile it.
    pub fn compile_str(
        content: &str,
        format: DslFormat,
        context: &dyn RouteContext,
    ) -> Result<CompiledRoute, CompileError> {
        let schema = parse_route(content, format)?;
        Self::compile_route(&schema, context)
    }

    pub fn compile_route(
        schema: &RouteSchema,
        context: &dyn RouteContext,
    ) -> Result<CompiledRoute, CompileError> {
        let mut steps = Vec::with_capacity(schema.steps.len());
        for (index, step) in schema.steps.iter().enumerate() {
            let id = step.id_or_index(index);
            let compiled = Self::compile_step(step, context).map_err(|e| {
                tracing::error!(route = %schema.id, step = %id, error = %e, "step compilation failed");
                e.in_step(id.clone(), step.definition.label())
            })?;
            steps.push(CompiledStepEntry {
                id,
                label: step.definition.label(),
                step: compiled,
            });
        }
        tracing::info!(route = %schema.id, steps = steps.len(), "route compiled");
        Ok(CompiledRoute {
            id: schema.id.clone(),
            compiled_at: Instant::now(),
            steps,
        })
    }

    /// Compile a single step, without step identification on errors.
    pub fn compile_step(
        step: &StepSchema,
        context: &dyn RouteContext,
    ) -> Result<CompiledStep, CompileError> {
        match &step.definition {
            StepDefinitionSchema::Enrich(def) => def.compile(context).map(CompiledStep::Enrich),
            StepDefinitionSchema::CustomLoadBalancer(def) => {
                def.compile(context).map(CompiledStep::LoadBalance)
            }
        }
    }
}
