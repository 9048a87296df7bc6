//! # XRoute: route step compiler
//!
//! `xroute` turns declarative route-step definitions into executable units,
//! resolving the components they name from a live registry when a route is
//! activated:
//!
//! - **Enrich**: resolve the resource endpoint (by uri or registry ref), pick
//!   a merge strategy (inline, registered, adapted plain object, or the
//!   replace default), bind the active environment into it, and build an
//!   [`Enricher`].
//! - **Custom load balancer**: strictly resolve a registered
//!   [`LoadBalancer`] policy.
//! - **Adapter**: [`BeanMergeAdapter`] lets any registered object with a
//!   suitable two-operand method act as a merge strategy.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use xroute::{DefaultRouteContext, DslFormat, EndpointCatalog, InMemoryRegistry, RouteCompiler};
//!
//! let registry = Arc::new(InMemoryRegistry::new());
//! let endpoints = Arc::new(EndpointCatalog::new());
//! let context = DefaultRouteContext::new(registry, endpoints);
//! let yaml = std::fs::read_to_string("route.yaml").unwrap();
//! let route = RouteCompiler::compile_str(&yaml, DslFormat::Yaml, &context).unwrap();
//! println!("{} steps compiled", route.len());
//! ```

pub mod compiler;
pub mod context;
pub mod dsl;
pub mod error;
pub mod model;
pub mod processor;
pub mod registry;
pub mod strategy;

pub use crate::compiler::{CompiledRoute, CompiledStep, CompiledStepEntry, RouteCompiler};
pub use crate::context::{
    DefaultRouteContext, EndpointCatalog, Environment, EnvironmentBindable, RouteContext,
};
pub use crate::dsl::{parse_route, DslFormat, RouteSchema, StepDefinitionSchema, StepSchema};
pub use crate::error::{
    CompileError, CompileResult, ErrorCode, ErrorContext, MergeError, MergeResult, ProcessError,
};
pub use crate::model::{CustomLoadBalancerDefinition, EnrichDefinition, StepDefinition};
pub use crate::processor::Enricher;
pub use crate::registry::{Capability, Component, InMemoryRegistry, Registry};
pub use crate::strategy::{
    BeanMergeAdapter, MergeStrategy, ParamType, ReplaceStrategy, StrategySource,
};
pub use xroute_types::{Endpoint, Exchange, LoadBalancer, Producer, ProducerError};
