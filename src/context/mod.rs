//! Route activation context: what a step definition can see while compiling.

pub mod catalog;
pub mod default_context;
pub mod environment;

pub use catalog::EndpointCatalog;
pub use default_context::{DefaultRouteContext, REF_URI_PREFIX};
pub use environment::{Environment, EnvironmentBindable};

use std::sync::Arc;

use xroute_types::Endpoint;

use crate::error::CompileResult;
use crate::registry::Registry;

/// Access to the registry, endpoint resolution and the active environment.
///
/// Passed explicitly into every `compile` call; compilation never reaches
/// for process-wide state.
pub trait RouteContext: Send + Sync {
    fn registry(&self) -> &dyn Registry;

    fn environment(&self) -> Arc<Environment>;

    /// Resolve an endpoint from a direct URI, or else from a named reference.
    fn resolve_endpoint(
        &self,
        uri: Option<&str>,
        reference: Option<&str>,
    ) -> CompileResult<Arc<dyn Endpoint>>;
}
