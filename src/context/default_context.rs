use std::sync::Arc;

use xroute_types::Endpoint;

use super::catalog::EndpointCatalog;
use super::environment::Environment;
use super::RouteContext;
use crate::error::{CompileError, CompileResult};
use crate::registry::{resolve_endpoint_ref, Registry};

/// URI prefix that turns a direct locator into a registry reference.
pub const REF_URI_PREFIX: &str = "ref:";

/// [`RouteContext`] over a registry, an endpoint catalog and an environment.
#[derive(Clone)]
pub struct DefaultRouteContext {
    registry: Arc<dyn Registry>,
    endpoints: Arc<EndpointCatalog>,
    environment: Arc<Environment>,
}

impl DefaultRouteContext {
    pub fn new(registry: Arc<dyn Registry>, endpoints: Arc<EndpointCatalog>) -> Self {
        Self {
            registry,
            endpoints,
            environment: Arc::new(Environment::new("default")),
        }
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = Arc::new(environment);
        self
    }

    pub fn endpoints(&self) -> &EndpointCatalog {
        &self.endpoints
    }
}

impl RouteContext for DefaultRouteContext {
    fn registry(&self) -> &dyn Registry {
        self.registry.as_ref()
    }

    fn environment(&self) -> Arc<Environment> {
        Arc::clone(&self.environment)
    }

    fn resolve_endpoint(
        &self,
        uri: Option<&str>,
        reference: Option<&str>,
    ) -> CompileResult<Arc<dyn Endpoint>> {
        if let Some(uri) = uri {
            if let Some(name) = uri.strip_prefix(REF_URI_PREFIX) {
                return resolve_endpoint_ref(self.registry(), name);
            }
            return self.endpoints.get(uri).ok_or_else(|| CompileError::NotFound {
                key: uri.to_string(),
            });
        }
        match reference {
            Some(name) => resolve_endpoint_ref(self.registry(), name),
            None => Err(CompileError::ConfigurationError(
                "either an endpoint uri or a reference is required".to_string(),
            )),
        }
    }
}
