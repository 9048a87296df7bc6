//! Reference resolution against a [`Registry`].

use std::sync::Arc;

use xroute_types::{Endpoint, LoadBalancer};

use super::component::{Capability, Component};
use super::Registry;
use crate::error::{CompileError, CompileResult};

/// Best-effort lookup: the raw component, or `None` when absent.
pub fn lookup(registry: &dyn Registry, key: &str) -> Option<Component> {
    let found = registry.get(key);
    tracing::debug!(key, found = found.is_some(), "registry lookup");
    found
}

/// Mandatory lookup: the component must exist and provide `capability`.
pub fn resolve(
    registry: &dyn Registry,
    key: &str,
    capability: Capability,
) -> CompileResult<Component> {
    if key.trim().is_empty() {
        return Err(CompileError::ConfigurationError(format!(
            "a non-empty registry key is required to resolve a {}",
            capability
        )));
    }
    let component = lookup(registry, key).ok_or_else(|| CompileError::NotFound {
        key: key.to_string(),
    })?;
    if !component.satisfies(capability) {
        return Err(CompileError::TypeMismatch {
            key: key.to_string(),
            expected: capability,
            provided: component.describe_capabilities(),
        });
    }
    Ok(component)
}

pub fn resolve_load_balancer(
    registry: &dyn Registry,
    key: &str,
) -> CompileResult<Arc<dyn LoadBalancer>> {
    let component = resolve(registry, key, Capability::LoadBalancer)?;
    component
        .as_load_balancer()
        .ok_or_else(|| CompileError::TypeMismatch {
            key: key.to_string(),
            expected: Capability::LoadBalancer,
            provided: component.describe_capabilities(),
        })
}

pub fn resolve_endpoint_ref(registry: &dyn Registry, key: &str) -> CompileResult<Arc<dyn Endpoint>> {
    let component = resolve(registry, key, Capability::Endpoint)?;
    component
        .as_endpoint()
        .ok_or_else(|| CompileError::TypeMismatch {
            key: key.to_string(),
            expected: Capability::Endpoint,
            provided: component.describe_capabilities(),
        })
}
