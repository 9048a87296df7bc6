use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use xroute_types::LoadBalancer;

use super::{non_empty, StepDefinition};
use crate::context::RouteContext;
use crate::error::{CompileError, CompileResult};
use crate::registry::resolve_load_balancer;

/// Load balancing through a policy looked up from the registry.
///
/// The lookup is strict: the referenced component must natively implement
/// [`LoadBalancer`]; there is no adapter fallback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomLoadBalancerDefinition {
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl CustomLoadBalancerDefinition {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: Some(reference.into()),
        }
    }
}

impl StepDefinition for CustomLoadBalancerDefinition {
    type Output = Arc<dyn LoadBalancer>;

    fn kind(&self) -> &'static str {
        "custom-load-balancer"
    }

    fn label(&self) -> String {
        format!("customLoadBalancer[{}]", self.reference.as_deref().unwrap_or(""))
    }

    fn compile(&self, context: &dyn RouteContext) -> CompileResult<Arc<dyn LoadBalancer>> {
        let reference = non_empty(&self.reference).ok_or_else(|| {
            CompileError::ConfigurationError(
                "a named reference (ref) is mandatory for a custom load balancer".to_string(),
            )
        })?;
        let policy = resolve_load_balancer(context.registry(), reference)?;
        tracing::debug!(reference, policy = policy.name(), "resolved load balancer");
        Ok(policy)
    }
}

impl fmt::Display for CustomLoadBalancerDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CustomLoadBalancer[{}]", self.reference.as_deref().unwrap_or(""))
    }
}
