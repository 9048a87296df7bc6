use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use xroute_types::LoadBalancer;

use crate::processor::Enricher;

/// An executable unit produced from one step.
pub enum CompiledStep {
    Enrich(Enricher),
    LoadBalance(Arc<dyn LoadBalancer>),
}

impl CompiledStep {
    pub fn as_enricher(&self) -> Option<&Enricher> {
        match self {
            CompiledStep::Enrich(enricher) => Some(enricher),
            _ => None,
        }
    }

    pub fn as_load_balancer(&self) -> Option<&Arc<dyn LoadBalancer>> {
        match self {
            CompiledStep::LoadBalance(policy) => Some(policy),
            _ => None,
        }
    }
}

impl fmt::Debug for CompiledStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompiledStep::Enrich(enricher) => f.debug_tuple("Enrich").field(enricher).finish(),
            CompiledStep::LoadBalance(policy) => {
                f.debug_tuple("LoadBalance").field(&policy.name()).finish()
            }
        }
    }
}

#[derive(Debug)]
pub struct CompiledStepEntry {
    pub id: String,
    pub label: String,
    pub step: CompiledStep,
}

/// Every step of a route, compiled and ready to install.
#[derive(Debug)]
pub struct CompiledRoute {
    pub(crate) id: String,
    pub(crate) compiled_at: Instant,
    pub(crate) steps: Vec<CompiledStepEntry>,
}

impl CompiledRoute {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn compiled_at(&self) -> Instant {
        self.compiled_at
    }

    pub fn steps(&self) -> &[CompiledStepEntry] {
        &self.steps
    }

    pub fn step(&self, id: &str) -> Option<&CompiledStep> {
        self.steps.iter().find(|s| s.id == id).map(|s| &s.step)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
