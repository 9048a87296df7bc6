use serde::{Deserialize, Serialize};

use crate::model::{CustomLoadBalancerDefinition, EnrichDefinition, StepDefinition};

/// A route document: an id and its ordered steps.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct RouteSchema {
    pub id: String,
    #[serde(default)]
    pub steps: Vec<StepSchema>,
}

/// One authored step. The `type` field selects the definition.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct StepSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub definition: StepDefinitionSchema,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum StepDefinitionSchema {
    Enrich(EnrichDefinition),
    CustomLoadBalancer(CustomLoadBalancerDefinition),
}

impl StepSchema {
    pub fn new(definition: StepDefinitionSchema) -> Self {
        Self {
            id: None,
            definition,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// The authored id, or `<kind>-<index>` when none was given.
    pub fn id_or_index(&self, index: usize) -> String {
        match &self.id {
            Some(id) if !id.trim().is_empty() => id.clone(),
            _ => format!("{}-{}", self.definition.kind(), index),
        }
    }
}

impl StepDefinitionSchema {
    pub fn kind(&self) -> &'static str {
        match self {
            StepDefinitionSchema::Enrich(def) => def.kind(),
            StepDefinitionSchema::CustomLoadBalancer(def) => def.kind(),
        }
    }

    pub fn label(&self) -> String {
        match self {
            StepDefinitionSchema::Enrich(def) => def.label(),
            StepDefinitionSchema::CustomLoadBalancer(def) => def.label(),
        }
    }
}

impl From<EnrichDefinition> for StepDefinitionSchema {
    fn from(def: EnrichDefinition) -> Self {
        StepDefinitionSchema::Enrich(def)
    }
}

impl From<CustomLoadBalancerDefinition> for StepDefinitionSchema {
    fn from(def: CustomLoadBalancerDefinition) -> Self {
        StepDefinitionSchema::CustomLoadBalancer(def)
    }
}
