use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use super::{non_empty, StepDefinition};
use crate::context::{EnvironmentBindable, RouteContext};
use crate::error::{CompileError, CompileResult};
use crate::processor::Enricher;
use crate::registry::{lookup, Component};
use crate::strategy::{BeanMergeAdapter, MergeStrategy, ReplaceStrategy, StrategySource};

/// Enriches a message with data from a secondary resource.
///
/// The resource is addressed either by `uri` or by a registry `ref`; when
/// both are given the uri wins. The reply is folded into the routed message
/// by, in order of precedence, the inline `strategy`, the registry object
/// named by `strategyRef` (adapted when it is a plain object), or
/// [`ReplaceStrategy`].
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichDefinition {
    /// Direct locator of the resource endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    /// Registry key of the resource endpoint.
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Registry key of the merge strategy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy_ref: Option<String>,
    /// Method to call when the strategy is a plain object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy_method_name: Option<String>,
    /// Whether a plain-object strategy accepts missing operands.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy_method_allow_null: Option<bool>,
    /// Overrides `strategy_method_allow_null` for the prior state only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy_method_allow_null_old: Option<bool>,
    /// Overrides `strategy_method_allow_null` for the reply only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy_method_allow_null_new: Option<bool>,
    /// Merge even when the resource failed, with a missing reply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregate_on_exception: Option<bool>,
    /// Strategy supplied in code; cannot be authored in a route document.
    #[serde(skip)]
    pub strategy: Option<Arc<dyn MergeStrategy>>,
}

impl EnrichDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_uri(uri: impl Into<String>) -> Self {
        Self {
            uri: Some(uri.into()),
            ..Self::default()
        }
    }

    pub fn from_ref(reference: impl Into<String>) -> Self {
        Self {
            reference: Some(reference.into()),
            ..Self::default()
        }
    }

    pub fn with_strategy(mut self, strategy: Arc<dyn MergeStrategy>) -> Self {
        self.strategy = Some(strategy);
        self
    }

    pub fn with_strategy_ref(mut self, key: impl Into<String>) -> Self {
        self.strategy_ref = Some(key.into());
        self
    }

    pub fn with_strategy_method_name(mut self, method: impl Into<String>) -> Self {
        self.strategy_method_name = Some(method.into());
        self
    }

    pub fn with_strategy_method_allow_null(mut self, allow: bool) -> Self {
        self.strategy_method_allow_null = Some(allow);
        self
    }

    pub fn with_strategy_method_allow_null_old(mut self, allow: bool) -> Self {
        self.strategy_method_allow_null_old = Some(allow);
        self
    }

    pub fn with_strategy_method_allow_null_new(mut self, allow: bool) -> Self {
        self.strategy_method_allow_null_new = Some(allow);
        self
    }

    pub fn with_aggregate_on_exception(mut self, aggregate: bool) -> Self {
        self.aggregate_on_exception = Some(aggregate);
        self
    }

    /// The direct locator, if the resource is addressed by uri.
    pub fn endpoint_uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    fn description(&self) -> String {
        match (&self.uri, &self.reference) {
            (Some(uri), _) => uri.clone(),
            (None, Some(reference)) => format!("ref:{}", reference),
            (None, None) => String::new(),
        }
    }

    fn strategy_description(&self) -> &str {
        match (&self.strategy, &self.strategy_ref) {
            (Some(strategy), _) => strategy.name(),
            (None, Some(key)) => key.as_str(),
            (None, None) => "default",
        }
    }

    fn bean_adapter(&self, component: &Component) -> BeanMergeAdapter {
        let mut adapter = BeanMergeAdapter::new(component, self.strategy_method_name.as_deref());
        if let Some(allow) = self.strategy_method_allow_null {
            adapter = adapter.with_allow_null(allow);
        }
        if let Some(allow) = self.strategy_method_allow_null_old {
            adapter = adapter.with_allow_null_old(allow);
        }
        if let Some(allow) = self.strategy_method_allow_null_new {
            adapter = adapter.with_allow_null_new(allow);
        }
        adapter
    }

    /// Pick the merge strategy: inline, then `strategyRef`, then the default.
    ///
    /// A set `strategyRef`, even a blank one, must name a registered object.
    /// Nothing is bound or mutated here.
    fn select_merge_strategy(&self, context: &dyn RouteContext) -> CompileResult<SelectedStrategy> {
        if let Some(inline) = &self.strategy {
            return Ok(SelectedStrategy {
                strategy: Arc::clone(inline),
                source: StrategySource::Inline,
                bindable: None,
            });
        }
        let Some(key) = self.strategy_ref.as_deref().map(str::trim) else {
            tracing::debug!("no merge strategy configured, using replace");
            return Ok(SelectedStrategy {
                strategy: Arc::new(ReplaceStrategy),
                source: StrategySource::Default,
                bindable: None,
            });
        };

        let component = if key.is_empty() {
            None
        } else {
            lookup(context.registry(), key)
        };
        let component = component.ok_or_else(|| {
            CompileError::ConfigurationError(format!(
                "cannot find merge strategy in registry with name: {}",
                key
            ))
        })?;
        let selected = match component.as_merge_strategy() {
            Some(native) => SelectedStrategy {
                strategy: native,
                source: StrategySource::Registry,
                bindable: component.as_environment_bindable(),
            },
            None => SelectedStrategy {
                strategy: Arc::new(self.bean_adapter(&component)),
                source: StrategySource::Adapter,
                bindable: None,
            },
        };
        tracing::debug!(
            strategy = selected.strategy.name(),
            source = ?selected.source,
            "selected merge strategy"
        );
        Ok(selected)
    }
}

/// Merge strategy chosen for one compile, not yet bound to the environment.
struct SelectedStrategy {
    strategy: Arc<dyn MergeStrategy>,
    source: StrategySource,
    bindable: Option<Arc<dyn EnvironmentBindable>>,
}

impl SelectedStrategy {
    /// Hand the active environment to a context-aware strategy.
    fn bind_environment(&self, context: &dyn RouteContext) {
        let bindable = self
            .bindable
            .as_deref()
            .or_else(|| self.strategy.as_environment_bindable());
        if let Some(bindable) = bindable {
            let environment = context.environment();
            tracing::debug!(
                strategy = self.strategy.name(),
                environment = environment.name(),
                "binding environment into merge strategy"
            );
            bindable.bind_environment(environment);
        }
    }
}

impl StepDefinition for EnrichDefinition {
    type Output = Enricher;

    fn kind(&self) -> &'static str {
        "enrich"
    }

    fn label(&self) -> String {
        format!("enrich[{}]", self.description())
    }

    fn compile(&self, context: &dyn RouteContext) -> CompileResult<Enricher> {
        let uri = non_empty(&self.uri);
        let reference = non_empty(&self.reference);
        let endpoint = match (uri, reference) {
            (None, None) => {
                return Err(CompileError::ConfigurationError(
                    "either a direct locator (uri) or a named reference (ref) is required for the resource endpoint"
                        .to_string(),
                ))
            }
            (Some(uri), Some(reference)) => {
                tracing::warn!(uri, reference, "enrich step has both uri and ref, using uri");
                context.resolve_endpoint(Some(uri), None)?
            }
            (Some(uri), None) => context.resolve_endpoint(Some(uri), None)?,
            (None, Some(reference)) => context.resolve_endpoint(None, Some(reference))?,
        };

        let selected = self.select_merge_strategy(context)?;
        let producer = endpoint.create_producer()?;
        // Bound last: a failed compile must leave shared strategies untouched.
        selected.bind_environment(context);

        let mut enricher = Enricher::new(producer, selected.strategy, selected.source);
        if let Some(aggregate) = self.aggregate_on_exception {
            enricher = enricher.with_aggregate_on_failure(aggregate);
        }
        tracing::debug!(
            endpoint = enricher.endpoint_uri(),
            aggregate_on_failure = enricher.aggregate_on_failure(),
            "compiled enrich step"
        );
        Ok(enricher)
    }
}

impl fmt::Display for EnrichDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Enrich[{} {}]", self.description(), self.strategy_description())
    }
}

impl fmt::Debug for EnrichDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnrichDefinition")
            .field("uri", &self.uri)
            .field("reference", &self.reference)
            .field("strategy_ref", &self.strategy_ref)
            .field("strategy_method_name", &self.strategy_method_name)
            .field("strategy_method_allow_null", &self.strategy_method_allow_null)
            .field("strategy_method_allow_null_old", &self.strategy_method_allow_null_old)
            .field("strategy_method_allow_null_new", &self.strategy_method_allow_null_new)
            .field("aggregate_on_exception", &self.aggregate_on_exception)
            .field("strategy", &self.strategy.as_ref().map(|s| s.name()))
            .finish()
    }
}
