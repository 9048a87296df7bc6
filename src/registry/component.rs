use serde_json::Value;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

use xroute_types::{Endpoint, LoadBalancer};

use crate::context::EnvironmentBindable;
use crate::strategy::bean::{MethodHandle, MethodTable, ParamType};
use crate::strategy::MergeStrategy;

/// Capability a caller can demand from a registered component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// No capability enforced.
    Any,
    MergeStrategy,
    LoadBalancer,
    Endpoint,
    EnvironmentBindable,
    /// Plain object exposing named methods.
    Bean,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Capability::Any => "any",
            Capability::MergeStrategy => "merge-strategy",
            Capability::LoadBalancer => "load-balancer",
            Capability::Endpoint => "endpoint",
            Capability::EnvironmentBindable => "environment-bindable",
            Capability::Bean => "bean",
        };
        f.write_str(name)
    }
}

/// A registered object together with its declared capability views.
#[derive(Clone)]
pub struct Component {
    type_name: &'static str,
    object: Arc<dyn Any + Send + Sync>,
    merge_strategy: Option<Arc<dyn MergeStrategy>>,
    load_balancer: Option<Arc<dyn LoadBalancer>>,
    endpoint: Option<Arc<dyn Endpoint>>,
    bindable: Option<Arc<dyn EnvironmentBindable>>,
    bean: Option<Arc<MethodTable>>,
}

impl Component {
    pub fn builder<T: Send + Sync + 'static>(object: T) -> ComponentBuilder<T> {
        Self::from_arc(Arc::new(object))
    }

    pub fn from_arc<T: Send + Sync + 'static>(object: Arc<T>) -> ComponentBuilder<T> {
        ComponentBuilder {
            object,
            merge_strategy: None,
            load_balancer: None,
            endpoint: None,
            bindable: None,
            methods: MethodTable::new(),
        }
    }

    /// Rust type name of the registered object.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn capabilities(&self) -> Vec<Capability> {
        let mut caps = Vec::new();
        if self.merge_strategy.is_some() {
            caps.push(Capability::MergeStrategy);
        }
        if self.load_balancer.is_some() {
            caps.push(Capability::LoadBalancer);
        }
        if self.endpoint.is_some() {
            caps.push(Capability::Endpoint);
        }
        if self.bindable.is_some() {
            caps.push(Capability::EnvironmentBindable);
        }
        if self.bean.is_some() {
            caps.push(Capability::Bean);
        }
        caps
    }

    pub fn satisfies(&self, capability: Capability) -> bool {
        match capability {
            Capability::Any => true,
            Capability::MergeStrategy => self.merge_strategy.is_some(),
            Capability::LoadBalancer => self.load_balancer.is_some(),
            Capability::Endpoint => self.endpoint.is_some(),
            Capability::EnvironmentBindable => self.bindable.is_some(),
            Capability::Bean => self.bean.is_some(),
        }
    }

    /// Comma separated capability list, `none` when empty.
    pub fn describe_capabilities(&self) -> String {
        let caps = self.capabilities();
        if caps.is_empty() {
            return "none".to_string();
        }
        caps.iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn as_merge_strategy(&self) -> Option<Arc<dyn MergeStrategy>> {
        self.merge_strategy.clone()
    }

    pub fn as_load_balancer(&self) -> Option<Arc<dyn LoadBalancer>> {
        self.load_balancer.clone()
    }

    pub fn as_endpoint(&self) -> Option<Arc<dyn Endpoint>> {
        self.endpoint.clone()
    }

    pub fn as_environment_bindable(&self) -> Option<Arc<dyn EnvironmentBindable>> {
        self.bindable.clone()
    }

    /// Method table of the object; empty when it exposes no methods.
    pub fn methods(&self) -> Arc<MethodTable> {
        self.bean.clone().unwrap_or_default()
    }

    pub fn downcast<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.object).downcast::<T>().ok()
    }

    /// Whether both handles point at the same registered object.
    pub fn ptr_eq(&self, other: &Component) -> bool {
        Arc::ptr_eq(&self.object, &other.object)
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("type_name", &self.type_name)
            .field("capabilities", &self.capabilities())
            .finish()
    }
}

/// Declares which capabilities a component exposes.
///
/// Each capability method is only available when the object type implements
/// the matching trait, so a component can never claim a capability it lacks.
pub struct ComponentBuilder<T> {
    object: Arc<T>,
    merge_strategy: Option<Arc<dyn MergeStrategy>>,
    load_balancer: Option<Arc<dyn LoadBalancer>>,
    endpoint: Option<Arc<dyn Endpoint>>,
    bindable: Option<Arc<dyn EnvironmentBindable>>,
    methods: MethodTable,
}

impl<T: Send + Sync + 'static> ComponentBuilder<T> {
    pub fn merge_strategy(mut self) -> Self
    where
        T: MergeStrategy,
    {
        let view: Arc<dyn MergeStrategy> = self.object.clone();
        self.merge_strategy = Some(view);
        self
    }

    pub fn load_balancer(mut self) -> Self
    where
        T: LoadBalancer,
    {
        let view: Arc<dyn LoadBalancer> = self.object.clone();
        self.load_balancer = Some(view);
        self
    }

    pub fn endpoint(mut self) -> Self
    where
        T: Endpoint,
    {
        let view: Arc<dyn Endpoint> = self.object.clone();
        self.endpoint = Some(view);
        self
    }

    pub fn environment_bindable(mut self) -> Self
    where
        T: EnvironmentBindable,
    {
        let view: Arc<dyn EnvironmentBindable> = self.object.clone();
        self.bindable = Some(view);
        self
    }

    /// Expose a two-operand method callable by name.
    pub fn method<F>(mut self, name: &str, params: [ParamType; 2], f: F) -> Self
    where
        F: Fn(&T, Option<Value>, Option<Value>) -> Result<Value, String> + Send + Sync + 'static,
    {
        let target = Arc::clone(&self.object);
        self.methods.add(MethodHandle::new(name, params, move |old, new| {
            f(&target, old, new)
        }));
        self
    }

    pub fn build(self) -> Component {
        let bean = if self.methods.is_empty() {
            None
        } else {
            Some(Arc::new(self.methods))
        };
        Component {
            type_name: std::any::type_name::<T>(),
            object: self.object,
            merge_strategy: self.merge_strategy,
            load_balancer: self.load_balancer,
            endpoint: self.endpoint,
            bindable: self.bindable,
            bean,
        }
    }
}
