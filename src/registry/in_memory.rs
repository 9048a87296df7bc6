use parking_lot::RwLock;
use std::collections::HashMap;

use super::component::Component;
use super::Registry;

/// Registry backed by a hash map.
///
/// Lookups take a read lock only, so any number of route activations can
/// resolve references concurrently.
#[derive(Default)]
pub struct InMemoryRegistry {
    components: RwLock<HashMap<String, Component>>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `component` under `key`, returning the one it replaced.
    pub fn bind(&self, key: impl Into<String>, component: Component) -> Option<Component> {
        let key = key.into();
        tracing::debug!(key = %key, type_name = component.type_name(), "binding component");
        self.components.write().insert(key, component)
    }

    pub fn unbind(&self, key: &str) -> Option<Component> {
        self.components.write().remove(key)
    }

    pub fn len(&self) -> usize {
        self.components.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.read().is_empty()
    }
}

impl Registry for InMemoryRegistry {
    fn get(&self, key: &str) -> Option<Component> {
        self.components.read().get(key).cloned()
    }

    fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.components.read().keys().cloned().collect();
        keys.sort();
        keys
    }
}
