use std::collections::HashMap;
use std::sync::Arc;

/// The runtime a route is activated in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    name: String,
    properties: HashMap<String, String>,
}

impl Environment {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: HashMap::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn properties(&self) -> &HashMap<String, String> {
        &self.properties
    }
}

/// Implemented by components that want the active [`Environment`] injected
/// after they are resolved and before their first use.
pub trait EnvironmentBindable: Send + Sync {
    fn bind_environment(&self, environment: Arc<Environment>);
}
