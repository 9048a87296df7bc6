use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use xroute_types::Endpoint;

/// Endpoints addressable by URI.
#[derive(Default)]
pub struct EndpointCatalog {
    endpoints: RwLock<HashMap<String, Arc<dyn Endpoint>>>,
}

impl EndpointCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an endpoint under its own URI.
    pub fn register(&self, endpoint: Arc<dyn Endpoint>) {
        let uri = endpoint.uri().to_string();
        self.endpoints.write().insert(uri, endpoint);
    }

    pub fn get(&self, uri: &str) -> Option<Arc<dyn Endpoint>> {
        self.endpoints.read().get(uri).cloned()
    }

    pub fn uris(&self) -> Vec<String> {
        let mut uris: Vec<String> = self.endpoints.read().keys().cloned().collect();
        uris.sort();
        uris
    }
}
