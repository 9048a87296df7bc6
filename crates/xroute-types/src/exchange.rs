use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// In-flight message state carried along a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exchange {
    pub id: String,
    pub body: Value,
    #[serde(default)]
    pub headers: HashMap<String, Value>,
}

impl Exchange {
    pub fn new(body: Value) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            body,
            headers: HashMap::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: Value) -> Self {
        self.headers.insert(name.into(), value);
        self
    }

    pub fn header(&self, name: &str) -> Option<&Value> {
        self.headers.get(name)
    }

    /// Replace the body, keeping id and headers.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = body;
        self
    }
}
