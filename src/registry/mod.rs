//! Component registry and reference resolution.
//!
//! The registry is owned by the host; the compiler only reads it. Components
//! are shared (`Arc`) and keep their declared capability views so the
//! resolver can check a capability without knowing the concrete type.

pub mod component;
pub mod in_memory;
pub mod resolver;

pub use component::{Capability, Component, ComponentBuilder};
pub use in_memory::InMemoryRegistry;
pub use resolver::{lookup, resolve, resolve_endpoint_ref, resolve_load_balancer};

/// Read access to a directory of named components.
pub trait Registry: Send + Sync {
    /// Component registered under `key`, if any.
    fn get(&self, key: &str) -> Option<Component>;

    /// All registered keys.
    fn keys(&self) -> Vec<String>;
}
