#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use serde_json::{json, Value};

use xroute::{
    Component, DefaultRouteContext, Endpoint, EndpointCatalog, Environment, EnvironmentBindable,
    Exchange, InMemoryRegistry, LoadBalancer, MergeResult, MergeStrategy, ParamType, Producer,
    ProducerError, Registry,
};

/// Endpoint answering with a fixed body, or failing.
pub struct MockEndpoint {
    uri: String,
    reply: Result<Value, String>,
    producers_created: AtomicUsize,
}

impl MockEndpoint {
    pub fn replying(uri: &str, body: Value) -> Arc<Self> {
        Arc::new(Self {
            uri: uri.to_string(),
            reply: Ok(body),
            producers_created: AtomicUsize::new(0),
        })
    }

    pub fn failing(uri: &str, message: &str) -> Arc<Self> {
        Arc::new(Self {
            uri: uri.to_string(),
            reply: Err(message.to_string()),
            producers_created: AtomicUsize::new(0),
        })
    }

    pub fn producers_created(&self) -> usize {
        self.producers_created.load(Ordering::SeqCst)
    }
}

struct MockProducer {
    uri: String,
    reply: Result<Value, String>,
}

#[async_trait]
impl Producer for MockProducer {
    fn endpoint_uri(&self) -> &str {
        &self.uri
    }

    async fn process(&self, exchange: Exchange) -> Result<Exchange, ProducerError> {
        match &self.reply {
            Ok(body) => Ok(exchange.with_body(body.clone())),
            Err(message) => Err(ProducerError::Failed {
                uri: self.uri.clone(),
                message: message.clone(),
            }),
        }
    }
}

impl Endpoint for MockEndpoint {
    fn uri(&self) -> &str {
        &self.uri
    }

    fn create_producer(&self) -> Result<Box<dyn Producer>, ProducerError> {
        self.producers_created.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockProducer {
            uri: self.uri.clone(),
            reply: self.reply.clone(),
        }))
    }
}

/// Endpoint that refuses to create producers.
pub struct BrokenEndpoint(pub String);

impl Endpoint for BrokenEndpoint {
    fn uri(&self) -> &str {
        &self.0
    }

    fn create_producer(&self) -> Result<Box<dyn Producer>, ProducerError> {
        Err(ProducerError::Create {
            uri: self.0.clone(),
            message: "no connection pool".to_string(),
        })
    }
}

/// Registry wrapper recording every key looked up.
pub struct SpyRegistry {
    inner: InMemoryRegistry,
    lookups: Mutex<Vec<String>>,
}

impl SpyRegistry {
    pub fn new(inner: InMemoryRegistry) -> Self {
        Self {
            inner,
            lookups: Mutex::new(Vec::new()),
        }
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().clone()
    }
}

impl Registry for SpyRegistry {
    fn get(&self, key: &str) -> Option<Component> {
        self.lookups.lock().push(key.to_string());
        self.inner.get(key)
    }

    fn keys(&self) -> Vec<String> {
        self.inner.keys()
    }
}

/// Plain object whose `combine` method sums the `price` fields.
pub struct PriceMerger;

pub fn price_merger() -> Component {
    Component::builder(PriceMerger)
        .method("combine", [ParamType::Object, ParamType::Object], |_, old, new| {
            let price = |v: &Option<Value>| {
                v.as_ref()
                    .and_then(|v| v.get("price"))
                    .and_then(Value::as_i64)
                    .unwrap_or(0)
            };
            Ok(json!({"price": price(&old) + price(&new), "combined": true}))
        })
        .build()
}

/// Native strategy that wants the active environment.
#[derive(Default)]
pub struct EnvironmentTagger {
    environment: RwLock<Option<Arc<Environment>>>,
}

impl EnvironmentTagger {
    pub fn bound_environment(&self) -> Option<String> {
        self.environment.read().as_ref().map(|e| e.name().to_string())
    }
}

impl EnvironmentBindable for EnvironmentTagger {
    fn bind_environment(&self, environment: Arc<Environment>) {
        *self.environment.write() = Some(environment);
    }
}

impl MergeStrategy for EnvironmentTagger {
    fn name(&self) -> &str {
        "environment-tagger"
    }

    fn merge(&self, old: Option<Exchange>, new: Option<Exchange>) -> MergeResult<Option<Exchange>> {
        let env = self.bound_environment().unwrap_or_default();
        Ok(old.map(|old| {
            let reply = new.map(|n| n.body).unwrap_or(Value::Null);
            old.with_body(json!({"env": env, "reply": reply}))
        }))
    }

    fn as_environment_bindable(&self) -> Option<&dyn EnvironmentBindable> {
        Some(self)
    }
}

/// Round robin over the candidates.
#[derive(Default)]
pub struct RoundRobin {
    next: AtomicUsize,
}

impl LoadBalancer for RoundRobin {
    fn name(&self) -> &str {
        "round-robin"
    }

    fn choose(&self, _exchange: &Exchange, candidates: usize) -> Option<usize> {
        if candidates == 0 {
            return None;
        }
        Some(self.next.fetch_add(1, Ordering::SeqCst) % candidates)
    }
}

pub struct Fixture {
    pub registry: Arc<SpyRegistry>,
    pub pricing: Arc<MockEndpoint>,
    pub context: DefaultRouteContext,
}

/// Registry and catalog shared by the integration tests:
/// - `svc:pricing` replies `{"price": 12}`
/// - `svc:flaky` always fails
/// - `svc:broken` cannot create a producer
/// - registry: `pricingService` (endpoint), `priceMerger` (plain object),
///   `replace` (native strategy), `roundRobin` (load balancer),
///   `notAPolicy` (plain object)
pub fn fixture() -> Fixture {
    let pricing = MockEndpoint::replying("svc:pricing", json!({"price": 12}));
    let flaky = MockEndpoint::failing("svc:flaky", "connection refused");

    let registry = InMemoryRegistry::new();
    registry.bind(
        "pricingService",
        Component::from_arc(MockEndpoint::replying("svc:pricing-ref", json!({"price": 20})))
            .endpoint()
            .build(),
    );
    registry.bind("priceMerger", price_merger());
    registry.bind(
        "replace",
        Component::builder(xroute::ReplaceStrategy).merge_strategy().build(),
    );
    registry.bind(
        "roundRobin",
        Component::builder(RoundRobin::default()).load_balancer().build(),
    );
    registry.bind("notAPolicy", Component::builder(PriceMerger).build());
    let registry = Arc::new(SpyRegistry::new(registry));

    let catalog = EndpointCatalog::new();
    catalog.register(pricing.clone());
    catalog.register(flaky);
    catalog.register(Arc::new(BrokenEndpoint("svc:broken".to_string())));

    let context = DefaultRouteContext::new(registry.clone(), Arc::new(catalog))
        .with_environment(Environment::new("test-env").with_property("region", "eu"));

    Fixture {
        registry,
        pricing,
        context,
    }
}
