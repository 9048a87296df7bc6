use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use xroute::{
    Component, DefaultRouteContext, DslFormat, Endpoint, EndpointCatalog, Environment, Exchange,
    InMemoryRegistry, ParamType, Producer, ProducerError, RouteCompiler,
};

/// Answers every request with a fixed price quote.
struct PricingEndpoint;

struct PricingProducer;

#[async_trait]
impl Producer for PricingProducer {
    fn endpoint_uri(&self) -> &str {
        "svc:pricing"
    }

    async fn process(&self, exchange: Exchange) -> Result<Exchange, ProducerError> {
        Ok(exchange.with_body(json!({"price": 12, "currency": "EUR"})))
    }
}

impl Endpoint for PricingEndpoint {
    fn uri(&self) -> &str {
        "svc:pricing"
    }

    fn create_producer(&self) -> Result<Box<dyn Producer>, ProducerError> {
        Ok(Box::new(PricingProducer))
    }
}

struct PriceMerger;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!("=== XRoute step compiler ===\n");

    let registry = InMemoryRegistry::new();
    registry.bind(
        "priceMerger",
        Component::builder(PriceMerger)
            .method("combine", [ParamType::Object, ParamType::Object], |_, old, new| {
                let mut merged = old.unwrap_or_else(|| json!({}));
                if let (Some(target), Some(Value::Object(reply))) = (merged.as_object_mut(), new) {
                    target.extend(reply);
                }
                Ok(merged)
            })
            .build(),
    );
    let endpoints = EndpointCatalog::new();
    endpoints.register(Arc::new(PricingEndpoint));

    let context = DefaultRouteContext::new(Arc::new(registry), Arc::new(endpoints))
        .with_environment(Environment::new("demo"));

    let yaml = r#"
id: pricing
steps:
  - id: default-price
    type: enrich
    uri: "svc:pricing"
  - id: merged-price
    type: enrich
    uri: "svc:pricing"
    strategyRef: priceMerger
    strategyMethodName: combine
"#;

    let route = match RouteCompiler::compile_str(yaml, DslFormat::Yaml, &context) {
        Ok(route) => route,
        Err(e) => {
            eprintln!("[ERR] {}", e);
            std::process::exit(1);
        }
    };
    println!("[OK] route '{}' compiled ({} steps)", route.id(), route.len());

    let order = json!({"sku": "A-1", "price": 10});
    for entry in route.steps() {
        let Some(enricher) = entry.step.as_enricher() else {
            continue;
        };
        match enricher.process(Exchange::new(order.clone())).await {
            Ok(out) => println!("  {} ({:?}) -> {}", entry.label, enricher.strategy_source(), out.body),
            Err(e) => println!("  {} failed: {}", entry.label, e),
        }
    }
}
