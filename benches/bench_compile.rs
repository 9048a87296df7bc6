use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::json;

use xroute::{
    parse_route, BeanMergeAdapter, Component, DefaultRouteContext, DslFormat, EndpointCatalog,
    Exchange, InMemoryRegistry, MergeStrategy, ParamType, RouteCompiler,
};

mod support {
    use async_trait::async_trait;
    use xroute::{Endpoint, Exchange, Producer, ProducerError};

    pub struct EchoEndpoint(pub String);

    struct EchoProducer(String);

    #[async_trait]
    impl Producer for EchoProducer {
        fn endpoint_uri(&self) -> &str {
            &self.0
        }

        async fn process(&self, exchange: Exchange) -> Result<Exchange, ProducerError> {
            Ok(exchange)
        }
    }

    impl Endpoint for EchoEndpoint {
        fn uri(&self) -> &str {
            &self.0
        }

        fn create_producer(&self) -> Result<Box<dyn Producer>, ProducerError> {
            Ok(Box::new(EchoProducer(self.0.clone())))
        }
    }
}

struct Summer;

fn summer() -> Component {
    Component::builder(Summer)
        .method("sum", [ParamType::Object, ParamType::Object], |_, old, new| {
            let n = |v: &Option<serde_json::Value>| {
                v.as_ref().and_then(|v| v["n"].as_i64()).unwrap_or(0)
            };
            Ok(json!({"n": n(&old) + n(&new)}))
        })
        .build()
}

fn context() -> DefaultRouteContext {
    let registry = InMemoryRegistry::new();
    registry.bind("summer", summer());
    let catalog = EndpointCatalog::new();
    for i in 0..16 {
        catalog.register(Arc::new(support::EchoEndpoint(format!("svc:echo-{}", i))));
    }
    DefaultRouteContext::new(Arc::new(registry), Arc::new(catalog))
}

fn route_yaml(steps: usize) -> String {
    let mut yaml = String::from("id: bench\nsteps:\n");
    for i in 0..steps {
        yaml.push_str(&format!(
            "  - type: enrich\n    uri: svc:echo-{}\n    strategyRef: summer\n    strategyMethodName: sum\n",
            i % 16
        ));
    }
    yaml
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsl/parse");
    for steps in [1usize, 10, 50] {
        let yaml = route_yaml(steps);
        group.bench_with_input(BenchmarkId::from_parameter(steps), &yaml, |b, yaml| {
            b.iter(|| black_box(parse_route(yaml, DslFormat::Yaml).unwrap()));
        });
    }
    group.finish();
}

fn bench_compile(c: &mut Criterion) {
    let ctx = context();
    let mut group = c.benchmark_group("compile/route");
    for steps in [1usize, 10, 50] {
        let schema = parse_route(&route_yaml(steps), DslFormat::Yaml).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(steps), &schema, |b, schema| {
            b.iter(|| black_box(RouteCompiler::compile_route(schema, &ctx).unwrap()));
        });
    }
    group.finish();
}

fn bench_adapter_merge(c: &mut Criterion) {
    let component = summer();
    let adapter = BeanMergeAdapter::new(&component, Some("sum"));
    let old = Exchange::new(json!({"n": 1}));
    let new = Exchange::new(json!({"n": 2}));

    c.bench_function("merge/adapter", |b| {
        b.iter(|| black_box(adapter.merge(Some(old.clone()), Some(new.clone())).unwrap()));
    });
}

criterion_group!(benches, bench_parse, bench_compile, bench_adapter_merge);
criterion_main!(benches);
