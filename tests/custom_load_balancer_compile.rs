mod common;

use std::sync::Arc;

use serde_json::json;

use xroute::{
    Capability, CompileError, CustomLoadBalancerDefinition, ErrorCode, Exchange, StepDefinition,
};

use common::fixture;

#[test]
fn test_registered_policy_is_returned() {
    let fx = fixture();
    let policy = CustomLoadBalancerDefinition::new("roundRobin")
        .compile(&fx.context)
        .unwrap();
    assert_eq!(policy.name(), "round-robin");
    let exchange = Exchange::new(json!({}));
    assert_eq!(policy.choose(&exchange, 3), Some(0));
    assert_eq!(policy.choose(&exchange, 3), Some(1));
}

#[test]
fn test_policy_is_the_registry_instance() {
    let fx = fixture();
    let def = CustomLoadBalancerDefinition::new("roundRobin");
    let first = def.compile(&fx.context).unwrap();
    let second = def.compile(&fx.context).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_missing_reference_is_configuration_error() {
    let fx = fixture();
    for def in [
        CustomLoadBalancerDefinition::default(),
        CustomLoadBalancerDefinition::new(""),
        CustomLoadBalancerDefinition::new("  "),
    ] {
        let err = def.compile(&fx.context).unwrap_err();
        assert!(matches!(err, CompileError::ConfigurationError(ref m) if m.contains("ref")));
    }
    assert!(fx.registry.lookups().is_empty());
}

#[test]
fn test_unknown_policy_is_not_found() {
    let fx = fixture();
    let err = CustomLoadBalancerDefinition::new("roundRobinV2")
        .compile(&fx.context)
        .unwrap_err();
    assert!(matches!(err, CompileError::NotFound { ref key } if key == "roundRobinV2"));
    assert_eq!(err.error_code(), ErrorCode::NotFound);
    assert!(err.to_string().contains("roundRobinV2"));
}

#[test]
fn test_wrong_capability_is_type_mismatch() {
    let fx = fixture();
    let err = CustomLoadBalancerDefinition::new("notAPolicy")
        .compile(&fx.context)
        .unwrap_err();
    match err {
        CompileError::TypeMismatch {
            key,
            expected,
            provided,
        } => {
            assert_eq!(key, "notAPolicy");
            assert_eq!(expected, Capability::LoadBalancer);
            assert_eq!(provided, "none");
        }
        other => panic!("expected type mismatch, got {:?}", other),
    }
}

#[test]
fn test_merge_strategy_is_not_adapted_into_a_policy() {
    let fx = fixture();
    let err = CustomLoadBalancerDefinition::new("priceMerger")
        .compile(&fx.context)
        .unwrap_err();
    assert!(matches!(err, CompileError::TypeMismatch { ref provided, .. } if provided == "bean"));
}
