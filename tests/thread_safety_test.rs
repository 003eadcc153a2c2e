//! Tests for sharing one schema across concurrent validations.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use fieldcheck::{
    FieldPath, RemoteCheck, RemoteError, RemoteRequest, RemoteValidationClient, Schema,
    SchemaRegistry,
};
use serde_json::{json, Value};

/// Answers "Taken" for names starting with `t`, after a delay that
/// shrinks with the name length so later calls can finish first.
struct SlowDirectory;

#[async_trait]
impl RemoteValidationClient for SlowDirectory {
    async fn execute(&self, request: RemoteRequest) -> Result<Value, RemoteError> {
        let name = request.variables["username"]
            .as_str()
            .ok_or_else(|| RemoteError::Response("missing username".into()))?
            .to_string();
        let delay = 40u64.saturating_sub(name.len() as u64 * 4);
        tokio::time::sleep(Duration::from_millis(delay)).await;
        let outcome = if name.starts_with('t') { "Taken" } else { "Available" };
        Ok(json!({ "usernameValidate": outcome }))
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_validations_are_independent() {
    let schema = Arc::new(Schema::string().username(None).graphql_validate(RemoteCheck::new(
        Arc::new(SlowDirectory),
        "query",
        |value| json!({ "username": value }),
    )));

    let names = ["tom", "anna", "teodora", "bo_b", "timothy", "zed"];
    let handles: Vec<_> = names
        .iter()
        .map(|name| {
            let schema = Arc::clone(&schema);
            let name = name.to_string();
            tokio::spawn(async move {
                let result = schema.validate(&json!(name), &FieldPath::root()).await;
                (name, result)
            })
        })
        .collect();

    for handle in handles {
        let (name, result) = handle.await.unwrap();
        if name.starts_with('t') {
            assert_eq!(result.error_identifiers(), vec!["taken"], "{name}");
        } else {
            assert!(result.is_valid(), "{name}");
            assert!(result.has_success("available"), "{name}");
        }
    }
}

#[test]
fn test_concurrent_registry_access() {
    let registry = Arc::new(SchemaRegistry::new());
    registry
        .register("Email", Schema::string().email_address())
        .unwrap();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                let email = format!("user{}@example.com", i);
                let result =
                    futures::executor::block_on(registry.validate("Email", &json!(email))).unwrap();
                assert!(result.is_valid());
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_concurrent_registration() {
    let registry = Arc::new(SchemaRegistry::new());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                registry
                    .register(format!("Field{}", i), Schema::string().not_empty(None))
                    .unwrap();
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(registry.len(), 8);
}

#[test]
fn test_schemas_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<fieldcheck::StringSchema>();
    assert_send_sync::<fieldcheck::ObjectSchema>();
    assert_send_sync::<fieldcheck::ArraySchema<fieldcheck::NumberSchema>>();
    assert_send_sync::<SchemaRegistry>();
}
