//! Integration tests for the schema registry.

use fieldcheck::{RegistryError, Schema, SchemaRegistry};
use serde_json::json;

fn forms() -> SchemaRegistry {
    let registry = SchemaRegistry::new();
    registry
        .register(
            "SignIn",
            Schema::object()
                .field("email", Schema::string().email_address())
                .field("password", Schema::string().not_empty(None)),
        )
        .unwrap();
    registry
        .register(
            "ChangeUsername",
            Schema::object().field("username", Schema::string().username(Some("current"))),
        )
        .unwrap();
    registry
}

#[tokio::test]
async fn test_validate_registered_forms() {
    let registry = forms();

    let result = registry
        .validate("SignIn", &json!({"email": "x", "password": ""}))
        .await
        .unwrap();
    assert_eq!(result.error_identifiers(), vec!["invalidEmailAddress", "empty"]);

    let result = registry
        .validate("ChangeUsername", &json!({"username": "current"}))
        .await
        .unwrap();
    assert_eq!(result.success_identifiers(), vec!["currentUsername"]);
}

#[tokio::test]
async fn test_unknown_schema() {
    let registry = forms();
    let err = registry.validate("Checkout", &json!({})).await.unwrap_err();
    assert!(matches!(err, RegistryError::NotFound(ref name) if name == "Checkout"));
    assert_eq!(err.to_string(), "schema 'Checkout' is not registered");
}

#[test]
fn test_duplicate_registration() {
    let registry = forms();
    let err = registry.register("SignIn", Schema::object()).unwrap_err();
    assert_eq!(err.to_string(), "schema 'SignIn' is already registered");
    assert_eq!(registry.names(), vec!["ChangeUsername", "SignIn"]);
}

#[test]
fn test_heterogeneous_schemas() {
    let registry = SchemaRegistry::new();
    registry.register("Tags", Schema::array(Schema::string())).unwrap();
    registry.register("Quantity", Schema::number()).unwrap();

    assert_eq!(registry.get("Tags").unwrap().type_name(), "array");
    assert_eq!(registry.get("Quantity").unwrap().type_name(), "number");
}
