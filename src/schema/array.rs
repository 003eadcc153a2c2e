//! Array schema validation.
//!
//! [`ArraySchema`] validates each item with an item schema at its index
//! path, plus item-count limits for the list as a whole.

use std::future::Future;

use async_trait::async_trait;
use futures::future::join_all;
use serde_json::Value;

use super::base::{check, value_type_name, BaseSchema, Validator};
use super::traits::SchemaLike;
use crate::error::{TypeMismatch, ValidationRule};
use crate::path::FieldPath;
use crate::result::ValidationResult;

fn as_array(value: &Value) -> Result<&Vec<Value>, TypeMismatch> {
    value
        .as_array()
        .ok_or_else(|| TypeMismatch::new("array", value_type_name(value)))
}

fn parse_array(value: &Value) -> Result<Vec<Value>, TypeMismatch> {
    as_array(value).cloned()
}

/// A schema for JSON arrays whose items all share one schema.
///
/// Items are validated concurrently; their issues are merged in index
/// order, followed by the list-level rules. Only asynchronous rules copy
/// the list.
///
/// # Example
///
/// ```rust
/// use fieldcheck::{FieldPath, Schema};
/// use serde_json::json;
///
/// let invitees = Schema::array(Schema::string().email_address()).maximum_items(3);
///
/// let result = futures::executor::block_on(
///     invitees.validate(&json!(["a@example.com", "nope"]), &FieldPath::root()),
/// );
/// assert_eq!(result.error_identifiers(), vec!["invalidEmailAddress"]);
/// assert_eq!(result.errors()[0].path.to_string(), "[1]");
/// ```
#[derive(Clone)]
pub struct ArraySchema<S> {
    item_schema: S,
    base: BaseSchema<Vec<Value>>,
}

impl<S: SchemaLike> ArraySchema<S> {
    pub fn new(item_schema: S) -> Self {
        Self {
            item_schema,
            base: BaseSchema::new("array", parse_array),
        }
    }

    pub fn optional(mut self) -> Self {
        self.base.set_optional(true);
        self
    }

    pub fn type_error(mut self, message: impl Into<String>) -> Self {
        self.base.set_type_error_message(message);
        self
    }

    /// Requires at least `count` items (`tooFewItems` / `enoughItems`).
    pub fn minimum_items(mut self, count: usize) -> Self {
        self.base.add_validator(
            "minimumItems",
            Validator::sync(move |items: &Vec<Value>, path: &FieldPath| {
                check(
                    items.len() >= count,
                    path,
                    ("enoughItems", format!("At least {} items.", count)),
                    ("tooFewItems", format!("Must have at least {} items.", count)),
                    ValidationRule::new("minimumItems").with_parameter("count", count),
                )
            }),
        );
        self
    }

    /// Allows at most `count` items (`tooManyItems` / `fewEnoughItems`).
    pub fn maximum_items(mut self, count: usize) -> Self {
        self.base.add_validator(
            "maximumItems",
            Validator::sync(move |items: &Vec<Value>, path: &FieldPath| {
                check(
                    items.len() <= count,
                    path,
                    ("fewEnoughItems", format!("At most {} items.", count)),
                    ("tooManyItems", format!("Must have at most {} items.", count)),
                    ValidationRule::new("maximumItems").with_parameter("count", count),
                )
            }),
        );
        self
    }

    pub fn custom<F>(mut self, name: impl Into<String>, rule: F) -> Self
    where
        F: Fn(&[Value], &FieldPath) -> ValidationResult + Send + Sync + 'static,
    {
        self.base.add_validator(
            name,
            Validator::sync(move |items: &Vec<Value>, path: &FieldPath| rule(items, path)),
        );
        self
    }

    pub fn custom_async<F, Fut>(mut self, name: impl Into<String>, rule: F) -> Self
    where
        F: Fn(Vec<Value>, FieldPath) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ValidationResult> + Send + 'static,
    {
        self.base.add_validator(
            name,
            Validator::from_async(move |items: &Vec<Value>, path: &FieldPath| {
                rule(items.clone(), path.clone())
            }),
        );
        self
    }

    pub fn validator_names(&self) -> Vec<&str> {
        self.base.validator_names()
    }

    pub async fn validate(&self, value: &Value, path: &FieldPath) -> ValidationResult {
        if self.base.is_optional() && value.is_null() {
            return ValidationResult::empty();
        }
        let items = match as_array(value) {
            Ok(items) => items,
            Err(mismatch) => return self.base.type_error(mismatch, path),
        };

        let item_paths: Vec<FieldPath> = (0..items.len()).map(|i| path.push_index(i)).collect();
        let checks = items
            .iter()
            .zip(&item_paths)
            .map(|(item, item_path)| self.item_schema.validate(item, item_path));
        let mut result: ValidationResult = join_all(checks).await.into_iter().collect();
        result.merge(self.base.run_validators(items, path).await);
        result
    }
}

#[async_trait]
impl<S: SchemaLike> SchemaLike for ArraySchema<S> {
    fn type_name(&self) -> &'static str {
        self.base.type_name()
    }

    async fn validate(&self, value: &Value, path: &FieldPath) -> ValidationResult {
        ArraySchema::validate(self, value, path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{NumberSchema, ObjectSchema, StringSchema};
    use serde_json::json;

    async fn run<S: SchemaLike>(schema: &ArraySchema<S>, value: Value) -> ValidationResult {
        schema.validate(&value, &FieldPath::root()).await
    }

    #[tokio::test]
    async fn test_rejects_non_arrays() {
        let schema = ArraySchema::new(StringSchema::new());
        let result = run(&schema, json!("a,b")).await;
        assert_eq!(result.error_identifiers(), vec!["invalidType"]);
    }

    #[tokio::test]
    async fn test_items_reported_in_index_order() {
        let schema = ArraySchema::new(NumberSchema::new().positive());
        let result = run(&schema, json!([-1, 2, 0])).await;
        assert_eq!(result.error_identifiers(), vec!["notPositive", "notPositive"]);
        let paths: Vec<String> = result.errors().iter().map(|e| e.path.to_string()).collect();
        assert_eq!(paths, vec!["[0]", "[2]"]);
        assert_eq!(result.success_identifiers(), vec!["isPositive"]);
    }

    #[tokio::test]
    async fn test_item_limits() {
        let schema = ArraySchema::new(StringSchema::new())
            .minimum_items(1)
            .maximum_items(2);
        assert!(run(&schema, json!([])).await.has_error("tooFewItems"));
        assert!(run(&schema, json!(["a", "b", "c"])).await.has_error("tooManyItems"));

        let result = run(&schema, json!(["a"])).await;
        assert_eq!(result.success_identifiers(), vec!["enoughItems", "fewEnoughItems"]);
    }

    #[tokio::test]
    async fn test_nested_objects() {
        let schema = ArraySchema::new(
            ObjectSchema::new().field("email", StringSchema::new().email_address()),
        );
        let path = FieldPath::root().push_field("contacts");
        let result = schema
            .validate(&json!([{"email": "a@example.com"}, {}]), &path)
            .await;
        assert_eq!(result.error_identifiers(), vec!["required"]);
        assert_eq!(result.errors()[0].path.to_string(), "contacts[1].email");
    }

    #[tokio::test]
    async fn test_custom_unique() {
        let schema = ArraySchema::new(StringSchema::new()).custom("unique", |items, path| {
            let mut seen = std::collections::HashSet::new();
            if items.iter().all(|item| seen.insert(item.to_string())) {
                ValidationResult::empty()
            } else {
                ValidationResult::failure(crate::ValidationIssue::new(
                    path.clone(),
                    "duplicateItems",
                    "Items must be unique.",
                ))
            }
        });
        assert!(run(&schema, json!(["a", "a"])).await.has_error("duplicateItems"));
        assert!(run(&schema, json!(["a", "b"])).await.is_valid());
    }

    #[tokio::test]
    async fn test_sync_rules_read_the_input_in_place() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let seen = Arc::new(AtomicUsize::new(0));
        let recorder = Arc::clone(&seen);
        let schema = ArraySchema::new(NumberSchema::new()).custom("address", move |items, _path| {
            recorder.store(items.as_ptr() as usize, Ordering::SeqCst);
            ValidationResult::empty()
        });

        let value = json!([1, 2, 3]);
        schema.validate(&value, &FieldPath::root()).await;

        let input = value.as_array().unwrap().as_ptr() as usize;
        assert_eq!(seen.load(Ordering::SeqCst), input);
    }
}
