//! Object schema validation.
//!
//! [`ObjectSchema`] validates a JSON object field by field, extending the
//! path for each field, and then runs object-level rules such as
//! [`ObjectSchema::matching_fields`].

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use indexmap::IndexMap;
use serde_json::{Map, Value};

use super::base::{check, value_type_name, BaseSchema, Validator};
use super::traits::SchemaLike;
use crate::error::{TypeMismatch, ValidationIssue, ValidationRule};
use crate::path::FieldPath;
use crate::result::ValidationResult;

type Object = Map<String, Value>;

fn as_object(value: &Value) -> Result<&Object, TypeMismatch> {
    value
        .as_object()
        .ok_or_else(|| TypeMismatch::new("object", value_type_name(value)))
}

fn parse_object(value: &Value) -> Result<Object, TypeMismatch> {
    as_object(value).cloned()
}

#[derive(Clone)]
struct FieldDef {
    schema: Arc<dyn SchemaLike>,
    required: bool,
}

/// A schema for JSON objects, typically one whole form.
///
/// Field schemas run concurrently, but their issues are merged in field
/// declaration order, so results are deterministic. Object-level rules run
/// after all fields.
///
/// Fields and synchronous rules read the input in place. Asynchronous rules
/// added with [`custom_async`](Self::custom_async) receive their own copy of
/// the object.
///
/// # Example
///
/// ```rust
/// use fieldcheck::{FieldPath, Schema};
/// use serde_json::json;
///
/// let sign_up = Schema::object()
///     .field("email", Schema::string().email_address())
///     .field("password", Schema::string().password())
///     .field("confirmPassword", Schema::string())
///     .optional_field("displayName", Schema::string().maximum_length(64))
///     .matching_fields("password", "confirmPassword", None);
///
/// let result = futures::executor::block_on(sign_up.validate(
///     &json!({
///         "email": "jane@example.com",
///         "password": "Str0ng!pass",
///         "confirmPassword": "Str0ng!pass"
///     }),
///     &FieldPath::root(),
/// ));
/// assert!(result.is_valid());
/// ```
#[derive(Clone)]
pub struct ObjectSchema {
    base: BaseSchema<Object>,
    fields: IndexMap<String, FieldDef>,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self {
            base: BaseSchema::new("object", parse_object),
            fields: IndexMap::new(),
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

    /// Adds a required field. An absent field produces a `required` error
    /// at the field's path; a present one is validated with `schema`.
    pub fn field<S>(self, name: impl Into<String>, schema: S) -> Self
    where
        S: SchemaLike + 'static,
    {
        self.insert_field(name.into(), Arc::new(schema), true)
    }

    /// Adds a field that may be absent.
    pub fn optional_field<S>(self, name: impl Into<String>, schema: S) -> Self
    where
        S: SchemaLike + 'static,
    {
        self.insert_field(name.into(), Arc::new(schema), false)
    }

    fn insert_field(mut self, name: String, schema: Arc<dyn SchemaLike>, required: bool) -> Self {
        self.fields.insert(name, FieldDef { schema, required });
        self
    }

    /// Requires `other` to equal `field`, reported at `other`'s path
    /// (`fieldsDoNotMatch` / `fieldsMatch`).
    pub fn matching_fields(
        mut self,
        field: impl Into<String>,
        other: impl Into<String>,
        message: Option<&str>,
    ) -> Self {
        let field = field.into();
        let other = other.into();
        let message = message
            .map(str::to_string)
            .unwrap_or_else(|| format!("Must match {}.", field));
        self.base.add_validator(
            "matchingFields",
            Validator::sync(move |object: &Object, path: &FieldPath| {
                check(
                    object.get(&field) == object.get(&other),
                    &path.push_field(other.as_str()),
                    ("fieldsMatch", "Matches.".to_string()),
                    ("fieldsDoNotMatch", message.clone()),
                    ValidationRule::new("matchingFields").with_parameter("field", field.as_str()),
                )
            }),
        );
        self
    }

    /// Appends an object-level synchronous rule.
    pub fn custom<F>(mut self, name: impl Into<String>, rule: F) -> Self
    where
        F: Fn(&Object, &FieldPath) -> ValidationResult + Send + Sync + 'static,
    {
        self.base.add_validator(name, Validator::sync(rule));
        self
    }

    /// Appends an object-level asynchronous rule.
    pub fn custom_async<F, Fut>(mut self, name: impl Into<String>, rule: F) -> Self
    where
        F: Fn(Object, FieldPath) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ValidationResult> + Send + 'static,
    {
        self.base.add_validator(
            name,
            Validator::from_async(move |object: &Object, path: &FieldPath| {
                rule(object.clone(), path.clone())
            }),
        );
        self
    }

    /// Declared field names, in declaration order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    pub fn validator_names(&self) -> Vec<&str> {
        self.base.validator_names()
    }

    pub async fn validate(&self, value: &Value, path: &FieldPath) -> ValidationResult {
        if self.base.is_optional() && value.is_null() {
            return ValidationResult::empty();
        }
        let object = match as_object(value) {
            Ok(object) => object,
            Err(mismatch) => return self.base.type_error(mismatch, path),
        };

        let fields = self
            .fields
            .iter()
            .map(|(name, def)| validate_field(name, def, object, path));
        let mut result: ValidationResult = join_all(fields).await.into_iter().collect();
        result.merge(self.base.run_validators(object, path).await);
        result
    }
}

impl Default for ObjectSchema {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SchemaLike for ObjectSchema {
    fn type_name(&self) -> &'static str {
        self.base.type_name()
    }

    async fn validate(&self, value: &Value, path: &FieldPath) -> ValidationResult {
        ObjectSchema::validate(self, value, path).await
    }
}

async fn validate_field(
    name: &str,
    def: &FieldDef,
    object: &Object,
    path: &FieldPath,
) -> ValidationResult {
    let field_path = path.push_field(name);
    match object.get(name) {
        Some(value) => def.schema.validate(value, &field_path).await,
        None if def.required => ValidationResult::failure(
            ValidationIssue::new(field_path, "required", "Required.")
                .with_rule(ValidationRule::new("required")),
        ),
        None => ValidationResult::empty(),
    }
}
