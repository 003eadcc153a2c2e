//! Validator orchestration shared by every typed schema.
//!
//! A [`BaseSchema`] owns the parse step and an ordered list of named
//! validators. Typed schemas wrap one and expose builder methods that append
//! validators to it.

use std::future::Future;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use serde_json::Value;
use tracing::trace;

use crate::error::{TypeMismatch, ValidationIssue, ValidationRule};
use crate::path::FieldPath;
use crate::result::ValidationResult;

/// Signature of a synchronous validator.
pub type SyncValidatorFn<T> = dyn Fn(&T, &FieldPath) -> ValidationResult + Send + Sync;

/// Signature of an asynchronous validator. The returned future owns
/// whatever it needs from the borrowed value.
pub type AsyncValidatorFn<T> =
    dyn Fn(&T, &FieldPath) -> BoxFuture<'static, ValidationResult> + Send + Sync;

/// A single check over a parsed value.
pub enum Validator<T> {
    Sync(Arc<SyncValidatorFn<T>>),
    Async(Arc<AsyncValidatorFn<T>>),
}

impl<T: 'static> Validator<T> {
    pub fn sync<F>(check: F) -> Self
    where
        F: Fn(&T, &FieldPath) -> ValidationResult + Send + Sync + 'static,
    {
        Validator::Sync(Arc::new(check))
    }

    pub fn from_async<F, Fut>(check: F) -> Self
    where
        F: Fn(&T, &FieldPath) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ValidationResult> + Send + 'static,
    {
        let boxed: Arc<AsyncValidatorFn<T>> =
            Arc::new(move |value: &T, path: &FieldPath| check(value, path).boxed());
        Validator::Async(boxed)
    }

    pub fn is_async(&self) -> bool {
        matches!(self, Validator::Async(_))
    }

    /// Runs the check; synchronous validators complete without yielding.
    pub async fn run(&self, value: &T, path: &FieldPath) -> ValidationResult {
        match self {
            Validator::Sync(check) => check(value, path),
            Validator::Async(check) => check(value, path).await,
        }
    }
}

impl<T> Clone for Validator<T> {
    fn clone(&self) -> Self {
        match self {
            Validator::Sync(check) => Validator::Sync(Arc::clone(check)),
            Validator::Async(check) => Validator::Async(Arc::clone(check)),
        }
    }
}

struct NamedValidator<T> {
    name: String,
    validator: Validator<T>,
}

impl<T> Clone for NamedValidator<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            validator: self.validator.clone(),
        }
    }
}

/// Parse function converting raw input into a schema's target type.
pub type ParseFn<T> = fn(&Value) -> Result<T, TypeMismatch>;

/// Type-erased orchestration for a schema whose parsed value is `T`.
///
/// `validate` parses first; a value of the wrong type produces a single
/// `invalidType` error and no validator runs. Otherwise every validator
/// runs in registration order and all of their issues are concatenated.
/// Nothing short-circuits, so a form can show every satisfied and violated
/// rule at once.
///
/// Implement a new value kind by wrapping a `BaseSchema`:
///
/// ```rust
/// use fieldcheck::schema::{BaseSchema, Validator};
/// use fieldcheck::{FieldPath, TypeMismatch, ValidationIssue, ValidationResult};
/// use serde_json::Value;
///
/// fn parse_bool(value: &Value) -> Result<bool, TypeMismatch> {
///     value.as_bool().ok_or(TypeMismatch::new("boolean", "other"))
/// }
///
/// let mut accepted = BaseSchema::new("boolean", parse_bool);
/// accepted.add_validator(
///     "accepted",
///     Validator::sync(|value: &bool, path: &FieldPath| {
///         if *value {
///             ValidationResult::success(ValidationIssue::new(path.clone(), "accepted", "Accepted."))
///         } else {
///             ValidationResult::failure(ValidationIssue::new(
///                 path.clone(),
///                 "notAccepted",
///                 "Please accept the terms.",
///             ))
///         }
///     }),
/// );
/// assert_eq!(accepted.validator_names(), vec!["accepted"]);
/// ```
pub struct BaseSchema<T> {
    type_name: &'static str,
    parse: ParseFn<T>,
    validators: Vec<NamedValidator<T>>,
    type_error_message: Option<String>,
    optional: bool,
}

impl<T> Clone for BaseSchema<T> {
    fn clone(&self) -> Self {
        Self {
            type_name: self.type_name,
            parse: self.parse,
            validators: self.validators.clone(),
            type_error_message: self.type_error_message.clone(),
            optional: self.optional,
        }
    }
}

impl<T: Send + Sync + 'static> BaseSchema<T> {
    pub fn new(type_name: &'static str, parse: ParseFn<T>) -> Self {
        Self {
            type_name,
            parse,
            validators: Vec::new(),
            type_error_message: None,
            optional: false,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Converts raw input into the target type. This is the only place
    /// types are checked; validators assume a correctly typed value.
    pub fn parse(&self, value: &Value) -> Result<T, TypeMismatch> {
        (self.parse)(value)
    }

    /// Appends a validator. Intended for schema implementations.
    pub fn add_validator(&mut self, name: impl Into<String>, validator: Validator<T>) {
        self.validators.push(NamedValidator {
            name: name.into(),
            validator,
        });
    }

    /// Names of the registered validators, in registration order.
    pub fn validator_names(&self) -> Vec<&str> {
        self.validators.iter().map(|v| v.name.as_str()).collect()
    }

    pub fn set_type_error_message(&mut self, message: impl Into<String>) {
        self.type_error_message = Some(message.into());
    }

    /// When set, `null` validates to an empty result without parsing.
    pub fn set_optional(&mut self, optional: bool) {
        self.optional = optional;
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// The single-error result for a value of the wrong type.
    pub fn type_error(&self, mismatch: TypeMismatch, path: &FieldPath) -> ValidationResult {
        trace!(path = %path, %mismatch, "type mismatch");
        let message = self
            .type_error_message
            .clone()
            .unwrap_or_else(|| format!("Must be a {}.", self.type_name));
        ValidationResult::failure(
            ValidationIssue::new(path.clone(), "invalidType", message).with_rule(
                ValidationRule::new("type")
                    .with_parameter("expected", mismatch.expected)
                    .with_parameter("received", mismatch.received),
            ),
        )
    }

    /// Runs every validator against an already parsed value.
    pub async fn run_validators(&self, value: &T, path: &FieldPath) -> ValidationResult {
        let mut result = ValidationResult::empty();
        for entry in &self.validators {
            let outcome = entry.validator.run(value, path).await;
            trace!(
                validator = %entry.name,
                path = %path,
                valid = outcome.is_valid(),
                "validator finished"
            );
            result.merge(outcome);
        }
        result
    }

    pub async fn validate(&self, value: &Value, path: &FieldPath) -> ValidationResult {
        if self.optional && value.is_null() {
            return ValidationResult::empty();
        }
        match self.parse(value) {
            Ok(parsed) => self.run_validators(&parsed, path).await,
            Err(mismatch) => self.type_error(mismatch, path),
        }
    }
}

/// Builds the pass or fail side of a two-outcome check.
///
/// The rule is attached to the error only.
pub(crate) fn check(
    passed: bool,
    path: &FieldPath,
    success: (&str, String),
    error: (&str, String),
    rule: ValidationRule,
) -> ValidationResult {
    if passed {
        ValidationResult::success(ValidationIssue::new(path.clone(), success.0, success.1))
    } else {
        ValidationResult::failure(ValidationIssue::new(path.clone(), error.0, error.1).with_rule(rule))
    }
}

/// Returns the JSON type name for a value.
pub(crate) fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
