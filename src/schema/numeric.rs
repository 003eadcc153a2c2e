//! Numeric schema validation.
//!
//! [`NumberSchema`] validates JSON numbers (as `f64`) against bounds, sign,
//! integrality, equality and membership rules.

use std::future::Future;

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use super::base::{check, value_type_name, BaseSchema, Validator};
use super::traits::SchemaLike;
use crate::error::{TypeMismatch, ValidationRule};
use crate::path::FieldPath;
use crate::result::ValidationResult;

fn parse_number(value: &Value) -> Result<f64, TypeMismatch> {
    value
        .as_f64()
        .ok_or_else(|| TypeMismatch::new("number", value_type_name(value)))
}

/// A schema for numeric values.
///
/// # Example
///
/// ```rust
/// use fieldcheck::{FieldPath, Schema};
/// use serde_json::json;
///
/// let quantity = Schema::number().integer().minimum(1.0).maximum(99.0);
///
/// let result = futures::executor::block_on(quantity.validate(&json!(0), &FieldPath::root()));
/// assert_eq!(result.error_identifiers(), vec!["tooSmall"]);
/// assert_eq!(result.success_identifiers(), vec!["isInteger", "smallEnough"]);
/// ```
#[derive(Clone)]
pub struct NumberSchema {
    base: BaseSchema<f64>,
}

impl NumberSchema {
    pub fn new() -> Self {
        Self {
            base: BaseSchema::new("number", parse_number),
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

    /// Requires `value >= minimum`. Errors with `tooSmall`.
    ///
    /// A NaN bound admits nothing, so it is ignored and no rule is added.
    pub fn minimum(mut self, minimum: f64) -> Self {
        if minimum.is_nan() {
            warn!("ignoring NaN minimum bound");
            return self;
        }
        self.base.add_validator(
            "minimumValue",
            Validator::sync(move |value: &f64, path: &FieldPath| {
                check(
                    *value >= minimum,
                    path,
                    ("largeEnough", format!("At least {}.", minimum)),
                    ("tooSmall", format!("Must be at least {}.", minimum)),
                    ValidationRule::new("minimumValue").with_parameter("value", minimum),
                )
            }),
        );
        self
    }

    /// Requires `value <= maximum`. Errors with `tooLarge`. A NaN bound is
    /// ignored.
    pub fn maximum(mut self, maximum: f64) -> Self {
        if maximum.is_nan() {
            warn!("ignoring NaN maximum bound");
            return self;
        }
        self.base.add_validator(
            "maximumValue",
            Validator::sync(move |value: &f64, path: &FieldPath| {
                check(
                    *value <= maximum,
                    path,
                    ("smallEnough", format!("At most {}.", maximum)),
                    ("tooLarge", format!("Must be at most {}.", maximum)),
                    ValidationRule::new("maximumValue").with_parameter("value", maximum),
                )
            }),
        );
        self
    }

    /// Requires a whole number. `2.0` counts as an integer.
    pub fn integer(mut self) -> Self {
        self.base.add_validator(
            "integer",
            Validator::sync(|value: &f64, path: &FieldPath| {
                check(
                    value.is_finite() && value.fract() == 0.0,
                    path,
                    ("isInteger", "Is a whole number.".to_string()),
                    ("notInteger", "Must be a whole number.".to_string()),
                    ValidationRule::new("integer"),
                )
            }),
        );
        self
    }

    /// Requires `value > 0`.
    pub fn positive(mut self) -> Self {
        self.base.add_validator(
            "positive",
            Validator::sync(|value: &f64, path: &FieldPath| {
                check(
                    *value > 0.0,
                    path,
                    ("isPositive", "Is greater than zero.".to_string()),
                    ("notPositive", "Must be greater than zero.".to_string()),
                    ValidationRule::new("positive"),
                )
            }),
        );
        self
    }

    pub fn is(mut self, expected: f64, message: Option<&str>) -> Self {
        let message = message
            .map(str::to_string)
            .unwrap_or_else(|| format!("Must be {}.", expected));
        self.base.add_validator(
            "is",
            Validator::sync(move |value: &f64, path: &FieldPath| {
                check(
                    *value == expected,
                    path,
                    ("equals", "Matches the expected value.".to_string()),
                    ("notEqual", message.clone()),
                    ValidationRule::new("is").with_parameter("value", expected),
                )
            }),
        );
        self
    }

    pub fn in_list(mut self, allowed: impl IntoIterator<Item = f64>, message: Option<&str>) -> Self {
        let allowed: Vec<f64> = allowed.into_iter().collect();
        let message = message.map(str::to_string).unwrap_or_else(|| {
            let listed: Vec<String> = allowed.iter().map(f64::to_string).collect();
            format!("Must be one of: {}.", listed.join(", "))
        });
        self.base.add_validator(
            "in",
            Validator::sync(move |value: &f64, path: &FieldPath| {
                check(
                    allowed.contains(value),
                    path,
                    ("inList", "Is an allowed value.".to_string()),
                    ("notInList", message.clone()),
                    ValidationRule::new("in").with_parameter("values", allowed.clone()),
                )
            }),
        );
        self
    }

    pub fn custom<F>(mut self, name: impl Into<String>, rule: F) -> Self
    where
        F: Fn(f64, &FieldPath) -> ValidationResult + Send + Sync + 'static,
    {
        self.base.add_validator(
            name,
            Validator::sync(move |value: &f64, path: &FieldPath| rule(*value, path)),
        );
        self
    }

    pub fn custom_async<F, Fut>(mut self, name: impl Into<String>, rule: F) -> Self
    where
        F: Fn(f64, FieldPath) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ValidationResult> + Send + 'static,
    {
        self.base.add_validator(
            name,
            Validator::from_async(move |value: &f64, path: &FieldPath| rule(*value, path.clone())),
        );
        self
    }

    pub fn validator_names(&self) -> Vec<&str> {
        self.base.validator_names()
    }

    pub async fn validate(&self, value: &Value, path: &FieldPath) -> ValidationResult {
        self.base.validate(value, path).await
    }
}

impl Default for NumberSchema {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SchemaLike for NumberSchema {
    fn type_name(&self) -> &'static str {
        self.base.type_name()
    }

    async fn validate(&self, value: &Value, path: &FieldPath) -> ValidationResult {
        NumberSchema::validate(self, value, path).await
    }
}
