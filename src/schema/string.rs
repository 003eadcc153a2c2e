//! String schema validation.
//!
//! [`StringSchema`] checks that a value is a string and then runs a chain of
//! string rules: length limits, email and username format, password
//! strength, equality, membership and remote availability checks.

use std::future::Future;

use async_trait::async_trait;
use serde_json::Value;
use stillwater::prelude::*;

use super::base::{check, value_type_name, BaseSchema, Validator};
use super::traits::SchemaLike;
use crate::error::{TypeMismatch, ValidationIssue, ValidationRule};
use crate::helpers::{
    has_digit, has_special_character, has_uppercase_letter, is_valid_email_address,
    is_valid_username,
};
use crate::path::FieldPath;
use crate::policy::{PasswordPolicy, UsernamePolicy};
use crate::remote::RemoteCheck;
use crate::result::ValidationResult;

fn parse_string(value: &Value) -> Result<String, TypeMismatch> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| TypeMismatch::new("string", value_type_name(value)))
}

/// A schema for string values.
///
/// Each builder method appends one validator and returns the schema, so a
/// field is described by a single chain. Every validator runs on every
/// call; the result lists each satisfied rule as a success and each
/// violated rule as an error.
///
/// # Example
///
/// ```rust
/// use fieldcheck::{FieldPath, Schema};
/// use serde_json::json;
///
/// let schema = Schema::string().password();
///
/// let result = futures::executor::block_on(schema.validate(&json!("abc"), &FieldPath::root()));
/// assert!(!result.is_valid());
/// // Nothing short-circuits: every violated rule is reported.
/// assert!(result.has_error("tooShort"));
/// assert!(result.has_error("noUppercase"));
/// assert!(result.has_error("noNumber"));
/// assert!(result.has_error("noSpecialCharacter"));
/// ```
#[derive(Clone)]
pub struct StringSchema {
    base: BaseSchema<String>,
}

impl StringSchema {
    pub fn new() -> Self {
        Self {
            base: BaseSchema::new("string", parse_string),
        }
    }

    /// Accepts `null` with an empty result.
    pub fn optional(mut self) -> Self {
        self.base.set_optional(true);
        self
    }

    /// Replaces the message used when the value is not a string.
    pub fn type_error(mut self, message: impl Into<String>) -> Self {
        self.base.set_type_error_message(message);
        self
    }

    /// Requires at least `length` characters (Unicode scalar values).
    ///
    /// Errors with `tooShort`, succeeds with `longEnough`.
    pub fn minimum_length(mut self, length: usize) -> Self {
        self.base.add_validator(
            "minimumLength",
            Validator::sync(move |value: &String, path: &FieldPath| {
                check_minimum_length(value, length, path)
            }),
        );
        self
    }

    /// Allows at most `length` characters (Unicode scalar values).
    ///
    /// Errors with `tooLong`, succeeds with `shortEnough`.
    pub fn maximum_length(mut self, length: usize) -> Self {
        self.base.add_validator(
            "maximumLength",
            Validator::sync(move |value: &String, path: &FieldPath| {
                check_maximum_length(value, length, path)
            }),
        );
        self
    }

    pub fn email_address(mut self) -> Self {
        self.base.add_validator(
            "emailAddress",
            Validator::sync(|value: &String, path: &FieldPath| {
                check(
                    is_valid_email_address(value),
                    path,
                    ("validEmailAddress", "Valid email address.".to_string()),
                    (
                        "invalidEmailAddress",
                        "Must be a valid email address.".to_string(),
                    ),
                    ValidationRule::new("emailAddress"),
                )
            }),
        );
        self
    }

    /// Username rules with the default [`UsernamePolicy`].
    ///
    /// When the value equals `current_username` (the user's existing name),
    /// the result is a single `currentUsername` success and no other
    /// username rule is evaluated.
    pub fn username(self, current_username: Option<&str>) -> Self {
        self.username_with(&UsernamePolicy::default(), current_username)
    }

    /// Username rules with explicit length limits.
    ///
    /// Length and format are registered as one composite validator so the
    /// current-username case can suppress all of them together.
    pub fn username_with(mut self, policy: &UsernamePolicy, current_username: Option<&str>) -> Self {
        let current = current_username.map(str::to_string);
        let (minimum, maximum) = (policy.minimum_length, policy.maximum_length);
        self.base.add_validator(
            "username",
            Validator::sync(move |value: &String, path: &FieldPath| {
                if current.as_deref() == Some(value.as_str()) {
                    return ValidationResult::success(ValidationIssue::new(
                        path.clone(),
                        "currentUsername",
                        "This is your current username.",
                    ));
                }
                check_minimum_length(value, minimum, path)
                    .combine(check_maximum_length(value, maximum, path))
                    .combine(check(
                        is_valid_username(value),
                        path,
                        ("validUsername", "Valid username.".to_string()),
                        (
                            "invalidUsername",
                            "May only contain letters, numbers, underscores and one inner period."
                                .to_string(),
                        ),
                        ValidationRule::new("username"),
                    ))
            }),
        );
        self
    }

    /// Password rules with the default [`PasswordPolicy`]: length 8 to 128,
    /// an uppercase letter, a number and a special character.
    pub fn password(self) -> Self {
        self.password_with(&PasswordPolicy::default())
    }

    /// Password rules from an explicit policy. Each enabled rule is its own
    /// validator and contributes its own checklist entry.
    pub fn password_with(mut self, policy: &PasswordPolicy) -> Self {
        self = self
            .minimum_length(policy.minimum_length)
            .maximum_length(policy.maximum_length);

        if policy.require_uppercase {
            self.base.add_validator(
                "uppercase",
                Validator::sync(|value: &String, path: &FieldPath| {
                    check(
                        has_uppercase_letter(value),
                        path,
                        ("hasUppercase", "Contains an uppercase letter.".to_string()),
                        ("noUppercase", "Must contain an uppercase letter.".to_string()),
                        ValidationRule::new("uppercase"),
                    )
                }),
            );
        }
        if policy.require_number {
            self.base.add_validator(
                "number",
                Validator::sync(|value: &String, path: &FieldPath| {
                    check(
                        has_digit(value),
                        path,
                        ("hasNumber", "Contains a number.".to_string()),
                        ("noNumber", "Must contain a number.".to_string()),
                        ValidationRule::new("number"),
                    )
                }),
            );
        }
        if policy.require_special_character {
            self.base.add_validator(
                "specialCharacter",
                Validator::sync(|value: &String, path: &FieldPath| {
                    check(
                        has_special_character(value),
                        path,
                        ("hasSpecialCharacter", "Contains a special character.".to_string()),
                        (
                            "noSpecialCharacter",
                            "Must contain a special character.".to_string(),
                        ),
                        ValidationRule::new("specialCharacter"),
                    )
                }),
            );
        }
        self
    }

    /// Rejects the empty string. Errors with `empty` (using `message` when
    /// given), succeeds with `notEmpty`.
    pub fn not_empty(mut self, message: Option<&str>) -> Self {
        let message = message.unwrap_or("Required.").to_string();
        self.base.add_validator(
            "notEmpty",
            Validator::sync(move |value: &String, path: &FieldPath| {
                check(
                    !value.is_empty(),
                    path,
                    ("notEmpty", "Not empty.".to_string()),
                    ("empty", message.clone()),
                    ValidationRule::new("notEmpty"),
                )
            }),
        );
        self
    }

    /// Requires exact equality. Errors with `notEqual`, succeeds with `equals`.
    pub fn is(mut self, expected: impl Into<String>, message: Option<&str>) -> Self {
        let expected = expected.into();
        let message = message
            .map(str::to_string)
            .unwrap_or_else(|| format!("Must be \"{}\".", expected));
        self.base.add_validator(
            "is",
            Validator::sync(move |value: &String, path: &FieldPath| {
                check(
                    *value == expected,
                    path,
                    ("equals", "Matches the expected value.".to_string()),
                    ("notEqual", message.clone()),
                    ValidationRule::new("is").with_parameter("value", expected.clone()),
                )
            }),
        );
        self
    }

    /// Requires membership in `allowed`. Errors with `notInList`, succeeds
    /// with `inList`.
    pub fn in_list<I, S>(mut self, allowed: I, message: Option<&str>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let allowed: Vec<String> = allowed.into_iter().map(Into::into).collect();
        let message = message
            .map(str::to_string)
            .unwrap_or_else(|| format!("Must be one of: {}.", allowed.join(", ")));
        self.base.add_validator(
            "in",
            Validator::sync(move |value: &String, path: &FieldPath| {
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

    /// Delegates the decision to a remote authority, e.g. "is this username
    /// taken". See [`RemoteCheck`] for skip and outcome handling.
    pub fn graphql_validate(mut self, remote: RemoteCheck) -> Self {
        self.base.add_validator("graphQlValidate", remote.into_validator());
        self
    }

    /// Appends an arbitrary synchronous rule.
    pub fn custom<F>(mut self, name: impl Into<String>, rule: F) -> Self
    where
        F: Fn(&str, &FieldPath) -> ValidationResult + Send + Sync + 'static,
    {
        self.base.add_validator(
            name,
            Validator::sync(move |value: &String, path: &FieldPath| rule(value, path)),
        );
        self
    }

    /// Appends an arbitrary asynchronous rule. The future must own its data.
    pub fn custom_async<F, Fut>(mut self, name: impl Into<String>, rule: F) -> Self
    where
        F: Fn(String, FieldPath) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ValidationResult> + Send + 'static,
    {
        self.base.add_validator(
            name,
            Validator::from_async(move |value: &String, path: &FieldPath| {
                rule(value.clone(), path.clone())
            }),
        );
        self
    }

    pub fn validator_names(&self) -> Vec<&str> {
        self.base.validator_names()
    }

    /// Validates a value against this schema.
    ///
    /// A non-string value yields one `invalidType` error and no validator
    /// runs. Otherwise the issues of every validator are concatenated in
    /// registration order.
    pub async fn validate(&self, value: &Value, path: &FieldPath) -> ValidationResult {
        self.base.validate(value, path).await
    }
}

impl Default for StringSchema {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SchemaLike for StringSchema {
    fn type_name(&self) -> &'static str {
        self.base.type_name()
    }

    async fn validate(&self, value: &Value, path: &FieldPath) -> ValidationResult {
        StringSchema::validate(self, value, path).await
    }
}

fn check_minimum_length(value: &str, length: usize, path: &FieldPath) -> ValidationResult {
    check(
        value.chars().count() >= length,
        path,
        ("longEnough", format!("At least {} characters.", length)),
        ("tooShort", format!("Must be at least {} characters.", length)),
        ValidationRule::new("minimumLength").with_parameter("length", length),
    )
}

fn check_maximum_length(value: &str, length: usize, path: &FieldPath) -> ValidationResult {
    check(
        value.chars().count() <= length,
        path,
        ("shortEnough", format!("At most {} characters.", length)),
        ("tooLong", format!("Must be at most {} characters.", length)),
        ValidationRule::new("maximumLength").with_parameter("length", length),
    )
}
