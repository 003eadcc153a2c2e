//! Remote validation: delegating a decision to an external authority.
//!
//! The engine ships no transport. Callers inject a
//! [`RemoteValidationClient`], and a [`RemoteCheck`] describes one request
//! made through it: the query, how to build variables from the value being
//! validated, and optionally when to skip the call entirely.
//!
//! The remote side answers with a data object whose value (by default the
//! first key, in response order) is one of `Available`, `Taken`,
//! `Forbidden` or `Invalid`. Anything else passes: the check is fail-open,
//! so a new outcome added on the remote side never blocks every user.
//! Client failures, panics included, become a single `graphQlError` issue
//! and never escape `validate`.

use std::fmt::{self, Display};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{RemoteError, ValidationIssue, ValidationRule};
use crate::path::FieldPath;
use crate::result::ValidationResult;
use crate::schema::Validator;

/// A single request for a remote validation decision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemoteRequest {
    pub query: String,
    pub variables: Value,
}

/// Injected capability that performs remote validation requests.
///
/// Implementations return the response *data* object. Timeouts and retries
/// belong here, not in the schema.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use fieldcheck::{RemoteError, RemoteRequest, RemoteValidationClient};
/// use serde_json::{json, Value};
///
/// struct ReservedNames;
///
/// #[async_trait]
/// impl RemoteValidationClient for ReservedNames {
///     async fn execute(&self, request: RemoteRequest) -> Result<Value, RemoteError> {
///         let name = request.variables["username"].as_str().unwrap_or_default();
///         let outcome = if name == "admin" { "Forbidden" } else { "Available" };
///         Ok(json!({ "accountUsernameValidate": outcome }))
///     }
/// }
/// ```
#[async_trait]
pub trait RemoteValidationClient: Send + Sync {
    async fn execute(&self, request: RemoteRequest) -> Result<Value, RemoteError>;
}

/// The closed set of answers a remote validation may give.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteOutcome {
    Available,
    Taken,
    Forbidden,
    Invalid,
}

impl RemoteOutcome {
    /// Parses the exact wire spelling; anything else is `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Available" => Some(RemoteOutcome::Available),
            "Taken" => Some(RemoteOutcome::Taken),
            "Forbidden" => Some(RemoteOutcome::Forbidden),
            "Invalid" => Some(RemoteOutcome::Invalid),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RemoteOutcome::Available => "Available",
            RemoteOutcome::Taken => "Taken",
            RemoteOutcome::Forbidden => "Forbidden",
            RemoteOutcome::Invalid => "Invalid",
        }
    }

    /// Reads the outcome from a response data object.
    ///
    /// With `field` set, that key is read; otherwise the first key of the
    /// object in response order.
    pub fn from_response(data: &Value, field: Option<&str>) -> Option<Self> {
        let answer = match field {
            Some(field) => data.get(field)?,
            None => data.as_object()?.values().next()?,
        };
        Self::parse(answer.as_str()?)
    }

    /// Maps the outcome to its fixed success or error issue.
    pub fn to_result(self, path: &FieldPath) -> ValidationResult {
        let (identifier, message) = match self {
            RemoteOutcome::Available => {
                return ValidationResult::success(ValidationIssue::new(
                    path.clone(),
                    "available",
                    "Available.",
                ))
            }
            RemoteOutcome::Taken => ("taken", "Already taken."),
            RemoteOutcome::Forbidden => ("forbidden", "Not allowed."),
            RemoteOutcome::Invalid => ("invalid", "Not valid."),
        };
        ValidationResult::failure(
            ValidationIssue::new(path.clone(), identifier, message).with_rule(
                ValidationRule::new("graphQlValidate").with_parameter("outcome", self.as_str()),
            ),
        )
    }
}

impl Display for RemoteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type VariablesFn = dyn Fn(&str) -> Value + Send + Sync;
type SkipFn = dyn Fn(&str) -> bool + Send + Sync;

/// One configured remote validation.
///
/// # Example
///
/// ```rust,ignore
/// let check = RemoteCheck::new(client, USERNAME_QUERY, |value| json!({ "username": value }))
///     .skip_when(|value| value.is_empty());
///
/// let schema = Schema::string().username(None).graphql_validate(check);
/// ```
#[derive(Clone)]
pub struct RemoteCheck {
    client: Arc<dyn RemoteValidationClient>,
    query: String,
    variables: Arc<VariablesFn>,
    skip: Option<Arc<SkipFn>>,
    response_field: Option<String>,
}

impl RemoteCheck {
    pub fn new<F>(
        client: Arc<dyn RemoteValidationClient>,
        query: impl Into<String>,
        variables: F,
    ) -> Self
    where
        F: Fn(&str) -> Value + Send + Sync + 'static,
    {
        Self {
            client,
            query: query.into(),
            variables: Arc::new(variables),
            skip: None,
            response_field: None,
        }
    }

    /// Skips the remote call, with an empty valid result, whenever
    /// `predicate` returns true for the current value.
    pub fn skip_when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.skip = Some(Arc::new(predicate));
        self
    }

    /// Reads the outcome from a named key instead of the first key.
    pub fn response_field(mut self, field: impl Into<String>) -> Self {
        self.response_field = Some(field.into());
        self
    }

    /// Runs the check against one value.
    ///
    /// A client that returns an error or panics, or a panicking skip or
    /// variables function, yields a single `graphQlError` issue.
    pub async fn run(&self, value: &str, path: &FieldPath) -> ValidationResult {
        if let Some(skip) = &self.skip {
            match panic::catch_unwind(AssertUnwindSafe(|| skip(value))) {
                Ok(true) => {
                    debug!(path = %path, "remote validation skipped");
                    return ValidationResult::empty();
                }
                Ok(false) => {}
                Err(_) => {
                    warn!(path = %path, "remote validation skip predicate panicked");
                    return unverified(path);
                }
            }
        }

        let variables = match panic::catch_unwind(AssertUnwindSafe(|| (self.variables)(value))) {
            Ok(variables) => variables,
            Err(_) => {
                warn!(path = %path, "remote validation variables function panicked");
                return unverified(path);
            }
        };
        let request = RemoteRequest {
            query: self.query.clone(),
            variables,
        };

        match AssertUnwindSafe(self.client.execute(request))
            .catch_unwind()
            .await
        {
            Ok(Ok(data)) => {
                match RemoteOutcome::from_response(&data, self.response_field.as_deref()) {
                    Some(outcome) => outcome.to_result(path),
                    None => {
                        debug!(path = %path, response = %data, "unrecognised remote outcome, passing");
                        ValidationResult::empty()
                    }
                }
            }
            Ok(Err(error)) => {
                warn!(path = %path, %error, "remote validation failed");
                unverified(path)
            }
            Err(_) => {
                warn!(path = %path, "remote validation client panicked");
                unverified(path)
            }
        }
    }

    pub(crate) fn into_validator(self) -> Validator<String> {
        let check = Arc::new(self);
        Validator::from_async(move |value: &String, path: &FieldPath| {
            let check = Arc::clone(&check);
            let value = value.clone();
            let path = path.clone();
            async move { check.run(&value, &path).await }
        })
    }
}

fn unverified(path: &FieldPath) -> ValidationResult {
    ValidationResult::failure(ValidationIssue::new(
        path.clone(),
        "graphQlError",
        "Could not be verified. Please try again.",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_outcomes() {
        assert_eq!(RemoteOutcome::parse("Available"), Some(RemoteOutcome::Available));
        assert_eq!(RemoteOutcome::parse("Taken"), Some(RemoteOutcome::Taken));
        assert_eq!(RemoteOutcome::parse("Forbidden"), Some(RemoteOutcome::Forbidden));
        assert_eq!(RemoteOutcome::parse("Invalid"), Some(RemoteOutcome::Invalid));
        assert_eq!(RemoteOutcome::parse("available"), None);
        assert_eq!(RemoteOutcome::parse("Reserved"), None);
    }

    #[test]
    fn test_first_key_in_response_order() {
        let data: Value =
            serde_json::from_str(r#"{"zeta": "Taken", "alpha": "Available"}"#).unwrap();
        assert_eq!(RemoteOutcome::from_response(&data, None), Some(RemoteOutcome::Taken));
        assert_eq!(
            RemoteOutcome::from_response(&data, Some("alpha")),
            Some(RemoteOutcome::Available)
        );
    }

    #[test]
    fn test_unusable_responses() {
        assert_eq!(RemoteOutcome::from_response(&json!({}), None), None);
        assert_eq!(RemoteOutcome::from_response(&json!(null), None), None);
        assert_eq!(RemoteOutcome::from_response(&json!({"a": 1}), None), None);
        assert_eq!(RemoteOutcome::from_response(&json!({"a": "Taken"}), Some("b")), None);
    }

    #[test]
    fn test_outcome_results() {
        let path = FieldPath::root().push_field("username");
        let available = RemoteOutcome::Available.to_result(&path);
        assert!(available.is_valid());
        assert_eq!(available.success_identifiers(), vec!["available"]);

        for (outcome, identifier) in [
            (RemoteOutcome::Taken, "taken"),
            (RemoteOutcome::Forbidden, "forbidden"),
            (RemoteOutcome::Invalid, "invalid"),
        ] {
            let result = outcome.to_result(&path);
            assert_eq!(result.error_identifiers(), vec![identifier]);
            assert_eq!(result.errors()[0].path, path);
        }
    }
}
