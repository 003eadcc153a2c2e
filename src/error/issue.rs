//! The issue record shared by errors and successes.

use std::fmt::{self, Display};

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::path::FieldPath;

/// Describes which configured rule produced an issue.
///
/// The identifier names the rule (`minimumLength`), and the parameters carry
/// its configuration (`{"length": 8}`), so a client can highlight the exact
/// constraint without parsing the human-readable message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationRule {
    pub identifier: String,
    pub parameters: IndexMap<String, Value>,
}

impl ValidationRule {
    /// Creates a rule with no parameters.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            parameters: IndexMap::new(),
        }
    }

    /// Adds a parameter and returns self for chaining.
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    pub fn parameter(&self, name: &str) -> Option<&Value> {
        self.parameters.get(name)
    }
}

/// A single error or success produced by a validator.
///
/// - **path**: where the value lives in the validated structure
/// - **identifier**: machine-readable code (`tooShort`, `available`, ...)
/// - **message**: human-readable text
/// - **validation_rule**: the rule that failed, attached to errors only
///
/// # Example
///
/// ```rust
/// use fieldcheck::{FieldPath, ValidationIssue, ValidationRule};
///
/// let issue = ValidationIssue::new(
///     FieldPath::root().push_field("password"),
///     "tooShort",
///     "Must be at least 8 characters.",
/// )
/// .with_rule(ValidationRule::new("minimumLength").with_parameter("length", 8));
///
/// assert_eq!(issue.identifier, "tooShort");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    pub path: FieldPath,
    pub identifier: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_rule: Option<ValidationRule>,
}

impl ValidationIssue {
    pub fn new(path: FieldPath, identifier: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path,
            identifier: identifier.into(),
            message: message.into(),
            validation_rule: None,
        }
    }

    /// Attaches the rule that produced this issue.
    pub fn with_rule(mut self, rule: ValidationRule) -> Self {
        self.validation_rule = Some(rule);
        self
    }
}

impl Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "(root)")?;
        } else {
            write!(f, "{}", self.path)?;
        }
        write!(f, ": {} [{}]", self.message, self.identifier)
    }
}
