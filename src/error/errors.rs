//! Non-empty error collections.

use std::fmt::{self, Display};

use stillwater::prelude::*;

use super::issue::ValidationIssue;
use crate::path::FieldPath;

/// A non-empty collection of error issues.
///
/// This is the failure side of [`ValidationResult::into_validation`], so a
/// `Validation::Failure` can never be constructed without at least one issue.
///
/// [`ValidationResult::into_validation`]: crate::ValidationResult::into_validation
///
/// # Example
///
/// ```rust
/// use fieldcheck::{FieldPath, ValidationErrors, ValidationIssue};
/// use stillwater::prelude::*;
///
/// let a = ValidationErrors::single(ValidationIssue::new(
///     FieldPath::root().push_field("email"),
///     "taken",
///     "Already taken.",
/// ));
/// let b = ValidationErrors::single(ValidationIssue::new(
///     FieldPath::root().push_field("username"),
///     "tooShort",
///     "Too short.",
/// ));
///
/// assert_eq!(a.combine(b).len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors(NonEmptyVec<ValidationIssue>);

impl ValidationErrors {
    pub fn single(issue: ValidationIssue) -> Self {
        Self(NonEmptyVec::singleton(issue))
    }

    /// Returns `None` when `issues` is empty.
    pub fn from_vec(issues: Vec<ValidationIssue>) -> Option<Self> {
        NonEmptyVec::from_vec(issues).map(Self)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.0.iter()
    }

    pub fn first(&self) -> &ValidationIssue {
        self.0.head()
    }

    /// Returns all issues reported exactly at `path`.
    pub fn at_path(&self, path: &FieldPath) -> Vec<&ValidationIssue> {
        self.0.iter().filter(|issue| &issue.path == path).collect()
    }

    /// Returns all issues with the given identifier.
    pub fn with_identifier(&self, identifier: &str) -> Vec<&ValidationIssue> {
        self.0
            .iter()
            .filter(|issue| issue.identifier == identifier)
            .collect()
    }

    pub fn into_vec(self) -> Vec<ValidationIssue> {
        self.0.into_vec()
    }
}

impl Semigroup for ValidationErrors {
    fn combine(self, other: Self) -> Self {
        ValidationErrors(self.0.combine(other.0))
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} error(s):", self.len())?;
        for (i, issue) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, issue)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = ValidationIssue;
    type IntoIter = std::vec::IntoIter<ValidationIssue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(field: &str, identifier: &str) -> ValidationIssue {
        ValidationIssue::new(FieldPath::root().push_field(field), identifier, "message")
    }

    #[test]
    fn test_from_vec_rejects_empty() {
        assert!(ValidationErrors::from_vec(Vec::new()).is_none());
        let errors = ValidationErrors::from_vec(vec![issue("a", "x")]).unwrap();
        assert_eq!(errors.len(), 1);
        assert!(!errors.is_empty());

        let errors = ValidationErrors::from_vec(vec![issue("a", "x"), issue("b", "y")]).unwrap();
        let identifiers: Vec<_> = errors.iter().map(|i| i.identifier.as_str()).collect();
        assert_eq!(identifiers, vec!["x", "y"]);
    }

    #[test]
    fn test_combine_keeps_order() {
        let combined = ValidationErrors::single(issue("a", "first"))
            .combine(ValidationErrors::single(issue("b", "second")))
            .combine(ValidationErrors::single(issue("a", "third")));

        let identifiers: Vec<_> = combined.iter().map(|i| i.identifier.as_str()).collect();
        assert_eq!(identifiers, vec!["first", "second", "third"]);
        assert_eq!(combined.first().identifier, "first");
    }

    #[test]
    fn test_filters() {
        let errors = ValidationErrors::from_vec(vec![
            issue("a", "tooShort"),
            issue("b", "tooShort"),
            issue("a", "noNumber"),
        ])
        .unwrap();

        assert_eq!(errors.at_path(&FieldPath::root().push_field("a")).len(), 2);
        assert_eq!(errors.with_identifier("tooShort").len(), 2);
        assert_eq!(errors.with_identifier("taken").len(), 0);
    }

    #[test]
    fn test_display() {
        let errors = ValidationErrors::from_vec(vec![issue("name", "empty"), issue("email", "taken")])
            .unwrap();
        let display = errors.to_string();
        assert!(display.contains("2 error(s)"));
        assert!(display.contains("1. name: message [empty]"));
        assert!(display.contains("2. email: message [taken]"));
    }
}
