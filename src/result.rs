//! The outcome of running one validator or a whole schema.

use serde::ser::{Serialize, SerializeStruct, Serializer};
use stillwater::prelude::*;
use stillwater::Validation;

use crate::error::{ValidationErrors, ValidationIssue};
use crate::path::FieldPath;

/// Errors and successes produced by validation.
///
/// Validity is derived from the error list, so `is_valid()` is true exactly
/// when no error issue was produced. Successes describe satisfied
/// constraints and are kept even when other constraints fail, which lets a
/// form render a full checklist (e.g. password strength) at once.
///
/// Results combine as a semigroup: errors and successes are concatenated in
/// order, and [`ValidationResult::empty`] is the identity.
///
/// # Example
///
/// ```rust
/// use fieldcheck::{FieldPath, ValidationIssue, ValidationResult};
/// use stillwater::prelude::*;
///
/// let long_enough = ValidationResult::success(ValidationIssue::new(
///     FieldPath::root(),
///     "longEnough",
///     "At least 8 characters.",
/// ));
/// let no_number = ValidationResult::failure(ValidationIssue::new(
///     FieldPath::root(),
///     "noNumber",
///     "Must contain a number.",
/// ));
///
/// let combined = long_enough.combine(no_number);
/// assert!(!combined.is_valid());
/// assert_eq!(combined.successes().len(), 1);
/// assert_eq!(combined.errors().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationResult {
    errors: Vec<ValidationIssue>,
    successes: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// A valid result with no issues at all.
    ///
    /// Used for skipped checks and unrecognised remote outcomes.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn success(issue: ValidationIssue) -> Self {
        Self {
            errors: Vec::new(),
            successes: vec![issue],
        }
    }

    pub fn failure(issue: ValidationIssue) -> Self {
        Self {
            errors: vec![issue],
            successes: Vec::new(),
        }
    }

    /// Builds a result from explicit lists.
    pub fn from_parts(errors: Vec<ValidationIssue>, successes: Vec<ValidationIssue>) -> Self {
        Self { errors, successes }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationIssue] {
        &self.errors
    }

    pub fn successes(&self) -> &[ValidationIssue] {
        &self.successes
    }

    /// Returns true when neither errors nor successes were produced.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.successes.is_empty()
    }

    pub fn error_identifiers(&self) -> Vec<&str> {
        self.errors.iter().map(|i| i.identifier.as_str()).collect()
    }

    pub fn success_identifiers(&self) -> Vec<&str> {
        self.successes.iter().map(|i| i.identifier.as_str()).collect()
    }

    pub fn has_error(&self, identifier: &str) -> bool {
        self.errors.iter().any(|i| i.identifier == identifier)
    }

    pub fn has_success(&self, identifier: &str) -> bool {
        self.successes.iter().any(|i| i.identifier == identifier)
    }

    /// Returns the errors reported exactly at `path`.
    pub fn errors_at(&self, path: &FieldPath) -> Vec<&ValidationIssue> {
        self.errors.iter().filter(|i| &i.path == path).collect()
    }

    /// Appends another result in place.
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.successes.extend(other.successes);
    }

    pub fn into_parts(self) -> (Vec<ValidationIssue>, Vec<ValidationIssue>) {
        (self.errors, self.successes)
    }

    /// Converts into stillwater's applicative `Validation`.
    ///
    /// Successes are carried on `Success`; on `Failure` the successes are
    /// dropped and the non-empty error list is returned.
    pub fn into_validation(self) -> Validation<Vec<ValidationIssue>, ValidationErrors> {
        match ValidationErrors::from_vec(self.errors) {
            Some(errors) => Validation::Failure(errors),
            None => Validation::Success(self.successes),
        }
    }
}

impl Semigroup for ValidationResult {
    fn combine(mut self, other: Self) -> Self {
        self.merge(other);
        self
    }
}

impl FromIterator<ValidationResult> for ValidationResult {
    fn from_iter<I: IntoIterator<Item = ValidationResult>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Semigroup::combine)
    }
}

impl Serialize for ValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationResult", 3)?;
        state.serialize_field("valid", &self.is_valid())?;
        state.serialize_field("errors", &self.errors)?;
        state.serialize_field("successes", &self.successes)?;
        state.end()
    }
}
