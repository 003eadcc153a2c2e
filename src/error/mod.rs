//! Issue records and error types.
//!
//! [`ValidationIssue`] is the record every validator emits, for failures and
//! for satisfied constraints alike. [`ValidationErrors`] is the non-empty
//! failure collection, and [`failure`] holds the `thiserror` types for
//! operations that can fail outright.

mod errors;
pub mod failure;
mod issue;

pub use errors::ValidationErrors;
pub use failure::{RegistryError, RemoteError, TypeMismatch};
pub use issue::{ValidationIssue, ValidationRule};
