//! # fieldcheck
//!
//! A composable validation engine for form fields that reports every
//! satisfied and every violated rule, not just the first failure.
//!
//! ## Overview
//!
//! A schema is built once with chained builder calls and then validated
//! many times, once per keystroke or submit. Each call parses the value
//! into the schema's target type and runs every registered validator,
//! synchronous or asynchronous, in order. The resulting
//! [`ValidationResult`] carries the errors and the successes, so a
//! password field can show its whole strength checklist at once.
//!
//! Remote checks (e.g. "is this username taken") go through an injected
//! [`RemoteValidationClient`]; the engine itself performs no I/O.
//!
//! ## Core Types
//!
//! - [`FieldPath`]: location of a value (e.g. `contacts[0].email`)
//! - [`ValidationIssue`]: one error or success with identifier and message
//! - [`ValidationResult`]: all issues from one validation
//! - [`Schema`]: entry point for string, number, object and array schemas
//! - [`RemoteCheck`]: a remote availability check attached to a string schema
//!
//! ## Example
//!
//! ```rust
//! use fieldcheck::{FieldPath, Schema};
//! use serde_json::json;
//!
//! let schema = Schema::string().password();
//!
//! let result = futures::executor::block_on(
//!     schema.validate(&json!("Abcdef1!"), &FieldPath::root()),
//! );
//! assert!(result.is_valid());
//! assert!(result.has_success("hasUppercase"));
//! assert!(result.has_success("hasSpecialCharacter"));
//! ```

pub mod error;
pub mod helpers;
pub mod path;
pub mod policy;
pub mod registry;
pub mod remote;
pub mod result;
pub mod schema;

pub use error::{
    RegistryError, RemoteError, TypeMismatch, ValidationErrors, ValidationIssue, ValidationRule,
};
pub use helpers::{is_valid_email_address, is_valid_username};
pub use path::{FieldPath, PathSegment};
pub use policy::{PasswordPolicy, UsernamePolicy};
pub use registry::SchemaRegistry;
pub use remote::{RemoteCheck, RemoteOutcome, RemoteRequest, RemoteValidationClient};
pub use result::ValidationResult;
pub use schema::{
    ArraySchema, BaseSchema, NumberSchema, ObjectSchema, Schema, SchemaLike, StringSchema,
    Validator,
};
