//! Traits for schema polymorphism.
//!
//! [`SchemaLike`] lets schemas of different value kinds be nested inside
//! object and array schemas, or stored together in a registry.

use async_trait::async_trait;
use serde_json::Value;

use crate::path::FieldPath;
use crate::result::ValidationResult;

/// A schema that can validate an arbitrary JSON value.
///
/// The trait is object-safe, so `Box<dyn SchemaLike>` and
/// `Arc<dyn SchemaLike>` can hold any concrete schema. `Send + Sync` lets a
/// schema built once at form-definition time be shared by concurrent
/// validations; schemas keep no per-call state.
///
/// # Example
///
/// ```rust
/// use fieldcheck::{Schema, SchemaLike};
///
/// let fields: Vec<Box<dyn SchemaLike>> = vec![
///     Box::new(Schema::string().not_empty(None)),
///     Box::new(Schema::number().minimum(0.0)),
/// ];
/// assert_eq!(fields[0].type_name(), "string");
/// assert_eq!(fields[1].type_name(), "number");
/// ```
#[async_trait]
pub trait SchemaLike: Send + Sync {
    /// Human label for the schema's target type, used in type errors.
    fn type_name(&self) -> &'static str;

    /// Parses `value` and runs every registered validator against it.
    ///
    /// Never fails: type mismatches and constraint violations are reported
    /// as error issues in the returned result.
    async fn validate(&self, value: &Value, path: &FieldPath) -> ValidationResult;
}
