//! Schema definitions for validation.
//!
//! Each schema pairs a parse step for one value kind with an ordered list of
//! validators. Builders append validators; `validate` runs all of them and
//! accumulates every success and error rather than stopping at the first
//! failure.
//!
//! # Example
//!
//! ```rust
//! use fieldcheck::{FieldPath, Schema};
//! use serde_json::json;
//!
//! let schema = Schema::string().minimum_length(1).maximum_length(100);
//!
//! let result = futures::executor::block_on(schema.validate(&json!("hello"), &FieldPath::root()));
//! assert!(result.is_valid());
//! assert_eq!(result.success_identifiers(), vec!["longEnough", "shortEnough"]);
//! ```

mod array;
mod base;
mod numeric;
mod object;
mod string;
mod traits;

pub use array::ArraySchema;
pub use base::{AsyncValidatorFn, BaseSchema, ParseFn, SyncValidatorFn, Validator};
pub use numeric::NumberSchema;
pub use object::ObjectSchema;
pub use string::StringSchema;
pub use traits::SchemaLike;

/// Entry point for creating validation schemas.
///
/// # Example
///
/// ```rust
/// use fieldcheck::Schema;
///
/// let username = Schema::string().username(Some("current_name"));
/// let age = Schema::number().integer().minimum(13.0);
/// let tags = Schema::array(Schema::string().not_empty(None)).maximum_items(5);
/// let profile = Schema::object()
///     .field("username", username)
///     .optional_field("age", age)
///     .optional_field("tags", tags);
///
/// assert_eq!(profile.field_names(), vec!["username", "age", "tags"]);
/// ```
pub struct Schema;

impl Schema {
    pub fn string() -> StringSchema {
        StringSchema::new()
    }

    pub fn number() -> NumberSchema {
        NumberSchema::new()
    }

    pub fn object() -> ObjectSchema {
        ObjectSchema::new()
    }

    /// Creates an array schema validating every item with `item_schema`.
    pub fn array<S: SchemaLike>(item_schema: S) -> ArraySchema<S> {
        ArraySchema::new(item_schema)
    }
}
