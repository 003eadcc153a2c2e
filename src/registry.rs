//! Named schema storage.
//!
//! Form schemas are usually built once, when the application defines its
//! forms, and then validated many times. [`SchemaRegistry`] stores them by
//! name so every caller shares the same instance.

use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::RegistryError;
use crate::path::FieldPath;
use crate::result::ValidationResult;
use crate::schema::SchemaLike;

type SchemaMap = Arc<RwLock<HashMap<String, Arc<dyn SchemaLike>>>>;

/// A thread-safe registry of named schemas.
///
/// Cloning a registry shares the underlying storage. Reads run concurrently
/// and registration takes the write lock. The lock is released before any
/// validation is awaited.
///
/// # Example
///
/// ```rust
/// use fieldcheck::{Schema, SchemaRegistry};
/// use serde_json::json;
///
/// let registry = SchemaRegistry::new();
/// registry
///     .register("SignIn", Schema::object()
///         .field("email", Schema::string().email_address())
///         .field("password", Schema::string().not_empty(None)))
///     .unwrap();
///
/// // Duplicate registration fails
/// assert!(registry.register("SignIn", Schema::object()).is_err());
///
/// let result = futures::executor::block_on(
///     registry.validate("SignIn", &json!({"email": "a@example.com", "password": "x"})),
/// )
/// .unwrap();
/// assert!(result.is_valid());
/// ```
#[derive(Clone, Default)]
pub struct SchemaRegistry {
    schemas: SchemaMap,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a schema under `name`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateName` if the name is taken.
    pub fn register<S>(&self, name: impl Into<String>, schema: S) -> Result<(), RegistryError>
    where
        S: SchemaLike + 'static,
    {
        let name = name.into();
        let mut schemas = self.schemas.write();

        if schemas.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }

        schemas.insert(name, Arc::new(schema));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn SchemaLike>> {
        self.schemas.read().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.schemas.read().contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.schemas.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.schemas.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.read().is_empty()
    }

    /// Validates `value` at the root path against the named schema.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::NotFound` if no schema has that name.
    pub async fn validate(
        &self,
        schema_name: &str,
        value: &Value,
    ) -> Result<ValidationResult, RegistryError> {
        let schema = self
            .get(schema_name)
            .ok_or_else(|| RegistryError::NotFound(schema_name.to_string()))?;
        Ok(schema.validate(value, &FieldPath::root()).await)
    }
}
