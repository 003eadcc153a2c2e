//! Error types for the few operations that can genuinely fail.
//!
//! Constraint violations are never errors; they are reported as issues
//! inside a [`ValidationResult`](crate::ValidationResult). These types cover
//! parsing into a schema's target type, the injected remote capability, and
//! registry bookkeeping.

use thiserror::Error;

/// A value did not have the primitive type a schema expects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected {expected}, received {received}")]
pub struct TypeMismatch {
    pub expected: &'static str,
    pub received: &'static str,
}

impl TypeMismatch {
    pub fn new(expected: &'static str, received: &'static str) -> Self {
        Self { expected, received }
    }
}

/// Failure reported by a [`RemoteValidationClient`](crate::RemoteValidationClient).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// The request never produced a response.
    #[error("remote validation transport failed: {0}")]
    Transport(String),
    /// The remote side answered with an error payload.
    #[error("remote validation returned an error: {0}")]
    Response(String),
}

/// Errors from [`SchemaRegistry`](crate::SchemaRegistry) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("schema '{0}' is already registered")]
    DuplicateName(String),
    #[error("schema '{0}' is not registered")]
    NotFound(String),
}
