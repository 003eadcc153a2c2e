//! Field paths for locating values inside a form or nested payload.
//!
//! A [`FieldPath`] is a flat, ordered list of [`PathSegment`]s rather than a
//! dotted string, so a field literally named `"a.b"` never collides with the
//! nested path `a` → `b`.

use std::fmt::{self, Display};

use serde::{Serialize, Serializer};

/// One step in a [`FieldPath`]: either a named field or a list index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A named field (e.g. `email`).
    Field(String),
    /// A position in a list (e.g. `[2]`).
    Index(usize),
}

impl PathSegment {
    /// Creates a field segment.
    pub fn field(name: impl Into<String>) -> Self {
        PathSegment::Field(name.into())
    }

    /// Creates an index segment.
    pub fn index(idx: usize) -> Self {
        PathSegment::Index(idx)
    }
}

impl From<&str> for PathSegment {
    fn from(name: &str) -> Self {
        PathSegment::Field(name.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(name: String) -> Self {
        PathSegment::Field(name)
    }
}

impl From<usize> for PathSegment {
    fn from(idx: usize) -> Self {
        PathSegment::Index(idx)
    }
}

impl Serialize for PathSegment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PathSegment::Field(name) => serializer.serialize_str(name),
            PathSegment::Index(idx) => serializer.serialize_u64(*idx as u64),
        }
    }
}

/// Location of a value within a larger structure.
///
/// Root-level scalars are validated at [`FieldPath::root`]. Nested schemas
/// extend the path as they descend, and every issue they report carries the
/// path of the value it describes.
///
/// # Example
///
/// ```rust
/// use fieldcheck::FieldPath;
///
/// let path = FieldPath::root()
///     .push_field("contacts")
///     .push_index(1)
///     .push_field("email");
///
/// assert_eq!(path.to_string(), "contacts[1].email");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// The empty path.
    pub fn root() -> Self {
        Self::default()
    }

    /// Builds a path from any sequence of segments.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PathSegment>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns a new path with a field segment appended.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        self.push(PathSegment::Field(name.into()))
    }

    /// Returns a new path with an index segment appended.
    pub fn push_index(&self, index: usize) -> Self {
        self.push(PathSegment::Index(index))
    }

    fn push(&self, segment: PathSegment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(segment);
        Self { segments }
    }

    /// Returns true for the empty path.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Returns the path without its last segment, or `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        let (_, init) = self.segments.split_last()?;
        Some(Self {
            segments: init.to_vec(),
        })
    }

    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// Returns true when `self` equals `prefix` or lies underneath it.
    pub fn starts_with(&self, prefix: &FieldPath) -> bool {
        self.segments.starts_with(&prefix.segments)
    }
}

impl<S: Into<PathSegment>> FromIterator<S> for FieldPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_segments(iter)
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if i > 0 => write!(f, ".{}", name)?,
                PathSegment::Field(name) => write!(f, "{}", name)?,
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path() {
        let path = FieldPath::root();
        assert!(path.is_root());
        assert_eq!(path.len(), 0);
        assert_eq!(path.to_string(), "");
        assert!(path.parent().is_none());
    }

    #[test]
    fn test_push_does_not_mutate() {
        let base = FieldPath::root().push_field("contacts");
        let first = base.push_index(0);
        let second = base.push_index(1);

        assert_eq!(base.to_string(), "contacts");
        assert_eq!(first.to_string(), "contacts[0]");
        assert_eq!(second.to_string(), "contacts[1]");
    }

    #[test]
    fn test_field_with_period_stays_one_segment() {
        let path = FieldPath::root().push_field("a.b");
        assert_eq!(path.len(), 1);
        assert_ne!(path, FieldPath::from_segments(["a", "b"]));
    }

    #[test]
    fn test_from_segments_mixed() {
        let path = FieldPath::from_segments([
            PathSegment::field("rows"),
            PathSegment::index(3),
            PathSegment::field("name"),
        ]);
        assert_eq!(path.to_string(), "rows[3].name");
        assert_eq!(path.last(), Some(&PathSegment::Field("name".to_string())));
    }

    #[test]
    fn test_parent_and_prefix() {
        let path = FieldPath::root().push_field("profile").push_field("username");
        let parent = path.parent().unwrap();
        assert_eq!(parent.to_string(), "profile");
        assert!(path.starts_with(&parent));
        assert!(!parent.starts_with(&path));
    }

    #[test]
    fn test_serializes_as_array() {
        let path = FieldPath::root().push_field("items").push_index(2);
        let json = serde_json::to_value(&path).unwrap();
        assert_eq!(json, serde_json::json!(["items", 2]));
    }
}
