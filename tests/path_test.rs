//! Integration tests for field paths.

use fieldcheck::{FieldPath, PathSegment};

#[test]
fn test_build_and_display() {
    let path = FieldPath::root()
        .push_field("orders")
        .push_index(0)
        .push_field("lines")
        .push_index(12)
        .push_field("sku");
    assert_eq!(path.to_string(), "orders[0].lines[12].sku");
    assert_eq!(path.len(), 5);
}

#[test]
fn test_leading_index() {
    let path = FieldPath::root().push_index(3).push_field("name");
    assert_eq!(path.to_string(), "[3].name");
}

#[test]
fn test_collect_from_segments() {
    let path: FieldPath = vec![PathSegment::field("a"), PathSegment::index(1)]
        .into_iter()
        .collect();
    assert_eq!(path, FieldPath::root().push_field("a").push_index(1));
}

#[test]
fn test_segments_iterate_in_order() {
    let path = FieldPath::from_segments([PathSegment::field("x"), PathSegment::index(2)]);
    let segments: Vec<_> = path.segments().cloned().collect();
    assert_eq!(segments, vec![PathSegment::Field("x".into()), PathSegment::Index(2)]);
}

#[test]
fn test_field_names_with_periods_are_unambiguous() {
    let dotted = FieldPath::root().push_field("user.name");
    let nested = FieldPath::root().push_field("user").push_field("name");
    assert_eq!(dotted.to_string(), nested.to_string());
    assert_ne!(dotted, nested);
}

#[test]
fn test_json_shape() {
    let path = FieldPath::root().push_field("rows").push_index(4);
    assert_eq!(serde_json::to_string(&path).unwrap(), r#"["rows",4]"#);
}
