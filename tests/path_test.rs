//! Integration tests for FieldPath.

use paperwork::{FieldPath, PathSegment};

#[test]
fn test_path_construction_and_display() {
    assert_eq!(FieldPath::root().to_string(), "");
    assert_eq!(FieldPath::root().push_field("email").to_string(), "email");

    let path = FieldPath::root()
        .push_field("documents")
        .push_index(0)
        .push_field("fileName");
    assert_eq!(path.to_string(), "documents[0].fileName");
}

#[test]
fn test_path_segments_preserved() {
    let path = FieldPath::from_field("documents").push_index(42).push_field("file");

    let segments: Vec<&PathSegment> = path.segments().collect();
    assert_eq!(
        segments,
        vec![
            &PathSegment::field("documents"),
            &PathSegment::index(42),
            &PathSegment::field("file"),
        ]
    );
    assert_eq!(segments[0].as_field(), Some("documents"));
    assert_eq!(segments[1].as_field(), None);
}

#[test]
fn test_path_is_immutable() {
    let base = FieldPath::from_field("documents");

    let first = base.push_index(0);
    let third = base.push_index(2);

    assert_eq!(base.to_string(), "documents");
    assert_eq!(first.to_string(), "documents[0]");
    assert_eq!(third.to_string(), "documents[2]");
}

#[test]
fn test_entries_are_distinguishable() {
    let first = FieldPath::parse("documents[0].file").unwrap();
    let third = FieldPath::parse("documents[2].file").unwrap();
    assert_ne!(first, third);
    assert!(third.starts_with(&FieldPath::from_field("documents")));
    assert_eq!(third.last(), Some(&PathSegment::field("file")));
}

#[test]
fn test_parse_display_agree() {
    for text in ["firstName", "documents[3]", "documents[3].fileType", ""] {
        assert_eq!(FieldPath::parse(text).unwrap().to_string(), text);
    }
    let parsed: FieldPath = "documents[1].file".parse().unwrap();
    assert_eq!(parsed.len(), 3);
}

#[test]
fn test_parse_rejects_malformed() {
    for bad in ["documents[", "documents[x]", "documents..file", ".email", "documents[0]file"] {
        let err = FieldPath::parse(bad).unwrap_err();
        assert_eq!(err.input, bad);
    }
}

#[test]
fn test_path_parent_chain() {
    let path = FieldPath::parse("documents[0].file").unwrap();

    let parent = path.parent().expect("should have parent");
    assert_eq!(parent.to_string(), "documents[0]");

    let grandparent = parent.parent().expect("should have parent");
    assert_eq!(grandparent.to_string(), "documents");

    let root = grandparent.parent().expect("should have parent");
    assert!(root.is_root());
    assert!(root.parent().is_none());
}

#[test]
fn test_path_hash() {
    use std::collections::HashSet;

    let mut set = HashSet::new();
    set.insert(FieldPath::from_field("firstName"));
    set.insert(FieldPath::from_field("lastName"));
    set.insert(FieldPath::from_field("firstName"));

    assert_eq!(set.len(), 2);
}
