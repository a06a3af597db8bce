//! Integration tests for the content index

use super::test_utils::MergeFixture;
use dirmerge::{ContentIndex, Fingerprint, MergeError, MergeOptions};
use std::fs;

#[test]
fn test_index_is_read_only() {
    let fixture = MergeFixture::new();
    fixture.keep_file("a.txt", "hello").keep_file("b.txt", "hello");

    let index = ContentIndex::build(&fixture.keep, &MergeOptions::default()).unwrap();
    assert_eq!(index.len(), 1);
    assert_eq!(index.duplicates().len(), 1);
    assert!(fixture.keep.join("a.txt").exists());
    assert!(fixture.keep.join("b.txt").exists());
}

#[test]
fn test_index_paths_are_absolute() {
    let fixture = MergeFixture::new();
    fixture.keep_file("a.txt", "hello");

    let relative = fixture.keep.join("..").join("keep");
    let index = ContentIndex::build(&relative, &MergeOptions::default()).unwrap();
    let path = index.lookup(&Fingerprint::of_bytes(b"hello")).unwrap();
    assert!(path.is_absolute());
    assert_eq!(index.root(), dunce::canonicalize(&fixture.keep).unwrap());
}

#[test]
fn test_index_ignores_hidden_and_nested_content() {
    let fixture = MergeFixture::new();
    fixture.keep_file(".DS_Store", "finder");
    fs::create_dir(fixture.keep.join("nested")).unwrap();
    fs::write(fixture.keep.join("nested").join("deep.txt"), "deep").unwrap();

    let index = ContentIndex::build(&fixture.keep, &MergeOptions::default()).unwrap();
    assert!(index.is_empty());
}

#[test]
fn test_missing_directory() {
    let fixture = MergeFixture::new();
    let err = ContentIndex::build(&fixture.keep.join("missing"), &MergeOptions::default())
        .unwrap_err();
    assert!(matches!(err, MergeError::NotADirectory(_)));
}
