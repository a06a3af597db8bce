//! Fingerprint verification against BLAKE3
//!
//! Confirms streamed file fingerprints equal a direct BLAKE3 digest of the
//! whole content.

use dirmerge::fingerprint::{fingerprint_file, Fingerprint, DEFAULT_BLOCK_SIZE};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_fingerprint_matches_blake3() {
    let content = b"test content";
    let ours = Fingerprint::of_bytes(content);
    assert_eq!(ours.as_bytes(), blake3::hash(content).as_bytes());
}

#[test]
fn test_streamed_fingerprint_spans_blocks() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("large.bin");
    // Three full blocks plus a partial one
    let content: Vec<u8> = (0..(3 * DEFAULT_BLOCK_SIZE + 123))
        .map(|i| (i * 31 % 256) as u8)
        .collect();
    fs::write(&path, &content).unwrap();

    let streamed = fingerprint_file(&path, DEFAULT_BLOCK_SIZE).unwrap();
    assert_eq!(streamed.as_bytes(), blake3::hash(&content).as_bytes());
}

#[test]
fn test_name_does_not_affect_fingerprint() {
    let temp_dir = TempDir::new().unwrap();
    let a = temp_dir.path().join("a.txt");
    let b = temp_dir.path().join("completely-different-name.dat");
    fs::write(&a, "same bytes").unwrap();
    fs::write(&b, "same bytes").unwrap();

    assert_eq!(
        fingerprint_file(&a, DEFAULT_BLOCK_SIZE).unwrap(),
        fingerprint_file(&b, DEFAULT_BLOCK_SIZE).unwrap()
    );
}
