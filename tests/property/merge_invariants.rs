//! Property-based tests for merge completeness and content preservation

use dirmerge::{merge_dirs, MergeOptions};
use proptest::prelude::*;
use proptest::test_runner::{Config, TestRunner};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Up to eight files with short names and contents drawn from a small
/// alphabet so duplicates and name collisions both happen often.
fn directory_strategy() -> impl Strategy<Value = BTreeMap<String, String>> {
    prop::collection::btree_map("[a-d]{1,2}\\.txt", "[xyz]{0,2}", 0..8)
}

fn populate(dir: &Path, files: &BTreeMap<String, String>) {
    for (name, content) in files {
        fs::write(dir.join(name), content).unwrap();
    }
}

fn contents(dir: &Path) -> Vec<String> {
    fs::read_dir(dir)
        .unwrap()
        .map(|e| fs::read_to_string(e.unwrap().path()).unwrap())
        .collect()
}

#[test]
fn test_merge_preserves_every_content_exactly_once() {
    let mut runner = TestRunner::new(Config {
        cases: 48,
        ..Config::default()
    });

    runner
        .run(
            &(directory_strategy(), directory_strategy()),
            |(keep_files, clean_files)| {
                let temp_dir = TempDir::new().unwrap();
                let keep = temp_dir.path().join("keep");
                let clean = temp_dir.path().join("clean");
                fs::create_dir(&keep).unwrap();
                fs::create_dir(&clean).unwrap();
                populate(&keep, &keep_files);
                populate(&clean, &clean_files);

                let report = merge_dirs(&keep, &clean, &MergeOptions::default()).unwrap();

                // Completeness
                prop_assert_eq!(report.total, clean_files.len());
                prop_assert_eq!(report.deleted + report.moved, report.total);
                prop_assert!(fs::read_dir(&clean).unwrap().next().is_none());

                // Every clean content now exists under keep
                let kept = contents(&keep);
                for content in clean_files.values() {
                    prop_assert!(kept.contains(content));
                }

                // Original keep files are never touched
                for (name, content) in &keep_files {
                    prop_assert_eq!(&fs::read_to_string(keep.join(name)).unwrap(), content);
                }

                // New content arrives exactly once
                let keep_contents: BTreeSet<&String> = keep_files.values().collect();
                let new_contents: BTreeSet<&String> = clean_files
                    .values()
                    .filter(|c| !keep_contents.contains(c))
                    .collect();
                prop_assert_eq!(report.moved, new_contents.len());
                prop_assert_eq!(kept.len(), keep_files.len() + new_contents.len());

                Ok(())
            },
        )
        .unwrap();
}
