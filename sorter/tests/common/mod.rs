//! Common test utilities for integration tests.
//!
//! Tree builders and a few assertions over real temporary directories.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use sorter::engine::CollectingSink;
use sorter::{MemoryHistory, Result, SortEngine, SortOptions, SortReport};

/// A temporary folder tree that is removed on drop.
pub struct Tree {
    dir: tempfile::TempDir,
}

impl Tree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// The tree's root folder.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of `rel` inside the tree.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    /// Write a file whose content is its relative path, creating parents.
    pub fn file(&self, rel: &str) -> &Self {
        let path = self.path(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, rel).unwrap();
        self
    }

    /// Create an (empty) folder.
    pub fn dir(&self, rel: &str) -> &Self {
        fs::create_dir_all(self.path(rel)).unwrap();
        self
    }

    /// Every regular file under the root, keyed by relative path, with its
    /// content. Marker files are left out.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        let mut files = BTreeMap::new();
        collect(self.root(), self.root(), &mut files);
        files
    }
}

fn collect(root: &Path, dir: &Path, files: &mut BTreeMap<String, String>) {
    for entry in fs::read_dir(dir).unwrap() {
        let entry = entry.unwrap();
        let path = entry.path();
        if path.is_dir() {
            collect(root, &path, files);
        } else {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name == ".sorter" || name == ".signore" {
                continue;
            }
            let rel = path.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/");
            files.insert(rel, fs::read_to_string(&path).unwrap());
        }
    }
}

/// The multiset of file contents in a snapshot, for no-loss checks.
pub fn contents(snapshot: &BTreeMap<String, String>) -> Vec<String> {
    let mut all: Vec<String> = snapshot.values().cloned().collect();
    all.sort();
    all
}

/// Run the engine once against a fresh in-memory history.
pub fn sort(options: &SortOptions) -> (Result<SortReport>, MemoryHistory, CollectingSink) {
    let mut history = MemoryHistory::new();
    let mut sink = CollectingSink::new();
    let result = SortEngine::new(&mut history, &mut sink).run(options);
    (result, history, sink)
}
