//! Shared test helpers.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

/// Create a temp dir and write files. Returns (guard, root). Paths are relative to root; parent dirs are created.
pub fn project(files: &[(&str, &[u8])]) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().to_path_buf();
    for (path, content) in files {
        let full = root.join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&full, content).unwrap();
    }
    (dir, root)
}

/// Read a file under root back as bytes.
pub fn read(root: &Path, path: &str) -> Vec<u8> {
    std::fs::read(root.join(path)).unwrap()
}

/// Glob pattern rooted at `root`, using `/` as separator.
pub fn pattern(root: &Path, glob: &str) -> String {
    format!("{}/{}", root.display(), glob)
}
