//! layers::reader
//!
//! Directory-listing capability used by the layered resolver.
//!
//! # Design
//!
//! The `DirectoryReader` trait is the single doorway between the resolver
//! and the filesystem. Resolution only ever asks four questions (does a path
//! exist, is it a directory, what does a file contain, which directories
//! does a directory hold), so synthetic trees can stand in for real ones in
//! tests via [`super::memory::MemoryDirectoryReader`].

use std::fs;
use std::io;
use std::path::Path;

/// Read-only view of a directory tree.
pub trait DirectoryReader: Send + Sync {
    /// Whether anything exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Whether `path` is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Names of the immediate sub-directories of `path`.
    ///
    /// Fails when `path` is not a readable directory.
    fn list_dirs(&self, path: &Path) -> io::Result<Vec<String>>;
}

/// [`DirectoryReader`] backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsDirectoryReader;

impl DirectoryReader for FsDirectoryReader {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn list_dirs(&self, path: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            if !entry.path().is_dir() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => {
                    tracing::warn!(name = ?raw, dir = %path.display(), "skipping non UTF-8 directory name");
                }
            }
        }
        Ok(names)
    }
}
