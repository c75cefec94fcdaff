//! layers::memory
//!
//! In-memory directory tree for deterministic testing.
//!
//! # Example
//!
//! ```
//! use modpath::layers::memory::MemoryDirectoryReader;
//! use modpath::layers::reader::DirectoryReader;
//! use std::path::Path;
//!
//! let tree = MemoryDirectoryReader::new()
//!     .with_dir("/root/layers/base")
//!     .with_file("/root/layers.conf", "layers=base\n");
//!
//! assert!(tree.is_dir(Path::new("/root/layers")));
//! assert_eq!(tree.list_dirs(Path::new("/root/layers")).unwrap(), vec!["base"]);
//! assert_eq!(
//!     tree.read_to_string(Path::new("/root/layers.conf")).unwrap(),
//!     "layers=base\n"
//! );
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

use super::reader::DirectoryReader;

/// A synthetic directory tree.
///
/// Directories are created along with all of their ancestors. Paths marked
/// unreadable still exist but fail to list or read, which is how permission
/// problems are simulated.
#[derive(Debug, Clone, Default)]
pub struct MemoryDirectoryReader {
    dirs: BTreeSet<PathBuf>,
    files: BTreeMap<PathBuf, String>,
    unreadable: BTreeSet<PathBuf>,
}

impl MemoryDirectoryReader {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory and its ancestors.
    pub fn with_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.add_dir(path.as_ref());
        self
    }

    /// Add a file, creating its parent directories.
    pub fn with_file(mut self, path: impl AsRef<Path>, contents: impl Into<String>) -> Self {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.files.insert(path.to_path_buf(), contents.into());
        self
    }

    /// Mark an existing path as unreadable.
    pub fn with_unreadable(mut self, path: impl AsRef<Path>) -> Self {
        self.unreadable.insert(path.as_ref().to_path_buf());
        self
    }

    fn add_dir(&mut self, path: &Path) {
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            self.dirs.insert(ancestor.to_path_buf());
        }
    }

    fn check_readable(&self, path: &Path) -> io::Result<()> {
        if self.unreadable.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("permission denied: {}", path.display()),
            ));
        }
        Ok(())
    }
}

impl DirectoryReader for MemoryDirectoryReader {
    fn exists(&self, path: &Path) -> bool {
        self.dirs.contains(path) || self.files.contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.contains(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.check_readable(path)?;
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such file: {}", path.display()),
            )
        })
    }

    fn list_dirs(&self, path: &Path) -> io::Result<Vec<String>> {
        self.check_readable(path)?;
        if !self.dirs.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such directory: {}", path.display()),
            ));
        }
        Ok(self
            .dirs
            .iter()
            .filter(|dir| dir.parent() == Some(path))
            .filter_map(|dir| dir.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect())
    }
}
