//! layers
//!
//! Layered module path resolution.
//!
//! # Layout
//!
//! A module root may be *layered*. With the default [`LayoutConfig`]:
//!
//! ```text
//! <root>/
//!   layers.conf                 # optional: layers=top,middle,base
//!   layers/
//!     <layer>/
//!       .overlays/
//!         .overlays             # overlay names, one per line, preferred first
//!         <overlay>/
//!   add-ons/
//!     <add-on>/
//!       .overlays/...
//! ```
//!
//! # Search Order
//!
//! Each root linearizes into:
//!
//! 1. the root itself (unlayered content always wins)
//! 2. every layer in configured order, each preceded by its overlays
//! 3. every add-on, each preceded by its overlays
//!
//! Add-ons are only honored when the layers directory exists. The add-on
//! order is not part of the contract; it is currently by name.
//!
//! # Failure
//!
//! Resolution is all-or-nothing: a layer named in `layers.conf` without a
//! directory, or an overlay structure that cannot be read, fails the whole
//! call with a [`LayerError`]. A root with no layering structure at all is
//! not an error.
//!
//! # Example
//!
//! ```
//! use modpath::layers::{LayeredPathResolver, LayoutConfig};
//! use modpath::layers::memory::MemoryDirectoryReader;
//! use std::path::PathBuf;
//!
//! let tree = MemoryDirectoryReader::new()
//!     .with_file("/mods/layers.conf", "layers=top,base\n")
//!     .with_dir("/mods/layers/top")
//!     .with_dir("/mods/layers/base");
//! let resolver = LayeredPathResolver::new(tree, LayoutConfig::default());
//!
//! let path = resolver
//!     .resolve_layered_module_path(&[PathBuf::from("/mods")])
//!     .unwrap();
//! assert_eq!(
//!     path,
//!     vec![
//!         PathBuf::from("/mods"),
//!         PathBuf::from("/mods/layers/top"),
//!         PathBuf::from("/mods/layers/base"),
//!     ]
//! );
//! ```

pub mod memory;
pub mod reader;

use std::collections::HashSet;
use std::io;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use reader::{DirectoryReader, FsDirectoryReader};

/// Name of the layer that sorts last when layers are discovered.
const BASE_LAYER: &str = "base";

/// Errors from layered path resolution.
///
/// Every variant is fatal: the module path could not be established.
#[derive(Debug, Error)]
pub enum LayerError {
    #[error("failed to read layers configuration '{path}': {source}")]
    UnreadableLayersConfig { path: PathBuf, source: io::Error },

    #[error("failed to list layers directory '{path}': {source}")]
    UnreadableLayersDir { path: PathBuf, source: io::Error },

    #[error("layer name '{name}' in '{root}' is not a plain directory name")]
    InvalidLayerName { root: PathBuf, name: String },

    #[error("layer '{name}' is configured in '{root}' but '{path}' is not a directory")]
    MissingLayer {
        root: PathBuf,
        name: String,
        path: PathBuf,
    },

    #[error("overlays directory '{path}' is not readable: {reason}")]
    UnreadableOverlaysDir { path: PathBuf, reason: String },

    #[error("failed to read overlays metadata '{path}': {source}")]
    UnreadableOverlaysMetadata { path: PathBuf, source: io::Error },

    #[error("overlay name '{name}' in '{path}' is not a plain directory name")]
    InvalidOverlayName { path: PathBuf, name: String },

    #[error("overlay root '{path}' does not exist")]
    MissingOverlay { path: PathBuf },

    #[error("overlay root '{path}' is not readable: {reason}")]
    UnreadableOverlay { path: PathBuf, reason: String },

    #[error("failed to list add-ons directory '{path}': {source}")]
    UnreadableAddOnsDir { path: PathBuf, source: io::Error },
}

/// File and directory names of the layered layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Layer order file at the root.
    pub layers_config: String,
    /// Directory holding the layers, relative to the root.
    pub layers_dir: String,
    /// Directory holding the add-ons, relative to the root.
    pub add_ons_dir: String,
    /// Overlays directory inside a layer or add-on.
    pub overlays_dir: String,
    /// Overlay list file inside the overlays directory.
    pub overlays_metadata: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            layers_config: "layers.conf".into(),
            layers_dir: "layers".into(),
            add_ons_dir: "add-ons".into(),
            overlays_dir: ".overlays".into(),
            overlays_metadata: ".overlays".into(),
        }
    }
}

/// A layer or add-on directory together with its overlays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRoot {
    pub name: String,
    pub dir: PathBuf,
    /// Overlay directories, most preferred first.
    pub overlays: Vec<PathBuf>,
}

/// The discovered structure of one module root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayeredRoot {
    pub base: PathBuf,
    /// Layers, highest precedence first.
    pub layers: Vec<ContentRoot>,
    pub add_ons: Vec<ContentRoot>,
}

impl LayeredRoot {
    /// Linearize into search order.
    pub fn search_path(&self) -> Vec<PathBuf> {
        let mut path = vec![self.base.clone()];
        for content in self.layers.iter().chain(&self.add_ons) {
            path.extend(content.overlays.iter().cloned());
            path.push(content.dir.clone());
        }
        path
    }
}

/// Resolves layered module roots into one ordered search path.
#[derive(Debug, Clone)]
pub struct LayeredPathResolver<R> {
    reader: R,
    layout: LayoutConfig,
}

impl LayeredPathResolver<FsDirectoryReader> {
    /// A resolver over the real filesystem.
    pub fn filesystem(layout: LayoutConfig) -> Self {
        Self::new(FsDirectoryReader, layout)
    }
}

impl<R: DirectoryReader> LayeredPathResolver<R> {
    pub fn new(reader: R, layout: LayoutConfig) -> Self {
        Self { reader, layout }
    }

    /// The layout this resolver looks for.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Resolve every root, in order, into one search path.
    ///
    /// # Errors
    ///
    /// Returns the first [`LayerError`] hit by any root; no partial path is
    /// returned.
    pub fn resolve_layered_module_path(
        &self,
        roots: &[PathBuf],
    ) -> Result<Vec<PathBuf>, LayerError> {
        let mut path = Vec::new();
        for root in roots {
            path.extend(self.discover(root)?.search_path());
        }
        tracing::debug!(roots = roots.len(), entries = path.len(), "resolved module path");
        Ok(path)
    }

    /// Discover the layered structure of a single root.
    pub fn discover(&self, root: &Path) -> Result<LayeredRoot, LayerError> {
        let layers_dir = root.join(&self.layout.layers_dir);
        let has_layers_dir = self.reader.is_dir(&layers_dir);

        let names = match self.configured_layers(root)? {
            Some(names) => names,
            None if has_layers_dir => self.discovered_layers(&layers_dir)?,
            None => {
                tracing::debug!(root = %root.display(), "root is not layered");
                return Ok(LayeredRoot {
                    base: root.to_path_buf(),
                    layers: Vec::new(),
                    add_ons: Vec::new(),
                });
            }
        };

        let mut layers = Vec::with_capacity(names.len());
        for name in dedup_layers(root, names) {
            if !is_child_name(&name) {
                return Err(LayerError::InvalidLayerName {
                    root: root.to_path_buf(),
                    name,
                });
            }
            let dir = layers_dir.join(&name);
            if !self.reader.is_dir(&dir) {
                return Err(LayerError::MissingLayer {
                    root: root.to_path_buf(),
                    name,
                    path: dir,
                });
            }
            let overlays = self.overlays(&dir)?;
            tracing::debug!(layer = %name, overlays = overlays.len(), "found layer");
            layers.push(ContentRoot {
                name,
                dir,
                overlays,
            });
        }

        let add_ons = if has_layers_dir {
            self.add_ons(root)?
        } else {
            Vec::new()
        };

        Ok(LayeredRoot {
            base: root.to_path_buf(),
            layers,
            add_ons,
        })
    }

    /// Layer names from the layers configuration file, if it names any.
    fn configured_layers(&self, root: &Path) -> Result<Option<Vec<String>>, LayerError> {
        let config = root.join(&self.layout.layers_config);
        if !self.reader.exists(&config) {
            return Ok(None);
        }
        let contents = self
            .reader
            .read_to_string(&config)
            .map_err(|source| LayerError::UnreadableLayersConfig {
                path: config.clone(),
                source,
            })?;
        let names = parse_layers_config(&contents);
        if names.is_none() {
            tracing::debug!(config = %config.display(), "no layers key, discovering layers");
        }
        Ok(names)
    }

    /// Layer directories by name, with `base` last.
    fn discovered_layers(&self, layers_dir: &Path) -> Result<Vec<String>, LayerError> {
        let mut names = self.reader.list_dirs(layers_dir).map_err(|source| {
            LayerError::UnreadableLayersDir {
                path: layers_dir.to_path_buf(),
                source,
            }
        })?;
        names.sort_by_key(|name| (name.as_str() == BASE_LAYER, name.clone()));
        Ok(names)
    }

    fn add_ons(&self, root: &Path) -> Result<Vec<ContentRoot>, LayerError> {
        let add_ons_dir = root.join(&self.layout.add_ons_dir);
        if !self.reader.is_dir(&add_ons_dir) {
            return Ok(Vec::new());
        }
        let mut names = self.reader.list_dirs(&add_ons_dir).map_err(|source| {
            LayerError::UnreadableAddOnsDir {
                path: add_ons_dir.clone(),
                source,
            }
        })?;
        names.sort();

        names
            .into_iter()
            .map(|name| {
                let dir = add_ons_dir.join(&name);
                let overlays = self.overlays(&dir)?;
                tracing::debug!(add_on = %name, overlays = overlays.len(), "found add-on");
                Ok(ContentRoot {
                    name,
                    dir,
                    overlays,
                })
            })
            .collect()
    }

    /// Overlay directories registered for a layer or add-on.
    fn overlays(&self, owner: &Path) -> Result<Vec<PathBuf>, LayerError> {
        let overlays_dir = owner.join(&self.layout.overlays_dir);
        if !self.reader.exists(&overlays_dir) {
            return Ok(Vec::new());
        }
        self.ensure_readable_dir(&overlays_dir)
            .map_err(|reason| LayerError::UnreadableOverlaysDir {
                path: overlays_dir.clone(),
                reason,
            })?;

        let metadata = overlays_dir.join(&self.layout.overlays_metadata);
        if !self.reader.exists(&metadata) {
            return Ok(Vec::new());
        }
        let contents = self.reader.read_to_string(&metadata).map_err(|source| {
            LayerError::UnreadableOverlaysMetadata {
                path: metadata.clone(),
                source,
            }
        })?;

        let mut overlays = Vec::new();
        for name in parse_overlay_list(&contents) {
            if !is_child_name(name) {
                return Err(LayerError::InvalidOverlayName {
                    path: metadata,
                    name: name.to_string(),
                });
            }
            let dir = overlays_dir.join(name);
            if !self.reader.exists(&dir) {
                return Err(LayerError::MissingOverlay { path: dir });
            }
            self.ensure_readable_dir(&dir)
                .map_err(|reason| LayerError::UnreadableOverlay {
                    path: dir.clone(),
                    reason,
                })?;
            overlays.push(dir);
        }
        Ok(overlays)
    }

    fn ensure_readable_dir(&self, path: &Path) -> Result<(), String> {
        if !self.reader.is_dir(path) {
            return Err("not a directory".into());
        }
        self.reader
            .list_dirs(path)
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}

/// Resolve roots against the real filesystem with the default layout.
pub fn resolve_layered_module_path(roots: &[PathBuf]) -> Result<Vec<PathBuf>, LayerError> {
    LayeredPathResolver::filesystem(LayoutConfig::default()).resolve_layered_module_path(roots)
}

/// Extract the `layers` list from a properties-style configuration.
///
/// Returns `None` when the file has no `layers` key. Blank lines and lines
/// starting with `#` or `!` are ignored; `=` or `:` separate key and value.
///
/// # Example
///
/// ```
/// use modpath::layers::parse_layers_config;
///
/// let names = parse_layers_config("# order\nlayers = top, , base\n");
/// assert_eq!(names, Some(vec!["top".to_string(), "base".to_string()]));
/// assert_eq!(parse_layers_config("other=1"), None);
/// ```
pub fn parse_layers_config(contents: &str) -> Option<Vec<String>> {
    let mut layers = None;
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }
        let Some((key, value)) = line.split_once(['=', ':']) else {
            continue;
        };
        if key.trim() == "layers" {
            layers = Some(
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(String::from)
                    .collect(),
            );
        }
    }
    layers
}

/// Overlay names from an overlays metadata file, in order.
fn parse_overlay_list(contents: &str) -> impl Iterator<Item = &str> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

/// A single normal path component, so joining it stays inside the parent.
fn is_child_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Keep the first occurrence of each layer name.
fn dedup_layers(root: &Path, names: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .into_iter()
        .filter(|name| {
            let first = seen.insert(name.clone());
            if !first {
                tracing::warn!(
                    root = %root.display(),
                    layer = %name,
                    "layer listed more than once, keeping first position"
                );
            }
            first
        })
        .collect()
}
