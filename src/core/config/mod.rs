//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! modpath has two configuration scopes:
//! - **Global**: User-level settings
//! - **Explicit**: A file passed with `--config`
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Explicit config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$MODPATH_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/modpath/config.toml`
//! 3. `~/.modpath/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use modpath::core::config::Config;
//!
//! let result = Config::load(None).unwrap();
//! let config = result.config;
//!
//! println!("Layers directory: {}", config.layout().layers_dir);
//! println!("JSON output: {}", config.json_output());
//! ```

pub mod schema;

pub use schema::{FileConfig, LayoutSection, OutputSection};

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::layers::LayoutConfig;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Merged configuration from all sources.
///
/// This struct provides accessor methods that apply precedence rules
/// automatically. The explicit config overrides the global config.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: FileConfig,
    /// Explicit configuration (from `--config`)
    pub explicit: Option<FileConfig>,
    /// Path to the global config file (if loaded)
    global_path: Option<PathBuf>,
    /// Path to the explicit config file (if loaded)
    explicit_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `explicit` is provided, that file must exist and overrides the
    /// global config.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed, or if
    /// the explicit file cannot be read. A missing global config file is
    /// not an error (defaults are used).
    pub fn load(explicit: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
        let mut warnings = Vec::new();
        let candidates = Self::global_candidates(&mut warnings);
        let mut result = Self::load_from(&candidates, explicit)?;
        result.warnings = warnings;
        Ok(result)
    }

    /// Load configuration from an explicit list of global candidates.
    ///
    /// The first existing candidate is used.
    pub fn load_from(
        global_candidates: &[PathBuf],
        explicit: Option<&Path>,
    ) -> Result<ConfigLoadResult, ConfigError> {
        let (global, global_path) = match global_candidates.iter().find(|p| p.exists()) {
            Some(path) => (Self::read_config(path)?, Some(path.clone())),
            None => (FileConfig::default(), None),
        };

        let (explicit_config, explicit_path) = match explicit {
            Some(path) => (Some(Self::read_config(path)?), Some(path.to_path_buf())),
            None => (None, None),
        };

        // Validate loaded configs
        global.validate()?;
        if let Some(ref e) = explicit_config {
            e.validate()?;
        }

        if let Some(path) = &global_path {
            tracing::debug!(path = %path.display(), "loaded global config");
        }

        Ok(ConfigLoadResult {
            config: Config {
                global,
                explicit: explicit_config,
                global_path,
                explicit_path,
            },
            warnings: Vec::new(),
        })
    }

    /// Global config locations in search order.
    fn global_candidates(warnings: &mut Vec<ConfigWarning>) -> Vec<PathBuf> {
        let mut candidates = Vec::new();

        // 1. Check $MODPATH_CONFIG
        if let Ok(path) = std::env::var("MODPATH_CONFIG") {
            let path = PathBuf::from(path);
            if !path.exists() {
                warnings.push(ConfigWarning {
                    message: "MODPATH_CONFIG points at a missing file; ignoring it".into(),
                    path: path.clone(),
                });
            }
            candidates.push(path);
        }

        // 2. Check $XDG_CONFIG_HOME/modpath/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            candidates.push(PathBuf::from(xdg_home).join("modpath/config.toml"));
        }

        // 3. Check ~/.modpath/config.toml
        if let Some(home) = dirs::home_dir() {
            candidates.push(home.join(".modpath/config.toml"));
        }

        candidates
    }

    /// Read and parse a config file.
    fn read_config(path: &Path) -> Result<FileConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    fn layout_value(&self, pick: impl Fn(&LayoutSection) -> Option<&String>) -> Option<String> {
        self.explicit
            .as_ref()
            .and_then(|c| c.layout.as_ref())
            .and_then(&pick)
            .or_else(|| self.global.layout.as_ref().and_then(&pick))
            .cloned()
    }

    /// Get the layered module path layout.
    ///
    /// Unset names fall back to [`LayoutConfig::default`].
    pub fn layout(&self) -> LayoutConfig {
        let defaults = LayoutConfig::default();
        LayoutConfig {
            layers_config: self
                .layout_value(|l| l.layers_config.as_ref())
                .unwrap_or(defaults.layers_config),
            layers_dir: self
                .layout_value(|l| l.layers_dir.as_ref())
                .unwrap_or(defaults.layers_dir),
            add_ons_dir: self
                .layout_value(|l| l.add_ons_dir.as_ref())
                .unwrap_or(defaults.add_ons_dir),
            overlays_dir: self
                .layout_value(|l| l.overlays_dir.as_ref())
                .unwrap_or(defaults.overlays_dir),
            overlays_metadata: self
                .layout_value(|l| l.overlays_metadata.as_ref())
                .unwrap_or(defaults.overlays_metadata),
        }
    }

    /// Check if JSON output is enabled by default.
    ///
    /// Defaults to `false` if not configured.
    pub fn json_output(&self) -> bool {
        let pick = |c: &FileConfig| c.output.as_ref().and_then(|o| o.json);
        self.explicit
            .as_ref()
            .and_then(pick)
            .or_else(|| pick(&self.global))
            .unwrap_or(false)
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded explicit config file.
    pub fn explicit_config_loaded_from(&self) -> Option<&Path> {
        self.explicit_path.as_deref()
    }
}
