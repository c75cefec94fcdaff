//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Example
//!
//! ```toml
//! [layout]
//! layers_config = "layers.conf"
//! layers_dir = "system/layers"
//! add_ons_dir = "system/add-ons"
//! overlays_dir = ".overlays"
//! overlays_metadata = ".overlays"
//!
//! [output]
//! json = false
//! ```
//!
//! # Validation
//!
//! Layout names are joined onto module roots, so they must be non-empty
//! relative paths that never climb out of the root with `..`.

use std::path::{Component, Path};

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// One configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Layered module path layout overrides
    pub layout: Option<LayoutSection>,

    /// Output defaults
    pub output: Option<OutputSection>,
}

impl FileConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(layout) = &self.layout {
            layout.validate()?;
        }
        Ok(())
    }
}

/// The `[layout]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutSection {
    pub layers_config: Option<String>,
    pub layers_dir: Option<String>,
    pub add_ons_dir: Option<String>,
    pub overlays_dir: Option<String>,
    pub overlays_metadata: Option<String>,
}

impl LayoutSection {
    fn validate(&self) -> Result<(), ConfigError> {
        let entries = [
            ("layers_config", &self.layers_config),
            ("layers_dir", &self.layers_dir),
            ("add_ons_dir", &self.add_ons_dir),
            ("overlays_dir", &self.overlays_dir),
            ("overlays_metadata", &self.overlays_metadata),
        ];
        for (key, value) in entries {
            if let Some(value) = value {
                validate_relative(key, value)?;
            }
        }
        Ok(())
    }
}

/// The `[output]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSection {
    /// Emit JSON instead of plain text
    pub json: Option<bool>,
}

fn validate_relative(key: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::InvalidValue(format!(
            "layout.{key} cannot be empty"
        )));
    }
    let path = Path::new(value);
    if path.is_absolute() || path.has_root() {
        return Err(ConfigError::InvalidValue(format!(
            "layout.{key} must be relative, got '{value}'"
        )));
    }
    if path.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(ConfigError::InvalidValue(format!(
            "layout.{key} cannot contain '..', got '{value}'"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(layers_dir: &str) -> FileConfig {
        FileConfig {
            layout: Some(LayoutSection {
                layers_dir: Some(layers_dir.to_string()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn nested_relative_names_allowed() {
        assert!(layout("system/layers").validate().is_ok());
    }

    #[test]
    fn empty_name_rejected() {
        assert!(layout("  ").validate().is_err());
    }

    #[test]
    fn absolute_name_rejected() {
        assert!(layout("/opt/layers").validate().is_err());
    }

    #[test]
    fn parent_dir_rejected() {
        assert!(layout("../layers").validate().is_err());
        assert!(layout("a/../../b").validate().is_err());
    }

    #[test]
    fn parse_full_file() {
        let parsed: FileConfig = toml::from_str(
            r#"
            [layout]
            layers_dir = "system/layers"
            add_ons_dir = "system/add-ons"

            [output]
            json = true
            "#,
        )
        .unwrap();
        assert_eq!(
            parsed.layout.unwrap().add_ons_dir.as_deref(),
            Some("system/add-ons")
        );
        assert_eq!(parsed.output.unwrap().json, Some(true));
    }
}
