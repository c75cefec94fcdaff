//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`ModuleRef`] - Validated reference to a dependency target
//! - [`ServicesMode`] - How `META-INF/services` crosses a dependency edge
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, preventing entire classes of bugs.
//!
//! # Examples
//!
//! ```
//! use modpath::core::types::{ModuleRef, ServicesMode};
//!
//! let target = ModuleRef::new("org.acme.widgets").unwrap();
//! let mode: ServicesMode = "import".parse().unwrap();
//!
//! assert_eq!(target.as_str(), "org.acme.widgets");
//! assert_eq!(mode, ServicesMode::Import);
//!
//! assert!(ModuleRef::new("has space").is_err());
//! assert!("both".parse::<ServicesMode>().is_err());
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid module reference: {0}")]
    InvalidModuleRef(String),

    #[error("invalid services mode '{0}', must be one of: none, import, export")]
    InvalidServicesMode(String),
}

/// A validated reference to the module a dependency points at.
///
/// Module references are opaque names such as `org.acme.widgets` or
/// `org.acme.widgets:main`:
/// - Cannot be empty
/// - Cannot contain whitespace or ASCII control characters
/// - Cannot start or end with `:`
///
/// # Example
///
/// ```
/// use modpath::core::types::ModuleRef;
///
/// let plain = ModuleRef::new("org.acme").unwrap();
/// assert_eq!(plain.to_string(), "org.acme");
///
/// let slotted = ModuleRef::new("org.acme:2").unwrap();
/// assert_eq!(slotted.as_str(), "org.acme:2");
///
/// assert!(ModuleRef::new("").is_err());
/// assert!(ModuleRef::new(":main").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModuleRef(String);

impl ModuleRef {
    /// Create a new validated module reference.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidModuleRef` if the name is malformed.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self(name))
    }

    fn validate(name: &str) -> Result<(), TypeError> {
        if name.is_empty() {
            return Err(TypeError::InvalidModuleRef(
                "module reference cannot be empty".into(),
            ));
        }

        if name.chars().any(|c| c.is_whitespace() || c.is_ascii_control()) {
            return Err(TypeError::InvalidModuleRef(format!(
                "module reference '{}' cannot contain whitespace or control characters",
                name.escape_default()
            )));
        }

        if name.starts_with(':') || name.ends_with(':') {
            return Err(TypeError::InvalidModuleRef(format!(
                "module reference '{name}' cannot start or end with ':'"
            )));
        }

        Ok(())
    }

    /// Get the reference as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ModuleRef {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ModuleRef> for String {
    fn from(name: ModuleRef) -> Self {
        name.0
    }
}

impl AsRef<str> for ModuleRef {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ModuleRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How service descriptors under `META-INF/services` cross an edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ServicesMode {
    /// Service descriptors stay hidden.
    #[default]
    None,
    /// The dependent sees the target's service descriptors.
    Import,
    /// Service descriptors are also re-exported to the dependent's dependents.
    Export,
}

impl ServicesMode {
    /// The descriptor spelling of this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            ServicesMode::None => "none",
            ServicesMode::Import => "import",
            ServicesMode::Export => "export",
        }
    }
}

impl FromStr for ServicesMode {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(ServicesMode::None),
            "import" => Ok(ServicesMode::Import),
            "export" => Ok(ServicesMode::Export),
            other => Err(TypeError::InvalidServicesMode(other.to_string())),
        }
    }
}

impl TryFrom<String> for ServicesMode {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ServicesMode> for String {
    fn from(mode: ServicesMode) -> Self {
        mode.as_str().to_string()
    }
}

impl std::fmt::Display for ServicesMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
