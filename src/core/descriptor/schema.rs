//! core::descriptor::schema
//!
//! Serialized form of module descriptors.
//!
//! # Schema Design
//!
//! - Attribute defaults match the descriptor surface: `export = false`,
//!   `optional = false`, `services = "none"`
//! - Strictly parsed (unknown fields rejected)
//! - Values that need semantic validation (`name`, `services`, rule kinds)
//!   stay raw here and are checked by [`super::ModuleDescriptor`], so the
//!   caller gets a precise error instead of a generic parse failure
//!
//! # Example
//!
//! ```toml
//! [[dependency]]
//! name = "org.acme.lib"
//! export = true
//! services = "import"
//!
//! [[dependency.imports]]
//! exclude = "org/acme/lib/impl/**"
//!
//! [system]
//! paths = ["java/lang", "java/util"]
//! ```

use serde::{Deserialize, Serialize};

/// A whole descriptor file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DescriptorFile {
    /// Module dependencies in declared order.
    #[serde(default, rename = "dependency")]
    pub dependencies: Vec<DependencySpec>,

    /// Optional platform dependency.
    #[serde(default)]
    pub system: Option<SystemSpec>,
}

/// One `[[dependency]]` entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DependencySpec {
    /// Target module name.
    pub name: String,

    #[serde(default)]
    pub export: bool,

    #[serde(default)]
    pub optional: bool,

    /// `none`, `import` or `export`.
    #[serde(default)]
    pub services: Option<String>,

    /// Import rules in declared order.
    #[serde(default)]
    pub imports: Vec<RuleSpec>,

    /// Export rules in declared order.
    #[serde(default)]
    pub exports: Vec<RuleSpec>,
}

/// The `[system]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SystemSpec {
    /// Paths the platform exposes.
    #[serde(default)]
    pub paths: Vec<String>,

    #[serde(default)]
    pub export: bool,

    #[serde(default)]
    pub optional: bool,

    #[serde(default)]
    pub services: Option<String>,

    #[serde(default)]
    pub exports: Vec<RuleSpec>,
}

/// One include/exclude rule. Exactly one field must be set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RuleSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,

    #[serde(
        default,
        rename = "include-set",
        skip_serializing_if = "Option::is_none"
    )]
    pub include_set: Option<Vec<String>>,

    #[serde(
        default,
        rename = "exclude-set",
        skip_serializing_if = "Option::is_none"
    )]
    pub exclude_set: Option<Vec<String>>,
}
