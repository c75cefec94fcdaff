//! core::descriptor
//!
//! Module descriptor loading and validation.
//!
//! # Overview
//!
//! A descriptor lists the dependencies of one module. Loading turns the
//! serialized [`schema`] into validated [`DependencyDeclaration`]s; every
//! structural problem (unknown `services` value, a rule naming no path or
//! several kinds at once, a malformed target name) is reported here, before
//! any filter is derived.
//!
//! # Example
//!
//! ```
//! use modpath::core::descriptor::ModuleDescriptor;
//!
//! let descriptor = ModuleDescriptor::parse(r#"
//!     [[dependency]]
//!     name = "org.acme.lib"
//!     export = true
//!
//!     [[dependency.imports]]
//!     exclude = "org/acme/lib/impl/"
//! "#).unwrap();
//!
//! let resolved = descriptor.resolve_all();
//! let edge = &resolved.edges[0];
//! assert!(edge.import_filter.accept("org/acme/lib/api"));
//! assert!(!edge.import_filter.accept("org/acme/lib/impl/Gear"));
//! ```

pub mod schema;

pub use schema::{DependencySpec, DescriptorFile, RuleSpec, SystemSpec};

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::dependency::{
    DependencyDeclaration, DependencyEdge, DependencyFilterResolver, PathRule,
    SystemDependencyDeclaration, SystemDependencyEdge,
};
use crate::core::types::{ModuleRef, ServicesMode, TypeError};

/// Errors from descriptor loading.
#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("failed to read descriptor '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse descriptor: {0}")]
    ParseError(String),

    #[error("dependency #{index}: {source}")]
    InvalidTarget { index: usize, source: TypeError },

    #[error("dependency '{dependency}': {source}")]
    InvalidServices {
        dependency: String,
        source: TypeError,
    },

    #[error("dependency '{dependency}', rule #{index}: {message}")]
    InvalidRule {
        dependency: String,
        index: usize,
        message: String,
    },
}

/// A validated module descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModuleDescriptor {
    /// Module dependencies in declared order.
    pub dependencies: Vec<DependencyDeclaration>,
    /// The platform dependency, if declared.
    pub system: Option<SystemDependencyDeclaration>,
}

/// Every edge of a descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModule {
    pub edges: Vec<DependencyEdge>,
    pub system: Option<SystemDependencyEdge>,
}

impl ModuleDescriptor {
    /// Read and validate a descriptor file.
    pub fn load(path: &Path) -> Result<Self, DescriptorError> {
        let contents = fs::read_to_string(path).map_err(|e| DescriptorError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&contents)
    }

    /// Parse and validate descriptor text.
    pub fn parse(contents: &str) -> Result<Self, DescriptorError> {
        let file: DescriptorFile =
            toml::from_str(contents).map_err(|e| DescriptorError::ParseError(e.to_string()))?;
        Self::from_file(file)
    }

    /// Validate an already deserialized descriptor.
    pub fn from_file(file: DescriptorFile) -> Result<Self, DescriptorError> {
        let dependencies = file
            .dependencies
            .into_iter()
            .enumerate()
            .map(|(index, spec)| Self::dependency(index, spec))
            .collect::<Result<Vec<_>, _>>()?;

        let system = file.system.map(Self::system).transpose()?;

        Ok(Self {
            dependencies,
            system,
        })
    }

    /// Derive the edges of every declared dependency.
    pub fn resolve_all(&self) -> ResolvedModule {
        ResolvedModule {
            edges: self
                .dependencies
                .iter()
                .map(DependencyFilterResolver::resolve)
                .collect(),
            system: self
                .system
                .as_ref()
                .map(DependencyFilterResolver::resolve_system),
        }
    }

    fn dependency(
        index: usize,
        spec: DependencySpec,
    ) -> Result<DependencyDeclaration, DescriptorError> {
        let target = ModuleRef::new(spec.name.as_str())
            .map_err(|source| DescriptorError::InvalidTarget { index, source })?;
        let services = parse_services(&spec.name, spec.services.as_deref())?;

        Ok(DependencyDeclaration {
            import_rules: parse_rules(&spec.name, &spec.imports)?,
            export_rules: parse_rules(&spec.name, &spec.exports)?,
            target,
            export: spec.export,
            optional: spec.optional,
            services,
        })
    }

    fn system(spec: SystemSpec) -> Result<SystemDependencyDeclaration, DescriptorError> {
        const NAME: &str = "system";
        Ok(SystemDependencyDeclaration {
            services: parse_services(NAME, spec.services.as_deref())?,
            export_rules: parse_rules(NAME, &spec.exports)?,
            paths: spec.paths.into_iter().collect(),
            export: spec.export,
            optional: spec.optional,
        })
    }
}

fn parse_services(
    dependency: &str,
    value: Option<&str>,
) -> Result<ServicesMode, DescriptorError> {
    match value {
        None => Ok(ServicesMode::None),
        Some(raw) => raw.parse().map_err(|source| DescriptorError::InvalidServices {
            dependency: dependency.to_string(),
            source,
        }),
    }
}

fn parse_rules(
    dependency: &str,
    specs: &[RuleSpec],
) -> Result<Vec<(PathRule, bool)>, DescriptorError> {
    specs
        .iter()
        .enumerate()
        .map(|(index, spec)| {
            parse_rule(spec).map_err(|message| DescriptorError::InvalidRule {
                dependency: dependency.to_string(),
                index,
                message,
            })
        })
        .collect()
}

fn parse_rule(spec: &RuleSpec) -> Result<(PathRule, bool), String> {
    match (
        &spec.include,
        &spec.exclude,
        &spec.include_set,
        &spec.exclude_set,
    ) {
        (Some(path), None, None, None) => Ok((PathRule::parse(path), true)),
        (None, Some(path), None, None) => Ok((PathRule::parse(path), false)),
        (None, None, Some(paths), None) => Ok((PathRule::set(paths.iter().cloned()), true)),
        (None, None, None, Some(paths)) => Ok((PathRule::set(paths.iter().cloned()), false)),
        (None, None, None, None) => {
            Err("rule must name one of include, exclude, include-set, exclude-set".into())
        }
        _ => Err("rule names more than one of include, exclude, include-set, exclude-set".into()),
    }
}
