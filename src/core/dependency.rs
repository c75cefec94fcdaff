//! core::dependency
//!
//! Derivation of import and export filters for dependency edges.
//!
//! # Overview
//!
//! A module declares each dependency with an `export` flag, a services mode
//! and optional explicit include/exclude rules. [`DependencyFilterResolver`]
//! turns one such [`DependencyDeclaration`] into an immutable
//! [`DependencyEdge`] carrying:
//!
//! - the **import filter**: which of the target's paths the dependent sees
//! - the **export filter**: which of those paths the dependent re-exports
//!
//! # Rule Order
//!
//! Both filters are first-match-wins rule lists. Explicit rules keep their
//! declared order and are never sorted. The `META-INF` exclusions always come
//! last, so any earlier rule (explicit or services) decides first.
//!
//! # Example
//!
//! ```
//! use modpath::core::dependency::{DependencyDeclaration, DependencyFilterResolver, PathRule};
//! use modpath::core::types::{ModuleRef, ServicesMode};
//!
//! let decl = DependencyDeclaration::new(ModuleRef::new("org.acme").unwrap())
//!     .with_export(true)
//!     .with_services(ServicesMode::Export)
//!     .with_import_rule(PathRule::parse("org/acme/internal/"), false);
//!
//! let edge = DependencyFilterResolver::resolve(&decl);
//! assert!(edge.import_filter.accept("org/acme/api"));
//! assert!(!edge.import_filter.accept("org/acme/internal/impl"));
//! assert!(edge.export_filter.accept("META-INF/services/org.acme.Spi"));
//! assert!(!edge.export_filter.accept("META-INF/MANIFEST.MF"));
//! ```

use std::collections::BTreeSet;
use std::fmt;

use crate::core::filter::{self, MultiPathFilterBuilder, PathFilter};
use crate::core::glob::Glob;
use crate::core::types::{ModuleRef, ServicesMode};

/// One explicit path rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathRule {
    /// Exactly this path.
    Exact(String),
    /// Strict descendants of this path (written with a trailing `/`).
    Children(String),
    /// A glob pattern (written with `*` or `?`).
    Glob(Glob),
    /// Any member of a finite set of literal paths.
    Set(BTreeSet<String>),
}

impl PathRule {
    /// Classify a single-path rule from its text.
    ///
    /// Text containing `*` or `?` is a glob, whatever it ends with. Otherwise
    /// a trailing `/` selects descendants and anything else is exact.
    ///
    /// # Example
    ///
    /// ```
    /// use modpath::core::dependency::PathRule;
    ///
    /// assert!(matches!(PathRule::parse("a/b"), PathRule::Exact(_)));
    /// assert!(matches!(PathRule::parse("a/b/"), PathRule::Children(_)));
    /// assert!(matches!(PathRule::parse("a/*/"), PathRule::Glob(_)));
    /// ```
    pub fn parse(text: &str) -> Self {
        if text.contains(['*', '?']) {
            PathRule::Glob(Glob::compile(text))
        } else if let Some(parent) = text.strip_suffix('/') {
            PathRule::Children(parent.to_string())
        } else {
            PathRule::Exact(text.to_string())
        }
    }

    /// Build a set rule.
    pub fn set<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PathRule::Set(paths.into_iter().map(Into::into).collect())
    }

    /// The filter that decides whether this rule applies to a path.
    pub fn to_filter(&self) -> PathFilter {
        match self {
            PathRule::Exact(path) => filter::is(path.as_str()),
            PathRule::Children(path) => filter::is_child_of(path.as_str()),
            PathRule::Glob(glob) => filter::compiled_glob(glob.clone()),
            PathRule::Set(paths) => filter::in_set(paths.iter().cloned()),
        }
    }
}

impl fmt::Display for PathRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathRule::Exact(path) => write!(f, "{path}"),
            PathRule::Children(path) => write!(f, "{path}/"),
            PathRule::Glob(glob) => write!(f, "{glob}"),
            PathRule::Set(paths) => {
                let joined: Vec<&str> = paths.iter().map(String::as_str).collect();
                write!(f, "{{{}}}", joined.join(", "))
            }
        }
    }
}

/// A dependency as declared by a module descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyDeclaration {
    /// The module depended upon.
    pub target: ModuleRef,
    /// Whether the dependent re-exports what it imports.
    pub export: bool,
    /// Whether a missing target is tolerated.
    pub optional: bool,
    /// Services visibility.
    pub services: ServicesMode,
    /// Explicit import rules, `(rule, include)` in declared order.
    pub import_rules: Vec<(PathRule, bool)>,
    /// Explicit export rules, `(rule, include)` in declared order.
    pub export_rules: Vec<(PathRule, bool)>,
}

impl DependencyDeclaration {
    /// A non-exported, non-optional dependency with no explicit rules.
    pub fn new(target: ModuleRef) -> Self {
        Self {
            target,
            export: false,
            optional: false,
            services: ServicesMode::None,
            import_rules: Vec::new(),
            export_rules: Vec::new(),
        }
    }

    pub fn with_export(mut self, export: bool) -> Self {
        self.export = export;
        self
    }

    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    pub fn with_services(mut self, services: ServicesMode) -> Self {
        self.services = services;
        self
    }

    /// Append an import rule after the existing ones.
    pub fn with_import_rule(mut self, rule: PathRule, include: bool) -> Self {
        self.import_rules.push((rule, include));
        self
    }

    /// Append an export rule after the existing ones.
    pub fn with_export_rule(mut self, rule: PathRule, include: bool) -> Self {
        self.export_rules.push((rule, include));
        self
    }
}

/// A platform dependency.
///
/// The platform exposes a fixed set of paths instead of a derived import
/// filter; its export filter follows the same algorithm as module
/// dependencies.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SystemDependencyDeclaration {
    /// Paths the platform makes visible.
    pub paths: BTreeSet<String>,
    pub export: bool,
    pub optional: bool,
    pub services: ServicesMode,
    /// Explicit export rules in declared order.
    pub export_rules: Vec<(PathRule, bool)>,
}

/// A resolved dependency edge, ready for wiring.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DependencyEdge {
    pub target: ModuleRef,
    pub import_filter: PathFilter,
    pub export_filter: PathFilter,
    pub services: ServicesMode,
    pub optional: bool,
}

/// A resolved platform dependency edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemDependencyEdge {
    /// The only paths importable from the platform.
    pub import_paths: BTreeSet<String>,
    pub export_filter: PathFilter,
    pub services: ServicesMode,
    pub optional: bool,
}

impl SystemDependencyEdge {
    /// Whether the platform makes `path` visible to the dependent.
    pub fn can_import(&self, path: &str) -> bool {
        self.import_paths.contains(path)
    }
}

/// Derives the filters of dependency edges.
pub struct DependencyFilterResolver;

impl DependencyFilterResolver {
    /// Resolve one module dependency into an edge.
    pub fn resolve(decl: &DependencyDeclaration) -> DependencyEdge {
        let import_filter = Self::import_filter(decl.services, &decl.import_rules);
        let export_filter = Self::export_filter(decl.export, decl.services, &decl.export_rules);

        tracing::debug!(
            target_module = %decl.target,
            import = %import_filter,
            export = %export_filter,
            "resolved dependency filters"
        );

        DependencyEdge {
            target: decl.target.clone(),
            import_filter,
            export_filter,
            services: decl.services,
            optional: decl.optional,
        }
    }

    /// Resolve a platform dependency into an edge.
    pub fn resolve_system(decl: &SystemDependencyDeclaration) -> SystemDependencyEdge {
        let export_filter = Self::export_filter(decl.export, decl.services, &decl.export_rules);

        tracing::debug!(
            paths = decl.paths.len(),
            export = %export_filter,
            "resolved system dependency filters"
        );

        SystemDependencyEdge {
            import_paths: decl.paths.clone(),
            export_filter,
            services: decl.services,
            optional: decl.optional,
        }
    }

    fn import_filter(services: ServicesMode, rules: &[(PathRule, bool)]) -> PathFilter {
        if rules.is_empty() {
            return match services {
                ServicesMode::None => filter::default_import_filter(),
                ServicesMode::Import | ServicesMode::Export => {
                    filter::default_import_filter_with_services()
                }
            };
        }

        let mut builder = MultiPathFilterBuilder::new(true);
        if services != ServicesMode::None {
            builder.add_filter(filter::meta_inf_services(), true);
        }
        for (rule, include) in rules {
            builder.add_filter(rule.to_filter(), *include);
        }
        builder
            .add_filter(filter::meta_inf_children(), false)
            .add_filter(filter::meta_inf(), false);
        builder.create()
    }

    fn export_filter(
        export: bool,
        services: ServicesMode,
        rules: &[(PathRule, bool)],
    ) -> PathFilter {
        let mut builder = MultiPathFilterBuilder::new(export);
        for (rule, include) in rules {
            builder.add_filter(rule.to_filter(), *include);
        }
        if services == ServicesMode::Export {
            builder.add_filter(filter::meta_inf_services(), true);
        }
        if export {
            builder
                .add_filter(filter::meta_inf_children(), false)
                .add_filter(filter::meta_inf(), false);
        }
        builder.create()
    }
}
