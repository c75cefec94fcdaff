//! core::filter
//!
//! Boolean predicates over `/`-delimited paths.
//!
//! # Model
//!
//! A [`PathFilter`] is a cheap, clonable handle to an immutable
//! [`FilterKind`]. Filters compare and hash *structurally*: two filters built
//! from the same configuration are equal, so they can be deduplicated or used
//! as cache keys by the layers that build symbol indices from them.
//!
//! # Combinators
//!
//! - [`accept_all`] / [`reject_all`] - constants
//! - [`is`] - exact path
//! - [`is_child_of`] - strict descendants of a path
//! - [`is_or_is_child_of`] - a path and its descendants
//! - [`in_set`] - membership in a fixed set
//! - [`glob`] - restricted glob, see [`crate::core::glob`]
//! - [`not`], [`any`], [`all`], [`none`] - boolean algebra
//! - [`MultiPathFilterBuilder`] - ordered first-match-wins rule lists
//!
//! # Example
//!
//! ```
//! use modpath::core::filter::{self, MultiPathFilterBuilder};
//!
//! let mut builder = MultiPathFilterBuilder::new(true);
//! builder.add_filter(filter::glob("com/acme/impl/**"), false);
//! let visible = builder.create();
//!
//! assert!(visible.accept("com/acme/api"));
//! assert!(!visible.accept("com/acme/impl/Widget.class"));
//! ```

mod multi;

pub use multi::MultiPathFilterBuilder;

use std::collections::BTreeSet;
use std::fmt;
use std::sync::{Arc, LazyLock};

use crate::core::glob::Glob;

/// How an aggregate combines its members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateMode {
    /// Accept when any member accepts.
    Any,
    /// Accept when every member accepts.
    All,
}

impl AggregateMode {
    /// The member result that decides the aggregate immediately.
    fn dominant(self) -> bool {
        match self {
            AggregateMode::Any => true,
            AggregateMode::All => false,
        }
    }

    fn name(self) -> &'static str {
        match self {
            AggregateMode::Any => "any",
            AggregateMode::All => "all",
        }
    }
}

/// The shape of a filter.
#[derive(Debug, PartialEq, Eq, Hash)]
pub enum FilterKind {
    AcceptAll,
    RejectAll,
    /// Exact path equality.
    Equals(String),
    /// Strict descendants; the prefix always ends with `/`.
    ChildOf(String),
    InSet(BTreeSet<String>),
    Glob(Glob),
    Invert(PathFilter),
    Aggregate {
        mode: AggregateMode,
        filters: Vec<PathFilter>,
    },
    /// First matching rule decides; insertion order is significant.
    Multi {
        rules: Vec<(PathFilter, bool)>,
        default: bool,
    },
}

/// An immutable predicate over paths.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PathFilter(Arc<FilterKind>);

impl PathFilter {
    fn new(kind: FilterKind) -> Self {
        Self(Arc::new(kind))
    }

    /// Evaluate the filter against a path.
    pub fn accept(&self, path: &str) -> bool {
        match &*self.0 {
            FilterKind::AcceptAll => true,
            FilterKind::RejectAll => false,
            FilterKind::Equals(expected) => path == expected,
            FilterKind::ChildOf(prefix) => path.len() > prefix.len() && path.starts_with(prefix),
            FilterKind::InSet(paths) => paths.contains(path),
            FilterKind::Glob(glob) => glob.matches(path),
            FilterKind::Invert(inner) => !inner.accept(path),
            FilterKind::Aggregate { mode, filters } => {
                let dominant = mode.dominant();
                for filter in filters {
                    if filter.accept(path) == dominant {
                        return dominant;
                    }
                }
                !dominant
            }
            FilterKind::Multi { rules, default } => rules
                .iter()
                .find(|(filter, _)| filter.accept(path))
                .map_or(*default, |(_, include)| *include),
        }
    }

    /// Evaluate the filter against the package of a binary class name.
    ///
    /// `com.acme.Widget` is checked as `com/acme`; a class in the default
    /// package is checked as the empty path.
    ///
    /// # Example
    ///
    /// ```
    /// use modpath::core::filter;
    ///
    /// let f = filter::is("com/acme");
    /// assert!(f.accept_class("com.acme.Widget"));
    /// assert!(!f.accept_class("com.acme.impl.Gear"));
    /// ```
    pub fn accept_class(&self, class_name: &str) -> bool {
        self.accept(&package_path_of(class_name))
    }

    /// The structural shape of this filter.
    pub fn kind(&self) -> &FilterKind {
        &self.0
    }

    /// Whether two handles share the same allocation.
    pub fn ptr_eq(&self, other: &PathFilter) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Display for PathFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.0 {
            FilterKind::AcceptAll => write!(f, "accept-all"),
            FilterKind::RejectAll => write!(f, "reject-all"),
            FilterKind::Equals(path) => write!(f, "is({path:?})"),
            FilterKind::ChildOf(prefix) => write!(f, "child-of({prefix:?})"),
            FilterKind::InSet(paths) => {
                write!(f, "in([")?;
                for (i, path) in paths.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{path:?}")?;
                }
                write!(f, "])")
            }
            FilterKind::Glob(glob) => write!(f, "match({:?})", glob.as_str()),
            FilterKind::Invert(inner) => write!(f, "not({inner})"),
            FilterKind::Aggregate { mode, filters } => {
                write!(f, "{}(", mode.name())?;
                for (i, filter) in filters.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{filter}")?;
                }
                write!(f, ")")
            }
            FilterKind::Multi { rules, default } => {
                write!(f, "multi(default={default}, [")?;
                for (i, (filter, include)) in rules.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{filter} => {}", if *include { "include" } else { "exclude" })?;
                }
                write!(f, "])")
            }
        }
    }
}

impl fmt::Debug for PathFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Convert a binary class name into its package path.
///
/// # Example
///
/// ```
/// use modpath::core::filter::package_path_of;
///
/// assert_eq!(package_path_of("com.acme.Widget"), "com/acme");
/// assert_eq!(package_path_of("Widget"), "");
/// ```
pub fn package_path_of(class_name: &str) -> String {
    match class_name.rfind('.') {
        Some(idx) => class_name[..idx].replace('.', "/"),
        None => String::new(),
    }
}

// =============================================================================
// Constructors
// =============================================================================

static ACCEPT_ALL: LazyLock<PathFilter> = LazyLock::new(|| PathFilter::new(FilterKind::AcceptAll));
static REJECT_ALL: LazyLock<PathFilter> = LazyLock::new(|| PathFilter::new(FilterKind::RejectAll));

/// A filter accepting every path.
pub fn accept_all() -> PathFilter {
    ACCEPT_ALL.clone()
}

/// A filter rejecting every path.
pub fn reject_all() -> PathFilter {
    REJECT_ALL.clone()
}

/// The constant filter for `value`.
pub fn constant(value: bool) -> PathFilter {
    if value {
        accept_all()
    } else {
        reject_all()
    }
}

/// Accept exactly `path`.
pub fn is(path: impl Into<String>) -> PathFilter {
    PathFilter::new(FilterKind::Equals(path.into()))
}

/// Accept strict descendants of `path`, never `path` itself.
///
/// # Example
///
/// ```
/// use modpath::core::filter;
///
/// let f = filter::is_child_of("META-INF");
/// assert!(f.accept("META-INF/MANIFEST.MF"));
/// assert!(!f.accept("META-INF"));
/// assert!(!f.accept("META-INF/"));
/// assert!(!f.accept("META-INFO/x"));
/// ```
pub fn is_child_of(path: impl Into<String>) -> PathFilter {
    let mut prefix = path.into();
    if !prefix.ends_with('/') {
        prefix.push('/');
    }
    PathFilter::new(FilterKind::ChildOf(prefix))
}

/// Accept `path` and its descendants.
pub fn is_or_is_child_of(path: impl Into<String>) -> PathFilter {
    let path = path.into();
    any([is(path.clone()), is_child_of(path)])
}

/// Accept members of a fixed path set.
pub fn in_set<I, S>(paths: I) -> PathFilter
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    PathFilter::new(FilterKind::InSet(
        paths.into_iter().map(Into::into).collect(),
    ))
}

/// Accept paths matching a glob.
pub fn glob(pattern: &str) -> PathFilter {
    PathFilter::new(FilterKind::Glob(Glob::compile(pattern)))
}

/// Accept paths matching an already compiled glob.
pub fn compiled_glob(glob: Glob) -> PathFilter {
    PathFilter::new(FilterKind::Glob(glob))
}

/// Negate a filter.
///
/// Double negation unwraps to the original handle and constants flip to the
/// opposite constant.
///
/// # Example
///
/// ```
/// use modpath::core::filter;
///
/// let f = filter::is("a");
/// assert!(filter::not(&filter::not(&f)).ptr_eq(&f));
/// assert_eq!(filter::not(&filter::accept_all()), filter::reject_all());
/// ```
pub fn not(filter: &PathFilter) -> PathFilter {
    match filter.kind() {
        FilterKind::AcceptAll => reject_all(),
        FilterKind::RejectAll => accept_all(),
        FilterKind::Invert(inner) => inner.clone(),
        _ => PathFilter::new(FilterKind::Invert(filter.clone())),
    }
}

/// Accept when any filter accepts; an empty list rejects.
pub fn any(filters: impl IntoIterator<Item = PathFilter>) -> PathFilter {
    aggregate(AggregateMode::Any, filters)
}

/// Accept when every filter accepts; an empty list accepts.
pub fn all(filters: impl IntoIterator<Item = PathFilter>) -> PathFilter {
    aggregate(AggregateMode::All, filters)
}

/// Accept when no filter accepts.
pub fn none(filters: impl IntoIterator<Item = PathFilter>) -> PathFilter {
    not(&any(filters))
}

fn aggregate(mode: AggregateMode, filters: impl IntoIterator<Item = PathFilter>) -> PathFilter {
    PathFilter::new(FilterKind::Aggregate {
        mode,
        filters: filters.into_iter().collect(),
    })
}

// =============================================================================
// Well-known filters
// =============================================================================

const META_INF: &str = "META-INF";
const META_INF_SERVICES: &str = "META-INF/services";

static META_INF_FILTER: LazyLock<PathFilter> = LazyLock::new(|| is(META_INF));
static META_INF_CHILDREN: LazyLock<PathFilter> = LazyLock::new(|| is_child_of(META_INF));
static META_INF_SERVICES_FILTER: LazyLock<PathFilter> =
    LazyLock::new(|| any([is(META_INF_SERVICES), is_child_of(META_INF_SERVICES)]));

static DEFAULT_IMPORT: LazyLock<PathFilter> = LazyLock::new(|| {
    let mut builder = MultiPathFilterBuilder::new(true);
    builder
        .add_filter(meta_inf_children(), false)
        .add_filter(meta_inf(), false);
    builder.create()
});

static DEFAULT_IMPORT_WITH_SERVICES: LazyLock<PathFilter> = LazyLock::new(|| {
    let mut builder = MultiPathFilterBuilder::new(true);
    builder
        .add_filter(is(META_INF_SERVICES), true)
        .add_filter(is_child_of(META_INF_SERVICES), true)
        .add_filter(meta_inf_children(), false)
        .add_filter(meta_inf(), false);
    builder.create()
});

/// `is("META-INF")`
pub fn meta_inf() -> PathFilter {
    META_INF_FILTER.clone()
}

/// `is_child_of("META-INF")`
pub fn meta_inf_children() -> PathFilter {
    META_INF_CHILDREN.clone()
}

/// `META-INF/services` and everything below it.
pub fn meta_inf_services() -> PathFilter {
    META_INF_SERVICES_FILTER.clone()
}

/// Everything except the `META-INF` subtree.
pub fn default_import_filter() -> PathFilter {
    DEFAULT_IMPORT.clone()
}

/// Everything except `META-INF`, but keeping `META-INF/services` visible.
pub fn default_import_filter_with_services() -> PathFilter {
    DEFAULT_IMPORT_WITH_SERVICES.clone()
}
