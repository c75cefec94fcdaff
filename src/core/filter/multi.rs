//! core::filter::multi
//!
//! Ordered, first-match-wins rule lists.

use super::{constant, FilterKind, PathFilter};

/// Builder for a filter made of ordered `(filter, include)` rules.
///
/// The built filter returns the `include` flag of the first rule whose
/// filter accepts the path, or the default when no rule matches. Rules are
/// kept in insertion order; they are never sorted or deduplicated.
///
/// # Example
///
/// ```
/// use modpath::core::filter::{self, MultiPathFilterBuilder};
///
/// let mut builder = MultiPathFilterBuilder::new(true);
/// builder
///     .add_filter(filter::glob("foo/*"), false)
///     .add_filter(filter::glob("**/bar/**"), false)
///     .add_filter(filter::glob("baz/**"), false);
/// let f = builder.create();
///
/// assert!(f.accept("foo"));
/// assert!(!f.accept("foo/bar"));
/// assert!(!f.accept("foo/bar/baz"));
/// assert!(!f.accept("baz/foo/bar"));
/// ```
#[derive(Debug, Clone)]
pub struct MultiPathFilterBuilder {
    rules: Vec<(PathFilter, bool)>,
    default: bool,
}

impl MultiPathFilterBuilder {
    /// Start a rule list whose unmatched paths evaluate to `default`.
    pub fn new(default: bool) -> Self {
        Self {
            rules: Vec::new(),
            default,
        }
    }

    /// Append a rule.
    pub fn add_filter(&mut self, filter: PathFilter, include: bool) -> &mut Self {
        self.rules.push((filter, include));
        self
    }

    /// Whether any rule has been added.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Build the filter.
    ///
    /// With no rules this is the constant filter for the default.
    pub fn create(&self) -> PathFilter {
        if self.rules.is_empty() {
            return constant(self.default);
        }
        PathFilter::new(FilterKind::Multi {
            rules: self.rules.clone(),
            default: self.default,
        })
    }
}
