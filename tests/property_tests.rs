//! Property-based tests for the filter algebra and globs.
//!
//! These tests use proptest to verify the algebraic laws hold across
//! randomly generated filters and paths.

use proptest::prelude::*;

use modpath::core::filter::{self, MultiPathFilterBuilder, PathFilter};
use modpath::core::glob::Glob;

/// Strategy for generating one path segment from a small alphabet, so
/// generated filters and paths overlap often.
fn segment() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["a", "b", "ab", "META-INF", "services", "x.y"])
        .prop_map(str::to_string)
}

/// Strategy for generating `/`-separated paths, including the empty path.
fn path() -> impl Strategy<Value = String> {
    prop::collection::vec(segment(), 0..4).prop_map(|segments| segments.join("/"))
}

/// Strategy for generating glob patterns over the same alphabet.
fn glob_pattern() -> impl Strategy<Value = String> {
    let token = prop_oneof![
        segment(),
        Just("*".to_string()),
        Just("**".to_string()),
        Just("?".to_string()),
    ];
    prop::collection::vec(token, 1..4).prop_map(|tokens| tokens.join("/"))
}

/// Strategy for generating arbitrary filters.
fn path_filter() -> impl Strategy<Value = PathFilter> {
    let leaf = prop_oneof![
        Just(filter::accept_all()),
        Just(filter::reject_all()),
        path().prop_map(|p| filter::is(p)),
        path().prop_map(|p| filter::is_child_of(p)),
        prop::collection::vec(path(), 0..3).prop_map(|ps| filter::in_set(ps)),
        glob_pattern().prop_map(|g| filter::glob(&g)),
    ];
    leaf.prop_recursive(3, 16, 3, |inner| {
        prop_oneof![
            inner.clone().prop_map(|f| filter::not(&f)),
            prop::collection::vec(inner.clone(), 0..3).prop_map(|fs| filter::any(fs)),
            prop::collection::vec(inner.clone(), 0..3).prop_map(|fs| filter::all(fs)),
            (prop::collection::vec((inner, any::<bool>()), 0..3), any::<bool>()).prop_map(
                |(rules, default)| {
                    let mut builder = MultiPathFilterBuilder::new(default);
                    for (f, include) in rules {
                        builder.add_filter(f, include);
                    }
                    builder.create()
                }
            ),
        ]
    })
}

proptest! {
    /// `not(not(f))` is the very same filter.
    #[test]
    fn double_negation_is_identity(f in path_filter(), p in path()) {
        let back = filter::not(&filter::not(&f));
        prop_assert_eq!(&back, &f);
        prop_assert_eq!(back.accept(&p), f.accept(&p));
    }

    /// Negation flips every verdict.
    #[test]
    fn not_flips_verdict(f in path_filter(), p in path()) {
        prop_assert_eq!(filter::not(&f).accept(&p), !f.accept(&p));
    }

    /// `any` is logical OR over its members.
    #[test]
    fn any_is_or(fs in prop::collection::vec(path_filter(), 0..4), p in path()) {
        let expected = fs.iter().any(|f| f.accept(&p));
        prop_assert_eq!(filter::any(fs).accept(&p), expected);
    }

    /// `all` is logical AND over its members.
    #[test]
    fn all_is_and(fs in prop::collection::vec(path_filter(), 0..4), p in path()) {
        let expected = fs.iter().all(|f| f.accept(&p));
        prop_assert_eq!(filter::all(fs).accept(&p), expected);
    }

    /// `none` is `not(any)`, structurally and by verdict.
    #[test]
    fn none_is_negated_any(fs in prop::collection::vec(path_filter(), 0..4), p in path()) {
        let none = filter::none(fs.clone());
        let negated = filter::not(&filter::any(fs));
        prop_assert_eq!(none.accept(&p), negated.accept(&p));
        prop_assert_eq!(none, negated);
    }

    /// A rule list where nothing matches yields the default.
    #[test]
    fn multi_without_match_returns_default(default in any::<bool>(), include in any::<bool>(), p in path()) {
        let mut builder = MultiPathFilterBuilder::new(default);
        builder
            .add_filter(filter::reject_all(), include)
            .add_filter(filter::not(&filter::accept_all()), include);
        prop_assert_eq!(builder.create().accept(&p), default);
    }

    /// The first matching rule decides.
    #[test]
    fn multi_first_match_wins(f in path_filter(), include in any::<bool>(), default in any::<bool>(), p in path()) {
        let mut builder = MultiPathFilterBuilder::new(default);
        builder
            .add_filter(f.clone(), include)
            .add_filter(filter::accept_all(), !include);
        let expected = if f.accept(&p) { include } else { !include };
        prop_assert_eq!(builder.create().accept(&p), expected);
    }

    /// `is_child_of` never accepts its own prefix.
    #[test]
    fn child_of_rejects_prefix(prefix in path()) {
        let f = filter::is_child_of(prefix.clone());
        let with_slash = format!("{prefix}/");
        prop_assert!(!f.accept(&prefix));
        prop_assert!(!f.accept(&with_slash));
    }

    /// `is_child_of` accepts anything strictly below the prefix.
    #[test]
    fn child_of_accepts_descendants(prefix in path(), rest in segment()) {
        let f = filter::is_child_of(prefix.clone());
        let child = format!("{prefix}/{rest}");
        prop_assert!(f.accept(&child));
    }

    /// Equal construction means equal filters with equal hashes.
    #[test]
    fn structural_equality(pattern in glob_pattern(), p in path()) {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let a = filter::any([filter::glob(&pattern), filter::is(p.clone())]);
        let b = filter::any([filter::glob(&pattern), filter::is(p)]);
        prop_assert_eq!(&a, &b);

        let hash = |f: &PathFilter| {
            let mut hasher = DefaultHasher::new();
            f.hash(&mut hasher);
            hasher.finish()
        };
        prop_assert_eq!(hash(&a), hash(&b));
    }

    /// A bare literal glob accepts the literal and everything below it.
    #[test]
    fn literal_glob_covers_subtree(literal in segment(), rest in path()) {
        let glob = Glob::compile(&literal);
        let below = format!("{literal}/{rest}");
        prop_assert!(glob.matches(&literal));
        prop_assert!(glob.matches(&below));
    }

    /// A trailing `/**` never accepts its prefix.
    #[test]
    fn trailing_wildcard_excludes_prefix(literal in segment(), rest in segment()) {
        let glob = Glob::compile(&format!("{literal}/**"));
        let child = format!("{literal}/{rest}");
        prop_assert!(!glob.matches(&literal));
        prop_assert!(glob.matches(&child));
    }

    /// Compiling never panics, whatever the input.
    #[test]
    fn compile_is_total(pattern in ".{0,16}") {
        let cached = Glob::compile(&pattern);
        let fresh = Glob::compile_uncached(&pattern);
        prop_assert_eq!(cached, fresh);
    }
}
