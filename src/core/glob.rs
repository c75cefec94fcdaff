//! core::glob
//!
//! Restricted glob compiler for `/`-delimited paths.
//!
//! # Syntax
//!
//! Tokens are recognized in this priority order:
//!
//! | Token | Matches |
//! |-------|---------|
//! | `**`  | any sequence, including separators |
//! | `*`   | any sequence without a separator |
//! | `?`   | exactly one non-separator character |
//! | `\X`  | the literal character `X` |
//! | `/`+  | one separator boundary (runs collapse) |
//! | other | the literal run |
//!
//! # Implicit Tail
//!
//! A compiled glob matches the named path *and everything below it*. If the
//! pattern ends in a separator the tail only admits descendants:
//!
//! - `foo` matches `foo`, `foo/bar`, `foo/bar/baz`
//! - `foo/` matches `foo/bar` but not `foo`
//! - `foo/*` and `foo/**` match `foo/bar` but not `foo`
//!
//! # Caching
//!
//! [`Glob::compile`] memoizes compiled patterns by source text in a
//! process-wide concurrent map, since the same glob text tends to recur
//! across many module descriptors. Entries are never evicted, so the cache
//! grows with the number of distinct glob texts seen by the process. Callers
//! compiling globs from untrusted or unbounded input should use
//! [`Glob::compile_uncached`].
//!
//! # Example
//!
//! ```
//! use modpath::core::glob::Glob;
//!
//! let glob = Glob::compile("**/bar/**");
//! assert!(!glob.matches("foo/bar"));
//! assert!(glob.matches("foo/bar/baz"));
//! assert!(glob.matches("foo/baz/bar/biff"));
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, LazyLock};

use dashmap::DashMap;
use regex::Regex;

/// Compiled globs keyed by their source text. Grows without eviction.
static GLOB_CACHE: LazyLock<DashMap<String, Glob>> = LazyLock::new(DashMap::new);

/// A lexical token of a glob pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlobToken {
    /// `**`
    AnyPath,
    /// `*`
    AnySegment,
    /// `?`
    AnyChar,
    /// One or more consecutive `/`.
    Separator,
    /// Literal text, escapes already resolved.
    Literal(String),
}

/// Split a glob into tokens.
///
/// A trailing lone `\` has nothing to escape and is kept as a literal
/// backslash.
///
/// # Example
///
/// ```
/// use modpath::core::glob::{tokenize, GlobToken};
///
/// assert_eq!(
///     tokenize("a//**"),
///     vec![
///         GlobToken::Literal("a".into()),
///         GlobToken::Separator,
///         GlobToken::AnyPath,
///     ]
/// );
/// ```
pub fn tokenize(glob: &str) -> Vec<GlobToken> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut chars = glob.chars().peekable();

    let flush = |literal: &mut String, tokens: &mut Vec<GlobToken>| {
        if !literal.is_empty() {
            tokens.push(GlobToken::Literal(std::mem::take(literal)));
        }
    };

    while let Some(c) = chars.next() {
        match c {
            '*' => {
                flush(&mut literal, &mut tokens);
                if chars.peek() == Some(&'*') {
                    chars.next();
                    tokens.push(GlobToken::AnyPath);
                } else {
                    tokens.push(GlobToken::AnySegment);
                }
            }
            '?' => {
                flush(&mut literal, &mut tokens);
                tokens.push(GlobToken::AnyChar);
            }
            '\\' => match chars.next() {
                Some(escaped) => literal.push(escaped),
                None => literal.push('\\'),
            },
            '/' => {
                flush(&mut literal, &mut tokens);
                while chars.peek() == Some(&'/') {
                    chars.next();
                }
                tokens.push(GlobToken::Separator);
            }
            other => literal.push(other),
        }
    }
    flush(&mut literal, &mut tokens);

    tokens
}

/// Translate tokens into an anchored regular expression source.
fn to_regex_source(tokens: &[GlobToken]) -> String {
    let mut source = String::from("^");
    for token in tokens {
        match token {
            GlobToken::AnyPath => source.push_str(".*"),
            GlobToken::AnySegment => source.push_str("[^/]*"),
            GlobToken::AnyChar => source.push_str("[^/]"),
            GlobToken::Separator => source.push('/'),
            GlobToken::Literal(text) => source.push_str(&regex::escape(text)),
        }
    }
    if matches!(tokens.last(), Some(GlobToken::Separator)) {
        source.push_str(".*");
    } else {
        source.push_str("(?:/.*)?");
    }
    source.push('$');
    source
}

/// A compiled glob pattern.
///
/// Two globs are equal when their compiled forms are equal, so `a//b` and
/// `a/b` compare equal.
#[derive(Clone)]
pub struct Glob {
    source: String,
    compiled: String,
    regex: Arc<Regex>,
}

impl Glob {
    /// Compile a glob, reusing a cached compilation when available.
    ///
    /// The result stays cached for the life of the process.
    pub fn compile(glob: &str) -> Self {
        if let Some(cached) = GLOB_CACHE.get(glob) {
            return cached.clone();
        }
        let compiled = Self::compile_uncached(glob);
        GLOB_CACHE
            .entry(glob.to_string())
            .or_insert(compiled)
            .clone()
    }

    /// Compile a glob without consulting the cache.
    pub fn compile_uncached(glob: &str) -> Self {
        let compiled = to_regex_source(&tokenize(glob));
        tracing::trace!(glob, regex = %compiled, "compiled glob");
        // Every literal is escaped, so the emitted source is always valid.
        let regex = Regex::new(&compiled).expect("glob compiler emitted an invalid regex");
        Self {
            source: glob.to_string(),
            compiled,
            regex: Arc::new(regex),
        }
    }

    /// Check whether `path` matches.
    pub fn matches(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// The glob text this was compiled from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The anchored regular expression this glob compiled to.
    pub fn compiled(&self) -> &str {
        &self.compiled
    }
}

impl PartialEq for Glob {
    fn eq(&self, other: &Self) -> bool {
        self.compiled == other.compiled
    }
}

impl Eq for Glob {}

impl Hash for Glob {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.compiled.hash(state);
    }
}

impl fmt::Debug for Glob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Glob")
            .field("source", &self.source)
            .field("compiled", &self.compiled)
            .finish()
    }
}

impl fmt::Display for Glob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}
