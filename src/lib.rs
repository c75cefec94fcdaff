//! modpath - path filters, dependency visibility and layered module paths
//!
//! modpath decides which resources of one module are visible to another
//! and in which order module directories are searched.
//!
//! # Architecture
//!
//! - [`core`] - Globs, the path filter algebra, dependency edges, module
//!   descriptors and tool configuration
//! - [`layers`] - Layered module path resolution over a directory reader
//! - [`cli`] - Command-line interface layer (parses args, delegates to core)
//! - [`ui`] - Output formatting
//!
//! # Invariants
//!
//! 1. Filters and edges are immutable once built and safe to share
//! 2. Filter evaluation never fails
//! 3. Rule order in a descriptor is the evaluation order
//! 4. Layered resolution yields a complete path or an error, never a partial one
//!
//! # Example
//!
//! ```
//! use modpath::filters;
//!
//! let api = filters::any([filters::is("com/acme"), filters::glob("com/acme/api/**")]);
//! assert!(api.accept("com/acme/api/v1"));
//! assert!(!api.accept("com/acme/impl"));
//! assert_eq!(filters::not(&filters::not(&api)), api);
//! ```

pub mod cli;
pub mod core;
pub mod layers;
pub mod ui;

pub use crate::core::filter as filters;
