//! core
//!
//! Core domain types, schemas, and operations for modpath.
//!
//! # Modules
//!
//! - [`types`] - Strong types: ModuleRef, ServicesMode
//! - [`glob`] - Restricted glob compilation
//! - [`filter`] - The path filter algebra
//! - [`dependency`] - Import and export filters of dependency edges
//! - [`descriptor`] - Module descriptor schema and validation
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Schemas are strict and self-describing
//! - Filters are values: equal structure means equal filter

pub mod config;
pub mod dependency;
pub mod descriptor;
pub mod filter;
pub mod glob;
pub mod types;
