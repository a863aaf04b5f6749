//! Flows module - Operations combining several backends
//!
//! Provides:
//! - catalog: scan, filter, process and render a directory

pub mod catalog;
