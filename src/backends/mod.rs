//! Backends module - File system work
//!
//! Provides:
//! - binary: binary/text classification
//! - scan: directory traversal
//! - filter: path and line filtering
//! - process: reading, type detection and truncation

pub mod binary;
pub mod filter;
pub mod process;
pub mod scan;
