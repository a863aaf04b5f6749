//! Core module - Data structures shared by every stage
//!
//! This module provides:
//! - Pipeline data model (FileRecord, ProcessedFile)
//! - Run configuration and built-in ignore lists
//! - Language lookup tables
//! - Path normalization utilities
//! - Cooperative cancellation
//! - Output formatters

pub mod cancel;
pub mod config;
pub mod lang;
pub mod model;
pub mod paths;
pub mod render;
