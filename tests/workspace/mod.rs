//! Workspace tests
//!
//! Tests for:
//! - Re-analysis and reverse-dependency invalidation
//! - Import resolution with remappings
//! - Directory loading

pub mod tests_loader;
pub mod tests_reanalysis;
