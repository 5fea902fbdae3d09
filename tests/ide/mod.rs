//! IDE feature tests
//!
//! Tests for:
//! - Hover target resolution
//! - Go to definition
//! - Find references

pub mod tests_goto;
pub mod tests_hover;
pub mod tests_references;
