//! Shared test helpers.

pub mod hir_helpers;
pub mod source_fixtures;
pub mod symbol_assertions;
