//! HIR layer tests
//!
//! Tests for the linked symbol trees:
//! - Forward references and the pending pool
//! - Shadowing across scopes and inheritance
//! - Determinism of rebuilds

pub mod tests_name_resolution;
pub mod tests_pending_pool;
