//! Grammar modules for Solidity parsing
//!
//! The parsing logic is organized by syntactic layer:
//! - `items` - Source unit and contract members (directives, definitions)
//! - `types` - Type names (elementary, user-defined, mapping, array, function)
//! - `statements` - Blocks and statements
//! - `expressions` - Pratt expression parser
//!
//! Grammar functions are free functions over the shared [`Parser`] state.

mod expressions;
mod items;
mod statements;
mod types;

use super::parser::Parser;
use super::syntax_kind::SyntaxKind;

pub(super) use items::{ITEM_RECOVERY, parse_source_unit_member};

/// Consume tokens until one of `stop` (not consumed), keeping progress.
fn skip_until(p: &mut Parser<'_>, stop: &[SyntaxKind]) {
    while !p.at_eof() && !p.at_any(stop) {
        p.bump();
    }
}
