//! Recursive descent parser for Solidity
//!
//! Builds a rowan GreenNode tree from tokens.
//! Supports error recovery and produces a lossless CST.
//!
//! Trivia is attached to the innermost open node right before the next
//! significant token is consumed. Nodes and checkpoints are always started
//! *after* pending trivia, so every composite node begins with a significant
//! token.

use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;
use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, TextRange, TextSize};

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}..{}",
            self.message,
            u32::from(self.range.start()),
            u32::from(self.range.end())
        )
    }
}

/// Parse Solidity source code into a CST
pub fn parse(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens);
    parser.parse_source_unit();
    parser.finish()
}

/// The parser state
pub(super) struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>]) -> Self {
        Self {
            tokens,
            pos: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    /// Index of the nth significant token at or after `from`
    fn significant_index(&self, from: usize, n: usize) -> Option<usize> {
        self.tokens
            .iter()
            .enumerate()
            .skip(from)
            .filter(|(_, t)| !t.kind.is_trivia())
            .nth(n)
            .map(|(idx, _)| idx)
    }

    fn current(&self) -> Option<&Token<'a>> {
        self.significant_index(self.pos, 0)
            .map(|idx| &self.tokens[idx])
    }

    pub(super) fn current_kind(&self) -> SyntaxKind {
        self.nth(0)
    }

    pub(super) fn current_text(&self) -> &'a str {
        self.current().map(|t| t.text).unwrap_or("")
    }

    pub(super) fn at(&self, kind: SyntaxKind) -> bool {
        self.current_kind() == kind
    }

    pub(super) fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        kinds.contains(&self.current_kind())
    }

    pub(super) fn at_eof(&self) -> bool {
        self.current().is_none()
    }

    /// Look ahead, skipping trivia
    pub(super) fn nth(&self, n: usize) -> SyntaxKind {
        self.significant_index(self.pos, n)
            .map(|idx| self.tokens[idx].kind)
            .unwrap_or(SyntaxKind::ERROR)
    }

    pub(super) fn nth_text(&self, n: usize) -> &'a str {
        self.significant_index(self.pos, n)
            .map(|idx| self.tokens[idx].text)
            .unwrap_or("")
    }

    /// A cursor over significant tokens for speculative lookahead
    pub(super) fn lookahead(&self) -> Lookahead<'_, 'a> {
        Lookahead {
            tokens: self.tokens,
            idx: self.pos,
        }
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    pub(super) fn skip_trivia(&mut self) {
        while let Some(token) = self.tokens.get(self.pos) {
            if !token.kind.is_trivia() {
                break;
            }
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    pub(super) fn bump(&mut self) {
        self.skip_trivia();
        if let Some(token) = self.tokens.get(self.pos) {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    /// Consume the current token under a different kind. Used for soft
    /// keywords in name position (`error`, `from`, ...) and member names.
    pub(super) fn bump_remap(&mut self, kind: SyntaxKind) {
        self.skip_trivia();
        if let Some(token) = self.tokens.get(self.pos) {
            self.builder.token(kind.into(), token.text);
            self.pos += 1;
        }
    }

    pub(super) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(super) fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(format!("expected {:?}, found {:?}", kind, self.current_kind()));
            false
        }
    }

    /// Identifier-like tokens usable as a declared or referenced name
    pub(super) fn at_name(&self) -> bool {
        is_name_kind(self.current_kind())
    }

    /// Consume a name, normalizing soft keywords to `IDENT`
    pub(super) fn expect_name(&mut self) -> bool {
        if self.at_name() {
            self.bump_remap(SyntaxKind::IDENT);
            true
        } else {
            self.error(format!("expected identifier, found {:?}", self.current_kind()));
            false
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    pub(super) fn error(&mut self, message: impl Into<String>) {
        let range = self
            .current()
            .map(|t| TextRange::at(t.offset, TextSize::of(t.text)))
            .unwrap_or_else(|| {
                let end = self
                    .tokens
                    .last()
                    .map(|t| t.offset + TextSize::of(t.text))
                    .unwrap_or_default();
                TextRange::empty(end)
            });
        self.errors.push(SyntaxError::new(message, range));
    }

    pub(super) fn error_recover(&mut self, message: impl Into<String>, recovery: &[SyntaxKind]) {
        self.error(message);
        self.start_node(SyntaxKind::ERROR);
        // Always consume at least one token to make progress
        let mut consumed = false;
        while !self.at_eof() && !self.at_any(recovery) {
            self.bump();
            consumed = true;
        }
        if !consumed && !self.at_eof() {
            self.bump();
        }
        self.finish_node();
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    pub(super) fn start_node(&mut self, kind: SyntaxKind) {
        self.skip_trivia();
        self.builder.start_node(kind.into());
    }

    pub(super) fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    pub(super) fn checkpoint(&mut self) -> Checkpoint {
        self.skip_trivia();
        self.builder.checkpoint()
    }

    pub(super) fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    pub(super) fn pos(&self) -> usize {
        self.pos
    }

    /// Consume tokens up to and including the matching close delimiter.
    /// The current token must be the open delimiter.
    pub(super) fn bump_balanced(&mut self, open: SyntaxKind, close: SyntaxKind) {
        let mut depth = 0usize;
        while !self.at_eof() {
            let kind = self.current_kind();
            self.bump();
            if kind == open {
                depth += 1;
            } else if kind == close {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return;
                }
            }
        }
        self.error(format!("unterminated {:?}", open));
    }

    // =========================================================================
    // Grammar entry
    // =========================================================================

    /// SourceUnit = SourceUnitMember*
    fn parse_source_unit(&mut self) {
        self.builder.start_node(SyntaxKind::SOURCE_UNIT.into());

        while !self.at_eof() {
            let pos_before = self.pos;
            super::grammar::parse_source_unit_member(self);
            // Safety: if we didn't make progress, force-skip a token
            if self.pos == pos_before && !self.at_eof() {
                self.error_recover(
                    format!("unexpected {:?} at top level", self.current_kind()),
                    super::grammar::ITEM_RECOVERY,
                );
            }
        }

        // Trailing trivia belongs to the root.
        self.skip_trivia();
        self.builder.finish_node();
    }
}

pub(super) fn is_name_kind(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::IDENT
            | SyntaxKind::FROM_KW
            | SyntaxKind::ERROR_KW
            | SyntaxKind::RECEIVE_KW
            | SyntaxKind::FALLBACK_KW
    )
}

/// Speculative cursor over significant tokens. Never builds nodes.
pub(super) struct Lookahead<'p, 'a> {
    tokens: &'p [Token<'a>],
    idx: usize,
}

impl Lookahead<'_, '_> {
    pub(super) fn kind(&self) -> SyntaxKind {
        self.tokens
            .iter()
            .skip(self.idx)
            .find(|t| !t.kind.is_trivia())
            .map(|t| t.kind)
            .unwrap_or(SyntaxKind::ERROR)
    }

    pub(super) fn at(&self, kind: SyntaxKind) -> bool {
        self.kind() == kind
    }

    pub(super) fn bump(&mut self) {
        while let Some(token) = self.tokens.get(self.idx) {
            self.idx += 1;
            if !token.kind.is_trivia() {
                break;
            }
        }
    }

    /// Skip a balanced `[ ... ]`, `( ... )` or `{ ... }` group
    pub(super) fn skip_balanced(&mut self) {
        let open = self.kind();
        let close = match open {
            SyntaxKind::L_BRACKET => SyntaxKind::R_BRACKET,
            SyntaxKind::L_PAREN => SyntaxKind::R_PAREN,
            SyntaxKind::L_BRACE => SyntaxKind::R_BRACE,
            _ => return,
        };
        let mut depth = 0usize;
        while self.idx < self.tokens.len() {
            let kind = self.kind();
            self.bump();
            if kind == open {
                depth += 1;
            } else if kind == close {
                depth -= 1;
                if depth == 0 {
                    return;
                }
            }
        }
    }
}
