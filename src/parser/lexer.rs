//! Logos-based lexer for Solidity
//!
//! Fast tokenization using the logos crate. Identifiers are classified into
//! keywords after matching, see [`super::keywords`].

use super::keywords;
use super::syntax_kind::SyntaxKind;
use logos::Logos;
use rowan::TextSize;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        let kind = match logos_token {
            Ok(LogosToken::Ident) => keywords::classify(text),
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Consume a block comment body up to and including the first `*/`.
///
/// An unterminated comment swallows the rest of the input and lexes as ERROR.
fn block_comment(lex: &mut logos::Lexer<'_, LogosToken>) -> bool {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            true
        }
        None => {
            lex.bump(lex.remainder().len());
            false
        }
    }
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*")]
    Ident,

    #[regex(r"[0-9][0-9_]*(\.[0-9][0-9_]*)?([eE]-?[0-9][0-9_]*)?")]
    Decimal,

    #[regex(r"0[xX][0-9a-fA-F_]+")]
    Hex,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r#"'([^'\\\n]|\\.)*'"#)]
    #[regex(r#"unicode"([^"\\\n]|\\.)*""#)]
    #[regex(r#"unicode'([^'\\\n]|\\.)*'"#)]
    String,

    #[regex(r#"hex"[0-9a-fA-F_]*""#)]
    #[regex(r#"hex'[0-9a-fA-F_]*'"#)]
    HexString,

    // =========================================================================
    // MULTI-CHARACTER PUNCTUATION (must come before single-char)
    // =========================================================================
    #[token(">>>=")]
    SarEq,
    #[token(">>>")]
    Sar,
    #[token("<<=")]
    ShlEq,
    #[token(">>=")]
    ShrEq,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,
    #[token("**")]
    StarStar,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("==")]
    EqEq,
    #[token("!=")]
    BangEq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("=>")]
    FatArrow,
    #[token("->")]
    Arrow,
    #[token(":=")]
    ColonEq,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,
    #[token("%=")]
    PercentEq,
    #[token("|=")]
    PipeEq,
    #[token("&=")]
    AmpEq,
    #[token("^=")]
    CaretEq,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("?")]
    Question,
    #[token("=")]
    Eq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("!")]
    Bang,
    #[token("~")]
    Tilde,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        match token {
            LogosToken::Whitespace => SyntaxKind::WHITESPACE,
            LogosToken::LineComment => SyntaxKind::LINE_COMMENT,
            LogosToken::BlockComment => SyntaxKind::BLOCK_COMMENT,
            LogosToken::Ident => SyntaxKind::IDENT,
            LogosToken::Decimal => SyntaxKind::DECIMAL_NUMBER,
            LogosToken::Hex => SyntaxKind::HEX_NUMBER,
            LogosToken::String => SyntaxKind::STRING,
            LogosToken::HexString => SyntaxKind::HEX_STRING,
            LogosToken::SarEq => SyntaxKind::SAR_EQ,
            LogosToken::Sar => SyntaxKind::SAR,
            LogosToken::ShlEq => SyntaxKind::SHL_EQ,
            LogosToken::ShrEq => SyntaxKind::SHR_EQ,
            LogosToken::Shl => SyntaxKind::SHL,
            LogosToken::Shr => SyntaxKind::SHR,
            LogosToken::StarStar => SyntaxKind::STAR_STAR,
            LogosToken::AmpAmp => SyntaxKind::AMP_AMP,
            LogosToken::PipePipe => SyntaxKind::PIPE_PIPE,
            LogosToken::EqEq => SyntaxKind::EQ_EQ,
            LogosToken::BangEq => SyntaxKind::BANG_EQ,
            LogosToken::LtEq => SyntaxKind::LT_EQ,
            LogosToken::GtEq => SyntaxKind::GT_EQ,
            LogosToken::FatArrow => SyntaxKind::FAT_ARROW,
            LogosToken::Arrow => SyntaxKind::ARROW,
            LogosToken::ColonEq => SyntaxKind::COLON_EQ,
            LogosToken::PlusPlus => SyntaxKind::PLUS_PLUS,
            LogosToken::MinusMinus => SyntaxKind::MINUS_MINUS,
            LogosToken::PlusEq => SyntaxKind::PLUS_EQ,
            LogosToken::MinusEq => SyntaxKind::MINUS_EQ,
            LogosToken::StarEq => SyntaxKind::STAR_EQ,
            LogosToken::SlashEq => SyntaxKind::SLASH_EQ,
            LogosToken::PercentEq => SyntaxKind::PERCENT_EQ,
            LogosToken::PipeEq => SyntaxKind::PIPE_EQ,
            LogosToken::AmpEq => SyntaxKind::AMP_EQ,
            LogosToken::CaretEq => SyntaxKind::CARET_EQ,
            LogosToken::LBrace => SyntaxKind::L_BRACE,
            LogosToken::RBrace => SyntaxKind::R_BRACE,
            LogosToken::LBracket => SyntaxKind::L_BRACKET,
            LogosToken::RBracket => SyntaxKind::R_BRACKET,
            LogosToken::LParen => SyntaxKind::L_PAREN,
            LogosToken::RParen => SyntaxKind::R_PAREN,
            LogosToken::Semicolon => SyntaxKind::SEMICOLON,
            LogosToken::Colon => SyntaxKind::COLON,
            LogosToken::Comma => SyntaxKind::COMMA,
            LogosToken::Dot => SyntaxKind::DOT,
            LogosToken::Question => SyntaxKind::QUESTION,
            LogosToken::Eq => SyntaxKind::EQ,
            LogosToken::Lt => SyntaxKind::LT,
            LogosToken::Gt => SyntaxKind::GT,
            LogosToken::Plus => SyntaxKind::PLUS,
            LogosToken::Minus => SyntaxKind::MINUS,
            LogosToken::Star => SyntaxKind::STAR,
            LogosToken::Slash => SyntaxKind::SLASH,
            LogosToken::Percent => SyntaxKind::PERCENT,
            LogosToken::Bang => SyntaxKind::BANG,
            LogosToken::Tilde => SyntaxKind::TILDE,
            LogosToken::Amp => SyntaxKind::AMP,
            LogosToken::Pipe => SyntaxKind::PIPE,
            LogosToken::Caret => SyntaxKind::CARET,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<SyntaxKind> {
        tokenize(input)
            .into_iter()
            .map(|t| t.kind)
            .filter(|k| !k.is_trivia())
            .collect()
    }

    #[test]
    fn test_keywords_and_idents() {
        assert_eq!(
            kinds("contract Token is Base {}"),
            vec![
                SyntaxKind::CONTRACT_KW,
                SyntaxKind::IDENT,
                SyntaxKind::IS_KW,
                SyntaxKind::IDENT,
                SyntaxKind::L_BRACE,
                SyntaxKind::R_BRACE,
            ]
        );
    }

    #[test]
    fn test_elementary_types() {
        assert_eq!(
            kinds("uint256 bytes32 address bool uint7"),
            vec![
                SyntaxKind::ELEMENTARY_TYPE_KW,
                SyntaxKind::ELEMENTARY_TYPE_KW,
                SyntaxKind::ELEMENTARY_TYPE_KW,
                SyntaxKind::ELEMENTARY_TYPE_KW,
                SyntaxKind::IDENT,
            ]
        );
    }

    #[test]
    fn test_longest_operator_wins() {
        assert_eq!(
            kinds("a >>>= b >> c"),
            vec![
                SyntaxKind::IDENT,
                SyntaxKind::SAR_EQ,
                SyntaxKind::IDENT,
                SyntaxKind::SHR,
                SyntaxKind::IDENT,
            ]
        );
    }

    #[test]
    fn test_literals() {
        assert_eq!(
            kinds(r#"0xff 1_000 2.5e3 "s" 'c' hex"00ff" unicode"é""#),
            vec![
                SyntaxKind::HEX_NUMBER,
                SyntaxKind::DECIMAL_NUMBER,
                SyntaxKind::DECIMAL_NUMBER,
                SyntaxKind::STRING,
                SyntaxKind::STRING,
                SyntaxKind::HEX_STRING,
                SyntaxKind::STRING,
            ]
        );
    }

    #[test]
    fn test_comments_are_trivia() {
        let tokens = tokenize("/* a ** b */ x // tail");
        assert_eq!(tokens[0].kind, SyntaxKind::BLOCK_COMMENT);
        assert_eq!(tokens.last().map(|t| t.kind), Some(SyntaxKind::LINE_COMMENT));
    }

    #[test]
    fn test_block_comment_forms() {
        for input in [
            "/* plain */",
            "/** @notice Vault */",
            "/*\n * @title Vault\n * @dev multi-line\n */",
            "/* a ** b */",
            "/**/",
            "/***/",
        ] {
            let tokens = tokenize(input);
            assert_eq!(tokens.len(), 1, "{input:?}");
            assert_eq!(tokens[0].kind, SyntaxKind::BLOCK_COMMENT, "{input:?}");
            assert_eq!(tokens[0].text, input);
        }
    }

    #[test]
    fn test_block_comment_ends_at_first_close() {
        let tokens = tokenize("/* a */ x /* b */");
        assert_eq!(tokens[0].text, "/* a */");
        assert_eq!(kinds("/* a */ x /* b */"), vec![SyntaxKind::IDENT]);
    }

    #[test]
    fn test_unterminated_block_comment_is_error() {
        let tokens = tokenize("x /* never closed");
        assert_eq!(tokens.last().map(|t| t.kind), Some(SyntaxKind::ERROR));
        assert_eq!(tokens.last().map(|t| t.text), Some("/* never closed"));
    }

    #[test]
    fn test_offsets_are_contiguous() {
        let tokens = tokenize("a = 1;");
        let mut expected = 0u32;
        for token in &tokens {
            assert_eq!(u32::from(token.offset), expected);
            expected += token.text.len() as u32;
        }
    }

    #[test]
    fn test_unknown_byte_is_error() {
        assert!(tokenize("#").iter().any(|t| t.kind == SyntaxKind::ERROR));
    }
}
