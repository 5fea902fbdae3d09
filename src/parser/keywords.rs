//! Keyword and elementary type classification.
//!
//! The logos lexer matches every word as an identifier; this module maps
//! reserved words onto their keyword kinds.

use super::syntax_kind::SyntaxKind;

/// Number units that may follow a numeric literal (`1 ether`, `2 days`).
pub const NUMBER_UNITS: &[&str] = &[
    "wei", "gwei", "szabo", "finney", "ether", "seconds", "minutes", "hours", "days", "weeks",
    "years",
];

/// Classify an identifier-shaped word.
pub fn classify(text: &str) -> SyntaxKind {
    match text {
        "pragma" => SyntaxKind::PRAGMA_KW,
        "import" => SyntaxKind::IMPORT_KW,
        "as" => SyntaxKind::AS_KW,
        "from" => SyntaxKind::FROM_KW,
        "contract" => SyntaxKind::CONTRACT_KW,
        "interface" => SyntaxKind::INTERFACE_KW,
        "library" => SyntaxKind::LIBRARY_KW,
        "abstract" => SyntaxKind::ABSTRACT_KW,
        "is" => SyntaxKind::IS_KW,
        "struct" => SyntaxKind::STRUCT_KW,
        "enum" => SyntaxKind::ENUM_KW,
        "event" => SyntaxKind::EVENT_KW,
        "error" => SyntaxKind::ERROR_KW,
        "modifier" => SyntaxKind::MODIFIER_KW,
        "function" => SyntaxKind::FUNCTION_KW,
        "constructor" => SyntaxKind::CONSTRUCTOR_KW,
        "fallback" => SyntaxKind::FALLBACK_KW,
        "receive" => SyntaxKind::RECEIVE_KW,
        "returns" => SyntaxKind::RETURNS_KW,
        "return" => SyntaxKind::RETURN_KW,
        "mapping" => SyntaxKind::MAPPING_KW,
        "using" => SyntaxKind::USING_KW,
        "for" => SyntaxKind::FOR_KW,
        "type" => SyntaxKind::TYPE_KW,
        "if" => SyntaxKind::IF_KW,
        "else" => SyntaxKind::ELSE_KW,
        "while" => SyntaxKind::WHILE_KW,
        "do" => SyntaxKind::DO_KW,
        "break" => SyntaxKind::BREAK_KW,
        "continue" => SyntaxKind::CONTINUE_KW,
        "emit" => SyntaxKind::EMIT_KW,
        "new" => SyntaxKind::NEW_KW,
        "delete" => SyntaxKind::DELETE_KW,
        "true" => SyntaxKind::TRUE_KW,
        "false" => SyntaxKind::FALSE_KW,
        "memory" => SyntaxKind::MEMORY_KW,
        "storage" => SyntaxKind::STORAGE_KW,
        "calldata" => SyntaxKind::CALLDATA_KW,
        "public" => SyntaxKind::PUBLIC_KW,
        "private" => SyntaxKind::PRIVATE_KW,
        "internal" => SyntaxKind::INTERNAL_KW,
        "external" => SyntaxKind::EXTERNAL_KW,
        "pure" => SyntaxKind::PURE_KW,
        "view" => SyntaxKind::VIEW_KW,
        "payable" => SyntaxKind::PAYABLE_KW,
        "constant" => SyntaxKind::CONSTANT_KW,
        "immutable" => SyntaxKind::IMMUTABLE_KW,
        "override" => SyntaxKind::OVERRIDE_KW,
        "virtual" => SyntaxKind::VIRTUAL_KW,
        "indexed" => SyntaxKind::INDEXED_KW,
        "anonymous" => SyntaxKind::ANONYMOUS_KW,
        "unchecked" => SyntaxKind::UNCHECKED_KW,
        "assembly" => SyntaxKind::ASSEMBLY_KW,
        "try" => SyntaxKind::TRY_KW,
        "catch" => SyntaxKind::CATCH_KW,
        _ if is_elementary_type(text) => SyntaxKind::ELEMENTARY_TYPE_KW,
        _ => SyntaxKind::IDENT,
    }
}

/// Check whether a word names an elementary type.
///
/// Accepts `address`, `bool`, `string`, `bytes`, `byte`, `int`/`uint` with
/// an optional bit width (multiple of 8, at most 256), `bytes1`..`bytes32`,
/// and `fixed`/`ufixed` with an optional `MxN` suffix.
pub fn is_elementary_type(text: &str) -> bool {
    match text {
        "address" | "bool" | "string" | "bytes" | "byte" | "int" | "uint" | "fixed"
        | "ufixed" => return true,
        _ => {}
    }

    if let Some(bits) = text.strip_prefix("uint").or_else(|| text.strip_prefix("int")) {
        return parse_width(bits).is_some_and(|n| n % 8 == 0 && (8..=256).contains(&n));
    }
    if let Some(size) = text.strip_prefix("bytes") {
        return parse_width(size).is_some_and(|n| (1..=32).contains(&n));
    }
    if let Some(rest) = text.strip_prefix("ufixed").or_else(|| text.strip_prefix("fixed")) {
        return match rest.split_once('x') {
            Some((m, n)) => parse_width(m).is_some() && parse_width(n).is_some(),
            None => false,
        };
    }
    false
}

fn parse_width(digits: &str) -> Option<u32> {
    if digits.is_empty() || digits.starts_with('0') {
        return None;
    }
    digits.parse().ok()
}
