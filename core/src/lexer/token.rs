use std::fmt;

use serde::Serialize;

use crate::diagnostics::Span;

/// A single token with its kind and source span.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum TokenKind {
    // Keywords
    Return,
    If,
    Else,
    Import,
    Export,
    From,
    For,
    In,
    Match,
    Continue,
    Break,
    Struct,
    Type,

    /// Punctuation, arithmetic and assignment symbols, and the word
    /// operators `and or not xor shl shr`.
    Operator(String),
    Identifier(String),
    Integer(i64),
    Float(f64),
    /// Decoded string literal contents.
    String(String),
}

/// Words that read as names but lex as operators.
pub const WORD_OPERATORS: [&str; 6] = ["and", "or", "not", "xor", "shl", "shr"];

pub const KEYWORDS: [&str; 13] = [
    "return", "if", "else", "import", "export", "from", "for", "in", "match", "continue",
    "break", "struct", "type",
];

impl TokenKind {
    pub fn keyword(text: &str) -> Option<TokenKind> {
        Some(match text {
            "return" => TokenKind::Return,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "import" => TokenKind::Import,
            "export" => TokenKind::Export,
            "from" => TokenKind::From,
            "for" => TokenKind::For,
            "in" => TokenKind::In,
            "match" => TokenKind::Match,
            "continue" => TokenKind::Continue,
            "break" => TokenKind::Break,
            "struct" => TokenKind::Struct,
            "type" => TokenKind::Type,
            _ => return None,
        })
    }

    /// The kind's tag: the keyword itself for keywords, otherwise the
    /// category (`operator`, `identifier`, `integer`, `float`, `string`).
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Return => "return",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::Import => "import",
            TokenKind::Export => "export",
            TokenKind::From => "from",
            TokenKind::For => "for",
            TokenKind::In => "in",
            TokenKind::Match => "match",
            TokenKind::Continue => "continue",
            TokenKind::Break => "break",
            TokenKind::Struct => "struct",
            TokenKind::Type => "type",
            TokenKind::Operator(_) => "operator",
            TokenKind::Identifier(_) => "identifier",
            TokenKind::Integer(_) => "integer",
            TokenKind::Float(_) => "float",
            TokenKind::String(_) => "string",
        }
    }

    pub fn is_keyword(&self) -> bool {
        !matches!(
            self,
            TokenKind::Operator(_)
                | TokenKind::Identifier(_)
                | TokenKind::Integer(_)
                | TokenKind::Float(_)
                | TokenKind::String(_)
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Operator(op) => write!(f, "operator `{op}`"),
            TokenKind::Identifier(name) => write!(f, "identifier `{name}`"),
            TokenKind::Integer(value) => write!(f, "integer {value}"),
            TokenKind::Float(value) => write!(f, "float {value}"),
            TokenKind::String(value) => write!(f, "string {value:?}"),
            keyword => write!(f, "keyword `{}`", keyword.name()),
        }
    }
}
