//! Token definitions for batch scripts

use logos::Logos;
use sqlport_ast::Span;

use crate::keywords::is_boundary_keyword;

/// Raw token shapes recognized by the state machine.
///
/// A word runs until whitespace, a symbol or end of input; it may contain
/// quote characters after its first byte. A quoted literal has no escapes.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum RawToken {
    #[regex(r"[><=*,().]")]
    Symbol,

    #[regex(r"'[^']*'")]
    #[regex(r#""[^"]*""#)]
    Quoted,

    #[regex(r#"[^ \t\r\n><=*,().'"][^ \t\r\n><=*,().]*"#)]
    Word,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind<'a> {
    /// One of `> < = * , ( ) .`
    Symbol(char),
    /// Text between matching quotes, quotes stripped
    Quoted(&'a str),
    /// Identifier, keyword, number or any other bare run of bytes
    Word(&'a str),
    Eof,
}

impl<'a> TokenKind<'a> {
    pub(crate) fn from_raw(raw: RawToken, slice: &'a str) -> Self {
        match raw {
            RawToken::Symbol => TokenKind::Symbol(slice.chars().next().unwrap_or_default()),
            // Both quote characters are one byte wide.
            RawToken::Quoted => TokenKind::Quoted(&slice[1..slice.len() - 1]),
            RawToken::Word => TokenKind::Word(slice),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            TokenKind::Symbol(c) => format!("'{}'", c),
            TokenKind::Quoted(text) => format!("literal '{}'", text),
            TokenKind::Word(text) => format!("'{}'", text),
            TokenKind::Eof => "end of input".to_string(),
        }
    }
}

/// A token with its span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind<'a>,
    pub span: Span,
}

impl<'a> Token<'a> {
    pub fn eof(offset: usize) -> Self {
        Self {
            kind: TokenKind::Eof,
            span: Span::point(offset),
        }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// Case-insensitive keyword test; only words match
    pub fn is_keyword(&self, keyword: &str) -> bool {
        matches!(self.kind, TokenKind::Word(w) if w.eq_ignore_ascii_case(keyword))
    }

    pub fn is_symbol(&self, symbol: char) -> bool {
        self.kind == TokenKind::Symbol(symbol)
    }

    /// Whether this token starts a new statement
    pub fn is_boundary(&self) -> bool {
        matches!(self.kind, TokenKind::Word(w) if is_boundary_keyword(w))
    }

    /// A boundary keyword or end of input: every scan stops here
    pub fn ends_scan(&self) -> bool {
        self.is_eof() || self.is_boundary()
    }

    pub fn word(&self) -> Option<&'a str> {
        match self.kind {
            TokenKind::Word(w) => Some(w),
            _ => None,
        }
    }

    pub fn describe(&self) -> String {
        self.kind.describe()
    }
}
