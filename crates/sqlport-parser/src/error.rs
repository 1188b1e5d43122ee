//! Parser error types

use sqlport_lexer::{LexError, Token};
use sqlport_scope::ScopeError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// E-PARSE-001: a required keyword, symbol or closing parenthesis is missing
    #[error("unexpected token at byte {offset}: expected {expected}, found {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        offset: usize,
    },
}

impl ParseError {
    pub fn offset(&self) -> usize {
        match self {
            ParseError::UnexpectedToken { offset, .. } => *offset,
        }
    }

    pub fn unexpected(expected: impl Into<String>, found: &Token<'_>) -> Self {
        ParseError::UnexpectedToken {
            expected: expected.into(),
            found: found.describe(),
            offset: found.span.start,
        }
    }
}

/// Any error that aborts a parse call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Scope(#[from] ScopeError),
}

impl Error {
    /// Byte offset of the failure in the source
    pub fn offset(&self) -> usize {
        match self {
            Error::Lex(e) => e.offset(),
            Error::Parse(e) => e.offset(),
            Error::Scope(e) => e.offset(),
        }
    }

    /// Error code for machine-readable output
    pub fn code(&self) -> &'static str {
        match self {
            Error::Lex(e) => e.code(),
            Error::Parse(_) => "E-PARSE-001",
            Error::Scope(e) => e.code(),
        }
    }

    /// Lexical errors are never recovered from, whatever the recovery mode
    pub fn is_lexical(&self) -> bool {
        matches!(self, Error::Lex(_))
    }
}
