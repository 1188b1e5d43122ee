//! Lexer error types

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// E-LEX-001: a quote was opened and the input ended before it closed
    #[error("unterminated quoted literal starting at byte {offset}")]
    UnterminatedLiteral { offset: usize },
}

impl LexError {
    pub fn offset(&self) -> usize {
        match self {
            LexError::UnterminatedLiteral { offset } => *offset,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            LexError::UnterminatedLiteral { .. } => "E-LEX-001",
        }
    }
}
