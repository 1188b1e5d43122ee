//! Error types for variable resolution

use thiserror::Error;

/// Errors from resolving a variable against a scope
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    /// E-SCOPE-001: assignment target was never declared at this level
    #[error("undeclared variable `{name}` at byte {offset}")]
    UndeclaredVariable { name: String, offset: usize },
}

impl ScopeError {
    /// Byte offset of the offending name in the source
    pub fn offset(&self) -> usize {
        match self {
            ScopeError::UndeclaredVariable { offset, .. } => *offset,
        }
    }

    /// Error code for machine-readable output
    pub fn code(&self) -> &'static str {
        match self {
            ScopeError::UndeclaredVariable { .. } => "E-SCOPE-001",
        }
    }
}
