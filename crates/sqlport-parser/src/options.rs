//! Parser configuration

use serde::{Deserialize, Serialize};

/// What to do when a statement fails to parse
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recovery {
    /// The first error aborts the parse
    #[default]
    Strict,
    /// Log the error, drop the statement's leading token and continue.
    /// Lexical errors still abort.
    SkipStatement,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    pub recovery: Recovery,
}

impl ParseOptions {
    pub fn strict() -> Self {
        Self::default()
    }

    pub fn skip_statement() -> Self {
        Self {
            recovery: Recovery::SkipStatement,
        }
    }
}
