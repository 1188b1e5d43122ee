//! Statement AST nodes

use serde::{Deserialize, Serialize};
use sqlport_scope::{Scope, Variable};

use crate::Span;

/// A `BEGIN ... END` block with its own variable scope
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub scope: Scope,
    pub span: Span,
}

/// A statement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Statement {
    pub kind: StatementKind,
    pub span: Span,
}

impl Statement {
    pub fn new(kind: StatementKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Raw text of an opaque fragment, `None` for structured statements
    pub fn fragment_text(&self) -> Option<&str> {
        match &self.kind {
            StatementKind::DataQuery { text }
            | StatementKind::DataManipulation { text }
            | StatementKind::DataDefinition { text } => Some(text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StatementKind {
    /// `SELECT ... FROM ...`, `SELECT ... INTO ... FROM ...`
    DataQuery { text: String },

    /// `INSERT ... VALUES (...)`, `INSERT ... SELECT ...`, `UPDATE`, `DELETE`
    DataManipulation { text: String },

    /// `CREATE`, `ALTER`, `DROP`, `TRUNCATE`
    DataDefinition { text: String },

    /// `DECLARE @a int, @b date`
    Declare { variables: Vec<Variable> },

    /// `SET @a = <value>`
    Assign { name: String, value: String },

    /// `WHILE <condition> BEGIN ... END`
    ///
    /// The condition is the raw text between the keywords, surrounding
    /// whitespace included.
    While { condition: String, body: Block },

    /// Nested `BEGIN ... END`
    Block(Block),
}

impl StatementKind {
    /// Short name used in logs and test failure messages
    pub fn describe(&self) -> &'static str {
        match self {
            StatementKind::DataQuery { .. } => "query",
            StatementKind::DataManipulation { .. } => "dml",
            StatementKind::DataDefinition { .. } => "ddl",
            StatementKind::Declare { .. } => "declare",
            StatementKind::Assign { .. } => "set",
            StatementKind::While { .. } => "while",
            StatementKind::Block(_) => "block",
        }
    }
}
