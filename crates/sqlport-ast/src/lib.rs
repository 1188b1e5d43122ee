//! sqlport AST - statement tree for procedural SQL batch scripts
//!
//! Query and DML text is kept as opaque fragments; only the procedural
//! skeleton (declarations, assignments, loops, blocks) is structured.
//! Every node renders into both target dialects, see [`Render`].

mod render;
mod span;
mod stmt;

pub use render::*;
pub use span::*;
pub use stmt::*;

pub use sqlport_scope::{Scope, Variable};

use serde::{Deserialize, Serialize};

/// A parsed script: the top-level statements and the document scope
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    pub statements: Vec<Statement>,
    pub scope: Scope,
}

impl Document {
    /// Every statement in document order, descending into blocks and loop bodies
    pub fn walk(&self) -> Vec<&Statement> {
        let mut out = Vec::new();
        collect(&self.statements, &mut out);
        out
    }
}

fn collect<'a>(statements: &'a [Statement], out: &mut Vec<&'a Statement>) {
    for stmt in statements {
        out.push(stmt);
        match &stmt.kind {
            StatementKind::Block(block) | StatementKind::While { body: block, .. } => {
                collect(&block.statements, out)
            }
            _ => {}
        }
    }
}
