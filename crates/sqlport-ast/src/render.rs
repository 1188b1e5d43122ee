//! Dialect renderer
//!
//! Every node renders into two forms from the same parsed data:
//!
//! - [`Dialect::Postgres`]: the translated form. Statements get a `;`
//!   terminator, `@x` variables become `v_x`, blocks become
//!   `BEGIN ... END` and the document is wrapped in a `DO $$ ... END $$;`
//!   anonymous block.
//! - [`Dialect::SqlServer`]: the passthrough form, close to the input.
//!
//! Rendering is a pure function of the tree.

use serde::{Deserialize, Serialize};
use sqlport_scope::{translate_name, Variable};

use crate::{Block, Document, Statement, StatementKind};

/// Output dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Translated PL/pgSQL anonymous-block form
    Postgres,
    /// Passthrough T-SQL form
    SqlServer,
}

/// Trait for rendering AST nodes as SQL text in a target dialect.
pub trait Render {
    fn render(&self, dialect: Dialect) -> String;
}

/// Render any node in `dialect`
pub fn render(node: &impl Render, dialect: Dialect) -> String {
    node.render(dialect)
}

fn concat(statements: &[Statement], dialect: Dialect) -> String {
    statements.iter().map(|s| s.render(dialect)).collect()
}

fn declare_list(variables: &[Variable], dialect: Dialect) -> String {
    variables
        .iter()
        .map(|v| {
            let name = match dialect {
                Dialect::Postgres => v.translated_name(),
                Dialect::SqlServer => v.name.clone(),
            };
            format!("{} {}", name, v.declared_type)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

// ===== Document =====

impl Render for Document {
    fn render(&self, dialect: Dialect) -> String {
        let body = concat(&self.statements, dialect);
        match dialect {
            Dialect::Postgres => format!("DO $$\n{}\nEND $$;", body),
            Dialect::SqlServer => body,
        }
    }
}

// ===== Block =====

impl Render for Block {
    fn render(&self, dialect: Dialect) -> String {
        let body = concat(&self.statements, dialect);
        match dialect {
            Dialect::Postgres => format!("BEGIN{}\nEND\n", body),
            Dialect::SqlServer => body,
        }
    }
}

// ===== Statement =====

impl Render for Statement {
    fn render(&self, dialect: Dialect) -> String {
        self.kind.render(dialect)
    }
}

impl Render for StatementKind {
    fn render(&self, dialect: Dialect) -> String {
        match self {
            StatementKind::DataQuery { text }
            | StatementKind::DataManipulation { text }
            | StatementKind::DataDefinition { text } => match dialect {
                Dialect::Postgres => format!("{};", text),
                Dialect::SqlServer => text.clone(),
            },

            StatementKind::Declare { variables } => match dialect {
                Dialect::Postgres => format!("declare {};", declare_list(variables, dialect)),
                Dialect::SqlServer => format!("declare {}", declare_list(variables, dialect)),
            },

            StatementKind::Assign { name, value } => match dialect {
                Dialect::Postgres => format!("set {}={};", translate_name(name), value),
                Dialect::SqlServer => format!("set {}={};", name, value),
            },

            // Loop bodies stay in passthrough form for both dialects.
            StatementKind::While { condition, body } => {
                let body = body.render(Dialect::SqlServer);
                match dialect {
                    Dialect::Postgres => format!("WHILE{}LOOP\n{}END LOOP;", condition, body),
                    Dialect::SqlServer => format!("WHILE{}BEGIN\n{}END", condition, body),
                }
            }

            StatementKind::Block(block) => block.render(dialect),
        }
    }
}
