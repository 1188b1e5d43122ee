//! sqlport Parser - recursive descent parser for batch scripts
//!
//! Parses T-SQL style batches into a [`Document`]. Recognized statements:
//! - `INSERT INTO ... VALUES (...)` and `INSERT INTO ... SELECT ...`
//! - `SELECT ... FROM ...` and `SELECT ... INTO ... FROM ...`, with nested
//!   sub-selects, `UNION [ALL]` and `JOIN`
//! - `UPDATE`, `DELETE`, `CREATE`, `ALTER`, `DROP`, `TRUNCATE` as opaque text
//! - `DECLARE`, `SET`, `WHILE ... BEGIN ... END` and `BEGIN ... END` blocks
//!
//! Anything else between statements is skipped token by token.

mod diagnostics;
mod error;
mod options;
mod parser;

pub use error::*;
pub use options::*;
pub use parser::*;

use sqlport_ast::Document;

/// Parse a script with the default (strict) options
pub fn parse(source: &str) -> Result<Document, Error> {
    parse_with_options(source, &ParseOptions::default())
}

pub fn parse_with_options(source: &str, options: &ParseOptions) -> Result<Document, Error> {
    let mut parser = Parser::new(source, options.clone());
    parser.parse_document()
}
