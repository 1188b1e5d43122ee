//! sqlport - translate procedural T-SQL batches into PL/pgSQL
//!
//! This is the root workspace crate that provides integration tests.
//! The actual implementation is in the workspace member crates.
//!
//! ```
//! use sqlport::{transpile, Dialect};
//!
//! let out = transpile("declare @i int set @i = 1", Dialect::Postgres).unwrap();
//! assert_eq!(out, "DO $$\ndeclare v_i int;set v_i=1;\nEND $$;");
//! ```

// Re-export main crates for convenience
pub use sqlport_ast as ast;
pub use sqlport_lexer as lexer;
pub use sqlport_parser as parser;

pub use sqlport_ast::{render, Dialect, Document, Render};
pub use sqlport_parser::{parse, parse_with_options, Error, ParseOptions, Recovery};

/// Parse `source` and render it in `dialect`
pub fn transpile(source: &str, dialect: Dialect) -> Result<String, Error> {
    let document = parse(source)?;
    Ok(document.render(dialect))
}
