//! sqlport-scope: variable scopes for batch scripts
//!
//! Every document and every `BEGIN ... END` block owns one [`Scope`]. A
//! `DECLARE` appends to the scope of the level it appears at, and a `SET`
//! must name a variable declared at that same level. Lookups never fall
//! through to an enclosing scope: a block does not inherit outer
//! declarations, and its own declarations are invisible outside it.
//!
//! # Example
//!
//! ```
//! use sqlport_scope::{Scope, Variable};
//!
//! let mut scope = Scope::new();
//! scope.declare(Variable::new("@i", "int"));
//! assert!(scope.resolve("@i", 0).is_ok());
//! assert!(scope.resolve("@j", 0).is_err());
//! ```

mod error;
mod scope;

pub use error::ScopeError;
pub use scope::{translate_name, Scope, Variable, SIGIL};
