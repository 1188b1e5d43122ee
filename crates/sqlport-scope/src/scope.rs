//! Declared variables and the scope that owns them

use serde::{Deserialize, Serialize};

use crate::ScopeError;

/// Sigil that marks a local variable in the source dialect
pub const SIGIL: char = '@';

/// A declared variable: `@name type`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    /// Raw name token, sigil included
    pub name: String,
    /// Raw type text, e.g. `int` or `varchar(10)`
    pub declared_type: String,
}

impl Variable {
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
        }
    }

    /// The name with a leading sigil rewritten to the `v_` prefix
    pub fn translated_name(&self) -> String {
        translate_name(&self.name)
    }
}

/// Rewrite `@x` to `v_x`; names without a sigil are returned unchanged.
pub fn translate_name(name: &str) -> String {
    match name.strip_prefix(SIGIL) {
        Some(rest) => format!("v_{}", rest),
        None => name.to_string(),
    }
}

/// Variables declared at one nesting level, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    variables: Vec<Variable>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(&mut self, variable: Variable) {
        self.variables.push(variable);
    }

    pub fn declare_all(&mut self, variables: impl IntoIterator<Item = Variable>) {
        self.variables.extend(variables);
    }

    /// Look up `name` at this level only
    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Resolve an assignment target; `offset` locates the name for diagnostics.
    pub fn resolve(&self, name: &str, offset: usize) -> Result<&Variable, ScopeError> {
        self.get(name).ok_or_else(|| ScopeError::UndeclaredVariable {
            name: name.to_string(),
            offset,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}
