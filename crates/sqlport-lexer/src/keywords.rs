//! Keyword table
//!
//! Keywords are never a separate token kind: they are `Word` tokens that
//! compare equal, ignoring ASCII case, to one of these strings.

pub const INSERT: &str = "insert";
pub const SELECT: &str = "select";
pub const DELETE: &str = "delete";
pub const UPDATE: &str = "update";
pub const DROP: &str = "drop";
pub const CREATE: &str = "create";
pub const ALTER: &str = "alter";
pub const WHILE: &str = "while";
pub const RETURN: &str = "return";
pub const DECLARE: &str = "declare";
pub const IF: &str = "if";
pub const SET: &str = "set";
pub const WITH: &str = "with";
pub const TRUNCATE: &str = "truncate";
pub const BEGIN: &str = "begin";
pub const END: &str = "end";

pub const INTO: &str = "into";
pub const VALUES: &str = "values";
pub const FROM: &str = "from";
pub const UNION: &str = "union";
pub const ALL: &str = "all";
pub const JOIN: &str = "join";

/// Words that start a new statement. Every scan stops at one of these.
pub const BOUNDARY_KEYWORDS: &[&str] = &[
    INSERT, SELECT, DELETE, UPDATE, DROP, CREATE, ALTER, WHILE, RETURN, DECLARE, IF, SET, WITH,
    TRUNCATE, BEGIN, END,
];

pub fn is_boundary_keyword(word: &str) -> bool {
    BOUNDARY_KEYWORDS
        .iter()
        .any(|kw| kw.eq_ignore_ascii_case(word))
}
