use sqlport::ast::{Document, Statement};

/// Assert that parsing succeeds
pub fn assert_parses(source: &str) -> Document {
    sqlport::parse(source)
        .unwrap_or_else(|e| panic!("Expected source to parse successfully: {}", e.marked_source(source)))
}

/// Assert that parsing fails
pub fn assert_parse_fails(source: &str) -> sqlport::Error {
    match sqlport::parse(source) {
        Ok(doc) => panic!("Expected source to fail parsing, got {:?}", doc),
        Err(e) => e,
    }
}

/// Statement kinds at the top level of a document
pub fn kinds(statements: &[Statement]) -> Vec<&'static str> {
    statements.iter().map(|s| s.kind.describe()).collect()
}
