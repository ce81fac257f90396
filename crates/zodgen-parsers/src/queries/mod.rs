use tree_sitter::{Language, Query};

pub const TYPESCRIPT_QUERIES: &str = include_str!("typescript.scm");

/// Compiles the declaration query for TypeScript.
pub fn declaration_query(lang: &Language) -> Result<Query, String> {
    Query::new(lang, TYPESCRIPT_QUERIES)
        .map_err(|e| format!("query compilation error for typescript: {e}"))
}
