use std::path::Path;

use streaming_iterator::StreamingIterator;
use tree_sitter::{Language, Node, Parser, QueryCursor, Tree};
use zodgen_core::types::DeclarationKind;

use crate::queries;

/// A parsed TypeScript source file.
///
/// Owns the syntax tree and the text it was parsed from, so declarations can
/// borrow nodes from it for compilation.
pub struct SourceFile {
    tree: Tree,
    source: String,
    tsx: bool,
}

/// A top-level declaration extracted from a [`SourceFile`].
#[derive(Debug, Clone)]
pub struct Declaration<'a> {
    pub name: String,
    pub kind: DeclarationKind,
    pub exported: bool,
    /// First line of the declaration (1-based).
    pub line_start: u32,
    /// Last line of the declaration (1-based, inclusive).
    pub line_end: u32,
    /// Raw `/** ... */` block directly above the declaration.
    pub jsdoc: Option<String>,
    pub(crate) node: Node<'a>,
    pub(crate) source: &'a [u8],
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("language error: {0}")]
    Language(String),
    #[error("query error: {0}")]
    Query(String),
    #[error("parse failed")]
    ParseFailed,
    #[error("syntax error at line {line}: {snippet}")]
    Syntax { line: u32, snippet: String },
}

impl SourceFile {
    /// Parse TypeScript source. Sources with syntax errors are rejected.
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        Self::parse_with(source, false)
    }

    /// Parse TSX source (angle-bracket assertions are not allowed).
    pub fn parse_tsx(source: &str) -> Result<Self, ParseError> {
        Self::parse_with(source, true)
    }

    /// Parse using the grammar that matches `path`'s extension.
    pub fn parse_path(path: &Path, source: &str) -> Result<Self, ParseError> {
        let tsx = path.extension().is_some_and(|e| e == "tsx");
        Self::parse_with(source, tsx)
    }

    fn parse_with(source: &str, tsx: bool) -> Result<Self, ParseError> {
        let lang = language(tsx);
        let mut parser = Parser::new();
        parser
            .set_language(&lang)
            .map_err(|e| ParseError::Language(format!("{e}")))?;
        let tree = parser
            .parse(source.as_bytes(), None)
            .ok_or(ParseError::ParseFailed)?;

        if tree.root_node().has_error() {
            let (line, snippet) = first_error(tree.root_node(), source.as_bytes());
            return Err(ParseError::Syntax { line, snippet });
        }

        Ok(Self {
            tree,
            source: source.to_string(),
            tsx,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Top-level `type`, `interface`, and `enum` declarations in source order,
    /// keeping only names accepted by `filter`.
    pub fn declarations(
        &self,
        filter: &dyn Fn(&str) -> bool,
    ) -> Result<Vec<Declaration<'_>>, ParseError> {
        let lang = language(self.tsx);
        let query = queries::declaration_query(&lang).map_err(ParseError::Query)?;
        let capture_names = query.capture_names();
        let bytes = self.source.as_bytes();
        let root = self.tree.root_node();

        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&query, root, bytes);
        let mut decls = Vec::new();

        while let Some(m) = matches.next() {
            let mut name = None;
            let mut kind = None;
            let mut decl_node = None;
            let mut export_node = None;

            for cap in m.captures {
                match capture_names[cap.index as usize] {
                    "decl.name" => name = Some(node_text(cap.node, bytes).to_string()),
                    "decl.type" => {
                        kind = Some(DeclarationKind::TypeAlias);
                        decl_node = Some(cap.node);
                    }
                    "decl.interface" => {
                        kind = Some(DeclarationKind::Interface);
                        decl_node = Some(cap.node);
                    }
                    "decl.enum" => {
                        kind = Some(DeclarationKind::Enum);
                        decl_node = Some(cap.node);
                    }
                    "decl.export" => export_node = Some(cap.node),
                    _ => {}
                }
            }

            let (Some(name), Some(kind), Some(node)) = (name, kind, decl_node) else {
                continue;
            };
            if !filter(&name) {
                tracing::trace!(%name, "declaration skipped by name filter");
                continue;
            }

            let outer = export_node.unwrap_or(node);
            decls.push(Declaration {
                name,
                kind,
                exported: export_node.is_some(),
                line_start: outer.start_position().row as u32 + 1,
                line_end: outer.end_position().row as u32 + 1,
                jsdoc: leading_jsdoc(outer, bytes),
                node,
                source: bytes,
            });
        }

        // Query matches are not guaranteed to come back in document order
        // across patterns.
        decls.sort_by_key(|d| d.node.start_byte());
        Ok(decls)
    }
}

fn language(tsx: bool) -> Language {
    if tsx {
        tree_sitter_typescript::LANGUAGE_TSX.into()
    } else {
        tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()
    }
}

pub(crate) fn node_text<'a>(node: Node<'a>, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

/// The `/** ... */` comment directly above `node`, if any.
pub(crate) fn leading_jsdoc(node: Node<'_>, source: &[u8]) -> Option<String> {
    let prev = node.prev_sibling()?;
    if prev.kind() != "comment" {
        return None;
    }
    // A blank line between comment and declaration detaches it.
    if prev.end_position().row + 1 < node.start_position().row {
        return None;
    }
    let text = node_text(prev, source);
    text.starts_with("/**").then(|| text.to_string())
}

fn first_error(root: Node<'_>, source: &[u8]) -> (u32, String) {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            let line = node.start_position().row as u32 + 1;
            let snippet = if node.is_missing() {
                format!("missing {}", node.kind())
            } else {
                node_text(node, source).lines().next().unwrap_or("").trim().to_string()
            };
            return (line, snippet);
        }
        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
        // Reverse so the leftmost child is visited first.
        stack.extend(children.into_iter().rev().filter(|c| c.has_error() || c.is_missing()));
    }
    (root.start_position().row as u32 + 1, String::new())
}
