use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::ast::Statement;

/// Kinds of top-level TypeScript declarations zodgen compiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    TypeAlias,
    Interface,
    Enum,
}

impl DeclarationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclarationKind::TypeAlias => "type_alias",
            DeclarationKind::Interface => "interface",
            DeclarationKind::Enum => "enum",
        }
    }
}

impl std::fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declaration paired with its not-yet-placed validator statement.
///
/// `dependencies` holds validator names referenced by `statement`, in
/// first-occurrence order without duplicates. It may contain `var_name`
/// itself when the declaration references its own type.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclarationCandidate {
    pub type_name: String,
    pub var_name: String,
    pub statement: Statement,
    pub dependencies: Vec<String>,
    /// The validator references the declaration as a runtime value (enums).
    pub requires_import: bool,
    /// Number of generic parameters on the declaration.
    pub type_parameters: usize,
}

impl DeclarationCandidate {
    /// True when the candidate lists its own validator name as a dependency.
    pub fn is_self_referencing(&self) -> bool {
        self.dependencies.iter().any(|d| d == &self.var_name)
    }

    /// The declaration as a type expression, e.g. `Tree<any>` for `Tree<T>`.
    pub fn type_reference(&self) -> String {
        type_reference(&self.type_name, self.type_parameters)
    }

    /// Dependencies other than the candidate itself.
    pub fn foreign_dependencies(&self) -> impl Iterator<Item = &str> {
        self.dependencies
            .iter()
            .map(String::as_str)
            .filter(move |d| *d != self.var_name)
    }
}

/// A candidate whose dependencies are all placed, possibly rewritten into
/// deferred form.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStatement {
    pub type_name: String,
    pub type_parameters: usize,
    pub value: Statement,
}

impl ResolvedStatement {
    pub fn type_reference(&self) -> String {
        type_reference(&self.type_name, self.type_parameters)
    }
}

/// `name`, or `name<any, ...>` with one `any` per generic parameter.
pub fn type_reference(name: &str, type_parameters: usize) -> String {
    if type_parameters == 0 {
        return name.to_string();
    }
    format!("{name}<{}>", vec!["any"; type_parameters].join(", "))
}

/// Resolved statements keyed by validator name. Insertion order is the
/// emission order.
pub type ResolvedStatements = IndexMap<String, ResolvedStatement>;

/// Original type names that must be imported into the validator module.
pub type TypeImportSet = BTreeSet<String>;
