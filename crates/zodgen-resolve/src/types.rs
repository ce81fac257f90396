use serde::Serialize;
use zodgen_core::types::{ResolvedStatements, TypeImportSet};
use zodgen_parsers::treesitter::ParseError;

/// Prefix of the single error emitted when candidates stay unresolved.
pub const UNRESOLVED_MESSAGE: &str =
    "Some schemas can't be generated due to circular dependencies:";

/// Outcome of the bounded resolution loop.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    /// Placed validators, in emission order.
    pub statements: ResolvedStatements,
    /// Type names referenced by deferred (`z.lazy`) validators.
    pub type_imports: TypeImportSet,
    /// Names that must be imported as values (enums).
    pub value_imports: TypeImportSet,
    /// var names of candidates never placed, in extraction order.
    pub unresolved: Vec<String>,
    /// Rounds actually run.
    pub rounds: u32,
}

/// Why a candidate was left unresolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnresolvedCause {
    /// Part of a dependency cycle spanning two or more declarations.
    Cycle { members: Vec<String> },
    /// References a validator no declaration in the source produces.
    MissingDependency { missing: Vec<String> },
    /// Waits on candidates that can never be placed.
    Blocked { by: Vec<String> },
    /// Placeable, but the round limit ran out first.
    Starved,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedEntry {
    pub var_name: String,
    pub type_name: String,
    #[serde(flatten)]
    pub cause: UnresolvedCause,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UnresolvedReport {
    pub entries: Vec<UnresolvedEntry>,
}

impl UnresolvedReport {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn var_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.var_name.as_str())
    }

    /// The flat error string listing every unresolved var name, one per line.
    pub fn error_message(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        let mut message = String::from(UNRESOLVED_MESSAGE);
        for name in self.var_names() {
            message.push('\n');
            message.push_str(name);
        }
        Some(message)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("`{first}` and `{second}` both map to validator name `{var_name}`")]
    NameCollision {
        var_name: String,
        first: String,
        second: String,
    },
}
