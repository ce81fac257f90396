use std::collections::HashMap;

use zodgen_core::config::DEFAULT_MAX_RUN;
use zodgen_core::naming::{default_schema_name, SchemaNamer};
use zodgen_core::types::DeclarationCandidate;
use zodgen_parsers::treesitter::SourceFile;
use zodgen_parsers::typescript::{compile_declaration, CompileOptions};

use crate::diagnostics::classify;
use crate::resolver::resolve;
use crate::types::{GenerateError, Resolution, UnresolvedReport};

pub type DeclarationFilter = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// Options for one generation run over a single source text.
pub struct GenerateOptions {
    pub max_run: u32,
    /// Declarations whose names fail the filter are never extracted.
    pub name_filter: DeclarationFilter,
    pub get_schema_name: SchemaNamer,
    pub keep_comments: bool,
    pub skip_parse_jsdoc: bool,
    /// Parse with the TSX grammar.
    pub tsx: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            max_run: DEFAULT_MAX_RUN,
            name_filter: Box::new(|_: &str| true),
            get_schema_name: Box::new(default_schema_name),
            keep_comments: false,
            skip_parse_jsdoc: false,
            tsx: false,
        }
    }
}

impl std::fmt::Debug for GenerateOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerateOptions")
            .field("max_run", &self.max_run)
            .field("keep_comments", &self.keep_comments)
            .field("skip_parse_jsdoc", &self.skip_parse_jsdoc)
            .field("tsx", &self.tsx)
            .finish_non_exhaustive()
    }
}

/// Everything resolved from one source, ready for assembly.
#[derive(Debug, Clone)]
pub struct Generation {
    pub resolution: Resolution,
    pub report: UnresolvedReport,
    /// Declarations extracted after name filtering.
    pub declarations: usize,
}

impl Generation {
    /// Empty, or a single message listing every unresolved validator.
    pub fn errors(&self) -> Vec<String> {
        self.report.error_message().into_iter().collect()
    }

    pub fn has_circular_dependencies(&self) -> bool {
        !self.resolution.type_imports.is_empty()
    }
}

/// Extract, compile, and resolve every declaration in `source`.
///
/// Fails only before resolution starts: on syntax errors, or when two
/// declarations map to the same validator name.
pub fn resolve_source(
    source: &str,
    options: &GenerateOptions,
) -> Result<Generation, GenerateError> {
    let file = if options.tsx {
        SourceFile::parse_tsx(source)?
    } else {
        SourceFile::parse(source)?
    };
    let declarations = file.declarations(&*options.name_filter)?;

    let compile_options = CompileOptions {
        get_schema_name: &*options.get_schema_name,
        get_dependency_name: &*options.get_schema_name,
        keep_comments: options.keep_comments,
        skip_parse_jsdoc: options.skip_parse_jsdoc,
    };
    let candidates: Vec<DeclarationCandidate> = declarations
        .iter()
        .map(|d| compile_declaration(d, &compile_options))
        .collect();
    check_unique_names(&candidates)?;

    let resolution = resolve(&candidates, options.max_run);
    let report = classify(&candidates, &resolution);
    for entry in &report.entries {
        tracing::warn!(
            var_name = %entry.var_name,
            cause = ?entry.cause,
            "validator left unresolved"
        );
    }

    Ok(Generation {
        resolution,
        report,
        declarations: candidates.len(),
    })
}

fn check_unique_names(candidates: &[DeclarationCandidate]) -> Result<(), GenerateError> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for c in candidates {
        if let Some(first) = seen.insert(&c.var_name, &c.type_name) {
            return Err(GenerateError::NameCollision {
                var_name: c.var_name.clone(),
                first: first.to_string(),
                second: c.type_name.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
