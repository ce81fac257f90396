//! Artifact assembly: resolved statements in, module texts out.

use std::collections::BTreeSet;

use zodgen_core::ast::ZOD_IMPORT;
use zodgen_resolve::engine::{resolve_source, GenerateOptions, Generation};
use zodgen_resolve::types::{GenerateError, UnresolvedReport};

use crate::render::{quote, render_statement};
use crate::test_module::{import_specifier, integration_test_module, HEADER};

/// Result of [`generate`]: diagnostics plus builders for both modules.
#[derive(Debug, Clone)]
pub struct GenerateOutput {
    /// Empty, or a single message listing every unresolved validator.
    pub errors: Vec<String>,
    /// Some validator had to be deferred to break a self-reference.
    pub has_circular_dependencies: bool,
    pub unresolved: UnresolvedReport,
    generation: Generation,
}

/// Generate validators for every declaration in `source`.
pub fn generate(
    source: &str,
    options: &GenerateOptions,
) -> Result<GenerateOutput, GenerateError> {
    let generation = resolve_source(source, options)?;
    Ok(GenerateOutput::from(generation))
}

impl From<Generation> for GenerateOutput {
    fn from(generation: Generation) -> Self {
        Self {
            errors: generation.errors(),
            has_circular_dependencies: generation.has_circular_dependencies(),
            unresolved: generation.report.clone(),
            generation,
        }
    }
}

impl GenerateOutput {
    /// The validator module, importing flagged types from `types_path`.
    pub fn validator_module(&self, types_path: &str) -> String {
        let resolution = &self.generation.resolution;
        let mut out = String::new();
        out.push_str(HEADER);
        out.push('\n');
        out.push_str(&format!("import {{ {ZOD_IMPORT} }} from \"zod\";\n"));

        let imports: BTreeSet<&str> = resolution
            .type_imports
            .iter()
            .chain(&resolution.value_imports)
            .map(String::as_str)
            .collect();
        if !imports.is_empty() {
            let names: Vec<&str> = imports.into_iter().collect();
            out.push_str(&format!(
                "import {{ {} }} from {};\n",
                names.join(", "),
                quote(import_specifier(types_path))
            ));
        }

        for resolved in resolution.statements.values() {
            out.push('\n');
            out.push_str(&render_statement(&resolved.value));
            out.push('\n');
        }
        out
    }

    /// The integration-test module checking the validators in
    /// `validators_path` against the types in `types_path`.
    pub fn test_module(&self, types_path: &str, validators_path: &str) -> String {
        integration_test_module(
            &self.generation.resolution.statements,
            types_path,
            validators_path,
        )
    }

    pub fn generation(&self) -> &Generation {
        &self.generation
    }

    /// Names of the validators emitted, in order.
    pub fn validator_names(&self) -> impl Iterator<Item = &str> {
        self.generation.resolution.statements.keys().map(String::as_str)
    }

    /// Type names whose validators were deferred.
    pub fn deferred_types(&self) -> impl Iterator<Item = &str> {
        self.generation.resolution.type_imports.iter().map(String::as_str)
    }
}

#[cfg(test)]
#[path = "artifacts_tests.rs"]
mod tests;
