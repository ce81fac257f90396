//! Integration-test module generation.
//!
//! The module never runs; it type-checks that each validator's inferred type
//! and the original declaration are mutually assignable.

use zodgen_core::ast::ZOD_IMPORT;
use zodgen_core::types::ResolvedStatements;

use crate::render::quote;

pub const HEADER: &str = "// Generated by zodgen";

/// Strip a `.ts`/`.tsx` extension so the path works as an import specifier.
pub fn import_specifier(path: &str) -> &str {
    path.strip_suffix(".tsx")
        .or_else(|| path.strip_suffix(".ts"))
        .unwrap_or(path)
}

pub fn integration_test_module(
    statements: &ResolvedStatements,
    types_path: &str,
    validators_path: &str,
) -> String {
    let mut out = String::new();
    out.push_str(HEADER);
    out.push('\n');
    out.push_str(&format!("import {{ {ZOD_IMPORT} }} from \"zod\";\n\n"));
    out.push_str(&format!(
        "import * as spec from {};\n",
        quote(import_specifier(types_path))
    ));
    out.push_str(&format!(
        "import * as generated from {};\n\n",
        quote(import_specifier(validators_path))
    ));
    out.push_str("// eslint-disable-next-line @typescript-eslint/no-unused-vars\n");
    out.push_str("function expectType<T>(_: T) {\n  /* noop */\n}\n");

    for (var_name, resolved) in statements {
        let inferred = format!("{var_name}InferredType");
        out.push('\n');
        out.push_str(&format!(
            "export type {inferred} = {ZOD_IMPORT}.infer<typeof generated.{var_name}>;\n"
        ));
        let type_reference = resolved.type_reference();
        out.push_str(&format!(
            "expectType<spec.{type_reference}>({{}} as {inferred});\n"
        ));
        out.push_str(&format!(
            "expectType<{inferred}>({{}} as spec.{type_reference});\n"
        ));
    }
    out
}
