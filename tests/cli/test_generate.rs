// Tests for `zodgen generate` with explicit paths

use std::fs;

use super::common::{project, stdout, zodgen, SHOP_TS, TREE_TS};

#[test]
/// Without an output path the validator module goes to stdout.
fn test_generate_to_stdout() {
    let dir = project(&[("src/tree.ts", TREE_TS)]);
    let out = zodgen(&dir, &["generate", "src/tree.ts"]);
    assert_eq!(out.status.code(), Some(0));
    let text = stdout(&out);
    assert!(text.starts_with("// Generated by zodgen\n"));
    assert!(text.contains("import { Node } from \"./src/tree\";"));
    assert!(text.contains("z.lazy(() => "));
}

#[test]
/// Output and test modules import each other with relative specifiers.
fn test_generate_writes_files() {
    let dir = project(&[("src/shop.ts", SHOP_TS)]);
    let out = zodgen(
        &dir,
        &[
            "generate",
            "src/shop.ts",
            "gen/shop.zod.ts",
            "--with-test",
            "gen/__tests__/shop.test.ts",
        ],
    );
    assert_eq!(out.status.code(), Some(0));
    assert!(stdout(&out).is_empty());

    let module = fs::read_to_string(dir.path().join("gen/shop.zod.ts")).unwrap();
    assert!(module.contains("from \"../src/shop\";"));
    assert!(module.contains("export const orderSchema = z.object({"));

    let test = fs::read_to_string(dir.path().join("gen/__tests__/shop.test.ts")).unwrap();
    assert!(test.contains("import * as spec from \"../../src/shop\";"));
    assert!(test.contains("import * as generated from \"../shop.zod\";"));
    assert!(test.contains("expectType<spec.Order>({} as orderSchemaInferredType);"));
}

#[test]
/// Rerunning on the same input rewrites byte-identical modules.
fn test_generate_is_idempotent() {
    let dir = project(&[("shop.ts", SHOP_TS)]);
    let first = stdout(&zodgen(&dir, &["generate", "shop.ts"]));
    let second = stdout(&zodgen(&dir, &["generate", "shop.ts"]));
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
/// `--max-run 1` leaves the tail of a chain unresolved but still succeeds.
fn test_generate_round_limit_warns() {
    let source = "export type A = string;\nexport type B = { a: A };\nexport type C = { b: B };\n";
    let dir = project(&[("chain.ts", source)]);
    let out = zodgen(&dir, &["generate", "chain.ts", "--max-run", "1"]);
    assert_eq!(out.status.code(), Some(0));
    let text = stdout(&out);
    assert!(text.contains("export const aSchema"));
    assert!(!text.contains("export const bSchema"));
    let err = super::common::stderr(&out);
    assert!(err.contains("bSchema\ncSchema"));
    assert!(err.contains("round limit reached"));
}

#[test]
/// `--json` prints the machine-readable report on stdout when the module goes to a file.
fn test_generate_json_report_with_file_output() {
    let dir = project(&[("tree.ts", TREE_TS)]);
    let out = zodgen(&dir, &["--json", "generate", "tree.ts", "tree.zod.ts"]);
    assert_eq!(out.status.code(), Some(0));
    let json: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(json["command"], "generate");
    assert_eq!(json["entries"][0]["status"], "generated");
    assert_eq!(json["entries"][0]["has_circular_dependencies"], true);
    assert_eq!(json["entries"][0]["deferred"][0], "Node");
}
