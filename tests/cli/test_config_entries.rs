// Tests for config-driven generation and `zodgen list`

use std::fs;

use super::common::{project, stderr, stdout, zodgen, MUTUAL_TS, SHOP_TS, TREE_TS};

const TWO_ENTRIES: &str = r#"[
  { "name": "shop", "input": "src/shop.ts", "output": "src/shop.zod.ts" },
  { "name": "tree", "input": "src/tree.ts", "output": "src/tree.zod.ts",
    "schemaNameSuffix": "Validator" }
]"#;

#[test]
fn test_generate_all_entries() {
    let dir = project(&[
        ("zodgen.config.json", TWO_ENTRIES),
        ("src/shop.ts", SHOP_TS),
        ("src/tree.ts", TREE_TS),
    ]);
    let out = zodgen(&dir, &["generate", "--all"]);
    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));
    let shop = fs::read_to_string(dir.path().join("src/shop.zod.ts")).unwrap();
    assert!(shop.contains("from \"./shop\";"));
    let tree = fs::read_to_string(dir.path().join("src/tree.zod.ts")).unwrap();
    assert!(tree.contains("export const nodeValidator: z.ZodSchema<Node>"));
}

#[test]
fn test_generate_single_named_entry() {
    let dir = project(&[
        ("zodgen.config.json", TWO_ENTRIES),
        ("src/shop.ts", SHOP_TS),
        ("src/tree.ts", TREE_TS),
    ]);
    let out = zodgen(&dir, &["generate", "--config", "tree"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(dir.path().join("src/tree.zod.ts").exists());
    assert!(!dir.path().join("src/shop.zod.ts").exists());
}

#[test]
fn test_multiple_entries_need_selection() {
    let dir = project(&[("zodgen.config.json", TWO_ENTRIES)]);
    let out = zodgen(&dir, &["generate"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("pass --config NAME or --all"));
}

#[test]
fn test_unknown_entry_name() {
    let dir = project(&[("zodgen.config.json", TWO_ENTRIES)]);
    let out = zodgen(&dir, &["generate", "--config", "missing"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("no config entry named 'missing'"));
}

#[test]
fn test_exclude_pattern_filters_declarations() {
    let config = r#"{ "input": "mutual.ts", "exclude": ["B"] }"#;
    let dir = project(&[("zodgen.config.json", config), ("mutual.ts", MUTUAL_TS)]);
    let out = zodgen(&dir, &["generate"]);
    // With B excluded, A references an undeclared validator.
    assert_eq!(out.status.code(), Some(0));
    assert!(stderr(&out).contains("no declaration for bSchema"));
}

#[test]
fn test_list_entries() {
    let dir = project(&[("zodgen.config.json", TWO_ENTRIES)]);
    let out = zodgen(&dir, &["list"]);
    assert_eq!(out.status.code(), Some(0));
    let text = stdout(&out);
    assert!(text.contains("shop\n  input:  src/shop.ts\n  output: src/shop.zod.ts\n"));
    assert!(text.contains("tree\n"));

    let out = zodgen(&dir, &["list", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(json["entries"].as_array().unwrap().len(), 2);
    assert_eq!(json["entries"][1]["name"], "tree");
}

#[test]
fn test_malformed_config() {
    let dir = project(&[("zodgen.config.json", "{ not json")]);
    let out = zodgen(&dir, &["list"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("failed to parse"));
}
