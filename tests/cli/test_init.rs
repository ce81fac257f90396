// Tests for `zodgen init`

use std::fs;

use super::common::{project, stderr, zodgen};

#[test]
fn test_init_writes_starter_config() {
    let dir = project(&[("src/types.ts", "export type Id = string;\n")]);
    let out = zodgen(&dir, &["init"]);
    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));
    let written = fs::read_to_string(dir.path().join("zodgen.config.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(json["input"], "src/types.ts");
    assert_eq!(json["output"], "src/types.zod.ts");
    assert_eq!(json["maxRun"], 10);
}

#[test]
fn test_init_then_generate() {
    let dir = project(&[("src/types.ts", "export type Id = string;\n")]);
    assert_eq!(zodgen(&dir, &["init"]).status.code(), Some(0));
    let out = zodgen(&dir, &["generate"]);
    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));
    let module = fs::read_to_string(dir.path().join("src/types.zod.ts")).unwrap();
    assert!(module.contains("export const idSchema = z.string();"));
}

#[test]
fn test_init_yes_overwrites() {
    let dir = project(&[("zodgen.config.json", "{ \"input\": \"old.ts\" }")]);
    let out = zodgen(&dir, &["init", "--yes"]);
    assert_eq!(out.status.code(), Some(0));
    let written = fs::read_to_string(dir.path().join("zodgen.config.json")).unwrap();
    assert!(!written.contains("old.ts"));
}

#[test]
/// Without a terminal the overwrite prompt cannot be answered.
fn test_init_refuses_overwrite_without_terminal() {
    let dir = project(&[("zodgen.config.json", "{ \"input\": \"old.ts\" }")]);
    let out = zodgen(&dir, &["init"]);
    assert_eq!(out.status.code(), Some(2));
    let written = fs::read_to_string(dir.path().join("zodgen.config.json")).unwrap();
    assert!(written.contains("old.ts"));
}
