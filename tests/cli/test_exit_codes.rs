// Tests for CLI exit code behavior

use super::common::{project, stderr, zodgen, MUTUAL_TS, TREE_TS};

#[test]
/// Exit code 0 when every validator resolves.
fn test_exit_code_0_clean() {
    let dir = project(&[("tree.ts", TREE_TS)]);
    assert_eq!(zodgen(&dir, &["generate", "tree.ts", "--strict"]).status.code(), Some(0));
}

#[test]
/// Unresolved validators warn by default.
fn test_exit_code_0_unresolved_without_strict() {
    let dir = project(&[("mutual.ts", MUTUAL_TS)]);
    let out = zodgen(&dir, &["generate", "mutual.ts"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(stderr(&out).contains("Some schemas can't be generated due to circular dependencies:"));
}

#[test]
/// Exit code 1 when validators are unresolved under --strict.
fn test_exit_code_1_unresolved_strict() {
    let dir = project(&[("mutual.ts", MUTUAL_TS)]);
    let out = zodgen(&dir, &["generate", "mutual.ts", "--strict"]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
/// Exit code 2 for a missing input file.
fn test_exit_code_2_missing_input() {
    let dir = project(&[]);
    let out = zodgen(&dir, &["generate", "nope.ts"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("failed to read nope.ts"));
}

#[test]
/// Exit code 2 for a syntax error in the input.
fn test_exit_code_2_syntax_error() {
    let dir = project(&[("bad.ts", "export type = ;\n")]);
    let out = zodgen(&dir, &["generate", "bad.ts"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("syntax error"));
}

#[test]
/// Exit code 2 when two declarations share a validator name.
fn test_exit_code_2_name_collision() {
    let dir = project(&[("dup.ts", "type user_id = string;\ntype UserId = number;\n")]);
    let out = zodgen(&dir, &["generate", "dup.ts"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("userIdSchema"));
}

#[test]
/// Exit code 2 without input or config.
fn test_exit_code_2_nothing_to_generate() {
    let dir = project(&[]);
    let out = zodgen(&dir, &["generate"]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
/// Exit code 2 for an unknown completion shell.
fn test_exit_code_2_bad_shell() {
    let dir = project(&[]);
    assert_eq!(zodgen(&dir, &["completion", "tcsh"]).status.code(), Some(2));
    assert_eq!(zodgen(&dir, &["completion", "bash"]).status.code(), Some(0));
}
