// Tests for classification of unresolved validators

use zodgen_resolve::engine::{resolve_source, GenerateOptions};
use zodgen_resolve::types::UnresolvedCause;

use super::common::MUTUAL_TS;

fn causes(source: &str, max_run: u32) -> Vec<(String, UnresolvedCause)> {
    let options = GenerateOptions {
        max_run,
        ..GenerateOptions::default()
    };
    resolve_source(source, &options)
        .unwrap()
        .report
        .entries
        .into_iter()
        .map(|e| (e.var_name, e.cause))
        .collect()
}

#[test]
fn test_mutual_fixture_is_cycle() {
    let members = vec!["aSchema".to_string(), "bSchema".to_string()];
    assert_eq!(
        causes(MUTUAL_TS, 10),
        vec![
            ("aSchema".to_string(), UnresolvedCause::Cycle { members: members.clone() }),
            ("bSchema".to_string(), UnresolvedCause::Cycle { members }),
        ]
    );
}

#[test]
fn test_round_limit_is_starved() {
    let source = "type A = string;\ntype B = { a: A };\ntype C = { b: B };\n";
    let result = causes(source, 1);
    assert_eq!(result.len(), 2);
    assert!(result.iter().all(|(_, c)| *c == UnresolvedCause::Starved));
}

#[test]
fn test_undeclared_reference_is_missing() {
    let result = causes("type A = { when: Moment };\n", 10);
    assert_eq!(
        result,
        vec![(
            "aSchema".to_string(),
            UnresolvedCause::MissingDependency {
                missing: vec!["momentSchema".to_string()]
            }
        )]
    );
}

#[test]
fn test_dependents_of_cycle_are_blocked() {
    let source = "type A = { b: B };\ntype B = { a: A };\ntype Wrapper = { inner: A };\n";
    let result = causes(source, 10);
    assert_eq!(
        result[2],
        (
            "wrapperSchema".to_string(),
            UnresolvedCause::Blocked {
                by: vec!["aSchema".to_string()]
            }
        )
    );
}

#[test]
fn test_flat_message_unchanged_by_classification() {
    let source = "type A = { b: B };\ntype B = { a: A };\ntype C = { m: Missing };\n";
    let generation = resolve_source(source, &GenerateOptions::default()).unwrap();
    assert_eq!(
        generation.errors(),
        vec!["Some schemas can't be generated due to circular dependencies:\naSchema\nbSchema\ncSchema"]
    );
}
