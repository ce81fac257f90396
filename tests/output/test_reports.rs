// Tests for human and JSON command reports

use zodgen_output::human::HumanFormatter;
use zodgen_output::json::JsonFormatter;
use zodgen_output::report::{EntryReport, EntryStatus, GenerateReport};
use zodgen_output::{generate, OutputFormatter};
use zodgen_resolve::engine::GenerateOptions;

use super::common::MUTUAL_TS;

fn mutual_report() -> GenerateReport {
    let output = generate(MUTUAL_TS, &GenerateOptions::default()).unwrap();
    let entry = EntryReport {
        name: "mutual".into(),
        input: "mutual.ts".into(),
        output: Some("mutual.zod.ts".into()),
        with_test: None,
        status: EntryStatus::Generated,
        declarations: output.generation().declarations,
        validators: output.validator_names().map(str::to_string).collect(),
        deferred: output.deferred_types().map(str::to_string).collect(),
        has_circular_dependencies: output.has_circular_dependencies,
        errors: output.errors.clone(),
        unresolved: output.unresolved.clone(),
        failure: None,
    };
    GenerateReport::new("generate", vec![entry])
}

#[test]
fn test_json_report_carries_classification() {
    let json: serde_json::Value =
        serde_json::from_str(&JsonFormatter.format_generate(&mutual_report())).unwrap();
    let entry = &json["entries"][0];
    assert_eq!(entry["declarations"], 2);
    assert_eq!(entry["validators"].as_array().unwrap().len(), 0);
    assert_eq!(entry["unresolved"]["entries"][0]["kind"], "cycle");
    assert_eq!(entry["unresolved"]["entries"][0]["members"][1], "bSchema");
    assert!(entry["errors"][0]
        .as_str()
        .unwrap()
        .starts_with("Some schemas can't be generated"));
}

#[test]
fn test_human_report_explains_cycle() {
    let out = HumanFormatter.format_generate(&mutual_report());
    assert!(out.starts_with("mutual: mutual.ts -> mutual.zod.ts (0 of 2 validator(s))\n"));
    assert!(out.contains("  unresolved aSchema: cycle through aSchema -> bSchema\n"));
    assert!(out.contains("  unresolved bSchema: cycle through aSchema -> bSchema\n"));
}
