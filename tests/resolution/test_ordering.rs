// Tests for emission order of resolved validators

use zodgen_resolve::engine::{resolve_source, GenerateOptions};

use super::common::SHOP_TS;

fn order(source: &str, max_run: u32) -> Vec<String> {
    let options = GenerateOptions {
        max_run,
        ..GenerateOptions::default()
    };
    let generation = resolve_source(source, &options).unwrap();
    generation.resolution.statements.keys().cloned().collect()
}

#[test]
/// Independent declarations resolve in the first round, dependents after.
fn test_shop_fixture_order() {
    assert_eq!(
        order(SHOP_TS, 10),
        vec![
            "orderLineSchema",
            "orderStatusSchema",
            "contactSchema",
            "categorySchema",
            "customerSchema",
            "orderSchema",
        ]
    );
}

#[test]
/// A chain of length n needs n rounds regardless of declaration order.
fn test_chain_needs_one_round_per_link() {
    let forward = "type A = string;\ntype B = { a: A };\ntype C = { b: B };\ntype D = { c: C };\n";
    let backward = "type D = { c: C };\ntype C = { b: B };\ntype B = { a: A };\ntype A = string;\n";
    for source in [forward, backward] {
        assert_eq!(order(source, 4), vec!["aSchema", "bSchema", "cSchema", "dSchema"]);
        assert_eq!(order(source, 3).len(), 3);
    }
}

#[test]
/// Every validator appears after every validator it references.
fn test_order_is_topological() {
    let source = r#"
type Invoice = { order: Order; payer: Party; lines: Line[] };
type Line = { product: Product; tax: Tax };
type Order = { lines: Line[]; buyer: Party };
type Product = { id: string; tax: Tax };
type Party = { name: string };
type Tax = { rate: number };
"#;
    let placed = order(source, 10);
    let pos = |name: &str| placed.iter().position(|p| p == name).unwrap();
    assert_eq!(placed.len(), 6);
    assert!(pos("taxSchema") < pos("productSchema"));
    assert!(pos("productSchema") < pos("lineSchema"));
    assert!(pos("lineSchema") < pos("orderSchema"));
    assert!(pos("partySchema") < pos("orderSchema"));
    assert!(pos("orderSchema") < pos("invoiceSchema"));
}

#[test]
/// Repeated runs on identical input place validators identically.
fn test_order_is_stable() {
    let first = order(SHOP_TS, 10);
    for _ in 0..5 {
        assert_eq!(order(SHOP_TS, 10), first);
    }
}
