// Tests for self-reference rewriting and unresolvable cycles

use zodgen_output::generate;
use zodgen_resolve::engine::GenerateOptions;

use super::common::{MUTUAL_TS, SHOP_TS, TREE_TS};

#[test]
/// A single self-referencing declaration is deferred and imported.
fn test_self_reference_resolves_lazily() {
    let output = generate(TREE_TS, &GenerateOptions::default()).unwrap();
    assert!(output.errors.is_empty());
    assert!(output.has_circular_dependencies);
    let module = output.validator_module("./tree.ts");
    assert!(module.contains("import { Node } from \"./tree\";"));
    assert!(module.contains("export const nodeSchema: z.ZodSchema<Node> = z.lazy(() => "));
}

#[test]
/// Two declarations referencing each other never resolve, whatever the limit.
fn test_mutual_cycle_never_resolves() {
    for max_run in [1, 10, 100] {
        let options = GenerateOptions {
            max_run,
            ..GenerateOptions::default()
        };
        let output = generate(MUTUAL_TS, &options).unwrap();
        assert_eq!(
            output.errors,
            vec!["Some schemas can't be generated due to circular dependencies:\naSchema\nbSchema"]
        );
        assert!(!output.has_circular_dependencies);
        assert_eq!(output.validator_names().count(), 0);
    }
}

#[test]
/// Deferred validators coexist with enum value imports.
fn test_shop_imports() {
    let output = generate(SHOP_TS, &GenerateOptions::default()).unwrap();
    let module = output.validator_module("./shop.ts");
    assert!(module.contains("import { Category, Customer, OrderStatus } from \"./shop\";\n"));
    assert_eq!(output.deferred_types().collect::<Vec<_>>(), vec!["Category", "Customer"]);
    assert!(module.contains("export const orderStatusSchema = z.nativeEnum(OrderStatus);"));
    assert!(module.contains("referredBy: customerSchema.optional(),"));
}

#[test]
/// A self-reference inside a larger cycle does not rescue the cycle.
fn test_self_reference_inside_mutual_cycle() {
    let source = "type A = { self?: A; b: B };\ntype B = { a: A };\n";
    let output = generate(source, &GenerateOptions::default()).unwrap();
    assert_eq!(output.errors.len(), 1);
    assert!(!output.has_circular_dependencies);
}
