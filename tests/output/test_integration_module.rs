// Tests for the generated type-equivalence test module

use zodgen_output::generate;
use zodgen_resolve::engine::GenerateOptions;

use super::common::{MUTUAL_TS, SHOP_TS};

#[test]
fn test_one_assertion_pair_per_validator() {
    let output = generate(SHOP_TS, &GenerateOptions::default()).unwrap();
    let text = output.test_module("./shop.ts", "./shop.zod.ts");
    assert_eq!(text.matches("InferredType = z.infer<typeof generated.").count(), 6);
    assert_eq!(text.matches("expectType<spec.").count(), 6);
    for (var_name, type_name) in [("orderSchema", "Order"), ("categorySchema", "Category")] {
        assert!(text.contains(&format!(
            "expectType<spec.{type_name}>({{}} as {var_name}InferredType);\n\
             expectType<{var_name}InferredType>({{}} as spec.{type_name});\n"
        )));
    }
}

#[test]
fn test_imports_use_path_hints() {
    let output = generate(SHOP_TS, &GenerateOptions::default()).unwrap();
    let text = output.test_module("../src/shop.ts", "../src/shop.zod.ts");
    assert!(text.contains("import * as spec from \"../src/shop\";\n"));
    assert!(text.contains("import * as generated from \"../src/shop.zod\";\n"));
}

#[test]
fn test_unresolved_declarations_not_asserted() {
    let output = generate(MUTUAL_TS, &GenerateOptions::default()).unwrap();
    let text = output.test_module("./mutual", "./mutual.zod");
    assert!(!text.contains("InferredType"));
}
