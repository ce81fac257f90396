// Tests for the rendered validator module

use zodgen_output::generate;
use zodgen_resolve::engine::GenerateOptions;

use super::common::{SHOP_TS, TREE_TS};

fn shop_module() -> String {
    generate(SHOP_TS, &GenerateOptions::default())
        .unwrap()
        .validator_module("./shop.ts")
}

#[test]
fn test_header_and_imports() {
    let module = shop_module();
    assert!(module.starts_with(
        "// Generated by zodgen\n\
         import { z } from \"zod\";\n\
         import { Category, Customer, OrderStatus } from \"./shop\";\n\
         \n"
    ));
}

#[test]
fn test_object_statements() {
    let module = shop_module();
    assert!(module.contains(
        "export const orderLineSchema = z.object({\n  sku: z.string(),\n  quantity: z.number().min(1),\n});\n"
    ));
    assert!(module.contains(
        "export const contactSchema = z.object({\n  email: z.string().email(),\n  phone: z.string().nullable(),\n});\n"
    ));
}

#[test]
fn test_deferred_statements() {
    let module = shop_module();
    assert!(module.contains(
        "export const categorySchema: z.ZodSchema<Category> = z.lazy(() => z.object({\n  name: z.string(),\n  children: z.array(categorySchema),\n}));\n"
    ));
    assert!(module.contains(
        "export const customerSchema: z.ZodSchema<Customer> = z.lazy(() => contactSchema.extend({\n"
    ));
}

#[test]
fn test_statements_separated_by_blank_lines() {
    let module = shop_module();
    let statements = module.matches("export const ").count();
    assert_eq!(statements, 6);
    assert_eq!(module.matches("\n\nexport const ").count(), 6);
    assert!(module.ends_with("});\n"));
}

#[test]
fn test_keep_comments_option() {
    let options = GenerateOptions {
        keep_comments: true,
        ..GenerateOptions::default()
    };
    let module = generate(SHOP_TS, &options).unwrap().validator_module("./shop");
    assert!(module.contains("/**\n * A customer order.\n */\nexport const orderSchema = "));
}

#[test]
fn test_skip_parse_jsdoc_option() {
    let options = GenerateOptions {
        skip_parse_jsdoc: true,
        ..GenerateOptions::default()
    };
    let module = generate(SHOP_TS, &options).unwrap().validator_module("./shop");
    assert!(module.contains("  quantity: z.number(),\n"));
    assert!(module.contains("  email: z.string(),\n"));
}

#[test]
fn test_no_import_line_without_flagged_types() {
    let module = generate("type A = { n: number };\n", &GenerateOptions::default())
        .unwrap()
        .validator_module("./a.ts");
    assert_eq!(
        module,
        "// Generated by zodgen\nimport { z } from \"zod\";\n\nexport const aSchema = z.object({\n  n: z.number(),\n});\n"
    );
}

#[test]
fn test_tree_fixture_exact() {
    let module = generate(TREE_TS, &GenerateOptions::default())
        .unwrap()
        .validator_module("../types/tree.ts");
    assert_eq!(
        module,
        "// Generated by zodgen\n\
         import { z } from \"zod\";\n\
         import { Node } from \"../types/tree\";\n\
         \n\
         export const nodeSchema: z.ZodSchema<Node> = z.lazy(() => z.object({\n  children: z.array(nodeSchema),\n}));\n"
    );
}
