//! Deferred rewriting for self-referencing validators.

use zodgen_core::ast::{Expr, Statement, ZOD_IMPORT};

/// Rewrite `statement` so its body is evaluated lazily and annotate it with
/// the schema type of `type_reference`.
///
/// `const nodeSchema = <init>` becomes
/// `const nodeSchema: z.ZodSchema<Node> = z.lazy(() => <init>)`. Generic
/// declarations pass their reference with `any` arguments (`Tree<any>`).
/// Statements already in deferred form are only re-annotated.
pub fn defer_self_reference(mut statement: Statement, type_reference: &str) -> Statement {
    if !statement.is_deferred() {
        let body = std::mem::replace(&mut statement.init, Expr::Raw(String::new()));
        statement.init = Expr::zod_with("lazy", vec![Expr::Arrow(Box::new(body))]);
    }
    statement.type_annotation = Some(format!("{ZOD_IMPORT}.ZodSchema<{type_reference}>"));
    statement
}

/// Replace `<validator>.shape.<key>` lookups into deferred validators with
/// `z.any()`.
///
/// A deferred validator is typed `z.ZodSchema<T>`, which has no `shape`.
pub fn erase_deferred_lookups(expr: Expr, is_deferred: &dyn Fn(&str) -> bool) -> Expr {
    let recurse = |e: Expr| erase_deferred_lookups(e, is_deferred);
    match expr {
        Expr::Member { target, property } => {
            if let Expr::Member {
                target: inner,
                property: shape,
            } = target.as_ref()
            {
                if shape == "shape" && matches!(inner.as_ref(), Expr::Ident(name) if is_deferred(name))
                {
                    tracing::debug!(%property, "lookup into deferred validator, using z.any()");
                    return Expr::zod("any");
                }
            }
            Expr::Member {
                target: Box::new(recurse(*target)),
                property,
            }
        }
        Expr::Zod { method, args } => Expr::Zod {
            method,
            args: args.into_iter().map(recurse).collect(),
        },
        Expr::Call {
            target,
            method,
            args,
        } => Expr::Call {
            target: Box::new(recurse(*target)),
            method,
            args: args.into_iter().map(recurse).collect(),
        },
        Expr::Object(fields) => {
            Expr::Object(fields.into_iter().map(|(k, v)| (k, recurse(v))).collect())
        }
        Expr::Array(items) => Expr::Array(items.into_iter().map(recurse).collect()),
        Expr::Arrow(body) => Expr::Arrow(Box::new(recurse(*body))),
        other => other,
    }
}
