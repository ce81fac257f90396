//! The zod expression tree produced by the per-declaration compiler.
//!
//! Expressions are deliberately close to the TypeScript they render to: a
//! `z.<method>(...)` root, chained method calls, member access, and the few
//! literal forms zod validators need. Rendering lives in `zodgen-output`.

/// Identifier the generated module binds the zod namespace to.
pub const ZOD_IMPORT: &str = "z";

/// A zod validator expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `z.<method>(args)`
    Zod { method: String, args: Vec<Expr> },
    /// `<target>.<method>(args)`
    Call {
        target: Box<Expr>,
        method: String,
        args: Vec<Expr>,
    },
    /// `<target>.<property>`
    Member { target: Box<Expr>, property: String },
    /// Reference to another validator binding.
    Ident(String),
    /// `{ key: value, ... }`, keys in declaration order.
    Object(Vec<(String, Expr)>),
    /// `[a, b, ...]`
    Array(Vec<Expr>),
    Str(String),
    /// Numeric literal kept as written in the source.
    Number(String),
    Bool(bool),
    /// Source fragment emitted verbatim (regex literals, default values).
    Raw(String),
    /// `() => <body>`
    Arrow(Box<Expr>),
}

impl Expr {
    /// `z.<method>()`
    pub fn zod(method: &str) -> Self {
        Expr::Zod {
            method: method.to_string(),
            args: vec![],
        }
    }

    /// `z.<method>(args)`
    pub fn zod_with(method: &str, args: Vec<Expr>) -> Self {
        Expr::Zod {
            method: method.to_string(),
            args,
        }
    }

    /// Chain `.<method>(args)` onto this expression.
    pub fn call(self, method: &str, args: Vec<Expr>) -> Self {
        Expr::Call {
            target: Box::new(self),
            method: method.to_string(),
            args,
        }
    }

    /// Chain `.<property>` onto this expression.
    pub fn member(self, property: &str) -> Self {
        Expr::Member {
            target: Box::new(self),
            property: property.to_string(),
        }
    }

    /// True for `z.<method>(...)` roots with the given method.
    pub fn is_zod(&self, name: &str) -> bool {
        matches!(self, Expr::Zod { method, .. } if method == name)
    }

    /// Every validator binding referenced anywhere in the expression, in
    /// first-occurrence order without duplicates.
    pub fn identifiers(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_identifiers(&mut out);
        out
    }

    fn collect_identifiers(&self, out: &mut Vec<String>) {
        match self {
            Expr::Ident(name) => {
                if !out.iter().any(|n| n == name) {
                    out.push(name.clone());
                }
            }
            Expr::Zod { args, .. } => args.iter().for_each(|a| a.collect_identifiers(out)),
            Expr::Call { target, args, .. } => {
                target.collect_identifiers(out);
                args.iter().for_each(|a| a.collect_identifiers(out));
            }
            Expr::Member { target, .. } => target.collect_identifiers(out),
            Expr::Object(fields) => fields.iter().for_each(|(_, v)| v.collect_identifiers(out)),
            Expr::Array(items) => items.iter().for_each(|i| i.collect_identifiers(out)),
            Expr::Arrow(body) => body.collect_identifiers(out),
            Expr::Str(_) | Expr::Number(_) | Expr::Bool(_) | Expr::Raw(_) => {}
        }
    }
}

/// One `const` declaration in the generated validator module.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub name: String,
    pub exported: bool,
    /// Explicit type annotation, e.g. `z.ZodSchema<Node>`.
    pub type_annotation: Option<String>,
    pub init: Expr,
    /// Comment block emitted verbatim above the declaration.
    pub leading_comment: Option<String>,
}

impl Statement {
    /// An exported, unannotated `const <name> = <init>;`.
    pub fn new(name: &str, init: Expr) -> Self {
        Self {
            name: name.to_string(),
            exported: true,
            type_annotation: None,
            init,
            leading_comment: None,
        }
    }

    pub fn with_comment(mut self, comment: Option<String>) -> Self {
        self.leading_comment = comment;
        self
    }

    /// True when the initializer is already wrapped in `z.lazy(...)`.
    pub fn is_deferred(&self) -> bool {
        self.init.is_zod("lazy")
    }
}
