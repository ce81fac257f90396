//! Renders [`Expr`] trees and [`Statement`]s as TypeScript source.

use zodgen_core::ast::{Expr, Statement, ZOD_IMPORT};

const INDENT: &str = "  ";

/// `export const name: Annotation = <init>;`, preceded by its comment.
pub fn render_statement(statement: &Statement) -> String {
    let mut out = String::new();
    if let Some(comment) = &statement.leading_comment {
        out.push_str(comment);
        out.push('\n');
    }
    if statement.exported {
        out.push_str("export ");
    }
    out.push_str("const ");
    out.push_str(&statement.name);
    if let Some(annotation) = &statement.type_annotation {
        out.push_str(": ");
        out.push_str(annotation);
    }
    out.push_str(" = ");
    out.push_str(&render_expr(&statement.init));
    out.push(';');
    out
}

pub fn render_expr(expr: &Expr) -> String {
    let mut writer = Writer::default();
    writer.expr(expr);
    writer.out
}

/// A JavaScript string literal for `value`.
pub fn quote(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("\"{value}\""))
}

/// True when `name` can be written as a bare property key.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

#[derive(Default)]
struct Writer {
    out: String,
    depth: usize,
}

impl Writer {
    fn expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Zod { method, args } => {
                self.out.push_str(ZOD_IMPORT);
                self.out.push('.');
                self.out.push_str(method);
                self.args(args);
            }
            Expr::Call {
                target,
                method,
                args,
            } => {
                self.expr(target);
                self.out.push('.');
                self.out.push_str(method);
                self.args(args);
            }
            Expr::Member { target, property } => {
                self.expr(target);
                if is_identifier(property) {
                    self.out.push('.');
                    self.out.push_str(property);
                } else {
                    self.out.push('[');
                    self.out.push_str(&quote(property));
                    self.out.push(']');
                }
            }
            Expr::Ident(text) | Expr::Number(text) | Expr::Raw(text) => self.out.push_str(text),
            Expr::Str(value) => self.out.push_str(&quote(value)),
            Expr::Bool(value) => self.out.push_str(if *value { "true" } else { "false" }),
            Expr::Array(items) => {
                self.out.push('[');
                self.list(items);
                self.out.push(']');
            }
            Expr::Object(fields) => self.object(fields),
            Expr::Arrow(body) => {
                self.out.push_str("() => ");
                self.expr(body);
            }
        }
    }

    fn args(&mut self, args: &[Expr]) {
        self.out.push('(');
        self.list(args);
        self.out.push(')');
    }

    fn list(&mut self, items: &[Expr]) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            self.expr(item);
        }
    }

    fn object(&mut self, fields: &[(String, Expr)]) {
        if fields.is_empty() {
            self.out.push_str("{}");
            return;
        }
        // Key masks (`pick`/`omit`) stay on one line.
        if fields.iter().all(|(_, v)| matches!(v, Expr::Bool(_))) {
            self.out.push_str("{ ");
            for (i, (key, value)) in fields.iter().enumerate() {
                if i > 0 {
                    self.out.push_str(", ");
                }
                self.key(key);
                self.expr(value);
            }
            self.out.push_str(" }");
            return;
        }
        self.out.push_str("{\n");
        self.depth += 1;
        for (key, value) in fields {
            self.pad();
            self.key(key);
            self.expr(value);
            self.out.push_str(",\n");
        }
        self.depth -= 1;
        self.pad();
        self.out.push('}');
    }

    fn key(&mut self, key: &str) {
        if is_identifier(key) {
            self.out.push_str(key);
        } else {
            self.out.push_str(&quote(key));
        }
        self.out.push_str(": ");
    }

    fn pad(&mut self) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
    }
}
