//! JSDoc tag extraction.
//!
//! Only the tags that map onto zod refinements are interpreted; everything
//! else in the comment is ignored.

use zodgen_core::ast::Expr;

/// One `@tag value` line from a JSDoc block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsDocTag {
    pub name: String,
    pub value: String,
}

/// Parse the tags out of a raw `/** ... */` comment.
pub fn parse_tags(comment: &str) -> Vec<JsDocTag> {
    let body = comment
        .trim()
        .trim_start_matches("/**")
        .trim_end_matches("*/");
    let mut tags = Vec::new();
    for line in body.lines() {
        let line = line.trim().trim_start_matches('*').trim();
        let Some(rest) = line.strip_prefix('@') else {
            continue;
        };
        let (name, value) = match rest.split_once(char::is_whitespace) {
            Some((n, v)) => (n, v.trim()),
            None => (rest, ""),
        };
        tags.push(JsDocTag {
            name: name.to_string(),
            value: value.to_string(),
        });
    }
    tags
}

/// Chain the refinements described by `tags` onto `expr`.
///
/// Returns the refined expression and the `@default` value, which callers
/// apply after `.optional()`.
pub fn apply_tags(mut expr: Expr, tags: &[JsDocTag]) -> (Expr, Option<Expr>) {
    let mut default = None;
    for tag in tags {
        match tag.name.as_str() {
            "minimum" | "minLength" | "minItems" => {
                if let Some(n) = numeric(&tag.value) {
                    expr = expr.call("min", vec![n]);
                }
            }
            "maximum" | "maxLength" | "maxItems" => {
                if let Some(n) = numeric(&tag.value) {
                    expr = expr.call("max", vec![n]);
                }
            }
            "format" => {
                let method = match tag.value.as_str() {
                    "email" => Some("email"),
                    "uuid" => Some("uuid"),
                    "url" | "uri" => Some("url"),
                    "date-time" => Some("datetime"),
                    _ => None,
                };
                if let Some(m) = method {
                    expr = expr.call(m, vec![]);
                }
            }
            "pattern" if !tag.value.is_empty() => {
                let pattern = tag.value.trim_matches('/');
                expr = expr.call("regex", vec![Expr::Raw(format!("/{pattern}/"))]);
            }
            "default" if !tag.value.is_empty() => {
                default = Some(default_value(&tag.value));
            }
            _ => {}
        }
    }
    (expr, default)
}

fn numeric(value: &str) -> Option<Expr> {
    let token = value.split_whitespace().next()?;
    token.parse::<f64>().ok()?;
    Some(Expr::Number(token.to_string()))
}

fn default_value(value: &str) -> Expr {
    let looks_literal = value.starts_with('"')
        || value.starts_with('\'')
        || value.starts_with('[')
        || value.starts_with('{')
        || matches!(value, "true" | "false" | "null")
        || value.parse::<f64>().is_ok();
    if looks_literal {
        Expr::Raw(value.to_string())
    } else {
        Expr::Str(value.to_string())
    }
}
