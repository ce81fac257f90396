//! Per-declaration compiler: one TypeScript declaration in, one validator
//! candidate out.
//!
//! The compiler never looks at other declarations. References to other types
//! become identifiers named by `get_dependency_name`, and the candidate's
//! dependency list is read back from the finished expression. Ordering those
//! candidates is the resolver's job.

mod helpers;

use std::collections::HashSet;

use tree_sitter::Node;
use zodgen_core::ast::{Expr, Statement};
use zodgen_core::types::{DeclarationCandidate, DeclarationKind};

use crate::jsdoc;
use crate::treesitter::{leading_jsdoc, node_text, Declaration};
use helpers::{named_children, property_key, type_annotation_of, unquote};

/// Options shared by every declaration compiled from one source.
pub struct CompileOptions<'a> {
    pub get_schema_name: &'a dyn Fn(&str) -> String,
    pub get_dependency_name: &'a dyn Fn(&str) -> String,
    pub keep_comments: bool,
    pub skip_parse_jsdoc: bool,
}

/// Compile one declaration into a validator candidate.
pub fn compile_declaration(
    decl: &Declaration<'_>,
    opts: &CompileOptions<'_>,
) -> DeclarationCandidate {
    let var_name = (opts.get_schema_name)(&decl.name);
    let generics = type_parameter_names(decl.node, decl.source);
    let type_parameters = generics.len();
    let compiler = TypeCompiler {
        source: decl.source,
        opts,
        generics,
    };

    let (init, requires_import) = match decl.kind {
        DeclarationKind::TypeAlias => {
            let init = decl
                .node
                .child_by_field_name("value")
                .map(|v| compiler.compile_type(v))
                .unwrap_or_else(|| Expr::zod("any"));
            (init, false)
        }
        DeclarationKind::Interface => (compiler.compile_interface(decl.node), false),
        DeclarationKind::Enum => (
            Expr::zod_with("nativeEnum", vec![Expr::Raw(decl.name.clone())]),
            true,
        ),
    };

    let init = match (&decl.jsdoc, opts.skip_parse_jsdoc) {
        (Some(doc), false) => {
            let (expr, default) = jsdoc::apply_tags(init, &jsdoc::parse_tags(doc));
            match default {
                Some(d) => expr.call("default", vec![d]),
                None => expr,
            }
        }
        _ => init,
    };

    let comment = if opts.keep_comments {
        decl.jsdoc.clone()
    } else {
        None
    };
    let statement = Statement::new(&var_name, init).with_comment(comment);
    let dependencies = statement.init.identifiers();
    tracing::trace!(
        type_name = %decl.name,
        %var_name,
        deps = ?dependencies,
        "compiled declaration"
    );

    DeclarationCandidate {
        type_name: decl.name.clone(),
        var_name,
        statement,
        dependencies,
        requires_import,
        type_parameters,
    }
}

fn type_parameter_names(node: Node<'_>, source: &[u8]) -> HashSet<String> {
    let Some(params) = node.child_by_field_name("type_parameters") else {
        return HashSet::new();
    };
    named_children(params)
        .into_iter()
        .filter(|p| p.kind() == "type_parameter")
        .filter_map(|p| p.child_by_field_name("name"))
        .map(|n| node_text(n, source).to_string())
        .collect()
}

struct TypeCompiler<'t, 'o> {
    source: &'t [u8],
    opts: &'o CompileOptions<'o>,
    /// Generic parameters of the declaration; compiled as `z.any()`.
    generics: HashSet<String>,
}

impl<'t, 'o> TypeCompiler<'t, 'o> {
    fn text(&self, node: Node<'t>) -> String {
        node.utf8_text(self.source).unwrap_or("").to_string()
    }

    fn reference(&self, name: &str) -> Expr {
        Expr::Ident((self.opts.get_dependency_name)(name))
    }

    /// Compile a type node. Anything unrecognized becomes `z.any()`.
    fn compile_type(&self, node: Node<'t>) -> Expr {
        match node.kind() {
            "predefined_type" => primitive(&self.text(node)),
            "literal_type" => self.compile_literal(node),
            "type_identifier" => self.compile_identifier(&self.text(node)),
            "generic_type" => self.compile_generic(node),
            "array_type" => {
                let inner = self.compile_first_child(node);
                Expr::zod_with("array", vec![inner])
            }
            "readonly_type" | "parenthesized_type" => self.compile_first_child(node),
            "tuple_type" => self.compile_tuple(node),
            "union_type" => self.compile_union(node),
            "intersection_type" => self.compile_intersection(node),
            "object_type" => self.compile_object_type(node),
            "function_type" => self.compile_function(node),
            "lookup_type" => self.compile_lookup(node),
            "template_literal_type" => Expr::zod("string"),
            // `string`, `number` and `true` appear bare inside some unions.
            "string" => Expr::zod_with("literal", vec![self.string_literal(node)]),
            "number" => Expr::zod_with("literal", vec![Expr::Number(self.text(node))]),
            "true" | "false" => Expr::zod_with("literal", vec![Expr::Bool(node.kind() == "true")]),
            "null" => Expr::zod("null"),
            "undefined" => Expr::zod("undefined"),
            other => {
                tracing::debug!(kind = other, "unsupported type node, using z.any()");
                Expr::zod("any")
            }
        }
    }

    fn compile_first_child(&self, node: Node<'t>) -> Expr {
        match named_children(node).into_iter().find(|c| c.kind() != "comment") {
            Some(child) => self.compile_type(child),
            None => Expr::zod("any"),
        }
    }

    fn compile_identifier(&self, name: &str) -> Expr {
        if self.generics.contains(name) {
            return Expr::zod("any");
        }
        match name {
            "Date" => Expr::zod("date"),
            "bigint" => Expr::zod("bigint"),
            "undefined" => Expr::zod("undefined"),
            "Function" => Expr::zod("function"),
            "Array" | "ReadonlyArray" => Expr::zod_with("array", vec![Expr::zod("any")]),
            _ => self.reference(name),
        }
    }

    fn compile_literal(&self, node: Node<'t>) -> Expr {
        let Some(inner) = named_children(node).into_iter().next() else {
            return Expr::zod("any");
        };
        match inner.kind() {
            "null" => Expr::zod("null"),
            "undefined" => Expr::zod("undefined"),
            "true" => Expr::zod_with("literal", vec![Expr::Bool(true)]),
            "false" => Expr::zod_with("literal", vec![Expr::Bool(false)]),
            "string" => Expr::zod_with("literal", vec![self.string_literal(inner)]),
            // Numbers, including negative ones parsed as unary expressions.
            _ => Expr::zod_with("literal", vec![Expr::Number(self.text(node))]),
        }
    }

    fn string_literal(&self, node: Node<'t>) -> Expr {
        let raw = self.text(node);
        match unquote(&raw) {
            Some(s) => Expr::Str(s),
            None => Expr::Raw(raw),
        }
    }

    fn compile_generic(&self, node: Node<'t>) -> Expr {
        let name = node
            .child_by_field_name("name")
            .map(|n| self.text(n))
            .unwrap_or_default();
        let args: Vec<Node<'t>> = node
            .child_by_field_name("type_arguments")
            .map(named_children)
            .unwrap_or_default()
            .into_iter()
            .filter(|c| c.kind() != "comment")
            .collect();
        let arg = |i: usize| -> Expr {
            match args.get(i) {
                Some(n) => self.compile_type(*n),
                None => Expr::zod("any"),
            }
        };

        match name.as_str() {
            "Array" | "ReadonlyArray" => Expr::zod_with("array", vec![arg(0)]),
            "Set" => Expr::zod_with("set", vec![arg(0)]),
            "Promise" => Expr::zod_with("promise", vec![arg(0)]),
            "Map" => {
                let k = arg(0);
                let v = arg(1);
                Expr::zod_with("map", vec![k, v])
            }
            "Record" => {
                let k = arg(0);
                let v = arg(1);
                Expr::zod_with("record", vec![k, v])
            }
            "Partial" => arg(0).call("partial", vec![]),
            "Required" => arg(0).call("required", vec![]),
            "Readonly" | "NonNullable" => arg(0),
            "Pick" | "Omit" => {
                let target = arg(0);
                let keys = args
                    .get(1)
                    .map(|k| self.literal_keys(*k))
                    .unwrap_or_default();
                let mask = Expr::Object(keys.into_iter().map(|k| (k, Expr::Bool(true))).collect());
                let method = if name == "Pick" { "pick" } else { "omit" };
                target.call(method, vec![mask])
            }
            // User generics: validate against the declaration itself.
            _ if node
                .child_by_field_name("name")
                .is_some_and(|n| n.kind() == "type_identifier") =>
            {
                self.compile_identifier(&name)
            }
            _ => Expr::zod("any"),
        }
    }

    /// String literal members of a key union such as `"a" | "b"`.
    fn literal_keys(&self, node: Node<'t>) -> Vec<String> {
        let mut keys = Vec::new();
        let mut stack = vec![node];
        while let Some(n) = stack.pop() {
            match n.kind() {
                "union_type" | "parenthesized_type" | "literal_type" => {
                    let mut children = named_children(n);
                    children.reverse();
                    stack.extend(children);
                }
                "string" => {
                    if let Some(s) = unquote(&self.text(n)) {
                        keys.push(s);
                    }
                }
                _ => {}
            }
        }
        keys
    }

    fn compile_tuple(&self, node: Node<'t>) -> Expr {
        let mut items = Vec::new();
        let mut rest = None;
        for member in named_children(node) {
            match member.kind() {
                "comment" => {}
                "rest_type" => {
                    // `...T[]` rests on the element type of the array.
                    let inner = named_children(member).into_iter().next();
                    rest = Some(match inner {
                        Some(n) if n.kind() == "array_type" => self.compile_first_child(n),
                        Some(n) => self.compile_type(n),
                        None => Expr::zod("any"),
                    });
                }
                "optional_type" => {
                    let inner = self.compile_first_child(member);
                    items.push(inner.call("optional", vec![]));
                }
                "required_parameter"
                | "optional_parameter"
                | "tuple_parameter"
                | "optional_tuple_parameter" => {
                    let ty = type_annotation_of(member)
                        .map(|t| self.compile_first_child(t))
                        .unwrap_or_else(|| Expr::zod("any"));
                    if member.kind().starts_with("optional") {
                        items.push(ty.call("optional", vec![]));
                    } else {
                        items.push(ty);
                    }
                }
                _ => items.push(self.compile_type(member)),
            }
        }
        let tuple = Expr::zod_with("tuple", vec![Expr::Array(items)]);
        match rest {
            Some(r) => tuple.call("rest", vec![r]),
            None => tuple,
        }
    }

    fn is_nullish(&self, node: Node<'t>, which: &str) -> bool {
        match node.kind() {
            "literal_type" => named_children(node)
                .into_iter()
                .next()
                .is_some_and(|c| c.kind() == which),
            "predefined_type" | "type_identifier" => self.text(node) == which,
            k => k == which,
        }
    }

    fn compile_union(&self, node: Node<'t>) -> Expr {
        let mut members = Vec::new();
        flatten(node, "union_type", &mut members);

        let has_null = members.iter().any(|m| self.is_nullish(*m, "null"));
        let has_undefined = members.iter().any(|m| self.is_nullish(*m, "undefined"));
        let rest: Vec<Node<'t>> = members
            .iter()
            .copied()
            .filter(|m| !self.is_nullish(*m, "null") && !self.is_nullish(*m, "undefined"))
            .collect();

        if rest.is_empty() {
            let all: Vec<Expr> = members.into_iter().map(|m| self.compile_type(m)).collect();
            return union_of(all);
        }

        let base: Vec<Expr> = rest.into_iter().map(|m| self.compile_type(m)).collect();
        let mut expr = union_of(base);
        if has_null {
            expr = expr.call("nullable", vec![]);
        }
        if has_undefined {
            expr = expr.call("optional", vec![]);
        }
        expr
    }

    fn compile_intersection(&self, node: Node<'t>) -> Expr {
        let mut members = Vec::new();
        flatten(node, "intersection_type", &mut members);
        let mut iter = members.into_iter();
        let Some(first) = iter.next() else {
            return Expr::zod("any");
        };
        let mut expr = self.compile_type(first);
        for member in iter {
            let next = self.compile_type(member);
            expr = expr.call("and", vec![next]);
        }
        expr
    }

    fn compile_object_type(&self, node: Node<'t>) -> Expr {
        let (fields, index) = self.compile_members(node);
        match (fields.is_empty(), index) {
            (true, Some(value)) => Expr::zod_with("record", vec![value]),
            (false, Some(value)) => {
                Expr::zod_with("object", vec![Expr::Object(fields)]).call("catchall", vec![value])
            }
            (_, None) => Expr::zod_with("object", vec![Expr::Object(fields)]),
        }
    }

    /// Compile the members of an object type or interface body. Returns the
    /// named fields and the value type of an index signature, if any.
    fn compile_members(&self, body: Node<'t>) -> (Vec<(String, Expr)>, Option<Expr>) {
        let mut fields = Vec::new();
        let mut index = None;
        for member in named_children(body) {
            match member.kind() {
                "property_signature" => {
                    if let Some(field) = self.compile_property(member) {
                        fields.push(field);
                    }
                }
                "method_signature" => {
                    let Some(name) = member.child_by_field_name("name") else {
                        continue;
                    };
                    let Some(key) = property_key(name, self.source) else {
                        continue;
                    };
                    let func = self.compile_function(member);
                    let func = if has_optional_marker(member) {
                        func.call("optional", vec![])
                    } else {
                        func
                    };
                    fields.push((key, func));
                }
                "index_signature" => {
                    // Mapped types (`[K in T]: V`) have no index type.
                    if member.child_by_field_name("index_type").is_none() {
                        index = Some(Expr::zod("any"));
                        continue;
                    }
                    index = Some(
                        member
                            .child_by_field_name("type")
                            .map(|t| self.compile_first_child(t))
                            .unwrap_or_else(|| Expr::zod("any")),
                    );
                }
                _ => {}
            }
        }
        (fields, index)
    }

    fn compile_property(&self, member: Node<'t>) -> Option<(String, Expr)> {
        let key = property_key(member.child_by_field_name("name")?, self.source)?;
        let mut expr = member
            .child_by_field_name("type")
            .map(|t| self.compile_first_child(t))
            .unwrap_or_else(|| Expr::zod("any"));

        let mut default = None;
        if !self.opts.skip_parse_jsdoc {
            if let Some(doc) = leading_jsdoc(member, self.source) {
                let (refined, d) = jsdoc::apply_tags(expr, &jsdoc::parse_tags(&doc));
                expr = refined;
                default = d;
            }
        }
        if has_optional_marker(member) {
            expr = expr.call("optional", vec![]);
        }
        if let Some(d) = default {
            expr = expr.call("default", vec![d]);
        }
        Some((key, expr))
    }

    fn compile_interface(&self, node: Node<'t>) -> Expr {
        let body = node
            .child_by_field_name("body")
            .map(|b| self.compile_members(b));
        let (fields, index) = body.unwrap_or_default();

        let heritage: Vec<Node<'t>> = named_children(node)
            .into_iter()
            .find(|c| c.kind() == "extends_type_clause")
            .map(named_children)
            .unwrap_or_default();

        let mut bases = heritage.into_iter().filter(|h| h.kind() != "comment");
        let mut expr = match bases.next() {
            Some(first) => {
                let mut base = self.compile_type(first);
                for other in bases {
                    let other = self.compile_type(other);
                    base = base.call("extend", vec![other.member("shape")]);
                }
                base.call("extend", vec![Expr::Object(fields)])
            }
            None => Expr::zod_with("object", vec![Expr::Object(fields)]),
        };
        if let Some(value) = index {
            expr = expr.call("catchall", vec![value]);
        }
        expr
    }

    fn compile_function(&self, node: Node<'t>) -> Expr {
        let mut args = Vec::new();
        if let Some(params) = node.child_by_field_name("parameters") {
            for param in named_children(params) {
                let optional = match param.kind() {
                    "required_parameter" => false,
                    "optional_parameter" => true,
                    _ => continue,
                };
                let ty = param
                    .child_by_field_name("type")
                    .map(|t| self.compile_first_child(t))
                    .unwrap_or_else(|| Expr::zod("any"));
                args.push(if optional { ty.call("optional", vec![]) } else { ty });
            }
        }
        let returns = match node.child_by_field_name("return_type") {
            // Method signatures carry a `type_annotation`; function types
            // carry the type directly.
            Some(r) if r.kind() == "type_annotation" => self.compile_first_child(r),
            Some(r) => self.compile_type(r),
            None => Expr::zod("void"),
        };
        Expr::zod("function")
            .call("args", args)
            .call("returns", vec![returns])
    }

    fn compile_lookup(&self, node: Node<'t>) -> Expr {
        let children: Vec<Node<'t>> = named_children(node);
        let (Some(object), Some(index)) = (children.first(), children.get(1)) else {
            return Expr::zod("any");
        };
        let keys = self.literal_keys(*index);
        if keys.len() != 1 {
            return Expr::zod("any");
        }
        self.compile_type(*object).member("shape").member(&keys[0])
    }
}

fn flatten<'t>(node: Node<'t>, kind: &str, out: &mut Vec<Node<'t>>) {
    for child in named_children(node) {
        if child.kind() == kind {
            flatten(child, kind, out);
        } else if child.kind() != "comment" {
            out.push(child);
        }
    }
}

fn primitive(name: &str) -> Expr {
    match name {
        "string" | "number" | "boolean" | "bigint" | "symbol" | "any" | "unknown" | "never"
        | "void" | "undefined" | "null" => Expr::zod(name),
        "object" => Expr::zod_with("record", vec![Expr::zod("any")]),
        _ => Expr::zod("any"),
    }
}

fn union_of(mut members: Vec<Expr>) -> Expr {
    if members.len() == 1 {
        members.remove(0)
    } else {
        Expr::zod_with("union", vec![Expr::Array(members)])
    }
}

/// Property or method signature marked optional with `?`.
fn has_optional_marker(member: Node<'_>) -> bool {
    let mut cursor = member.walk();
    let found = member
        .children(&mut cursor)
        .any(|c| !c.is_named() && c.kind() == "?");
    found
}
