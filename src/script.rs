//! Static evaluation of a small subset of TypeScript/TSX.
//!
//! Route modules and content seeds are parsed with tree-sitter and never
//! executed. On top of the syntax tree this module resolves the few
//! expression shapes that carry SEO copy in practice:
//!
//! ```text
//! "literal"  'literal'  `literal`      → the literal text
//! IDENT                                → a top-level const string, if known
//! `prefix ${IDENT} suffix`             → only if every substitution resolves
//! "a" + IDENT                          → only if both sides resolve
//! (expr)  expr as const  expr satisfies T  expr!   → transparent wrappers
//! ```
//!
//! Anything else resolves to `None`. Partial results are never produced:
//! a template with one unresolvable substitution yields nothing at all, so
//! the report shows a blank cell rather than a half-evaluated title.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tree_sitter::{Language, Node, Parser, Tree};

#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("Failed to read `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Unsupported grammar for `{path}`")]
    Language { path: PathBuf },
    #[error("Failed to parse `{path}`")]
    Parse { path: PathBuf },
}

/// Top-level `const NAME = <string>` bindings, in resolvable form.
pub type ConstStrings = HashMap<String, String>;

/// Which tree-sitter grammar a file is parsed with.
///
/// TSX is a superset for everything except `<T>expr` type assertions,
/// which only the plain TypeScript grammar accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Tsx,
    TypeScript,
}

impl Dialect {
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("ts" | "mts" | "cts") => Dialect::TypeScript,
            _ => Dialect::Tsx,
        }
    }

    fn language(self) -> Language {
        match self {
            Dialect::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
            Dialect::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        }
    }
}

/// A top-level variable binding (`const`, `let` or `var`, exported or not).
#[derive(Debug, Clone, Copy)]
pub struct Binding<'t> {
    pub name: &'t str,
    pub value: Option<Node<'t>>,
    pub exported: bool,
    pub is_const: bool,
}

/// A parsed source file.
pub struct Script {
    path: PathBuf,
    source: String,
    tree: Tree,
}

impl Script {
    /// Read and parse a file, picking the grammar from its extension.
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let source = fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, source)
    }

    /// Parse source text. `path` only selects the grammar and labels errors.
    pub fn parse(path: impl Into<PathBuf>, source: String) -> Result<Self, ScriptError> {
        let path = path.into();
        let mut parser = Parser::new();
        parser
            .set_language(&Dialect::for_path(&path).language())
            .map_err(|_| ScriptError::Language { path: path.clone() })?;
        let tree = parser
            .parse(&source, None)
            .ok_or_else(|| ScriptError::Parse { path: path.clone() })?;
        if tree.root_node().has_error() {
            tracing::debug!(path = %path.display(), "syntax errors, resolving what parsed");
        }
        Ok(Self { path, source, tree })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Source text covered by `node`.
    pub fn text(&self, node: Node<'_>) -> &str {
        &self.source[node.byte_range()]
    }

    /// All top-level variable bindings with a plain identifier name, in
    /// source order. Destructuring patterns are skipped.
    pub fn bindings(&self) -> Vec<Binding<'_>> {
        let root = self.tree.root_node();
        let mut out = Vec::new();
        let mut cursor = root.walk();
        for stmt in root.named_children(&mut cursor) {
            match stmt.kind() {
                "lexical_declaration" | "variable_declaration" => {
                    self.push_bindings(stmt, false, &mut out)
                }
                "export_statement" => {
                    if let Some(decl) = stmt.child_by_field_name("declaration")
                        && matches!(decl.kind(), "lexical_declaration" | "variable_declaration")
                    {
                        self.push_bindings(decl, true, &mut out);
                    }
                }
                _ => {}
            }
        }
        out
    }

    fn push_bindings<'t>(&'t self, decl: Node<'t>, exported: bool, out: &mut Vec<Binding<'t>>) {
        let is_const = decl.kind() == "lexical_declaration" && self.text(decl).starts_with("const");
        let mut cursor = decl.walk();
        for declarator in decl.named_children(&mut cursor) {
            if declarator.kind() != "variable_declarator" {
                continue;
            }
            let Some(name) = declarator.child_by_field_name("name") else {
                continue;
            };
            if name.kind() != "identifier" {
                continue;
            }
            out.push(Binding {
                name: self.text(name),
                value: declarator.child_by_field_name("value"),
                exported,
                is_const,
            });
        }
    }

    /// Symbol table of top-level `const` strings.
    ///
    /// Built in source order, so a constant may reference any constant
    /// declared above it.
    pub fn const_strings(&self) -> ConstStrings {
        let mut table = ConstStrings::new();
        for binding in self.bindings() {
            if !binding.is_const {
                continue;
            }
            let Some(value) = binding.value else {
                continue;
            };
            if let Some(resolved) = self.resolve_string(value, &table) {
                table.insert(binding.name.to_string(), resolved);
            }
        }
        table
    }

    /// Initializer of `export const <name> = ...`, with wrappers unwrapped.
    ///
    /// When a name is exported more than once the last declaration wins.
    pub fn exported_const(&self, name: &str) -> Option<Node<'_>> {
        self.bindings()
            .into_iter()
            .filter(|b| b.exported && b.is_const && b.name == name)
            .filter_map(|b| b.value)
            .last()
            .map(unwrap_expression)
    }

    /// Resolve an expression to a string, or `None` if any part of it is
    /// not statically known.
    pub fn resolve_string(&self, node: Node<'_>, consts: &ConstStrings) -> Option<String> {
        let node = unwrap_expression(node);
        match node.kind() {
            "string" => Some(unescape(strip_delimiters(self.text(node)))),
            "template_string" => self.resolve_template(node, consts),
            "identifier" => consts.get(self.text(node)).cloned(),
            "binary_expression" => {
                let operator = node.child_by_field_name("operator")?;
                if operator.kind() != "+" {
                    return None;
                }
                let left = self.resolve_string(node.child_by_field_name("left")?, consts)?;
                let right = self.resolve_string(node.child_by_field_name("right")?, consts)?;
                Some(left + &right)
            }
            _ => None,
        }
    }

    fn resolve_template(&self, node: Node<'_>, consts: &ConstStrings) -> Option<String> {
        // Literal chunks are sliced from the source between substitutions,
        // skipping the opening and closing backticks.
        let end = node.end_byte().checked_sub(1)?;
        let mut pos = node.start_byte() + 1;
        if pos > end {
            return None;
        }
        let mut out = String::new();
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if child.kind() != "template_substitution" {
                continue;
            }
            out.push_str(&unescape(&self.source[pos..child.start_byte()]));
            let expr = first_named_child(child)?;
            out.push_str(&self.resolve_string(expr, consts)?);
            pos = child.end_byte();
        }
        out.push_str(&unescape(&self.source[pos..end]));
        Some(out)
    }

    /// Value of `key` in an object literal. Identifier and string keys match;
    /// computed keys, spreads and methods are ignored. First match wins.
    pub fn property<'t>(&'t self, object: Node<'t>, key: &str) -> Option<Node<'t>> {
        let object = unwrap_expression(object);
        if object.kind() != "object" {
            return None;
        }
        let mut cursor = object.walk();
        for pair in object.named_children(&mut cursor) {
            if pair.kind() != "pair" {
                continue;
            }
            let Some(name) = pair.child_by_field_name("key") else {
                continue;
            };
            let matches = match name.kind() {
                "property_identifier" | "identifier" => self.text(name) == key,
                "string" => unescape(strip_delimiters(self.text(name))) == key,
                _ => false,
            };
            if matches {
                return pair.child_by_field_name("value").map(unwrap_expression);
            }
        }
        None
    }

    /// Resolve `object[key]` as a string.
    pub fn string_property(
        &self,
        object: Node<'_>,
        key: &str,
        consts: &ConstStrings,
    ) -> Option<String> {
        self.property(object, key)
            .and_then(|value| self.resolve_string(value, consts))
    }

    /// Callee name and arguments of `name(...)`.
    pub fn call<'t>(&'t self, node: Node<'t>) -> Option<(&'t str, Vec<Node<'t>>)> {
        let node = unwrap_expression(node);
        if node.kind() != "call_expression" {
            return None;
        }
        let callee = node.child_by_field_name("function")?;
        if callee.kind() != "identifier" {
            return None;
        }
        let args = node
            .child_by_field_name("arguments")
            .map(named_children)
            .unwrap_or_default();
        Some((self.text(callee), args))
    }
}

/// Whether `node` is an object literal (after unwrapping).
pub fn is_object(node: Node<'_>) -> bool {
    unwrap_expression(node).kind() == "object"
}

/// `true` / `false` literals.
pub fn bool_literal(node: Node<'_>) -> Option<bool> {
    match unwrap_expression(node).kind() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

pub fn is_null(node: Node<'_>) -> bool {
    unwrap_expression(node).kind() == "null"
}

/// Elements of an array literal, comments excluded. `None` if not an array.
pub fn array_elements(node: Node<'_>) -> Option<Vec<Node<'_>>> {
    let node = unwrap_expression(node);
    (node.kind() == "array").then(|| named_children(node))
}

/// Strip expression wrappers that do not change the runtime value.
pub fn unwrap_expression(node: Node<'_>) -> Node<'_> {
    let mut current = node;
    loop {
        let inner = match current.kind() {
            "parenthesized_expression"
            | "as_expression"
            | "satisfies_expression"
            | "non_null_expression" => first_named_child(current),
            // `<T>expr`: the type comes first
            "type_assertion" => named_children(current).pop(),
            _ => None,
        };
        match inner {
            Some(next) => current = next,
            None => return current,
        }
    }
}

fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    let children = node
        .named_children(&mut cursor)
        .filter(|n| n.kind() != "comment")
        .collect();
    children
}

fn first_named_child(node: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = node.walk();
    let first = node
        .named_children(&mut cursor)
        .find(|n| n.kind() != "comment");
    first
}

fn strip_delimiters(raw: &str) -> &str {
    if raw.len() >= 2 {
        &raw[1..raw.len() - 1]
    } else {
        ""
    }
}

/// Decode JavaScript string escapes.
///
/// Unknown escapes decode to the escaped character (`\q` → `q`), line
/// continuations disappear, and malformed hex escapes are kept verbatim.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('v') => out.push('\u{b}'),
            Some('0') => out.push('\0'),
            Some('x') => {
                let hex: String = chars.by_ref().take(2).collect();
                push_code_point(&mut out, &hex, "\\x");
            }
            Some('u') => {
                let hex: String = if chars.peek() == Some(&'{') {
                    chars.next();
                    chars.by_ref().take_while(|c| *c != '}').collect()
                } else {
                    chars.by_ref().take(4).collect()
                };
                push_code_point(&mut out, &hex, "\\u");
            }
            Some('\r') => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            Some('\n' | '\u{2028}' | '\u{2029}') => {}
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

fn push_code_point(out: &mut String, hex: &str, prefix: &str) {
    match u32::from_str_radix(hex, 16).ok().and_then(char::from_u32) {
        Some(c) => out.push(c),
        None => {
            out.push_str(prefix);
            out.push_str(hex);
        }
    }
}
