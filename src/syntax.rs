// src/syntax.rs
//! Typed view over the handful of syntax node kinds the analyzers consult.
//!
//! Tree-sitter exposes nodes by string kind. Everything downstream works on
//! [`SyntaxItem`] instead, so each consumer matches a closed set of cases and
//! the compiler flags any consumer that forgets one.

use tree_sitter::{Node, Parser, Tree};

use crate::lang::Dialect;

/// One syntax construct relevant to dependency or metrics extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxItem<'a> {
    /// `import … from "x"`, `import "x"`, `import x = require("x")`.
    Import { source: &'a str },
    /// `export { … } from "x"`, `export * as ns from "x"`.
    ExportFrom { source: &'a str },
    /// `export * from "x"`.
    ExportAll { source: &'a str },
    /// An export with no source module (declaration, clause or default).
    LocalExport,
    Function { name: Option<&'a str> },
    Class { name: Option<&'a str> },
    Interface { name: &'a str },
    TypeAlias { name: &'a str },
    TypeAnnotation,
    Call { callee: &'a str },
    /// A decision point: conditional, loop, case, catch, ternary or short-circuit.
    Branch,
    Jsx,
}

/// Receives every item of a parsed file in source order.
pub trait Visitor<'a> {
    fn visit(&mut self, item: SyntaxItem<'a>);
}

/// A syntax tree that parsed without errors, tied to its source text.
pub struct ParsedSource<'a> {
    tree: Tree,
    source: &'a str,
    dialect: Dialect,
}

impl<'a> ParsedSource<'a> {
    /// Parses with the preferred dialect, then with its fallback.
    ///
    /// # Errors
    /// Returns a description of the first syntax error when neither dialect
    /// yields an error-free tree.
    pub fn parse(source: &'a str, preferred: Dialect) -> Result<Self, String> {
        let mut last_error = String::from("parser produced no tree");
        for dialect in [preferred, preferred.fallback()] {
            match parse_with(source, dialect) {
                Ok(tree) => {
                    return Ok(Self {
                        tree,
                        source,
                        dialect,
                    })
                }
                Err(e) => last_error = e,
            }
        }
        Err(last_error)
    }

    #[must_use]
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Feeds every recognised item to `visitor`, in pre-order.
    pub fn walk<V: Visitor<'a>>(&self, visitor: &mut V) {
        let bytes = self.source.as_bytes();
        let mut cursor = self.tree.walk();
        loop {
            if let Some(item) = lower(cursor.node(), bytes) {
                visitor.visit(item);
            }
            if cursor.goto_first_child() {
                continue;
            }
            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return;
                }
            }
        }
    }

    #[must_use]
    pub fn items(&self) -> Vec<SyntaxItem<'a>> {
        let mut collected = Collect(Vec::new());
        self.walk(&mut collected);
        collected.0
    }
}

struct Collect<'a>(Vec<SyntaxItem<'a>>);

impl<'a> Visitor<'a> for Collect<'a> {
    fn visit(&mut self, item: SyntaxItem<'a>) {
        self.0.push(item);
    }
}

fn parse_with(source: &str, dialect: Dialect) -> Result<Tree, String> {
    let mut parser = Parser::new();
    parser
        .set_language(dialect.grammar())
        .map_err(|e| format!("grammar unavailable: {e}"))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| String::from("parser produced no tree"))?;

    let root = tree.root_node();
    if !root.has_error() {
        return Ok(tree);
    }
    Err(first_error(root).map_or_else(
        || String::from("syntax error"),
        |node| {
            let pos = node.start_position();
            format!("syntax error at line {}, column {}", pos.row + 1, pos.column + 1)
        },
    ))
}

fn first_error(root: Node) -> Option<Node> {
    if root.is_error() || root.is_missing() {
        return Some(root);
    }
    let mut cursor = root.walk();
    let children: Vec<Node> = root.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(Node::has_error)
        .find_map(first_error)
}

fn lower<'a>(node: Node, src: &'a [u8]) -> Option<SyntaxItem<'a>> {
    // Keywords such as `function` and `class` are anonymous nodes of the same kind.
    if !node.is_named() {
        return None;
    }
    let item = match node.kind() {
        "import_statement" => SyntaxItem::Import {
            source: import_source(node, src)?,
        },
        "export_statement" => lower_export(node, src),
        "function_declaration"
        | "generator_function_declaration"
        | "function"
        | "function_expression"
        | "generator_function"
        | "arrow_function"
        | "method_definition" => SyntaxItem::Function {
            name: field_text(node, "name", src),
        },
        "class_declaration" | "abstract_class_declaration" | "class" => SyntaxItem::Class {
            name: field_text(node, "name", src),
        },
        "interface_declaration" => SyntaxItem::Interface {
            name: field_text(node, "name", src)?,
        },
        "type_alias_declaration" => SyntaxItem::TypeAlias {
            name: field_text(node, "name", src)?,
        },
        "type_annotation" => SyntaxItem::TypeAnnotation,
        "call_expression" => SyntaxItem::Call {
            callee: field_text(node, "function", src)?,
        },
        "if_statement" | "for_statement" | "for_in_statement" | "while_statement"
        | "do_statement" | "switch_case" | "catch_clause" | "ternary_expression" => {
            SyntaxItem::Branch
        }
        "binary_expression" if is_short_circuit(node) => SyntaxItem::Branch,
        "jsx_element" | "jsx_self_closing_element" => SyntaxItem::Jsx,
        _ => return None,
    };
    Some(item)
}

fn lower_export<'a>(node: Node, src: &'a [u8]) -> SyntaxItem<'a> {
    let Some(source) = field_text(node, "source", src).map(unquote) else {
        return SyntaxItem::LocalExport;
    };
    let mut cursor = node.walk();
    let mut star = false;
    let mut namespaced = false;
    for child in node.children(&mut cursor) {
        match child.kind() {
            "*" => star = true,
            "namespace_export" => namespaced = true,
            _ => {}
        }
    }
    if star && !namespaced {
        SyntaxItem::ExportAll { source }
    } else {
        SyntaxItem::ExportFrom { source }
    }
}

fn import_source<'a>(node: Node, src: &'a [u8]) -> Option<&'a str> {
    if let Some(text) = field_text(node, "source", src) {
        return Some(unquote(text));
    }
    let mut cursor = node.walk();
    let clause = node
        .children(&mut cursor)
        .find(|c| c.kind() == "import_require_clause")?;
    field_text(clause, "source", src).map(unquote)
}

fn is_short_circuit(node: Node) -> bool {
    node.child_by_field_name("operator")
        .is_some_and(|op| matches!(op.kind(), "&&" | "||" | "??"))
}

fn field_text<'a>(node: Node, field: &str, src: &'a [u8]) -> Option<&'a str> {
    node.child_by_field_name(field)?.utf8_text(src).ok()
}

fn unquote(text: &str) -> &str {
    text.trim_matches(|c| c == '"' || c == '\'' || c == '`')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(code: &str, dialect: Dialect) -> Vec<SyntaxItem<'_>> {
        match ParsedSource::parse(code, dialect) {
            Ok(parsed) => parsed.items(),
            Err(e) => panic!("unexpected parse failure: {e}"),
        }
    }

    #[test]
    fn module_forms_are_distinguished() {
        let code = r#"
            import { a } from "./a";
            import "./side-effect";
            export { b } from './b';
            export * from "./c";
            export * as d from "./d";
            export const e = 1;
        "#;
        let got = items(code, Dialect::TypeScript);
        assert!(got.contains(&SyntaxItem::Import { source: "./a" }));
        assert!(got.contains(&SyntaxItem::Import { source: "./side-effect" }));
        assert!(got.contains(&SyntaxItem::ExportFrom { source: "./b" }));
        assert!(got.contains(&SyntaxItem::ExportAll { source: "./c" }));
        assert!(got.contains(&SyntaxItem::ExportFrom { source: "./d" }));
        assert!(got.contains(&SyntaxItem::LocalExport));
    }

    #[test]
    fn declarations_and_calls() {
        let code = r"
            interface Props { id: number }
            type Id = string;
            class Store {}
            function load(x: number) { return fetch(x) }
        ";
        let got = items(code, Dialect::TypeScript);
        assert!(got.contains(&SyntaxItem::Interface { name: "Props" }));
        assert!(got.contains(&SyntaxItem::TypeAlias { name: "Id" }));
        assert!(got.contains(&SyntaxItem::Class { name: Some("Store") }));
        assert!(got.contains(&SyntaxItem::Function { name: Some("load") }));
        assert!(got.contains(&SyntaxItem::Call { callee: "fetch" }));
        assert!(got.contains(&SyntaxItem::TypeAnnotation));
    }

    #[test]
    fn jsx_falls_back_from_typescript() {
        let code = "export const App = () => <div className=\"x\"><span /></div>;";
        let parsed = match ParsedSource::parse(code, Dialect::TypeScript) {
            Ok(p) => p,
            Err(e) => panic!("tsx fallback should parse: {e}"),
        };
        assert_eq!(parsed.dialect(), Dialect::Tsx);
        assert!(parsed.items().contains(&SyntaxItem::Jsx));
    }

    #[test]
    fn garbage_reports_position() {
        let err = ParsedSource::parse("import { from ;;; }}}", Dialect::Tsx).err();
        assert!(err.is_some_and(|e| e.contains("syntax error")));
    }
}
