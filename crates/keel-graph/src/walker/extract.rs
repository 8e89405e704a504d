//! Import specifier extraction with tree-sitter.
//!
//! Recognized forms: static `import`, re-exporting `export ... from`,
//! `require("x")`, dynamic `import("x")` and TypeScript `import x = require("x")`.
//! Only string literals (and templates without substitutions) count. Syntax
//! errors are tolerated: tree-sitter recovers and whatever parsed is used.

use std::cell::RefCell;
use std::path::Path;

use keel_core::errors::GraphError;
use tree_sitter::{Language, Node, Parser};

thread_local! {
    static PARSER: RefCell<Parser> = RefCell::new(Parser::new());
}

/// Grammar for a source file, chosen by extension.
pub fn language_for(path: &Path) -> Language {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("ts" | "mts" | "cts") => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        Some("tsx") => tree_sitter_typescript::LANGUAGE_TSX.into(),
        _ => tree_sitter_javascript::LANGUAGE.into(),
    }
}

/// All module specifiers `source` references, in source order.
pub fn extract_specifiers(source: &str, path: &Path) -> Result<Vec<String>, GraphError> {
    let tree = PARSER.with(|cell| {
        let mut parser = cell.borrow_mut();
        parser
            .set_language(&language_for(path))
            .map_err(|e| GraphError::SourceParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        parser.parse(source, None).ok_or_else(|| GraphError::SourceParse {
            path: path.to_path_buf(),
            message: "parser produced no tree".to_string(),
        })
    })?;

    let bytes = source.as_bytes();
    let mut specifiers = Vec::new();
    let mut stack = vec![tree.root_node()];
    let mut cursor = tree.walk();

    while let Some(node) = stack.pop() {
        match node.kind() {
            "import_statement" | "export_statement" | "import_require_clause" => {
                if let Some(value) = node
                    .child_by_field_name("source")
                    .and_then(|src| literal_value(src, bytes))
                {
                    specifiers.push((node.start_byte(), value));
                }
            }
            "call_expression" => {
                if let Some(value) = loader_argument(node, bytes) {
                    specifiers.push((node.start_byte(), value));
                }
            }
            _ => {}
        }
        stack.extend(node.children(&mut cursor));
    }

    specifiers.sort_by_key(|(offset, _)| *offset);
    Ok(specifiers.into_iter().map(|(_, value)| value).collect())
}

/// First argument of `require(...)` or `import(...)` when it is a literal.
fn loader_argument(call: Node<'_>, bytes: &[u8]) -> Option<String> {
    let function = call.child_by_field_name("function")?;
    let is_loader = match function.kind() {
        "import" => true,
        "identifier" => function.utf8_text(bytes).ok()? == "require",
        _ => false,
    };
    if !is_loader {
        return None;
    }
    let arguments = call.child_by_field_name("arguments")?;
    let mut cursor = arguments.walk();
    let first = arguments.named_children(&mut cursor).next()?;
    literal_value(first, bytes)
}

fn literal_value(node: Node<'_>, bytes: &[u8]) -> Option<String> {
    match node.kind() {
        "string" => {}
        "template_string" => {
            let mut cursor = node.walk();
            if node
                .named_children(&mut cursor)
                .any(|child| child.kind() == "template_substitution")
            {
                return None;
            }
        }
        _ => return None,
    }
    let text = node.utf8_text(bytes).ok()?;
    let inner = text.get(1..text.len().checked_sub(1)?)?;
    Some(inner.to_string())
}
