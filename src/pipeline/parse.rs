// parse.rs
// Phase 2: Generate ASTs via tree-sitter

use anyhow::{Context, Result};
use std::path::PathBuf;
use tree_sitter::{Parser, Tree};

/// One successfully parsed file, held until its rewrite at the end of the
/// pipeline.
#[derive(Debug)]
pub struct ParsedFile {
    pub path: PathBuf,
    pub source: String,
    pub tree: Tree,
}

/// Parse Python source text. Returns `None` when the parser produces no tree
/// or the tree contains syntax errors; such files are skipped upstream and
/// never rewritten.
pub fn parse_source(source: &str) -> Result<Option<Tree>> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .context("failed to load Python grammar")?;

    match parser.parse(source, None) {
        Some(tree) if !tree.root_node().has_error() => Ok(Some(tree)),
        _ => Ok(None),
    }
}

/// Line number (1-based) of the first error node, for the skip diagnostic.
pub fn first_error_line(source: &str) -> Option<usize> {
    let mut parser = Parser::new();
    parser.set_language(&tree_sitter_python::LANGUAGE.into()).ok()?;
    let tree = parser.parse(source, None)?;

    let mut cursor = tree.root_node().walk();
    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            return Some(node.start_position().row + 1);
        }
        if cursor.goto_first_child() {
            continue;
        }
        while !cursor.goto_next_sibling() {
            if !cursor.goto_parent() {
                return None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_source() {
        let tree = parse_source("def foo():\n    return 1\n").unwrap();
        assert!(tree.is_some());
    }

    #[test]
    fn rejects_invalid_source() {
        let tree = parse_source("def foo(:\n    ???\n").unwrap();
        assert!(tree.is_none());
    }

    #[test]
    fn reports_first_error_line() {
        let line = first_error_line("x = 1\ndef broken(:\n    pass\n");
        assert!(line.is_some_and(|l| l >= 2));
    }
}
