// locate.rs
// Phase 3: Enumerate documentable definitions

use tree_sitter::{Node, Tree};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefKind {
    Function,
    Class,
    Method,
}

/// The first statement of a definition's body, which is where a docstring
/// lives (or would live).
#[derive(Debug, Clone)]
pub struct FirstStmt {
    pub start_line: usize,
    pub end_line: usize,
    pub is_docstring: bool,
}

/// One function, class, or method eligible for docstring generation.
/// All line numbers are 1-based.
#[derive(Debug, Clone)]
pub struct Definition {
    pub kind: DefKind,
    pub name: String,
    /// Owning scope passed to the LLM: the enclosing class name for methods,
    /// the file label for top-level definitions.
    pub scope: String,
    /// Line of the `def` / `class` keyword (decorators excluded).
    pub decl_line: usize,
    pub first_stmt: FirstStmt,
}

/// Enumerate documentable definitions: top-level functions first, then each
/// top-level class immediately followed by its methods. Names starting with
/// `_` are excluded for functions and methods (which also drops `__init__`
/// and the other dunders); classes are never name-filtered.
pub fn locate_definitions(tree: &Tree, source: &str, file_label: &str) -> Vec<Definition> {
    let root = tree.root_node();
    let mut cursor = root.walk();
    let top_level: Vec<Node> = root.named_children(&mut cursor).collect();
    let mut defs = Vec::new();

    for node in &top_level {
        if let Some(def) = resolve_definition(*node) {
            if is_function_node(def) {
                push_definition(&mut defs, def, source, DefKind::Function, file_label);
            }
        }
    }

    for node in &top_level {
        let Some(class_def) = resolve_definition(*node) else {
            continue;
        };
        if class_def.kind() != "class_definition" {
            continue;
        }

        let Some(class_name) = node_name(class_def, source) else {
            continue;
        };
        push_definition(&mut defs, class_def, source, DefKind::Class, file_label);

        let Some(body) = class_def.child_by_field_name("body") else {
            continue;
        };
        let mut body_cursor = body.walk();
        for stmt in body.named_children(&mut body_cursor) {
            if let Some(method) = resolve_definition(stmt) {
                if is_function_node(method) {
                    push_definition(&mut defs, method, source, DefKind::Method, &class_name);
                }
            }
        }
    }

    defs
}

fn push_definition(
    defs: &mut Vec<Definition>,
    def: Node,
    source: &str,
    kind: DefKind,
    scope: &str,
) {
    let Some(name) = node_name(def, source) else {
        return;
    };
    if kind != DefKind::Class && name.starts_with('_') {
        return;
    }
    let Some(first_stmt) = first_statement(def) else {
        return;
    };

    defs.push(Definition {
        kind,
        name,
        scope: scope.to_string(),
        decl_line: def.start_position().row + 1,
        first_stmt,
    });
}

/// Unwrap `decorated_definition` wrappers to the inner `def` / `class`.
fn resolve_definition(node: Node) -> Option<Node> {
    let def = if node.kind() == "decorated_definition" {
        node.child_by_field_name("definition")?
    } else {
        node
    };
    match def.kind() {
        "function_definition" | "async_function_definition" | "class_definition" => Some(def),
        _ => None,
    }
}

fn is_function_node(node: Node) -> bool {
    matches!(node.kind(), "function_definition" | "async_function_definition")
}

fn node_name(node: Node, source: &str) -> Option<String> {
    let name = node.child_by_field_name("name")?;
    name.utf8_text(source.as_bytes()).ok().map(str::to_string)
}

fn first_statement(def: Node) -> Option<FirstStmt> {
    let body = def.child_by_field_name("body")?;
    let first = body.named_child(0)?;

    let is_docstring = first.kind() == "expression_statement"
        && first
            .named_child(0)
            .is_some_and(|expr| expr.kind() == "string");

    Some(FirstStmt {
        start_line: first.start_position().row + 1,
        end_line: first.end_position().row + 1,
        is_docstring,
    })
}
