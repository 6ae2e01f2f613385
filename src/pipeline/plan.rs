// plan.rs
// Phase 4: Turn definitions into line-range changes

use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use regex::Regex;

use super::generate::DocstringSource;
use super::locate::{DefKind, Definition};
use super::parse::ParsedFile;

/// First `"""`-delimited block in the model output.
static DOC_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(?s)"""(.*?)""""#).unwrap());

/// Replace lines `[start, end)` of the original buffer (0-based, half-open)
/// with a docstring block built from `text`. Ranges from distinct
/// definitions never overlap: each is confined to its definition's own
/// docstring position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

/// Request a docstring for every definition, in order, and record one Change
/// per definition. A response without a delimited docstring block aborts the
/// file before any change is applied.
pub async fn plan_changes(
    parsed: &ParsedFile,
    defs: &[Definition],
    source: &dyn DocstringSource,
) -> Result<Vec<Change>> {
    let mut changes = Vec::with_capacity(defs.len());

    for def in defs {
        if def.kind == DefKind::Class {
            println!("Processing: {} in {}", def.name, parsed.path.display());
        }

        let raw = source
            .request_docstring(&parsed.source, &def.name, &def.scope)
            .await?;
        let Some(block) = extract_docstring(&raw) else {
            bail!(
                "no docstring block in response for {} in {}",
                def.name,
                parsed.path.display()
            );
        };

        let (start, end) = target_range(def);
        changes.push(Change {
            start,
            end,
            text: normalize_indent(&block),
        });
    }

    Ok(changes)
}

/// The buffer range a definition's new docstring replaces. An existing
/// docstring is replaced on its own lines; otherwise the range is a
/// zero-width placeholder immediately after the declaration line.
fn target_range(def: &Definition) -> (usize, usize) {
    if def.first_stmt.is_docstring {
        (def.first_stmt.start_line - 1, def.first_stmt.end_line)
    } else {
        (def.decl_line, def.decl_line)
    }
}

/// Content of the first triple-quoted block, or `None` if the model output
/// carries no well-formed block.
pub fn extract_docstring(raw: &str) -> Option<String> {
    DOC_BLOCK
        .captures(raw)
        .map(|caps| caps[1].to_string())
}

/// Strip a common leading indent: the leading-whitespace width of the first
/// non-blank line is removed from the front of every line that carries it.
pub fn normalize_indent(text: &str) -> String {
    let indent = text
        .split('\n')
        .find(|line| !line.trim().is_empty())
        .map(|line| line.chars().take_while(|c| c.is_whitespace()).count())
        .unwrap_or(0);

    if indent == 0 {
        return text.to_string();
    }

    text.split('\n')
        .map(|line| strip_leading_whitespace(line, indent))
        .collect::<Vec<_>>()
        .join("\n")
}

fn strip_leading_whitespace(line: &str, n: usize) -> &str {
    let mut stripped = 0;
    for (offset, c) in line.char_indices() {
        if stripped == n {
            return &line[offset..];
        }
        if !c.is_whitespace() {
            return line;
        }
        stripped += 1;
    }
    // All-whitespace line: consumed entirely if it was exactly the indent
    if stripped == n { "" } else { line }
}
