// splice.rs
// Phase 5: Apply changes to the line buffer

use super::plan::Change;

/// Apply all changes for one file, highest start line first, so the line
/// numbers of not-yet-applied changes stay valid while the buffer grows.
/// Each change becomes exactly three buffer entries: opening `"""`, the
/// docstring text, and closing `"""`, all at the indent of the first
/// non-blank line following the replaced range in the current buffer.
pub fn apply_changes(mut lines: Vec<String>, mut changes: Vec<Change>) -> Vec<String> {
    changes.sort_by(|a, b| b.start.cmp(&a.start));

    for change in &changes {
        let end = change.end.min(lines.len());
        let start = change.start.min(end);
        let indent = leading_indent(&lines[end..]);

        lines.splice(
            start..end,
            [
                format!("{indent}\"\"\""),
                format!("{indent}{}", change.text.trim()),
                format!("{indent}\"\"\""),
            ],
        );
    }

    lines
}

/// Leading whitespace, verbatim, of the first non-blank line in the slice.
pub fn leading_indent(lines: &[String]) -> String {
    lines
        .iter()
        .find(|line| !line.trim().is_empty())
        .map(|line| line.chars().take_while(|c| c.is_whitespace()).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::plan::extract_docstring;

    fn buffer(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    fn change(start: usize, end: usize, text: &str) -> Change {
        Change {
            start,
            end,
            text: text.to_string(),
        }
    }

    #[test]
    fn indent_is_taken_verbatim() {
        assert_eq!(leading_indent(&buffer(&["", "\t\tfoo"])), "\t\t");
        assert_eq!(leading_indent(&buffer(&["    bar()"])), "    ");
        assert_eq!(leading_indent(&buffer(&["", "   "])), "");
        assert_eq!(leading_indent(&[]), "");
    }

    #[test]
    fn all_blocks_land_in_relative_order() {
        let lines = buffer(&["l0", "l1", "l2", "l3", "l4", "l5"]);
        let changes = vec![
            change(1, 1, "A"),
            change(3, 4, "B1\nB2"),
            change(5, 6, "C"),
        ];

        let out = apply_changes(lines, changes);
        assert_eq!(
            out,
            buffer(&[
                "l0", "\"\"\"", "A", "\"\"\"", "l1", "l2", "\"\"\"", "B1\nB2", "\"\"\"", "l4",
                "\"\"\"", "C", "\"\"\"",
            ])
        );
    }

    #[test]
    fn indent_reads_the_already_updated_buffer() {
        // The higher splice replaces the only non-blank line the lower
        // change's indent lookup would have found in the original buffer.
        let lines = buffer(&["def a():", "", "    x = 1"]);
        let changes = vec![change(1, 1, "A"), change(2, 3, "B")];

        let out = apply_changes(lines, changes);
        assert_eq!(
            out,
            buffer(&[
                "def a():",
                "\"\"\"",
                "A",
                "\"\"\"",
                "",
                "\"\"\"",
                "B",
                "\"\"\"",
            ])
        );
    }

    #[test]
    fn spliced_block_round_trips_through_extraction() {
        let lines = buffer(&["x = 1"]);
        let out = apply_changes(lines, vec![change(1, 1, "Example.")]);

        let rendered = out.join("\n");
        let extracted = extract_docstring(&rendered).unwrap();
        assert_eq!(extracted.trim(), "Example.");
    }

    #[test]
    fn replacement_leaves_no_duplicate_delimiters() {
        let lines = buffer(&["def f():", "    \"\"\"Old.\"\"\"", "    return 1"]);
        let out = apply_changes(lines, vec![change(1, 2, "New.")]);

        assert_eq!(
            out,
            buffer(&["def f():", "    \"\"\"", "    New.", "    \"\"\"", "    return 1"])
        );
        let rendered = out.join("\n");
        assert_eq!(rendered.matches("\"\"\"").count(), 2);
    }
}
