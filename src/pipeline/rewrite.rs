// rewrite.rs
// Phase 6: Overwrite the source file in place

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Join the modified buffer and overwrite the original file. No backup and
/// no atomic rename; the tool's contract is a plain in-place rewrite.
pub fn write_back(path: &Path, lines: &[String]) -> Result<()> {
    fs::write(path, lines.join("\n"))
        .with_context(|| format!("failed to write {}", path.display()))
}
