// discover.rs
// Phase 1: Find Python files under the processed directories

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Recursively collect all `.py` files beneath `root`, in deterministic
/// walk order. Package initializers (`__init__.py`) are excluded here so no
/// later phase ever sees them.
pub fn python_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry =
            entry.with_context(|| format!("failed to walk directory {}", root.display()))?;

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("py") {
            continue;
        }
        if path.file_name().and_then(|n| n.to_str()) == Some("__init__.py") {
            continue;
        }

        files.push(path.to_path_buf());
    }

    Ok(files)
}
