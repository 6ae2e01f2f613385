mod pipeline;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

use pipeline::generate::{DocstringSource, GenerationConfig, OpenAiSource};
use pipeline::{discover, locate, parse, plan, rewrite, splice};

/// Generate and refresh docstrings for Python source trees with an LLM.
#[derive(Parser, Debug)]
#[command(name = "pydocgen", version)]
struct Cli {
    /// Directory to scan recursively for Python files; repeatable.
    #[arg(long = "process-dir", value_name = "DIR", required = true)]
    process_dir: Vec<PathBuf>,
}

#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    /// File rewritten with this many docstrings spliced in.
    Rewritten(usize),
    /// File was not valid Python and was left untouched.
    SkippedSyntax,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let requester = OpenAiSource::new(GenerationConfig::default());

    for dir in &cli.process_dir {
        println!("Processing files from directory: {}", dir.display());

        let files = discover::python_files(dir)?;
        let total = files.len();

        for (index, file) in files.iter().enumerate() {
            println!("Processing {} ({}/{})", file.display(), index + 1, total);
            process_file(file, &requester).await?;
        }
    }

    Ok(())
}

/// Run one file through the whole pipeline: parse, locate definitions,
/// request docstrings (one sequential call per definition), splice, rewrite.
/// Syntax errors are the only recovered failure; everything else propagates
/// and ends the run.
async fn process_file(path: &Path, requester: &dyn DocstringSource) -> Result<Outcome> {
    let source =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let Some(tree) = parse::parse_source(&source)? else {
        match parse::first_error_line(&source) {
            Some(line) => eprintln!(
                "Error parsing {}: syntax error near line {line}",
                path.display()
            ),
            None => eprintln!("Error parsing {}: syntax error", path.display()),
        }
        return Ok(Outcome::SkippedSyntax);
    };

    let label = path.display().to_string();
    let parsed = parse::ParsedFile {
        path: path.to_path_buf(),
        source,
        tree,
    };

    let defs = locate::locate_definitions(&parsed.tree, &parsed.source, &label);
    let changes = plan::plan_changes(&parsed, &defs, requester).await?;
    let count = changes.len();

    let lines: Vec<String> = parsed.source.split('\n').map(str::to_string).collect();
    let lines = splice::apply_changes(lines, changes);
    rewrite::write_back(path, &lines)?;

    Ok(Outcome::Rewritten(count))
}
