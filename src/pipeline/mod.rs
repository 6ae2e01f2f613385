// Pipeline module declarations
// Each phase is a separate module for clean separation

pub mod discover; // Phase 1: Find Python files under the processed directories
pub mod parse;    // Phase 2: Generate ASTs via tree-sitter
pub mod locate;   // Phase 3: Enumerate documentable definitions
pub mod generate; // LLM docstring generation (external collaborator)
pub mod plan;     // Phase 4: Turn definitions into line-range changes
pub mod splice;   // Phase 5: Apply changes to the line buffer
pub mod rewrite;  // Phase 6: Overwrite the source file in place
