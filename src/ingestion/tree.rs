//! Tree-bank ingestion: one bracketed tree per line.

use std::fs;
use std::path::Path;

use crate::error::ExampleResult;
use crate::example::Example;
use crate::field::ListFields;
use crate::tree::TreeParser;

/// Ingest a tree-bank file into examples.
pub fn examples_from_tree_path(
    path: impl AsRef<Path>,
    fields: &ListFields,
    subtrees: bool,
    parser: &dyn TreeParser,
) -> ExampleResult<Vec<Example>> {
    let text = fs::read_to_string(path)?;
    examples_from_tree_str(&text, fields, subtrees, parser)
}

/// Build examples from newline-separated bracketed trees.
///
/// Blank lines are skipped. With `subtrees`, every tree contributes one example per subtree
/// (see [`Example::from_subtrees`]); otherwise one example per tree.
pub fn examples_from_tree_str(
    input: &str,
    fields: &ListFields,
    subtrees: bool,
    parser: &dyn TreeParser,
) -> ExampleResult<Vec<Example>> {
    let mut examples = Vec::new();
    for (i, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if subtrees {
            let built = Example::from_subtrees(line, fields, parser)?;
            tracing::debug!(line = i + 1, examples = built.len(), "built examples from subtrees");
            examples.extend(built);
        } else {
            examples.push(Example::from_tree(line, fields, parser)?);
            tracing::debug!(line = i + 1, "built example from tree");
        }
    }
    Ok(examples)
}
