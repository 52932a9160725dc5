//! Bracketed parse-tree notation, e.g. `(S (NP the cat) (VP sat))`.
//!
//! Tree parsing is a pluggable capability ([`TreeParser`]). Builds with the `tree` feature
//! (default) get [`BracketedTreeParser`]; without it, [`default_tree_parser`] returns
//! [`UnavailableTreeParser`], which fails every call with an installation hint.

use std::fmt;
use std::sync::Arc;

use crate::error::{ExampleError, ExampleResult};

/// A labeled tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    label: String,
    children: Vec<TreeNode>,
}

/// A child of a [`Tree`]: either a leaf token or a nested tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    Leaf(String),
    Tree(Tree),
}

impl Tree {
    pub fn new(label: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            label: label.into(),
            children,
        }
    }

    /// Node label (may be empty).
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    /// All leaf tokens under this node, left to right.
    pub fn leaves(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a str>) {
        for child in &self.children {
            match child {
                TreeNode::Leaf(token) => out.push(token.as_str()),
                TreeNode::Tree(t) => t.collect_leaves(out),
            }
        }
    }

    /// This node and every descendant tree, in pre-order.
    pub fn subtrees(&self) -> Vec<&Tree> {
        let mut out = Vec::new();
        self.collect_subtrees(&mut out);
        out
    }

    fn collect_subtrees<'a>(&'a self, out: &mut Vec<&'a Tree>) {
        out.push(self);
        for child in &self.children {
            if let TreeNode::Tree(t) = child {
                t.collect_subtrees(out);
            }
        }
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.label)?;
        for child in &self.children {
            match child {
                TreeNode::Leaf(token) => write!(f, " {token}")?,
                TreeNode::Tree(t) => write!(f, " {t}")?,
            }
        }
        write!(f, ")")
    }
}

/// Tree parsing capability used by [`crate::example::Example::from_tree`].
pub trait TreeParser: Send + Sync {
    fn parse(&self, text: &str) -> ExampleResult<Tree>;
}

/// Parser for round-bracket tree notation.
///
/// Labels and leaves are runs of characters other than whitespace and parentheses. A label may
/// be omitted (`( (S ...))`), which yields an empty label.
#[cfg(feature = "tree")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BracketedTreeParser;

#[cfg(feature = "tree")]
impl TreeParser for BracketedTreeParser {
    fn parse(&self, text: &str) -> ExampleResult<Tree> {
        parse_bracketed(text)
    }
}

#[cfg(feature = "tree")]
fn parse_bracketed(text: &str) -> ExampleResult<Tree> {
    let mut open: Vec<Tree> = Vec::new();
    let mut root: Option<Tree> = None;
    let mut pos = skip_whitespace(text, 0);

    while pos < text.len() {
        let rest = &text[pos..];
        if rest.starts_with('(') {
            if root.is_some() {
                return Err(tree_error(pos, "expected end-of-string"));
            }
            let label_start = skip_whitespace(text, pos + 1);
            let label_end = token_end(text, label_start);
            open.push(Tree::new(&text[label_start..label_end], Vec::new()));
            pos = label_end;
        } else if rest.starts_with(')') {
            let node = open
                .pop()
                .ok_or_else(|| tree_error(pos, "unexpected ')'"))?;
            match open.last_mut() {
                Some(parent) => parent.children.push(TreeNode::Tree(node)),
                None => root = Some(node),
            }
            pos += 1;
        } else {
            let end = token_end(text, pos);
            match open.last_mut() {
                Some(parent) => parent.children.push(TreeNode::Leaf(text[pos..end].to_string())),
                None if root.is_some() => return Err(tree_error(pos, "expected end-of-string")),
                None => return Err(tree_error(pos, "expected '('")),
            }
            pos = end;
        }
        pos = skip_whitespace(text, pos);
    }

    if !open.is_empty() {
        return Err(tree_error(text.len(), "expected ')'"));
    }
    root.ok_or_else(|| tree_error(text.len(), "expected '('"))
}

#[cfg(feature = "tree")]
fn skip_whitespace(text: &str, from: usize) -> usize {
    text[from..]
        .char_indices()
        .find(|(_, c)| !c.is_whitespace())
        .map(|(i, _)| from + i)
        .unwrap_or(text.len())
}

#[cfg(feature = "tree")]
fn token_end(text: &str, from: usize) -> usize {
    text[from..]
        .char_indices()
        .find(|(_, c)| c.is_whitespace() || *c == '(' || *c == ')')
        .map(|(i, _)| from + i)
        .unwrap_or(text.len())
}

#[cfg(feature = "tree")]
fn tree_error(position: usize, message: &str) -> ExampleError {
    ExampleError::TreeParse {
        position,
        message: message.to_string(),
    }
}

const INSTALL_HINT: &str =
    "tree support is not compiled in; enable the `tree` cargo feature of example-records";

/// Stand-in parser for builds without tree support.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableTreeParser;

impl TreeParser for UnavailableTreeParser {
    fn parse(&self, _text: &str) -> ExampleResult<Tree> {
        tracing::error!("Please enable tree parsing: {INSTALL_HINT}");
        Err(ExampleError::TreeParserUnavailable {
            hint: INSTALL_HINT.to_string(),
        })
    }
}

/// The tree parser this build was configured with.
pub fn default_tree_parser() -> Arc<dyn TreeParser> {
    #[cfg(feature = "tree")]
    {
        Arc::new(BracketedTreeParser)
    }

    #[cfg(not(feature = "tree"))]
    {
        Arc::new(UnavailableTreeParser)
    }
}
