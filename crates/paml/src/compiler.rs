/*
 * compiler.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The render engine.
//!
//! Walks a node tree depth-first and turns every fragment into one output
//! line. For each node:
//!
//! 1. the start fragment, at the node's depth
//! 2. content fragments, one level deeper
//! 3. every child, one level deeper (recursively)
//! 4. the end fragment, back at the node's depth
//!
//! The root sits at depth 0 and indentation is `depth - 1` spaces, so the
//! document wrapper does not push top-level content to the right.

use std::fmt;

use tracing::{debug, trace};

use crate::ast::Node;
use crate::options::CompilerOptions;
use crate::render::RenderNode;

/// Tag names that never get a closing tag.
pub const SELF_CLOSING_TAGS: &[&str] = &["br", "img", "input"];

/// One emitted fragment and the tree depth it was emitted at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Tree depth of the fragment (root is 0).
    pub depth: usize,
    /// Fragment text, without indentation or newline.
    pub text: String,
}

impl Line {
    /// Number of leading spaces in the output.
    pub fn indent(&self) -> usize {
        self.depth.saturating_sub(1)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:indent$}{}", "", self.text, indent = self.indent())
    }
}

/// A renderable node that owns its children.
pub(crate) trait TreeNode: RenderNode + Sized {
    fn kind_name(&self) -> &'static str;
    fn children(&self) -> &[Self];
}

impl TreeNode for Node {
    fn kind_name(&self) -> &'static str {
        self.kind.name()
    }

    fn children(&self) -> &[Node] {
        &self.children
    }
}

/// Compiles node trees to template source.
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    options: CompilerOptions,
}

impl Compiler {
    /// Create a compiler with the given options.
    pub fn new(options: CompilerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    /// The module-level line that binds the attribute helper in the compiled
    /// template. The trailing backslash swallows the line's newline.
    pub fn start_document(&self) -> String {
        format!(
            "<%! from {} import {} as {} %>\\",
            self.options.runtime_module, self.options.runtime_function, self.options.helper_alias
        )
    }

    /// Whether `name` (already lower-cased) is rendered as `<name />`.
    pub fn is_self_closing(&self, name: &str) -> bool {
        SELF_CLOSING_TAGS.contains(&name)
            || self
                .options
                .self_closing
                .iter()
                .any(|extra| extra.eq_ignore_ascii_case(name))
    }

    /// Render a tree to template source, one `\n`-terminated line per fragment.
    pub fn render(&self, root: &Node) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.render_to(root, &mut out);
        out
    }

    /// Stream the rendered tree into `out`.
    pub fn render_to<W: fmt::Write>(&self, root: &Node, out: &mut W) -> fmt::Result {
        for line in self.render_lines(root) {
            write!(out, "{line}")?;
        }
        Ok(())
    }

    /// The fragment stream before indentation is applied.
    pub fn render_lines(&self, root: &Node) -> Vec<Line> {
        debug!(
            root = root.kind.name(),
            nodes = root.node_count(),
            "rendering node tree"
        );
        let mut lines = Vec::new();
        self.visit(root, 0, &mut lines);
        debug!(lines = lines.len(), "rendered node tree");
        lines
    }

    fn visit<N: TreeNode>(&self, node: &N, depth: usize, lines: &mut Vec<Line>) {
        trace!(depth, kind = node.kind_name(), children = node.children().len(), "visit");

        if let Some(text) = node.render_start(self) {
            lines.push(Line { depth, text });
        }
        for text in node.render_content(self) {
            lines.push(Line {
                depth: depth + 1,
                text,
            });
        }
        for child in node.children() {
            self.visit(child, depth + 1, lines);
        }
        if let Some(text) = node.render_end(self) {
            lines.push(Line { depth, text });
        }
    }
}
