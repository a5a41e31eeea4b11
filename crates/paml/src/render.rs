/*
 * render.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Per-node fragments.
//!
//! Every node describes itself with up to three kinds of fragments: a start
//! line, content lines (one level deeper than the start), and an end line
//! emitted after all children. Nodes only look at their own fields and the
//! compiler they are handed, never at siblings or ancestors.

use paml_runtime::AttrMerger;

use crate::ast::{Content, Control, Expression, Node, NodeKind, Tag};
use crate::compiler::Compiler;

/// The three rendering questions every node answers.
pub trait RenderNode {
    /// Opening fragment, emitted at the node's depth.
    fn render_start(&self, _compiler: &Compiler) -> Option<String> {
        None
    }

    /// Literal lines emitted one level deeper than the start fragment,
    /// before any children.
    fn render_content(&self, _compiler: &Compiler) -> Vec<String> {
        Vec::new()
    }

    /// Closing fragment, emitted at the node's depth after all children.
    fn render_end(&self, _compiler: &Compiler) -> Option<String> {
        None
    }
}

impl RenderNode for Node {
    fn render_start(&self, compiler: &Compiler) -> Option<String> {
        self.kind.render_start(compiler)
    }

    fn render_content(&self, compiler: &Compiler) -> Vec<String> {
        self.kind.render_content(compiler)
    }

    fn render_end(&self, compiler: &Compiler) -> Option<String> {
        self.kind.render_end(compiler)
    }
}

impl RenderNode for NodeKind {
    fn render_start(&self, compiler: &Compiler) -> Option<String> {
        match self {
            NodeKind::Document => Some(compiler.start_document()),
            NodeKind::Content(content) => content.render_start(compiler),
            NodeKind::Expression(expr) => expr.render_start(compiler),
            NodeKind::Tag(tag) => tag.render_start(compiler),
            NodeKind::Comment => Some("<!--".to_string()),
            NodeKind::Control(control) => control.render_start(compiler),
        }
    }

    fn render_content(&self, compiler: &Compiler) -> Vec<String> {
        match self {
            NodeKind::Content(content) => content.render_content(compiler),
            NodeKind::Expression(expr) => expr.render_content(compiler),
            NodeKind::Tag(tag) => tag.render_content(compiler),
            NodeKind::Control(control) => control.render_content(compiler),
            NodeKind::Document | NodeKind::Comment => Vec::new(),
        }
    }

    fn render_end(&self, compiler: &Compiler) -> Option<String> {
        match self {
            NodeKind::Document => None,
            NodeKind::Content(content) => content.render_end(compiler),
            NodeKind::Expression(expr) => expr.render_end(compiler),
            NodeKind::Tag(tag) => tag.render_end(compiler),
            NodeKind::Comment => Some("-->".to_string()),
            NodeKind::Control(control) => control.render_end(compiler),
        }
    }
}

impl RenderNode for Content {
    fn render_start(&self, _compiler: &Compiler) -> Option<String> {
        Some(self.text.clone())
    }
}

impl RenderNode for Expression {
    fn render_start(&self, _compiler: &Compiler) -> Option<String> {
        Some(format!("${{{}}}", self.expr.trim()))
    }
}

impl RenderNode for Control {
    fn render_start(&self, _compiler: &Compiler) -> Option<String> {
        Some(format!("% {} {}: ", self.keyword, self.test))
    }

    fn render_end(&self, _compiler: &Compiler) -> Option<String> {
        Some(format!("% end{}", self.keyword))
    }
}

impl RenderNode for Tag {
    fn render_start(&self, compiler: &Compiler) -> Option<String> {
        let attrs = self.attr_fragment(compiler);
        if compiler.is_self_closing(&self.name) {
            Some(format!("<{}{} />", self.name, attrs))
        } else {
            Some(format!("<{}{}>", self.name, attrs))
        }
    }

    fn render_end(&self, compiler: &Compiler) -> Option<String> {
        (!compiler.is_self_closing(&self.name)).then(|| format!("</{}>", self.name))
    }
}

impl Tag {
    /// Attribute text spliced directly after the tag name.
    ///
    /// Fully static attributes are merged now. Anything involving the dynamic
    /// expression becomes a call to the runtime helper, with the static
    /// attributes passed as a leading mapping literal.
    fn attr_fragment(&self, compiler: &Compiler) -> String {
        let static_attrs = self.static_attrs();
        let options = compiler.options();

        match &self.kwargs_expr {
            None if static_attrs.is_empty() => String::new(),
            None => AttrMerger::new().source(static_attrs).render(),
            Some(expr) => {
                let args = if static_attrs.is_empty() {
                    expr.clone()
                } else {
                    format!("{}, {}", mapping_literal(&static_attrs), expr)
                };
                format!(
                    "<% {}({}({})) %>",
                    options.writer, options.helper_alias, args
                )
            }
        }
    }
}

/// `{"id": "main", "class": "box"}`
fn mapping_literal(pairs: &[(&str, &str)]) -> String {
    let entries: Vec<String> = pairs
        .iter()
        .map(|(k, v)| format!("{}: {}", string_lit(k), string_lit(v)))
        .collect();
    format!("{{{}}}", entries.join(", "))
}

fn string_lit(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}
