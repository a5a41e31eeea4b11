/*
 * ast.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Node tree types.
//!
//! The front-end parser builds a tree of [`Node`]s from indentation-based
//! source; the compiler only reads it. Each node owns its children, and the
//! variant set is closed: [`NodeKind`] lists everything the compiler knows how
//! to emit.
//!
//! Trees can also be exchanged as JSON. Each node is an object with a `type`
//! field, the variant's own fields, and an optional `children` array:
//!
//! ```json
//! {"type": "tag", "name": "ul", "class": "menu", "children": [
//!   {"type": "control", "keyword": "for", "test": "item in items", "children": [
//!     {"type": "tag", "name": "li", "children": [{"type": "expression", "expr": "item"}]}
//!   ]}
//! ]}
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CompileError, CompileResult};

/// Tag name used when a tag has no explicit name (`#main` or `.box`).
pub const DEFAULT_TAG_NAME: &str = "div";

/// A node in the markup tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// What this node emits.
    #[serde(flatten)]
    pub kind: NodeKind,

    /// Child nodes, rendered one level deeper, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

/// The closed set of node variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    /// Tree root; emits the runtime preamble.
    Document,

    /// Raw text emitted verbatim.
    Content(Content),

    /// An expression interpolated into the output: `${expr}`.
    Expression(Expression),

    /// An HTML element.
    Tag(Tag),

    /// An HTML comment wrapping its children.
    Comment,

    /// A control-flow block: `% for x in xs:` ... `% endfor`.
    Control(Control),
}

impl NodeKind {
    /// Variant name, for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Document => "document",
            NodeKind::Content(_) => "content",
            NodeKind::Expression(_) => "expression",
            NodeKind::Tag(_) => "tag",
            NodeKind::Comment => "comment",
            NodeKind::Control(_) => "control",
        }
    }
}

/// Raw text node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    /// Text emitted as-is.
    pub text: String,
}

/// Interpolated expression node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    /// Expression source; surrounding whitespace is dropped on output.
    pub expr: String,
}

/// Control-flow node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Control {
    /// Block keyword (`if`, `for`, `while`, ...). The close line repeats it.
    pub keyword: String,

    /// Test or iteration clause following the keyword.
    pub test: String,
}

/// HTML element node.
///
/// Construct with [`Tag::new`] or [`Tag::from_parts`]; both normalize the
/// name and class list. Deserialized tags go through the same normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TagFields")]
pub struct Tag {
    /// Lower-cased element name.
    pub name: String,

    /// Static `id`, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Static class tokens, space separated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,

    /// Dynamic attribute arguments, passed verbatim to the runtime helper.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kwargs_expr: Option<String>,
}

impl Tag {
    /// Create a tag with no attributes. An empty name becomes `div`.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self::from_parts(Some(name.as_ref()), None, None, None)
    }

    /// Create a tag from the pieces a front-end extracts from `%name#id.a.b(...)`.
    pub fn from_parts(
        name: Option<&str>,
        id: Option<&str>,
        class: Option<&str>,
        kwargs_expr: Option<&str>,
    ) -> Self {
        let name = match name {
            Some(name) if !name.is_empty() => name.to_lowercase(),
            _ => DEFAULT_TAG_NAME.to_string(),
        };
        Self {
            name,
            id: id.filter(|id| !id.is_empty()).map(str::to_string),
            class: class.and_then(normalize_class),
            kwargs_expr: kwargs_expr.filter(|e| !e.is_empty()).map(str::to_string),
        }
    }

    /// Set the static id.
    pub fn with_id(mut self, id: impl AsRef<str>) -> Self {
        let id = id.as_ref();
        self.id = (!id.is_empty()).then(|| id.to_string());
        self
    }

    /// Set the static class list; dots separate tokens like spaces do.
    pub fn with_class(mut self, class: impl AsRef<str>) -> Self {
        self.class = normalize_class(class.as_ref());
        self
    }

    /// Set the dynamic attribute arguments.
    pub fn with_kwargs_expr(mut self, expr: impl AsRef<str>) -> Self {
        let expr = expr.as_ref();
        self.kwargs_expr = (!expr.is_empty()).then(|| expr.to_string());
        self
    }

    /// Static attributes in emission order (`id` first, then `class`).
    pub fn static_attrs(&self) -> Vec<(&'static str, &str)> {
        let mut attrs = Vec::with_capacity(2);
        if let Some(id) = &self.id {
            attrs.push(("id", id.as_str()));
        }
        if let Some(class) = &self.class {
            attrs.push(("class", class.as_str()));
        }
        attrs
    }
}

/// `.box.wide` and `box wide` both become `box wide`; blank becomes `None`.
fn normalize_class(class: &str) -> Option<String> {
    let class = class.replace('.', " ");
    let class = class.trim();
    (!class.is_empty()).then(|| class.to_string())
}

/// Wire shape of a tag before normalization.
#[derive(Deserialize)]
struct TagFields {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default, alias = "class_")]
    class: Option<String>,
    #[serde(default)]
    kwargs_expr: Option<String>,
}

impl From<TagFields> for Tag {
    fn from(fields: TagFields) -> Self {
        Tag::from_parts(
            fields.name.as_deref(),
            fields.id.as_deref(),
            fields.class.as_deref(),
            fields.kwargs_expr.as_deref(),
        )
    }
}

impl Node {
    /// Wrap a kind with no children.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    pub fn document() -> Self {
        Self::new(NodeKind::Document)
    }

    pub fn content(text: impl Into<String>) -> Self {
        Self::new(NodeKind::Content(Content { text: text.into() }))
    }

    pub fn expression(expr: impl Into<String>) -> Self {
        Self::new(NodeKind::Expression(Expression { expr: expr.into() }))
    }

    pub fn tag(tag: Tag) -> Self {
        Self::new(NodeKind::Tag(tag))
    }

    pub fn comment() -> Self {
        Self::new(NodeKind::Comment)
    }

    pub fn control(keyword: impl Into<String>, test: impl Into<String>) -> Self {
        Self::new(NodeKind::Control(Control {
            keyword: keyword.into(),
            test: test.into(),
        }))
    }

    /// Append one child.
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Append several children, in order.
    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Node::node_count).sum::<usize>()
    }

    /// Parse a tree from JSON.
    pub fn from_json(source: &str) -> CompileResult<Self> {
        serde_json::from_str(source).map_err(|e| CompileError::MalformedTree {
            message: e.to_string(),
        })
    }

    /// Read and parse a JSON tree file.
    pub fn from_file(path: &Path) -> CompileResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_json(&source)
    }

    /// Serialize this tree as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> String {
        // Every field is a string, option, or vector: serialization is infallible.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
