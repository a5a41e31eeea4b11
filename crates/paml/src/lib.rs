/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Node tree compiler for PAML.
//!
//! PAML is an indentation-based markup that cross-compiles to Mako template
//! source. A front-end parser (not part of this crate) turns PAML source into
//! a [`Node`] tree; this crate renders that tree into template text:
//!
//! - Tags: `<div id="main">` ... `</div>`, or `<img ... />` for self-closing names
//! - Expressions: `${user.name}`
//! - Control flow: `% for item in items:` ... `% endfor`
//! - Comments: `<!--` ... `-->`
//!
//! Attributes known at compile time are merged and escaped immediately.
//! Attributes that depend on a runtime expression compile to a call into
//! the attribute helper, which the document preamble imports. The helper
//! module itself comes from [`helper_module`], generated from the tables in
//! [`paml_runtime`] so runtime merging matches [`paml_runtime::build_attr_str`].
//!
//! # Example
//!
//! ```ignore
//! use paml::{Compiler, Node, Tag};
//!
//! let tree = Node::document().with_child(
//!     Node::tag(Tag::new("p").with_class("lead")).with_child(Node::expression("msg")),
//! );
//! let out = Compiler::default().render(&tree);
//! assert!(out.ends_with("<p class=\"lead\">\n ${msg}\n</p>\n"));
//! ```

pub mod ast;
pub mod compiler;
pub mod error;
pub mod helper;
pub mod options;
pub mod render;

// Re-export main types at crate root
pub use ast::{Content, Control, DEFAULT_TAG_NAME, Expression, Node, NodeKind, Tag};
pub use compiler::{Compiler, Line, SELF_CLOSING_TAGS};
pub use error::{CompileError, CompileResult};
pub use helper::{helper_module, helper_module_path};
pub use options::CompilerOptions;
pub use render::RenderNode;
