/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for loading node trees and compiler options.
//!
//! Rendering itself cannot fail on a well-typed tree; these errors cover the
//! boundary where trees and options arrive as serialized data.

use thiserror::Error;

/// Errors that can occur before a tree reaches the render engine.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The serialized tree is missing fields, has an unknown node type, or
    /// has values of the wrong type.
    #[error("Malformed node tree: {message}")]
    MalformedTree { message: String },

    /// The options document could not be deserialized, or names a runtime
    /// module or function that cannot be imported.
    #[error("Invalid compiler options: {message}")]
    InvalidOptions { message: String },

    /// I/O error (e.g., reading a tree or options file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for compiler operations.
pub type CompileResult<T> = Result<T, CompileError>;
