/*
 * options.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Compiler configuration.
//!
//! Every field has a default, so an options file only needs the keys it
//! changes:
//!
//! ```yaml
//! runtime-module: myapp.templating
//! self-closing: [hr, meta, link]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CompileError, CompileResult};

/// Options controlling the emitted template program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct CompilerOptions {
    /// Module the document preamble imports the attribute helper from.
    pub runtime_module: String,

    /// Name of the attribute helper inside `runtime_module`.
    pub runtime_function: String,

    /// Local name the helper is bound to in the compiled template.
    pub helper_alias: String,

    /// Output writer callable used to inject runtime-built attributes.
    pub writer: String,

    /// Tag names treated as self-closing in addition to `br`, `img` and `input`.
    pub self_closing: Vec<String>,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            runtime_module: "paml_runtime".to_string(),
            runtime_function: "build_attr_str".to_string(),
            helper_alias: "__H_attrs".to_string(),
            writer: "__M_writer".to_string(),
            self_closing: Vec::new(),
        }
    }
}

impl CompilerOptions {
    /// Parse options from a YAML document.
    pub fn from_yaml_str(source: &str) -> CompileResult<Self> {
        // An empty document means "all defaults".
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(source).map_err(|e| CompileError::InvalidOptions {
            message: e.to_string(),
        })
    }

    /// Load options from a YAML file.
    pub fn from_file(path: &Path) -> CompileResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&source)
    }
}
