/*
 * helper.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The runtime helper module shipped next to compiled templates.
//!
//! Compiled documents import the attribute helper by module path (see
//! [`Compiler::start_document`](crate::Compiler::start_document)). The module
//! is generated here from the same priority and escape tables the compiler
//! uses for static attributes, so runtime and compile-time merging agree.

use std::fmt::Write as _;
use std::path::PathBuf;

use paml_runtime::{ADAPT_CAMELCASE_KEY, ATTR_PRIORITIES, HTML_ESCAPES};

use crate::error::{CompileError, CompileResult};
use crate::options::CompilerOptions;

/// Relative path of the helper module: `app.helpers` -> `app/helpers.py`.
pub fn helper_module_path(options: &CompilerOptions) -> CompileResult<PathBuf> {
    let mut path = PathBuf::new();
    for segment in options.runtime_module.split('.') {
        check_identifier("runtime-module", &options.runtime_module, segment)?;
        path.push(segment);
    }
    path.set_extension("py");
    Ok(path)
}

/// Source of the helper module defining `runtime_function`.
pub fn helper_module(options: &CompilerOptions) -> CompileResult<String> {
    helper_module_path(options)?;
    let function = &options.runtime_function;
    check_identifier("runtime-function", function, function)?;

    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_helper(&mut out, function);
    Ok(out)
}

fn write_helper(out: &mut String, function: &str) -> std::fmt::Result {
    writeln!(out, "# Attribute helper for templates compiled by paml.")?;
    writeln!(out, "import re")?;
    writeln!(out)?;
    writeln!(out, "_PRIORITY = {{")?;
    for (key, priority) in ATTR_PRIORITIES {
        writeln!(out, "    {}: {},", py_str(key), priority)?;
    }
    writeln!(out, "}}")?;
    writeln!(out)?;
    writeln!(out, "_ESCAPES = (")?;
    for (ch, entity) in HTML_ESCAPES {
        writeln!(out, "    ({}, {}),", py_str(&ch.to_string()), py_str(entity))?;
    }
    writeln!(out, ")")?;
    writeln!(out)?;
    writeln!(out, "_ADAPT_KEY = {}", py_str(ADAPT_CAMELCASE_KEY))?;
    writeln!(
        out,
        "_BOUNDARY = re.compile(r'(?<=[a-z0-9])(?=[A-Z])|(?<=[A-Z])(?=[A-Z][a-z])')"
    )?;
    out.push_str(HELPER_BODY);
    writeln!(out)?;
    writeln!(out)?;
    writeln!(out)?;
    writeln!(out, "def {function}(*args, **kwargs):")?;
    out.push_str(MERGE_BODY);
    Ok(())
}

const HELPER_BODY: &str = r#"

def _escape(value):
    value = str(value)
    for char, entity in _ESCAPES:
        value = value.replace(char, entity)
    return value


def _kebab(key):
    words = re.split(r'[^A-Za-z0-9]+', _BOUNDARY.sub('-', key))
    return '-'.join(word.lower() for word in words if word)"#;

const MERGE_BODY: &str = r#"    adapt = str(kwargs.pop(_ADAPT_KEY, False)).strip().lower() == 'true'
    merged = {}
    for source in args + (kwargs,):
        for key, value in source.items():
            key = key.strip('_')
            if adapt:
                key = _kebab(key)
            merged[key] = value
    pairs = sorted(merged.items(), key=lambda pair: (_PRIORITY.get(pair[0], 0), pair[0]))
    return ''.join(' %s="%s"' % (key, _escape(value)) for key, value in pairs)
"#;

fn check_identifier(field: &str, full: &str, segment: &str) -> CompileResult<()> {
    let mut chars = segment.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(CompileError::InvalidOptions {
            message: format!("{field} {full:?} is not a valid import name"),
        })
    }
}

/// Single-quoted literal for the helper's source.
fn py_str(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            _ => out.push(ch),
        }
    }
    out.push('\'');
    out
}
