/*
 * cli_tests.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * End-to-end tests for the paml binary.
 */

use pretty_assertions::assert_eq;
use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

fn paml(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_paml"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to run paml")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("stdout is not UTF-8")
}

const TREE: &str = r#"{"type": "document", "children": [
  {"type": "control", "keyword": "for", "test": "x in items", "children": [
    {"type": "tag", "name": "img", "kwargs_expr": "src=x"}
  ]}
]}"#;

#[test]
fn test_compile_to_stdout() {
    let temp = TempDir::new().expect("Failed to create temp directory");
    let input = temp.path().join("tree.json");
    fs::write(&input, TREE).unwrap();

    let output = paml(&["compile", input.to_str().unwrap()]);
    assert!(output.status.success(), "{output:?}");
    assert_eq!(
        stdout(&output),
        concat!(
            "<%! from paml_runtime import build_attr_str as __H_attrs %>\\\n",
            "% for x in items: \n",
            " <img<% __M_writer(__H_attrs(src=x)) %> />\n",
            "% endfor\n",
        )
    );
}

#[test]
fn test_compile_to_file_with_config() {
    let temp = TempDir::new().expect("Failed to create temp directory");
    let input = temp.path().join("tree.json");
    let config = temp.path().join("paml.yaml");
    let out = temp.path().join("tree.mako");
    fs::write(&input, TREE).unwrap();
    fs::write(&config, "writer: context.write\n").unwrap();

    let output = paml(&[
        "compile",
        input.to_str().unwrap(),
        "-c",
        config.to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{output:?}");
    assert!(stdout(&output).is_empty());

    let written = fs::read_to_string(&out).unwrap();
    assert!(written.contains(" <img<% context.write(__H_attrs(src=x)) %> />\n"));
}

#[test]
fn test_compile_lines() {
    let temp = TempDir::new().expect("Failed to create temp directory");
    let input = temp.path().join("tree.json");
    fs::write(&input, TREE).unwrap();

    let output = paml(&["compile", "--lines", input.to_str().unwrap()]);
    assert!(output.status.success(), "{output:?}");
    let out = stdout(&output);
    let depths: Vec<&str> = out
        .lines()
        .map(|l| l.split('\t').next().unwrap())
        .collect();
    assert_eq!(depths, vec!["0", "1", "2", "1"]);
}

#[test]
fn test_compile_malformed_tree_fails() {
    let temp = TempDir::new().expect("Failed to create temp directory");
    let input = temp.path().join("tree.json");
    fs::write(&input, r#"{"type": "expression"}"#).unwrap();

    let output = paml(&["compile", input.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(stdout(&output).is_empty(), "no partial output");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Malformed node tree"), "{stderr}");
}

#[test]
fn test_attrs_command() {
    let output = paml(&[
        "attrs",
        r#"{"id": "x"}"#,
        "--named",
        r#"{"checked": "yes", "class_": "y"}"#,
    ]);
    assert!(output.status.success(), "{output:?}");
    assert_eq!(stdout(&output), " id=\"x\" class=\"y\" checked=\"yes\"\n");
}

#[test]
fn test_runtime_command() {
    let output = paml(&["runtime"]);
    assert!(output.status.success(), "{output:?}");
    assert_eq!(
        stdout(&output),
        "<%! from paml_runtime import build_attr_str as __H_attrs %>\\\n"
    );
}

#[test]
fn test_runtime_writes_helper_module() {
    let temp = TempDir::new().expect("Failed to create temp directory");
    let dir = temp.path().to_str().unwrap();

    let output = paml(&["runtime", "--module-dir", dir]);
    assert!(output.status.success(), "{output:?}");
    assert_eq!(
        stdout(&output),
        "<%! from paml_runtime import build_attr_str as __H_attrs %>\\\n"
    );

    let module = fs::read_to_string(temp.path().join("paml_runtime.py")).unwrap();
    assert!(module.contains("\ndef build_attr_str(*args, **kwargs):\n"));
    for (key, priority) in paml_runtime::ATTR_PRIORITIES {
        assert!(module.contains(&format!("    '{key}': {priority},\n")), "{key}");
    }
}

#[test]
fn test_runtime_helper_follows_configured_module() {
    let temp = TempDir::new().expect("Failed to create temp directory");
    let config = temp.path().join("paml.yaml");
    fs::write(
        &config,
        "runtime-module: app.helpers\nruntime-function: attrs\n",
    )
    .unwrap();
    let out_dir = temp.path().join("out");

    let output = paml(&[
        "runtime",
        "-c",
        config.to_str().unwrap(),
        "--module-dir",
        out_dir.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{output:?}");

    let module = fs::read_to_string(out_dir.join("app").join("helpers.py")).unwrap();
    assert!(module.contains("\ndef attrs(*args, **kwargs):\n"));
}

#[test]
fn test_runtime_rejects_unimportable_module() {
    let temp = TempDir::new().expect("Failed to create temp directory");
    let config = temp.path().join("paml.yaml");
    fs::write(&config, "runtime-module: my-helpers\n").unwrap();

    let output = paml(&[
        "runtime",
        "-c",
        config.to_str().unwrap(),
        "--module-dir",
        temp.path().to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not a valid import name"), "{stderr}");
}

fn python_available() -> bool {
    Command::new("python3")
        .arg("--version")
        .output()
        .is_ok_and(|output| output.status.success())
}

#[test]
fn test_runtime_helper_matches_build_attr_str() {
    if !python_available() {
        eprintln!("python3 not available, skipping test");
        return;
    }

    let temp = TempDir::new().expect("Failed to create temp directory");
    let output = paml(&["runtime", "--module-dir", temp.path().to_str().unwrap()]);
    assert!(output.status.success(), "{output:?}");

    let script = r#"
import sys
sys.path.insert(0, sys.argv[1])
from paml_runtime import build_attr_str
print(build_attr_str({'id': 'x', 'title': 'a < b & "c"'}, {'zeta': '1', 'alpha': '2'}, checked='yes', class_='y'))
print(build_attr_str({'_class': 'a', 'selected': 's'}, {'class': 'b'}))
print(build_attr_str({'innerHTML': 'x'}, ariaLabelledBy='y', __adapt_camelcase=True))
"#;
    let python = Command::new("python3")
        .args(["-c", script, temp.path().to_str().unwrap()])
        .output()
        .expect("Failed to run python3");
    assert!(python.status.success(), "{python:?}");

    let map = |pairs: &[(&str, &str)]| -> paml_runtime::AttrMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    };
    let expected = [
        paml_runtime::build_attr_str(
            &[
                map(&[("id", "x"), ("title", r#"a < b & "c""#)]),
                map(&[("zeta", "1"), ("alpha", "2")]),
            ],
            &map(&[("checked", "yes"), ("class_", "y")]),
        ),
        paml_runtime::build_attr_str(
            &[map(&[("_class", "a"), ("selected", "s")]), map(&[("class", "b")])],
            &map(&[]),
        ),
        paml_runtime::AttrMerger::new()
            .source([("innerHTML", "x")])
            .named([(paml_runtime::ADAPT_CAMELCASE_KEY, "true"), ("ariaLabelledBy", "y")])
            .render(),
    ];

    let actual = stdout(&python);
    let actual: Vec<&str> = actual.lines().collect();
    assert_eq!(actual, expected.iter().map(String::as_str).collect::<Vec<_>>());
    assert_eq!(
        actual[0],
        r#" id="x" class="y" alpha="2" title="a &lt; b &amp; &quot;c&quot;" zeta="1" checked="yes""#
    );
}
