//! End-to-end tests invoking the compiled `rssg` binary against small
//! synthetic repos, one per language family: Java star imports, TS relative
//! directory imports, C include-path heuristics, and boundary behaviours
//! for empty/oversized/unknown-extension files.

use std::path::PathBuf;
use std::process::Command;

fn binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_rssg"))
}

fn run(args: &[&str]) -> (std::process::ExitStatus, String, String) {
    let out = Command::new(binary())
        .args(args)
        .output()
        .expect("failed to invoke rssg binary");
    (
        out.status,
        String::from_utf8_lossy(&out.stdout).to_string(),
        String::from_utf8_lossy(&out.stderr).to_string(),
    )
}

#[test]
fn missing_repo_path_exits_with_code_2() {
    let (status, _stdout, stderr) = run(&["--repo", "/no/such/path/xyz"]);
    assert_eq!(status.code(), Some(2));
    assert!(stderr.contains("not a directory"));
}

#[test]
fn java_star_import_produces_two_import_edges() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("com/acme")).unwrap();
    std::fs::write(
        dir.path().join("com/acme/App.java"),
        "package com.acme;\nimport com.acme.util.*;\nclass App {}\n",
    )
    .unwrap();
    std::fs::create_dir_all(dir.path().join("com/acme/util")).unwrap();
    std::fs::write(
        dir.path().join("com/acme/util/Helper.java"),
        "package com.acme.util;\nclass Helper {}\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("com/acme/util/Other.java"),
        "package com.acme.util;\nclass Other {}\n",
    )
    .unwrap();

    let (status, stdout, stderr) = run(&["--repo", dir.path().to_str().unwrap(), "--lang", "java"]);
    assert!(status.success(), "stderr: {stderr}");
    let doc: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let edges = doc["edges"].as_array().unwrap();
    let import_edges = edges
        .iter()
        .filter(|e| e[2]["relation"] == "Imports")
        .count();
    assert_eq!(import_edges, 2, "star import should fan out to both package members");
}

#[test]
fn typescript_relative_directory_import_resolves_to_index() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("lib")).unwrap();
    std::fs::write(dir.path().join("main.ts"), "import { x } from './lib';\n").unwrap();
    std::fs::write(dir.path().join("lib/index.ts"), "export const x = 1;\n").unwrap();

    let (status, stdout, stderr) = run(&["--repo", dir.path().to_str().unwrap(), "--lang", "typescript"]);
    assert!(status.success(), "stderr: {stderr}");
    let doc: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let edges = doc["edges"].as_array().unwrap();
    assert!(edges.iter().any(|e| e[2]["relation"] == "Imports"
        && e[1]["location"]["file_path"].as_str().unwrap_or_default().contains("index.ts")));
}

#[test]
fn c_include_resolves_via_sibling_src_directory() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("src")).unwrap();
    std::fs::write(dir.path().join("src/main.c"), "#include \"util.h\"\nint main() { return 0; }\n").unwrap();
    std::fs::write(dir.path().join("src/util.h"), "void helper(void);\n").unwrap();

    let (status, stdout, stderr) = run(&["--repo", dir.path().to_str().unwrap(), "--lang", "c"]);
    assert!(status.success(), "stderr: {stderr}");
    let doc: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let edges = doc["edges"].as_array().unwrap();
    assert!(edges.iter().any(|e| e[2]["relation"] == "Imports"));
}

#[test]
fn empty_files_are_skipped_and_unknown_extensions_are_ignored() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join("empty.py"), "").unwrap();
    std::fs::write(dir.path().join("real.py"), "x = 1\n").unwrap();
    std::fs::write(dir.path().join("notes.txt"), "not source code\n").unwrap();

    let (status, stdout, stderr) = run(&["--repo", dir.path().to_str().unwrap(), "--lang", "python"]);
    assert!(status.success(), "stderr: {stderr}");
    let doc: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    // Only real.py should have produced a node; empty.py and notes.txt are absent.
    assert!(doc["edges"].as_array().unwrap().is_empty());
}

#[test]
fn unknown_generator_is_rejected_with_exit_code_1() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join("a.py"), "x = 1\n").unwrap();
    let (status, _stdout, stderr) = run(&[
        "--repo",
        dir.path().to_str().unwrap(),
        "--generator",
        "jedi",
    ]);
    assert_eq!(status.code(), Some(1));
    assert!(stderr.contains("jedi"));
}

#[test]
fn ipysigma_output_format_is_sigma_js_compatible_json() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join("a.py"), "import b\n").unwrap();
    std::fs::write(dir.path().join("b.py"), "x = 1\n").unwrap();

    let (status, stdout, stderr) = run(&[
        "--repo",
        dir.path().to_str().unwrap(),
        "--lang",
        "python",
        "--output-format",
        "ipysigma",
    ]);
    assert!(status.success(), "stderr: {stderr}");
    let doc: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(doc["nodes"].is_array());
    assert!(doc["edges"].is_array());
}

#[test]
fn pyvis_without_output_file_is_rejected() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join("a.py"), "x = 1\n").unwrap();
    let (status, _stdout, stderr) = run(&[
        "--repo",
        dir.path().to_str().unwrap(),
        "--output-format",
        "pyvis",
    ]);
    assert_eq!(status.code(), Some(1));
    assert!(stderr.contains("output-file"));
}
