//! Structural tests for architectural boundary enforcement.
//!
//! These tests scan source files to verify that each layer imports only what
//! it is allowed to.

use std::path::{Path, PathBuf};

fn src(sub: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("src").join(sub)
}

/// Collect all `.rs` files under a directory recursively.
fn collect_rs_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                files.extend(collect_rs_files(&path));
            } else if path.extension().and_then(|e| e.to_str()) == Some("rs") {
                files.push(path);
            }
        }
    }
    files
}

/// Non-comment lines of every file under `dir` containing any of `forbidden`.
fn violations(dir: &Path, forbidden: &[&str]) -> Vec<String> {
    let mut found = Vec::new();
    for file in collect_rs_files(dir) {
        let Ok(content) = std::fs::read_to_string(&file) else {
            continue;
        };
        for (n, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.starts_with("//") {
                continue;
            }
            if let Some(bad) = forbidden.iter().find(|f| trimmed.contains(*f)) {
                found.push(format!("{}:{}: {bad}", file.display(), n + 1));
            }
        }
    }
    found
}

#[test]
fn test_domain_has_no_io_or_outer_layer_imports() {
    let v = violations(
        &src("domain"),
        &[
            "crate::infra",
            "crate::application",
            "crate::commands",
            "crate::output",
            "tokio",
            "std::fs",
            "std::net",
            "std::process",
            "bollard",
        ],
    );
    assert!(v.is_empty(), "domain boundary violations:\n{}", v.join("\n"));
}

#[test]
fn test_application_does_not_import_infra_or_presentation() {
    let v = violations(
        &src("application"),
        &[
            "crate::infra",
            "crate::commands",
            "crate::output",
            "bollard",
            "std::fs",
        ],
    );
    assert!(v.is_empty(), "application boundary violations:\n{}", v.join("\n"));
}

#[test]
fn test_infra_does_not_import_presentation() {
    let v = violations(&src("infra"), &["crate::commands", "crate::output"]);
    assert!(v.is_empty(), "infra boundary violations:\n{}", v.join("\n"));
}

#[test]
fn test_only_infra_talks_to_docker() {
    for layer in ["commands", "output"] {
        let v = violations(&src(layer), &["bollard"]);
        assert!(v.is_empty(), "{layer} uses bollard directly:\n{}", v.join("\n"));
    }
}
