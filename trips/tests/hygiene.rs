//! Hygiene: enforces coding standards at test time.
//!
//! Scans the production sources of the trips crate for patterns that crash
//! the host or silently drop errors. Every budget is zero; the engine runs
//! inside a UI session and must never take the page down with it.

use std::fs;
use std::path::Path;

struct SourceFile {
    path: String,
    content: String,
}

/// Collect production `.rs` files under `src/`, skipping `*_test.rs` and the
/// shared test helpers.
fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
            continue;
        }
        let path_str = path.to_string_lossy().to_string();
        let is_test = path_str.ends_with("_test.rs") || path_str.ends_with("test_helpers.rs");
        if is_test || path.extension().is_none_or(|e| e != "rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path: path_str, content });
        }
    }
}

/// Assert that `pattern` appears on at most `max` lines across the crate.
fn check_budget(pattern: &str, max: usize) {
    let hits: Vec<(String, usize)> = source_files()
        .into_iter()
        .filter_map(|file| {
            let count = file.content.lines().filter(|line| line.contains(pattern)).count();
            (count > 0).then_some((file.path, count))
        })
        .collect();
    let count: usize = hits.iter().map(|(_, c)| c).sum();
    let listing = hits
        .iter()
        .map(|(path, c)| format!("  {path}: {c}"))
        .collect::<Vec<_>>()
        .join("\n");
    assert!(count <= max, "`{pattern}` budget exceeded: found {count}, max {max}.\n{listing}");
}

#[test]
fn sources_are_found() {
    assert!(!source_files().is_empty(), "run from the trips crate root");
}

#[test]
fn no_unwrap() {
    check_budget(".unwrap()", 0);
}

#[test]
fn no_expect() {
    check_budget(".expect(", 0);
}

#[test]
fn no_panic() {
    check_budget("panic!(", 0);
}

#[test]
fn no_unreachable() {
    check_budget("unreachable!(", 0);
}

#[test]
fn no_todo() {
    check_budget("todo!(", 0);
}

#[test]
fn no_unimplemented() {
    check_budget("unimplemented!(", 0);
}

#[test]
fn no_silent_discard() {
    check_budget("let _ =", 0);
}

#[test]
fn no_dot_ok() {
    check_budget(".ok()", 0);
}

#[test]
fn no_allow_dead_code() {
    check_budget("#[allow(dead_code)]", 0);
}
