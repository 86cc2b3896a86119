//! Structural tests for layer boundary enforcement.
//!
//! These tests scan source files to verify that the domain / application /
//! infra / commands boundaries hold.

use std::path::{Path, PathBuf};

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

/// Read a file and strip comment lines to avoid false positives.
fn read_non_comment_lines(path: &Path) -> Vec<String> {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Vec::new();
    };
    content
        .lines()
        .filter(|l| {
            let trimmed = l.trim();
            !trimmed.starts_with("//") && !trimmed.starts_with("/*") && !trimmed.starts_with('*')
        })
        .map(String::from)
        .collect()
}

/// Track brace depth and return whether a line is inside a `#[cfg(test)]` block.
struct CfgTestTracker {
    in_test_block: bool,
    brace_depth: i32,
    test_block_start_depth: i32,
}

impl CfgTestTracker {
    fn new() -> Self {
        Self {
            in_test_block: false,
            brace_depth: 0,
            test_block_start_depth: 0,
        }
    }

    fn process_line(&mut self, line: &str) -> bool {
        if line.trim().contains("#[cfg(test)]") {
            self.in_test_block = true;
            self.test_block_start_depth = self.brace_depth;
        }
        for ch in line.chars() {
            match ch {
                '{' => self.brace_depth += 1,
                '}' => {
                    self.brace_depth -= 1;
                    if self.in_test_block && self.brace_depth <= self.test_block_start_depth {
                        self.in_test_block = false;
                    }
                }
                _ => {}
            }
        }
        self.in_test_block
    }
}

fn src_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("src")
}

/// `(relative path, line number, line)` for every non-comment line under `dir`
/// containing any of `needles`.
fn find_in(dir: &Path, needles: &[&str]) -> Vec<String> {
    let mut violations = Vec::new();
    for file in collect_rs_files(dir) {
        let rel = file
            .strip_prefix(env!("CARGO_MANIFEST_DIR"))
            .unwrap_or(&file)
            .display()
            .to_string();
        for (i, line) in read_non_comment_lines(&file).iter().enumerate() {
            if needles.iter().any(|n| line.contains(n)) {
                violations.push(format!("{rel}:{}: {line}", i + 1));
            }
        }
    }
    violations
}

// ── Domain stays pure ─────────────────────────────────────────────────────────

#[test]
fn domain_has_no_imports_from_outer_layers() {
    let violations = find_in(
        &src_dir().join("domain"),
        &["crate::infra", "crate::application", "crate::commands", "crate::output"],
    );
    assert!(
        violations.is_empty(),
        "domain/ must not import from outer layers:\n{}",
        violations.join("\n")
    );
}

// ── Services depend on ports only ─────────────────────────────────────────────

#[test]
fn services_have_no_imports_from_infra_commands_or_output() {
    let violations = find_in(
        &src_dir().join("application"),
        &["crate::infra", "crate::commands", "crate::output"],
    );
    assert!(
        violations.is_empty(),
        "application/ must depend on ports, not implementations:\n{}",
        violations.join("\n")
    );
}

#[test]
fn no_concrete_store_types_in_service_signatures() {
    let concrete = ["JsonRegistry", "FileTokenStore", "YamlConfigStore", "ProcessRunner"];
    let violations: Vec<_> = find_in(&src_dir().join("application"), &concrete)
        .into_iter()
        .filter(|v| v.contains("fn "))
        .collect();
    assert!(
        violations.is_empty(),
        "use port trait bounds in service signatures:\n{}",
        violations.join("\n")
    );
}

// ── Infra stays quiet ─────────────────────────────────────────────────────────

#[test]
fn infra_has_no_imports_from_commands_or_output() {
    let violations = find_in(&src_dir().join("infra"), &["crate::commands", "crate::output"]);
    assert!(
        violations.is_empty(),
        "infra/ must not import from commands/ or output/:\n{}",
        violations.join("\n")
    );
}

#[test]
fn infra_has_no_print_macros_outside_tests() {
    let mut violations: Vec<String> = Vec::new();

    for file in collect_rs_files(&src_dir().join("infra")) {
        let Ok(content) = std::fs::read_to_string(&file) else {
            continue;
        };
        let mut tracker = CfgTestTracker::new();
        for (i, line) in content.lines().enumerate() {
            let in_test = tracker.process_line(line);
            if in_test || line.trim().starts_with("//") {
                continue;
            }
            if line.contains("println!") || line.contains("eprintln!") {
                violations.push(format!("{}:{}: {line}", file.display(), i + 1));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "infra/ must not use println!/eprintln! outside #[cfg(test)]:\n{}",
        violations.join("\n")
    );
}

// ── One path to a subprocess ──────────────────────────────────────────────────

#[test]
fn no_direct_process_spawning_in_cli() {
    let violations = find_in(&src_dir(), &["process::Command", "process::Stdio"]);
    assert!(
        violations.is_empty(),
        "spawn external tools through ExternalCommand::execute only:\n{}",
        violations.join("\n")
    );
}

// ── Command handlers accept unified AppContext ────────────────────────────────

#[test]
fn command_handlers_accept_app_context() {
    let mut violations: Vec<String> = Vec::new();

    for file in collect_rs_files(&src_dir().join("commands")) {
        let Ok(content) = std::fs::read_to_string(&file) else {
            continue;
        };
        if !content.contains("pub fn run(") || !content.contains("app.") {
            continue;
        }
        if !content.contains("pub fn run(app: &AppContext") {
            violations.push(file.display().to_string());
        }
    }

    assert!(
        violations.is_empty(),
        "command handlers must take &AppContext as their first parameter:\n{}",
        violations.join("\n")
    );
}
