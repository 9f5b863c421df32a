//! Architectural Enforcement
//!
//! Source scanning helpers shared by the enforcement tests in `tests/`:
//! - The panel core stays headless (no terminal crates)
//! - Production code never blocks the runtime
//! - Production code propagates errors instead of panicking
//!
//! Scanning is line based. Everything from the first `#[cfg(test)]` in a
//! file onwards is treated as test code and skipped, as are comment lines.

use std::fs;
use std::path::{Path, PathBuf};

/// Workspace root, two levels above this package
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

/// Production source directories, relative to the workspace root
pub const PRODUCTION_DIRS: &[&str] = &["panel/core/src", "tui/src"];

/// A forbidden pattern found in production code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// File containing the match
    pub path: PathBuf,
    /// 1-based line number
    pub line: usize,
    /// The offending line, trimmed
    pub text: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{} - {}", self.path.display(), self.line, self.text)
    }
}

/// All `.rs` files under `dir`
pub fn rust_files(dir: &Path) -> Vec<PathBuf> {
    if !dir.exists() {
        return Vec::new();
    }

    walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("rs"))
        .map(|e| e.into_path())
        .collect()
}

/// Lines of `content` before its test module, with their line numbers
pub fn production_lines(content: &str) -> Vec<(usize, &str)> {
    content
        .lines()
        .enumerate()
        .take_while(|(_, line)| !line.trim_start().starts_with("#[cfg(test)]"))
        .filter(|(_, line)| !line.trim_start().starts_with("//"))
        .map(|(idx, line)| (idx + 1, line))
        .collect()
}

/// Find lines in production code of `dirs` matching any of `patterns`
pub fn scan(dirs: &[&str], patterns: &[&str]) -> Vec<Violation> {
    let root = workspace_root();
    let mut violations = Vec::new();

    for dir in dirs {
        for path in rust_files(&root.join(dir)) {
            let content = match fs::read_to_string(&path) {
                Ok(c) => c,
                Err(_) => continue,
            };

            for (line, text) in production_lines(&content) {
                // Trailing comments do not count
                let code_part = text.split("//").next().unwrap_or(text);
                if patterns.iter().any(|p| code_part.contains(p)) {
                    violations.push(Violation {
                        path: path.clone(),
                        line,
                        text: text.trim().to_string(),
                    });
                }
            }
        }
    }

    violations
}

/// Report violations and fail
pub fn fail_on(violations: &[Violation], headline: &str, hint: &str) {
    if violations.is_empty() {
        return;
    }

    eprintln!("\n❌ {headline}\n");
    for violation in violations {
        eprintln!("  ❌ {violation}");
    }
    eprintln!("\n✅ {hint}");

    panic!(
        "\nFound {} violation(s) in production code.\nFix these before merging!",
        violations.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_lines_stop_at_test_module() {
        let content = "use a;\n// note\nfn f() {}\n#[cfg(test)]\nmod tests {\n    fn g() { x.unwrap(); }\n}\n";
        let lines = production_lines(content);
        assert_eq!(lines, vec![(1, "use a;"), (3, "fn f() {}")]);
    }

    #[test]
    fn test_workspace_root_holds_members() {
        let root = workspace_root();
        assert!(root.join("Cargo.toml").exists());
        assert!(root.join("panel/core/Cargo.toml").exists());
    }
}
