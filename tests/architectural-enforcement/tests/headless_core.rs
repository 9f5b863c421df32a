//! Integration Test: Headless Core
//!
//! **Policy**: `panel-core` knows nothing about terminals. Surfaces talk to it
//! through `SurfaceEvent` and `PanelMessage` only, so the core must not depend
//! on or import rendering crates.

use std::fs;

use architectural_enforcement::{fail_on, scan, workspace_root};

const TERMINAL_CRATES: &[&str] = &["ratatui", "crossterm"];

#[test]
fn test_core_manifest_has_no_terminal_crates() {
    let manifest = fs::read_to_string(workspace_root().join("panel/core/Cargo.toml"))
        .expect("panel core manifest readable");

    for krate in TERMINAL_CRATES {
        let declared = manifest
            .lines()
            .map(str::trim)
            .any(|line| line.starts_with(&format!("{krate} ")) || line.starts_with(&format!("{krate}=")));
        assert!(!declared, "panel-core must not depend on {krate}");
    }
}

#[test]
fn test_core_sources_do_not_import_terminal_crates() {
    let violations = scan(&["panel/core/src"], &["ratatui::", "crossterm::"]);
    fail_on(
        &violations,
        "CRITICAL: terminal crates used in panel-core!",
        "Emit a PanelMessage and let the surface render it.",
    );
}
