//! Integration Test: Separation of Concerns
//!
//! **Policy**: The conductor core is headless. It MUST NOT import a UI
//! framework, so any surface (terminal, web, test harness) can drive it.
//!
//! **Policy**: The terminal surface is a thin client. It MUST NOT talk to the
//! question endpoint or touch the conversation log directly; it forwards
//! events and renders directives.

use std::fs;

use architectural_enforcement::{find_violations, rust_files, workspace_root};

/// Imports the core must never contain
const UI_FRAMEWORKS: &[&str] = &["ratatui", "crossterm"];

/// Things only the core may do
const CORE_ONLY: &[&str] = &["reqwest", "ConversationLog", ".ask("];

#[test]
fn test_core_has_no_ui_imports() {
    let violations: Vec<String> = rust_files("conductor/core/src")
        .iter()
        .flat_map(|path| find_violations(path, UI_FRAMEWORKS))
        .collect();

    if !violations.is_empty() {
        eprintln!("\n❌ UI framework usage found in the conductor core!\n");
        for violation in &violations {
            eprintln!("  ❌ {violation}");
        }
        eprintln!("\n✅ Emit a UiDirective and let the surface render it.");

        panic!(
            "\nFound {} UI import(s) in the conductor core.\nFix these before merging!",
            violations.len()
        );
    }
}

#[test]
fn test_core_manifest_has_no_ui_dependencies() {
    let manifest = fs::read_to_string(workspace_root().join("conductor/core/Cargo.toml"))
        .expect("conductor core manifest is readable");

    for framework in UI_FRAMEWORKS {
        assert!(
            !manifest
                .lines()
                .any(|line| line.trim_start().starts_with(framework)),
            "conductor core depends on {framework}"
        );
    }
}

#[test]
fn test_tui_is_thin_client() {
    let violations: Vec<String> = rust_files("tui/src")
        .iter()
        .flat_map(|path| find_violations(path, CORE_ONLY))
        .collect();

    if !violations.is_empty() {
        eprintln!("\n❌ Conversation logic found in the terminal surface!\n");
        for violation in &violations {
            eprintln!("  ❌ {violation}");
        }
        eprintln!("\n✅ Send a SurfaceEvent through SessionClient instead.");

        panic!(
            "\nFound {} thin-client violation(s) in the TUI.\nFix these before merging!",
            violations.len()
        );
    }
}
