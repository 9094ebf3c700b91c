//! Integration tests for the keyword-badges CLI
//!
//! These tests exercise the binary end-to-end: rendering badge HTML,
//! resolving effective colors, and generating shell completions.

use std::process::{Command, Output};

/// Helper to run the keyword-badges CLI
fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_keyword-badges"))
        .args(args)
        .output()
        .expect("Failed to execute keyword-badges")
}

/// Helper to get stdout as string
fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Helper to get stderr as string
fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

// =============================================================================
// Basic Command Tests
// =============================================================================

#[test]
fn test_help_command() {
    let output = run(&["--help"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("keyword-badges"));
    assert!(out.contains("clickable query badges"));
}

#[test]
fn test_version_command() {
    let output = run(&["--version"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("keyword-badges"));
}

// =============================================================================
// Shell Completion Tests
// =============================================================================

#[test]
fn test_completion_zsh() {
    let output = run(&["completion", "zsh"]);
    assert!(
        output.status.success(),
        "completion zsh failed: {}",
        stderr(&output)
    );
    assert!(
        stdout(&output).contains("#compdef keyword-badges"),
        "zsh completion should contain #compdef"
    );
}

#[test]
fn test_completion_bash() {
    let output = run(&["completion", "bash"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("keyword-badges"));
}

// =============================================================================
// Render Command Tests
// =============================================================================

#[test]
fn test_render_emits_one_anchor_per_keyword() {
    let output = run(&["render", "bug, ui-fix  urgent"]);
    assert!(output.status.success(), "render failed: {}", stderr(&output));

    let out = stdout(&output);
    assert_eq!(out.matches("<a ").count(), 3);
    assert!(out.contains(r#"class="keyword-badge ticket""#));
    assert!(out.contains(">bug</a>"));
    assert!(out.contains(">ui-fix</a>"));
    assert!(out.contains(">urgent</a>"));
    // Badge links carry the prefix-match keyword filter
    assert!(out.contains("keywords=%7Ebug"));
    assert!(out.contains("status=%21closed"));
}

#[test]
fn test_render_query_context_class() {
    let output = run(&["render", "bug", "--context", "query"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains(r#"class="keyword-badge query""#));
}

#[test]
fn test_render_empty_field_produces_no_badges() {
    let output = run(&["render", ""]);
    assert!(output.status.success());
    assert!(stdout(&output).trim().is_empty());
    assert!(stderr(&output).contains("no badges rendered"));
}

#[test]
fn test_render_labels_with_config_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("labels.toml");
    std::fs::write(
        &config_path,
        "[colors]\nbug = { background = \"#d73a4a\", font = \"#ffffff\" }\n",
    )
    .unwrap();

    let output = run(&[
        "render",
        "bug urgent",
        "--labels",
        "--config",
        config_path.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "render failed: {}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains(r#"class="keyword-label ticket""#));
    assert!(out.contains("background-color: #d73a4a; color: #ffffff"));
    // The unconfigured keyword falls back to a hash color with white font
    assert!(out.contains("; color: white"));
}

// =============================================================================
// Color Command Tests
// =============================================================================

#[test]
fn test_color_is_deterministic() {
    let first = run(&["color", "bug"]);
    let second = run(&["color", "bug"]);
    assert!(first.status.success());
    assert_eq!(stdout(&first), stdout(&second));
    assert!(stdout(&first).contains('#'));
    assert!(stdout(&first).contains("bug"));
}

#[test]
fn test_color_labels_uses_configured_override() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("labels.toml");
    std::fs::write(&config_path, "[colors]\nbug = \"#d73a4a\"\n").unwrap();

    let output = run(&[
        "color",
        "bug",
        "--labels",
        "--config",
        config_path.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("#d73a4a"));
}
