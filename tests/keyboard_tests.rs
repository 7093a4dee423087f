// Host-side tests for keyboard command mapping.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod input {
    include!("../src/input.rs");
}

use input::{key_command, KeyCommand};

#[test]
fn arrows_walk_focus_presets() {
    assert_eq!(key_command("ArrowLeft"), Some(KeyCommand::FocusPrev));
    assert_eq!(key_command("ArrowRight"), Some(KeyCommand::FocusNext));
    assert_eq!(key_command("ArrowUp"), None);
}

#[test]
fn letter_commands_ignore_case() {
    for k in ["c", "C"] {
        assert_eq!(key_command(k), Some(KeyCommand::Calibrate));
    }
    for k in ["t", "T"] {
        assert_eq!(key_command(k), Some(KeyCommand::ToggleTracking));
    }
}

#[test]
fn escape_closes_and_enter_toggles_fullscreen() {
    assert_eq!(key_command("Escape"), Some(KeyCommand::CloseExhibit));
    assert_eq!(key_command("Enter"), Some(KeyCommand::ToggleFullscreen));
}

#[test]
fn unmapped_keys_do_nothing() {
    for k in ["", " ", "x", "Tab", "cc"] {
        assert_eq!(key_command(k), None, "key {k:?}");
    }
}
