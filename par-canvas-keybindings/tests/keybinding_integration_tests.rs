//! Integration tests for par-canvas-keybindings.
//!
//! These tests exercise the full config → registry → lookup pipeline with
//! hand-built `KeyInput` values.

use par_canvas_config::KeyBinding;
use par_canvas_keybindings::{KeyInput, KeybindingRegistry};
use winit::keyboard::{Key, KeyCode, ModifiersState, NamedKey};

#[cfg(target_os = "macos")]
const PRIMARY: ModifiersState = ModifiersState::SUPER;
#[cfg(not(target_os = "macos"))]
const PRIMARY: ModifiersState = ModifiersState::CONTROL;

fn binding(key: &str, action: &str) -> KeyBinding {
    KeyBinding {
        key: key.to_string(),
        action: action.to_string(),
    }
}

#[test]
fn registry_from_empty_config() {
    let registry = KeybindingRegistry::from_config(&[]);
    assert!(registry.is_empty());
    assert_eq!(registry.len(), 0);
}

#[test]
fn registry_skips_invalid_bindings() {
    let bindings = vec![
        binding("Ctrl+A", "valid_action"),
        binding("NotAKey", "invalid_action"),
        binding("Ctrl+Shift", "also_invalid"),
        binding("F5", "another_valid"),
    ];

    let registry = KeybindingRegistry::from_config(&bindings);
    assert_eq!(registry.len(), 2);
}

#[test]
fn default_bindings_all_parse() {
    let defaults = par_canvas_config::defaults::keybindings();
    let registry = KeybindingRegistry::from_config(&defaults);
    assert_eq!(registry.len(), defaults.len());
}

#[test]
fn lookup_by_logical_key() {
    let registry = KeybindingRegistry::from_config(&[
        binding("CmdOrCtrl+W", "close_tab"),
        binding("CmdOrCtrl+Shift+T", "reopen_closed_tab"),
    ]);

    let close = KeyInput::new(Key::Character("w".into()), PRIMARY);
    assert_eq!(registry.lookup(&close), Some("close_tab"));

    let reopen = KeyInput::new(Key::Character("T".into()), PRIMARY | ModifiersState::SHIFT);
    assert_eq!(registry.lookup(&reopen), Some("reopen_closed_tab"));

    let plain = KeyInput::new(Key::Character("w".into()), ModifiersState::empty());
    assert_eq!(registry.lookup(&plain), None);
}

#[test]
fn lookup_falls_back_to_physical_key() {
    let registry = KeybindingRegistry::from_config(&[
        binding("CmdOrCtrl+\\", "toggle_split_horizontal"),
        binding("CmdOrCtrl+Shift+\\", "toggle_split_vertical"),
    ]);

    let horizontal = KeyInput::new(Key::Character("\\".into()), PRIMARY)
        .with_physical(KeyCode::Backslash);
    assert_eq!(registry.lookup(&horizontal), Some("toggle_split_horizontal"));

    let vertical = KeyInput::new(Key::Character("|".into()), PRIMARY | ModifiersState::SHIFT)
        .with_physical(KeyCode::Backslash);
    assert_eq!(registry.lookup(&vertical), Some("toggle_split_vertical"));
}

#[test]
fn lookup_named_key() {
    let registry = KeybindingRegistry::from_config(&[binding("F2", "rename")]);
    let pressed = KeyInput::new(Key::Named(NamedKey::F2), ModifiersState::empty());
    assert_eq!(registry.lookup(&pressed), Some("rename"));
}
