//! Keybinding system for par-canvas.
//!
//! Turns the `{key, action}` entries of the user config into a registry
//! that maps key chords to action names.
//!
//! Features:
//! - Configurable key combinations (Ctrl+Shift+T, CmdOrCtrl+W, etc.)
//! - Physical key fallback so shifted punctuation chords still match
//! - Key input snapshots that can be built from winit events or by hand

mod matcher;
pub mod parser;
mod platform;

pub use matcher::{KeyInput, KeybindingMatcher};
pub use parser::{KeyCombo, ParseError, parse_key_combo};

use par_canvas_config::KeyBinding;
use std::collections::HashMap;

/// Registry of keybindings mapping key combinations to action names.
#[derive(Debug, Default)]
pub struct KeybindingRegistry {
    /// Map of parsed key combos to action names
    bindings: HashMap<KeyCombo, String>,
}

impl KeybindingRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from config keybindings.
    ///
    /// Invalid keybinding strings are logged and skipped.
    pub fn from_config(keybindings: &[KeyBinding]) -> Self {
        let mut registry = Self::new();

        for binding in keybindings {
            match parser::parse_key_combo(&binding.key) {
                Ok(combo) => {
                    log::debug!(
                        "Registered keybinding: {} -> {} (parsed as: {})",
                        binding.key,
                        binding.action,
                        combo
                    );
                    registry.bindings.insert(combo, binding.action.clone());
                }
                Err(e) => {
                    log::warn!(
                        "Invalid keybinding '{}' for action '{}': {}",
                        binding.key,
                        binding.action,
                        e
                    );
                }
            }
        }

        log::info!(
            "Keybinding registry initialized with {} bindings",
            registry.bindings.len()
        );
        registry
    }

    /// Look up an action for a key input.
    ///
    /// Logical keys are tried first; if nothing matches and the input carries
    /// a physical key code, the QWERTY position of the key is tried next.
    pub fn lookup(&self, input: &KeyInput) -> Option<&str> {
        self.lookup_with_options(input, false)
            .or_else(|| self.lookup_with_options(input, true))
    }

    /// Look up an action, matching character bindings either by logical key
    /// or by physical key position.
    pub fn lookup_with_options(&self, input: &KeyInput, use_physical_keys: bool) -> Option<&str> {
        let matcher = KeybindingMatcher::from_input(input);

        self.bindings
            .iter()
            .find(|(combo, _)| matcher.matches_with_physical_preference(combo, use_physical_keys))
            .map(|(_, action)| action.as_str())
    }

    /// Key combo bound to an action, for shortcut hints in menus and tooltips.
    pub fn combo_for_action(&self, action: &str) -> Option<&KeyCombo> {
        self.bindings
            .iter()
            .find(|(_, bound)| bound.as_str() == action)
            .map(|(combo, _)| combo)
    }

    /// Check if the registry has any bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Get the number of registered bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }
}
