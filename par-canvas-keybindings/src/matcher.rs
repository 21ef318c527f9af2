//! Key event matching.
//!
//! Matches key inputs against parsed KeyCombos. Supports both logical key
//! matching (character-based) and physical key matching (scan code-based).

use crate::parser::{KeyCombo, Modifiers, ParsedKey};
use crate::platform::{physical_key_matches_char, resolve_cmd_or_ctrl};
use winit::event::{KeyEvent, Modifiers as WinitModifiers};
use winit::keyboard::{Key, KeyCode, ModifiersState, NamedKey, NativeKey, PhysicalKey};

/// A key press as seen by the canvas: logical key, optional physical key
/// position and the modifier state at the time of the press.
///
/// Built from winit events at runtime; tests and scripted input build it
/// directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    pub logical_key: Key,
    pub physical_key: Option<KeyCode>,
    pub modifiers: ModifiersState,
}

impl KeyInput {
    /// Key input without a physical key code.
    pub fn new(logical_key: Key, modifiers: ModifiersState) -> Self {
        Self {
            logical_key,
            physical_key: None,
            modifiers,
        }
    }

    /// Attach the physical key code of the press.
    pub fn with_physical(mut self, code: KeyCode) -> Self {
        self.physical_key = Some(code);
        self
    }

    /// Snapshot a winit key event.
    pub fn from_event(event: &KeyEvent, modifiers: &WinitModifiers) -> Self {
        let physical_key = match event.physical_key {
            PhysicalKey::Code(code) => Some(code),
            PhysicalKey::Unidentified(_) => None,
        };
        Self {
            logical_key: event.logical_key.clone(),
            physical_key,
            modifiers: modifiers.state(),
        }
    }

    /// The key press that triggers `combo` on this platform. Used to replay
    /// scripted chords.
    pub fn from_combo(combo: &KeyCombo) -> Self {
        let mods = &combo.modifiers;
        let (ctrl, super_key) = resolve_cmd_or_ctrl(mods.cmd_or_ctrl, mods.ctrl, mods.super_key);
        let mut state = ModifiersState::empty();
        state.set(ModifiersState::CONTROL, ctrl);
        state.set(ModifiersState::SUPER, super_key);
        state.set(ModifiersState::ALT, mods.alt);
        state.set(ModifiersState::SHIFT, mods.shift);

        match &combo.key {
            ParsedKey::Character(c) => {
                Self::new(Key::Character(c.to_lowercase().to_string().into()), state)
            }
            ParsedKey::Named(named) => Self::new(Key::Named(*named), state),
            ParsedKey::Physical(code) => {
                Self::new(Key::Unidentified(NativeKey::Unidentified), state).with_physical(*code)
            }
        }
    }
}

/// Matcher for comparing key inputs against keybindings.
#[derive(Debug)]
pub struct KeybindingMatcher {
    /// Active modifiers from the input
    modifiers: Modifiers,
    /// The logical key from the input
    key: Option<MatchKey>,
    /// The physical key code from the input
    physical_key: Option<KeyCode>,
}

/// Normalized key for matching purposes.
#[derive(Debug)]
enum MatchKey {
    Character(char),
    Named(NamedKey),
}

impl KeybindingMatcher {
    /// Create a matcher from a key input.
    pub fn from_input(input: &KeyInput) -> Self {
        let state = input.modifiers;
        let modifiers = Modifiers {
            ctrl: state.control_key(),
            alt: state.alt_key(),
            shift: state.shift_key(),
            super_key: state.super_key(),
            cmd_or_ctrl: false, // Resolved during matching
        };

        let key = match &input.logical_key {
            Key::Character(c) => c
                .chars()
                .next()
                .map(|ch| MatchKey::Character(ch.to_ascii_uppercase())),
            Key::Named(named) => Some(MatchKey::Named(*named)),
            _ => None,
        };

        Self {
            modifiers,
            key,
            physical_key: input.physical_key,
        }
    }

    /// Check if this input matches the given key combo.
    pub fn matches(&self, combo: &KeyCombo) -> bool {
        self.matches_with_physical_preference(combo, false)
    }

    /// Check if this input matches the given key combo, optionally matching
    /// character bindings by physical key position.
    pub fn matches_with_physical_preference(
        &self,
        combo: &KeyCombo,
        use_physical_keys: bool,
    ) -> bool {
        let key_matches = match (&combo.key, use_physical_keys) {
            (ParsedKey::Physical(combo_code), _) => self.physical_key.as_ref() == Some(combo_code),
            (ParsedKey::Character(combo_char), true) => self
                .physical_key
                .is_some_and(|physical| physical_key_matches_char(physical, *combo_char)),
            (ParsedKey::Character(combo_char), false) => matches!(
                &self.key,
                Some(MatchKey::Character(event_char)) if event_char.eq_ignore_ascii_case(combo_char)
            ),
            (ParsedKey::Named(combo_named), _) => matches!(
                &self.key,
                Some(MatchKey::Named(event_named)) if event_named == combo_named
            ),
        };

        key_matches && self.modifiers_match(&combo.modifiers)
    }

    /// Check if modifiers match, handling CmdOrCtrl specially.
    fn modifiers_match(&self, combo_mods: &Modifiers) -> bool {
        let (expected_ctrl, expected_super) =
            resolve_cmd_or_ctrl(combo_mods.cmd_or_ctrl, combo_mods.ctrl, combo_mods.super_key);

        self.modifiers.ctrl == expected_ctrl
            && self.modifiers.alt == combo_mods.alt
            && self.modifiers.shift == combo_mods.shift
            && self.modifiers.super_key == expected_super
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_key_combo;

    fn input(ch: &str, modifiers: ModifiersState) -> KeyInput {
        KeyInput::new(Key::Character(ch.into()), modifiers)
    }

    #[test]
    fn test_ctrl_shift_match() {
        let combo = parse_key_combo("Ctrl+Shift+T").unwrap();
        let matcher = KeybindingMatcher::from_input(&input(
            "t",
            ModifiersState::CONTROL | ModifiersState::SHIFT,
        ));
        assert!(matcher.matches(&combo));

        let matcher = KeybindingMatcher::from_input(&input("t", ModifiersState::CONTROL));
        assert!(!matcher.matches(&combo));
    }

    #[test]
    fn test_cmd_or_ctrl_resolves_per_platform() {
        let combo = parse_key_combo("CmdOrCtrl+W").unwrap();

        #[cfg(target_os = "macos")]
        let primary = ModifiersState::SUPER;
        #[cfg(not(target_os = "macos"))]
        let primary = ModifiersState::CONTROL;

        assert!(KeybindingMatcher::from_input(&input("w", primary)).matches(&combo));
        assert!(!KeybindingMatcher::from_input(&input("w", ModifiersState::ALT)).matches(&combo));
    }

    #[test]
    fn test_physical_preference() {
        // Shift+\ produces '|' logically on a US layout
        let combo = parse_key_combo("Ctrl+Shift+\\").unwrap();
        let pressed = input("|", ModifiersState::CONTROL | ModifiersState::SHIFT)
            .with_physical(KeyCode::Backslash);
        let matcher = KeybindingMatcher::from_input(&pressed);

        assert!(!matcher.matches_with_physical_preference(&combo, false));
        assert!(matcher.matches_with_physical_preference(&combo, true));
    }

    #[test]
    fn test_from_combo_round_trips() {
        for binding in ["CmdOrCtrl+Shift+T", "Alt+F4", "Ctrl+[KeyW]", "CmdOrCtrl+\\"] {
            let combo = parse_key_combo(binding).unwrap();
            let pressed = KeyInput::from_combo(&combo);
            let matcher = KeybindingMatcher::from_input(&pressed);
            assert!(
                matcher.matches(&combo) || matcher.matches_with_physical_preference(&combo, true),
                "{binding} did not match its own key press"
            );
        }
    }

    #[test]
    fn test_named_key_match() {
        let combo = parse_key_combo("Ctrl+Tab").unwrap();
        let pressed = KeyInput::new(Key::Named(NamedKey::Tab), ModifiersState::CONTROL);
        assert!(KeybindingMatcher::from_input(&pressed).matches(&combo));
    }
}
