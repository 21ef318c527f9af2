//! Tests for keyboard shortcut dispatch against the default keymap

mod common;

use common::{file, lifecycle};
use par_canvas::layout::{AnchorPosition, PaneId, SplitMode};
use par_canvas::lifecycle::CloseRequest;
use par_canvas::shortcuts::{CanvasAction, ShortcutDispatcher};
use par_canvas_config::{Config, KeyBinding};
use par_canvas_keybindings::{KeyInput, parse_key_combo};
use winit::keyboard::{Key, KeyCode, ModifiersState};

#[cfg(target_os = "macos")]
const PRIMARY: ModifiersState = ModifiersState::SUPER;
#[cfg(not(target_os = "macos"))]
const PRIMARY: ModifiersState = ModifiersState::CONTROL;

fn press(ch: &str, modifiers: ModifiersState) -> KeyInput {
    KeyInput::new(Key::Character(ch.into()), modifiers)
}

fn dispatcher() -> ShortcutDispatcher {
    ShortcutDispatcher::from_config(&Config::default())
}

// ============================================================================
// Dispatch
// ============================================================================

#[test]
fn test_default_keymap() {
    let d = dispatcher();
    assert_eq!(
        d.dispatch(&press("p", PRIMARY), false),
        Some(CanvasAction::ToggleMissionControl)
    );
    assert_eq!(d.dispatch(&press("w", PRIMARY), false), Some(CanvasAction::CloseTab));
    assert_eq!(
        d.dispatch(&press("t", PRIMARY | ModifiersState::SHIFT), false),
        Some(CanvasAction::ReopenClosedTab)
    );
    assert_eq!(
        d.dispatch(&press("3", PRIMARY), false),
        Some(CanvasAction::SwitchToTab(3))
    );
    assert_eq!(
        d.dispatch(&press("9", PRIMARY), false),
        Some(CanvasAction::SwitchToLastTab)
    );
    assert_eq!(
        d.dispatch(&press("\\", PRIMARY), false),
        Some(CanvasAction::ToggleSplitHorizontal)
    );
}

#[test]
fn test_unbound_chords_do_nothing() {
    let d = dispatcher();
    assert_eq!(d.dispatch(&press("w", ModifiersState::empty()), false), None);
    assert_eq!(d.dispatch(&press("w", PRIMARY | ModifiersState::ALT), false), None);
    assert_eq!(d.dispatch(&press("0", PRIMARY), false), None);
}

#[test]
fn test_shifted_backslash_uses_physical_key() {
    // Shift+\ reports '|' as its logical key on a US layout
    let input = press("|", PRIMARY | ModifiersState::SHIFT).with_physical(KeyCode::Backslash);
    assert_eq!(
        dispatcher().dispatch(&input, false),
        Some(CanvasAction::ToggleSplitVertical)
    );
}

#[test]
fn test_text_input_allow_list() {
    let d = dispatcher();
    assert_eq!(
        d.dispatch(&press("p", PRIMARY), true),
        Some(CanvasAction::ToggleMissionControl)
    );
    assert_eq!(d.dispatch(&press("w", PRIMARY), true), Some(CanvasAction::CloseTab));
    assert_eq!(
        d.dispatch(&press("t", PRIMARY | ModifiersState::SHIFT), true),
        Some(CanvasAction::ReopenClosedTab)
    );
    assert_eq!(d.dispatch(&press("2", PRIMARY), true), None);
    assert_eq!(d.dispatch(&press("j", PRIMARY), true), None);
    assert_eq!(d.dispatch(&press("\\", PRIMARY), true), None);
}

#[test]
fn test_user_rebinding_and_unknown_actions() {
    let config = Config {
        keybindings: vec![
            KeyBinding {
                key: "Alt+W".to_string(),
                action: "close_tab".to_string(),
            },
            KeyBinding {
                key: "Alt+X".to_string(),
                action: "explode".to_string(),
            },
        ],
        ..Config::default()
    };
    let d = ShortcutDispatcher::from_config(&config);
    assert_eq!(
        d.dispatch(&press("w", ModifiersState::ALT), false),
        Some(CanvasAction::CloseTab)
    );
    assert_eq!(d.dispatch(&press("x", ModifiersState::ALT), false), None);
    assert_eq!(d.dispatch(&press("w", PRIMARY), false), None);
}

#[test]
fn test_combo_input_dispatches_its_own_binding() {
    let d = dispatcher();
    for binding in &Config::default().keybindings {
        let combo = parse_key_combo(&binding.key).unwrap();
        let action = d.dispatch(&KeyInput::from_combo(&combo), false);
        assert_eq!(
            action.map(|a| a.name().into_owned()),
            Some(binding.action.clone()),
            "{}",
            binding.key
        );
    }
}

// ============================================================================
// Applying actions
// ============================================================================

#[test]
fn test_numbered_switch_and_last() {
    let mut lc = lifecycle();
    let c = lc.open_active(file("/c.rs"), None).tab_id();
    let b = lc.open_active(file("/b.rs"), None).tab_id();
    let a = lc.open_active(file("/a.rs"), None).tab_id();

    lc.apply(CanvasAction::SwitchToTab(2));
    assert_eq!(lc.canvas().active_tab().map(|t| t.id), Some(b));
    lc.apply(CanvasAction::SwitchToLastTab);
    assert_eq!(lc.canvas().active_tab().map(|t| t.id), Some(c));
    lc.apply(CanvasAction::SwitchToTab(8));
    assert_eq!(lc.canvas().active_tab().map(|t| t.id), Some(c));
    lc.apply(CanvasAction::SwitchToTab(1));
    assert_eq!(lc.canvas().active_tab().map(|t| t.id), Some(a));
}

#[test]
fn test_close_and_reopen_actions() {
    let mut lc = lifecycle();
    lc.open_active(file("/b.rs"), None);
    let a = lc.open_active(file("/a.rs"), None).tab_id();

    assert_eq!(lc.apply(CanvasAction::CloseTab), Some(CloseRequest::Closed(1)));
    assert!(lc.canvas().tab(a).is_none());
    assert_eq!(lc.apply(CanvasAction::ReopenClosedTab), None);
    assert_eq!(lc.canvas().active_tab().map(|t| t.id), Some(a));
}

#[test]
fn test_layout_actions() {
    let mut lc = lifecycle();
    lc.open_active(file("/b.rs"), None);
    lc.open_active(file("/a.rs"), None);

    lc.apply(CanvasAction::ToggleSplitVertical);
    assert_eq!(lc.canvas().split_mode(), SplitMode::Vertical);
    assert_eq!(lc.canvas().active_group(), PaneId::Secondary);
    lc.apply(CanvasAction::ToggleSplitHorizontal);
    assert_eq!(lc.canvas().split_mode(), SplitMode::Horizontal);
    lc.apply(CanvasAction::ToggleSplitHorizontal);
    assert_eq!(lc.canvas().split_mode(), SplitMode::None);

    let anchor = lc.canvas().layout().anchor_position();
    lc.apply(CanvasAction::ToggleAnchor);
    assert_eq!(lc.canvas().layout().anchor_position(), AnchorPosition::Hidden);
    lc.apply(CanvasAction::ToggleAnchor);
    assert_eq!(lc.canvas().layout().anchor_position(), anchor);

    lc.apply(CanvasAction::ToggleMissionControl);
    assert!(lc.canvas().is_mission_control_open());
}
