//! Keyboard shortcut dispatcher for the canvas.
//!
//! Stateless translation of key chords into [`CanvasAction`]s. Chords are
//! looked up in a [`KeybindingRegistry`] built from the user config. While a
//! text input holds focus only a small allow-list of actions fires.

use par_canvas_config::Config;
use std::borrow::Cow;
use par_canvas_keybindings::{KeyInput, KeybindingRegistry};

/// Highest tab number reachable with `switch_to_tab_N`
pub const MAX_NUMBERED_TAB: u8 = 8;

/// Canvas operation bound to a key chord
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanvasAction {
    ToggleMissionControl,
    ToggleSplitHorizontal,
    ToggleSplitVertical,
    ToggleAnchor,
    ToggleMaximize,
    CloseTab,
    ReopenClosedTab,
    /// Switch to the Nth (1-based) visible tab of the active pane
    SwitchToTab(u8),
    SwitchToLastTab,
}

impl CanvasAction {
    /// Parse a config action name such as `close_tab` or `switch_to_tab_3`
    pub fn from_name(name: &str) -> Option<Self> {
        let action = match name {
            "toggle_mission_control" => Self::ToggleMissionControl,
            "toggle_split_horizontal" => Self::ToggleSplitHorizontal,
            "toggle_split_vertical" => Self::ToggleSplitVertical,
            "toggle_anchor" => Self::ToggleAnchor,
            "toggle_maximize" => Self::ToggleMaximize,
            "close_tab" => Self::CloseTab,
            "reopen_closed_tab" => Self::ReopenClosedTab,
            "switch_to_last_tab" => Self::SwitchToLastTab,
            other => {
                let n: u8 = other.strip_prefix("switch_to_tab_")?.parse().ok()?;
                if !(1..=MAX_NUMBERED_TAB).contains(&n) {
                    return None;
                }
                Self::SwitchToTab(n)
            }
        };
        Some(action)
    }

    /// Config name of the action
    pub fn name(&self) -> Cow<'static, str> {
        let name = match self {
            Self::ToggleMissionControl => "toggle_mission_control",
            Self::ToggleSplitHorizontal => "toggle_split_horizontal",
            Self::ToggleSplitVertical => "toggle_split_vertical",
            Self::ToggleAnchor => "toggle_anchor",
            Self::ToggleMaximize => "toggle_maximize",
            Self::CloseTab => "close_tab",
            Self::ReopenClosedTab => "reopen_closed_tab",
            Self::SwitchToTab(n) => return Cow::Owned(format!("switch_to_tab_{n}")),
            Self::SwitchToLastTab => "switch_to_last_tab",
        };
        Cow::Borrowed(name)
    }

    /// Whether the action still fires while a text input has focus
    pub fn allowed_in_text_input(&self) -> bool {
        matches!(
            self,
            Self::ToggleMissionControl | Self::CloseTab | Self::ReopenClosedTab
        )
    }
}

/// Maps key input to canvas actions
#[derive(Debug, Default)]
pub struct ShortcutDispatcher {
    registry: KeybindingRegistry,
}

impl ShortcutDispatcher {
    pub fn new(registry: KeybindingRegistry) -> Self {
        Self { registry }
    }

    /// Build from the configured keybindings. Unknown action names are
    /// logged; their chords never dispatch.
    pub fn from_config(config: &Config) -> Self {
        for binding in &config.keybindings {
            if CanvasAction::from_name(&binding.action).is_none() {
                log::warn!(
                    "Keybinding '{}' names unknown action '{}'",
                    binding.key,
                    binding.action
                );
            }
        }
        Self::new(KeybindingRegistry::from_config(&config.keybindings))
    }

    pub fn registry(&self) -> &KeybindingRegistry {
        &self.registry
    }

    /// Action for a key press, if any
    pub fn dispatch(&self, input: &KeyInput, text_input_focused: bool) -> Option<CanvasAction> {
        let name = self.registry.lookup(input)?;
        let action = CanvasAction::from_name(name)?;
        if text_input_focused && !action.allowed_in_text_input() {
            log::debug!("Suppressed {} while a text input has focus", name);
            return None;
        }
        Some(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for n in 1..=MAX_NUMBERED_TAB {
            let action = CanvasAction::SwitchToTab(n);
            assert_eq!(CanvasAction::from_name(&action.name()), Some(action));
        }
        assert_eq!(
            CanvasAction::from_name("reopen_closed_tab"),
            Some(CanvasAction::ReopenClosedTab)
        );
    }

    #[test]
    fn fixed_names_are_borrowed() {
        assert!(matches!(CanvasAction::CloseTab.name(), Cow::Borrowed("close_tab")));
        assert!(matches!(CanvasAction::SwitchToLastTab.name(), Cow::Borrowed(_)));
        assert_eq!(CanvasAction::SwitchToTab(4).name(), "switch_to_tab_4");
    }

    #[test]
    fn rejects_out_of_range_tab_numbers() {
        assert_eq!(CanvasAction::from_name("switch_to_tab_0"), None);
        assert_eq!(CanvasAction::from_name("switch_to_tab_9"), None);
        assert_eq!(CanvasAction::from_name("switch_to_tab_x"), None);
        assert_eq!(CanvasAction::from_name("open_settings"), None);
    }

    #[test]
    fn allow_list() {
        assert!(CanvasAction::CloseTab.allowed_in_text_input());
        assert!(CanvasAction::ToggleMissionControl.allowed_in_text_input());
        assert!(!CanvasAction::SwitchToTab(1).allowed_in_text_input());
        assert!(!CanvasAction::ToggleSplitVertical.allowed_in_text_input());
    }
}
