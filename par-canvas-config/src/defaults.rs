//! Default value functions for configuration.
//!
//! Each function backs a `#[serde(default = "crate::defaults::...")]`
//! attribute on a `Config` field.

use crate::types::KeyBinding;

pub fn tab_min_width() -> f32 {
    80.0
}

pub fn tab_max_width() -> f32 {
    180.0
}

pub fn tab_wide_glyph_width() -> f32 {
    12.0 // CJK and other double-width glyphs
}

pub fn tab_narrow_glyph_width() -> f32 {
    7.0
}

pub fn tab_chrome_width() -> f32 {
    40.0 // Icon, close button and horizontal padding
}

pub fn tab_overflow_button_width() -> f32 {
    32.0
}

pub fn split_ratio() -> f32 {
    0.5
}

pub fn anchor_size() -> f32 {
    250.0
}

pub fn bool_true() -> bool {
    true
}

/// Default keybindings for the canvas.
///
/// `CmdOrCtrl` resolves to Cmd on macOS and Ctrl elsewhere.
pub fn keybindings() -> Vec<KeyBinding> {
    let mut bindings = vec![
        KeyBinding {
            key: "CmdOrCtrl+P".to_string(),
            action: "toggle_mission_control".to_string(),
        },
        KeyBinding {
            key: "CmdOrCtrl+\\".to_string(),
            action: "toggle_split_horizontal".to_string(),
        },
        KeyBinding {
            key: "CmdOrCtrl+Shift+\\".to_string(),
            action: "toggle_split_vertical".to_string(),
        },
        KeyBinding {
            key: "CmdOrCtrl+J".to_string(),
            action: "toggle_anchor".to_string(),
        },
        KeyBinding {
            key: "CmdOrCtrl+Shift+M".to_string(),
            action: "toggle_maximize".to_string(),
        },
        KeyBinding {
            key: "CmdOrCtrl+W".to_string(),
            action: "close_tab".to_string(),
        },
        KeyBinding {
            key: "CmdOrCtrl+Shift+T".to_string(),
            action: "reopen_closed_tab".to_string(),
        },
    ];

    for n in 1..=8 {
        bindings.push(KeyBinding {
            key: format!("CmdOrCtrl+{n}"),
            action: format!("switch_to_tab_{n}"),
        });
    }

    bindings.push(KeyBinding {
        key: "CmdOrCtrl+9".to_string(),
        action: "switch_to_last_tab".to_string(),
    });

    bindings
}
