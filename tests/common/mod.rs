//! Shared integration test helpers for par-canvas.
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::{assert_invariants, lifecycle, titles};
//! ```
//!
//! The `#[allow(dead_code)]` attribute suppresses warnings when only a
//! subset of helpers are used per file.

#![allow(dead_code)]

use par_canvas::canvas::Canvas;
use par_canvas::layout::{PaneId, SplitMode};
use par_canvas::lifecycle::TabLifecycle;
use par_canvas::tab::{TabContent, TabId, TabState};
use par_canvas_config::Config;

/// Lifecycle with default config (dirty-close confirmation on)
pub fn lifecycle() -> TabLifecycle {
    TabLifecycle::new(&Config::default())
}

pub fn file(path: &str) -> TabContent {
    TabContent::file(path)
}

/// Tab ids of a pane in order, hidden tabs included
pub fn ids(canvas: &Canvas, pane: PaneId) -> Vec<TabId> {
    canvas.group(pane).tabs().iter().map(|t| t.id).collect()
}

/// Tab titles of a pane in order, hidden tabs included
pub fn titles(canvas: &Canvas, pane: PaneId) -> Vec<String> {
    canvas
        .group(pane)
        .tabs()
        .iter()
        .map(|t| t.title.clone())
        .collect()
}

pub fn state_of(canvas: &Canvas, id: TabId) -> Option<TabState> {
    canvas.tab(id).map(|t| t.state)
}

/// Check the postconditions every canvas operation must leave behind
pub fn assert_invariants(canvas: &Canvas) {
    let mode = canvas.split_mode();
    for pane in PaneId::ALL {
        let group = canvas.group(pane);

        if let Some(active) = group.active_tab_id() {
            let tab = group
                .get(active)
                .unwrap_or_else(|| panic!("{pane}: active tab {active} not in pane"));
            assert!(!tab.is_hidden, "{pane}: active tab {active} is hidden");
        } else {
            assert!(!group.has_visible(), "{pane}: visible tabs but no active tab");
        }

        let previews = group.visible_tabs().filter(|t| t.state == TabState::Preview).count();
        assert!(previews <= 1, "{pane}: {previews} preview tabs");

        if !mode.is_addressable(pane) {
            assert!(group.is_empty(), "{pane} not addressable in {mode:?} but holds tabs");
        } else if canvas.visible_tab_count() > 0 {
            assert!(group.has_visible(), "{pane} addressable in {mode:?} but empty");
        }
    }

    if canvas.visible_tab_count() == 0 {
        assert_eq!(mode, SplitMode::None, "empty canvas must be single-pane");
    }
    assert!(mode.is_addressable(canvas.active_group()));
}
