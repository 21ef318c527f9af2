//! Tests for the per-pane tab bar: overflow layout, frame coalescing and
//! tab bar gestures
//!
//! With the default metrics a short file title ("a.rs") estimates to the
//! 80px minimum tab width and the overflow button takes 32px.

mod common;

use common::{file, ids, lifecycle};
use par_canvas::layout::PaneId;
use par_canvas::lifecycle::{CloseRequest, TabLifecycle};
use par_canvas::tab::{TabId, TabState};
use par_canvas::tab_bar_ui::{TabBarAction, TabBarUI};
use par_canvas_config::Config;

fn open_files(lc: &mut TabLifecycle, count: usize) -> Vec<TabId> {
    for i in 0..count {
        lc.open_active(file(&format!("/{}.rs", (b'a' + i as u8) as char)), None);
    }
    ids(lc.canvas(), PaneId::Primary)
}

fn bar(always_show_tab_picker: bool) -> TabBarUI {
    let config = Config {
        always_show_tab_picker,
        ..Config::default()
    };
    TabBarUI::new(PaneId::Primary, &config)
}

// ============================================================================
// Overflow layout
// ============================================================================

#[test]
fn test_all_tabs_fit_without_picker() {
    let mut lc = lifecycle();
    open_files(&mut lc, 3);
    let mut ui = bar(false);

    let layout = ui.on_frame(lc.canvas(), 400.0, 50.0);
    assert_eq!(layout.visible_count, 3);
    assert!(layout.overflow_ids.is_empty());
    assert!(!layout.show_overflow_button);
}

#[test]
fn test_picker_button_stays_when_configured() {
    let mut lc = lifecycle();
    open_files(&mut lc, 3);
    let mut ui = bar(true);

    let layout = ui.on_frame(lc.canvas(), 400.0, 50.0);
    assert_eq!(layout.visible_count, 3);
    assert!(layout.show_overflow_button);
}

#[test]
fn test_overflow_reserves_button_width() {
    let mut lc = lifecycle();
    let order = open_files(&mut lc, 6);
    let mut ui = bar(false);

    // 350px budget, 318px after the button: three 80px tabs fit
    let layout = ui.on_frame(lc.canvas(), 400.0, 50.0).clone();
    assert_eq!(layout.visible_count, 3);
    assert_eq!(layout.overflow_ids, order[3..].to_vec());
    assert!(layout.show_overflow_button);
}

#[test]
fn test_at_least_one_tab_visible() {
    let mut lc = lifecycle();
    let order = open_files(&mut lc, 2);
    let mut ui = bar(false);

    let layout = ui.on_frame(lc.canvas(), 60.0, 50.0);
    assert_eq!(layout.visible_count, 1);
    assert_eq!(layout.overflow_ids, vec![order[1]]);
}

#[test]
fn test_empty_pane_layout() {
    let lc = lifecycle();
    let mut ui = bar(true);
    let layout = ui.on_frame(lc.canvas(), 400.0, 0.0);
    assert_eq!(layout.visible_count, 0);
    assert!(layout.show_overflow_button);
}

// ============================================================================
// Recompute scheduling
// ============================================================================

#[test]
fn test_measured_width_overrides_estimate() {
    let mut lc = lifecycle();
    let order = open_files(&mut lc, 3);
    let mut ui = bar(false);
    assert_eq!(ui.on_frame(lc.canvas(), 400.0, 50.0).visible_count, 3);

    let title = lc.canvas().tab(order[0]).map(|t| t.title.clone()).unwrap();
    ui.record_measured(order[0], &title, 300.0);
    let layout = ui.on_frame(lc.canvas(), 400.0, 50.0);
    assert_eq!(layout.visible_count, 1);
    assert_eq!(layout.overflow_ids, order[1..].to_vec());
}

#[test]
fn test_tab_list_and_resize_trigger_recompute() {
    let mut lc = lifecycle();
    open_files(&mut lc, 6);
    let mut ui = bar(false);
    assert_eq!(ui.on_frame(lc.canvas(), 400.0, 50.0).visible_count, 3);

    // Same inputs, same layout
    assert_eq!(ui.on_frame(lc.canvas(), 400.0, 50.0).visible_count, 3);

    assert_eq!(ui.on_frame(lc.canvas(), 1000.0, 50.0).visible_count, 6);
    assert!(!ui.layout().show_overflow_button);

    let first = ids(lc.canvas(), PaneId::Primary)[0];
    lc.request_close(first);
    let layout = ui.on_frame(lc.canvas(), 1000.0, 50.0);
    assert_eq!(layout.visible_count, 5);
}

// ============================================================================
// Tab bar gestures
// ============================================================================

#[test]
fn test_tab_bar_actions() {
    let mut lc = lifecycle();
    let order = open_files(&mut lc, 3);
    let mut ui = bar(false);

    assert_eq!(ui.apply_action(&mut lc, TabBarAction::SwitchTo(order[2])), None);
    assert_eq!(lc.canvas().active_tab().map(|t| t.id), Some(order[2]));

    ui.apply_action(&mut lc, TabBarAction::Reorder(order[2], 0));
    assert_eq!(ids(lc.canvas(), PaneId::Primary)[0], order[2]);

    ui.apply_action(&mut lc, TabBarAction::TogglePin(order[1]));
    assert_eq!(
        lc.canvas().tab(order[1]).map(|t| t.state),
        Some(TabState::Pinned)
    );

    ui.apply_action(&mut lc, TabBarAction::RenameTab(order[0], "renamed".to_string()));
    assert_eq!(
        lc.canvas().tab(order[0]).map(|t| t.title.as_str()),
        Some("renamed")
    );

    assert_eq!(
        ui.apply_action(&mut lc, TabBarAction::CloseOthers(order[2])),
        Some(CloseRequest::Closed(1))
    );
    assert!(lc.canvas().tab(order[0]).is_none());
    assert_eq!(
        ui.apply_action(&mut lc, TabBarAction::Close(order[1])),
        Some(CloseRequest::Closed(1))
    );
    assert_eq!(ui.apply_action(&mut lc, TabBarAction::None), None);
    assert_eq!(ids(lc.canvas(), PaneId::Primary), vec![order[2]]);
}
