//! Tab bar model for one pane.
//!
//! ## Module layout
//!
//! - [`overflow`]: width estimation and the fit-or-overflow computation.
//! - [`scheduler`]: coalesces resize and tab-list changes into one recompute per frame.
//!
//! The tab bar never mutates the canvas directly; user gestures come back as
//! [`TabBarAction`]s that the host applies through [`TabBarUI::apply_action`].

mod overflow;
mod scheduler;

pub use overflow::{OverflowLayout, TabOverflowMeasurer, TabWidthMetrics, estimate_tab_width};
pub use scheduler::OverflowScheduler;

use crate::canvas::Canvas;
use crate::layout::PaneId;
use crate::lifecycle::{CloseRequest, TabLifecycle};
use crate::tab::TabId;
use par_canvas_config::Config;

/// Actions that can be triggered from the tab bar
#[derive(Debug, Clone, PartialEq)]
pub enum TabBarAction {
    /// No action
    None,
    /// Switch to a specific tab
    SwitchTo(TabId),
    /// Close a specific tab
    Close(TabId),
    /// Close every other unpinned tab in the pane
    CloseOthers(TabId),
    /// Reorder a tab to a new position
    Reorder(TabId, usize),
    /// Pin or unpin a tab
    TogglePin(TabId),
    /// Rename a specific tab
    RenameTab(TabId, String),
}

/// Tab bar state for a single pane
#[derive(Debug)]
pub struct TabBarUI {
    pane: PaneId,
    measurer: TabOverflowMeasurer,
    scheduler: OverflowScheduler,
    layout: OverflowLayout,
}

impl TabBarUI {
    pub fn new(pane: PaneId, config: &Config) -> Self {
        Self {
            pane,
            measurer: TabOverflowMeasurer::from_config(config),
            scheduler: OverflowScheduler::new(),
            layout: OverflowLayout::default(),
        }
    }

    pub fn pane(&self) -> PaneId {
        self.pane
    }

    pub fn measurer_mut(&mut self) -> &mut TabOverflowMeasurer {
        &mut self.measurer
    }

    /// Latest computed layout
    pub fn layout(&self) -> &OverflowLayout {
        &self.layout
    }

    /// Per-frame update. Recomputes the overflow layout only when the pane's
    /// visible tabs or the available width changed since the last frame.
    pub fn on_frame(
        &mut self,
        canvas: &Canvas,
        available_width: f32,
        actions_width: f32,
    ) -> &OverflowLayout {
        let group = canvas.group(self.pane);
        let ids: Vec<TabId> = group.visible_tabs().map(|t| t.id).collect();
        self.scheduler.observe_tabs(&ids);
        self.scheduler.observe_resize(available_width);

        if self.scheduler.take_frame() {
            let tabs: Vec<(TabId, &str)> = group
                .visible_tabs()
                .map(|t| (t.id, t.title.as_str()))
                .collect();
            self.layout = self.measurer.compute(&tabs, available_width, actions_width);
            log::debug!(
                "Tab bar {}: {} visible, {} in overflow",
                self.pane,
                self.layout.visible_count,
                self.layout.overflow_ids.len()
            );
        }
        &self.layout
    }

    /// Record a rendered width and schedule a recompute
    pub fn record_measured(&mut self, tab_id: TabId, title: &str, width: f32) {
        self.measurer.record_measured(tab_id, title, width);
        self.scheduler.invalidate();
    }

    /// Apply a tab bar gesture. Close actions report their close request.
    pub fn apply_action(
        &mut self,
        lifecycle: &mut TabLifecycle,
        action: TabBarAction,
    ) -> Option<CloseRequest> {
        match action {
            TabBarAction::None => {}
            TabBarAction::SwitchTo(id) => {
                lifecycle.canvas_mut().switch_to_tab(id);
            }
            TabBarAction::Close(id) => return Some(lifecycle.request_close(id)),
            TabBarAction::CloseOthers(id) => return Some(lifecycle.request_close_others(id)),
            TabBarAction::Reorder(id, index) => {
                lifecycle.canvas_mut().reorder_tab(id, self.pane, index);
            }
            TabBarAction::TogglePin(id) => {
                lifecycle.canvas_mut().toggle_pin_tab(id);
            }
            TabBarAction::RenameTab(id, title) => {
                if lifecycle.canvas_mut().rename_tab(id, title) {
                    self.scheduler.invalidate();
                }
            }
        }
        None
    }
}
