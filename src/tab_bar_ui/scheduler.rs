//! Frame-coalesced recompute scheduling for the overflow layout.

use crate::tab::TabId;

/// Collects resize and tab-list changes between frames and reports at most
/// one pending recompute per frame.
#[derive(Debug, Default)]
pub struct OverflowScheduler {
    pending: bool,
    last_width: Option<f32>,
    last_tabs: Vec<TabId>,
}

impl OverflowScheduler {
    pub fn new() -> Self {
        Self {
            pending: true,
            ..Self::default()
        }
    }

    /// Container width changed
    pub fn observe_resize(&mut self, width: f32) {
        if self.last_width != Some(width) {
            self.last_width = Some(width);
            self.pending = true;
        }
    }

    /// Visible tab list of the pane, in order
    pub fn observe_tabs(&mut self, tabs: &[TabId]) {
        if self.last_tabs != tabs {
            self.last_tabs = tabs.to_vec();
            self.pending = true;
        }
    }

    /// Force a recompute on the next frame
    pub fn invalidate(&mut self) {
        self.pending = true;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Called once per frame; true when a recompute is due
    pub fn take_frame(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}
