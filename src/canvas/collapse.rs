//! Topology collapse: the repair pass that removes empty addressable panes
//! by redistributing tabs and downgrading the split mode.

use super::Canvas;
use crate::layout::{PaneId, SplitMode};

impl Canvas {
    /// Downgrade the topology until no addressable pane lacks visible tabs,
    /// then repair the active-group pointer. Idempotent.
    pub(crate) fn collapse_topology(&mut self) {
        let before = self.split_mode();
        // Each step removes at least one pane, so this runs at most twice
        while self.collapse_step() {}
        let after = self.split_mode();
        if before != after {
            log::info!("Topology collapsed {:?} -> {:?}", before, after);
        }
        self.retarget_active_group();
    }

    fn collapse_step(&mut self) -> bool {
        let mode = self.split_mode();

        // Hidden leftovers in panes the mode cannot address
        for pane in [PaneId::Secondary, PaneId::Tertiary] {
            if !mode.is_addressable(pane) && !self.group(pane).is_empty() {
                self.absorb_group(pane, PaneId::Primary);
            }
        }

        let [primary, secondary, tertiary] = PaneId::ALL.map(|pane| self.group(pane).has_visible());

        let next = match mode {
            SplitMode::None => return false,
            SplitMode::Horizontal | SplitMode::Vertical => {
                if !secondary {
                    self.absorb_group(PaneId::Secondary, PaneId::Primary);
                } else if !primary {
                    self.move_group(PaneId::Secondary, PaneId::Primary);
                } else {
                    return false;
                }
                SplitMode::None
            }
            SplitMode::Grid => match (primary, secondary, tertiary) {
                (true, true, true) => return false,
                (_, _, false) => {
                    self.absorb_group(PaneId::Tertiary, PaneId::Primary);
                    SplitMode::Horizontal
                }
                (false, true, true) => {
                    self.move_group(PaneId::Secondary, PaneId::Primary);
                    self.move_group(PaneId::Tertiary, PaneId::Secondary);
                    SplitMode::Vertical
                }
                (true, false, true) => {
                    self.move_group(PaneId::Tertiary, PaneId::Secondary);
                    SplitMode::Vertical
                }
                (false, false, true) => {
                    self.move_group(PaneId::Tertiary, PaneId::Primary);
                    SplitMode::None
                }
            },
        };

        log::debug!("Collapse step {:?} -> {:?}", mode, next);
        self.layout.set_split_mode(next);
        true
    }

    /// Replace `to`'s content with `from`'s. Whatever `to` held (only hidden
    /// tabs, at this point) is kept after the moved tabs.
    pub(crate) fn move_group(&mut self, from: PaneId, to: PaneId) {
        let moved = std::mem::take(&mut self.groups[from.index()]);
        let leftover = std::mem::replace(&mut self.groups[to.index()], moved);
        self.groups[to.index()].absorb(leftover);
        if self.active_group == from {
            self.active_group = to;
        }
    }

    /// Append `from`'s tabs to `into`, leaving `from` empty
    pub(crate) fn absorb_group(&mut self, from: PaneId, into: PaneId) {
        let moved = std::mem::take(&mut self.groups[from.index()]);
        self.groups[into.index()].absorb(moved);
        if self.active_group == from {
            self.active_group = into;
        }
    }

    /// Point the active group at a pane with visible tabs, preferring the
    /// current one, then primary, secondary, tertiary
    fn retarget_active_group(&mut self) {
        let mode = self.split_mode();
        let usable = |canvas: &Canvas, pane: PaneId| {
            mode.is_addressable(pane) && canvas.group(pane).has_visible()
        };
        if usable(self, self.active_group) {
            return;
        }
        self.active_group = PaneId::ALL
            .into_iter()
            .find(|pane| usable(self, *pane))
            .unwrap_or(PaneId::Primary);
    }
}
