//! Drag and drop of tabs between panes.

use super::{Canvas, DragState};
use crate::drop_zone::{DropPosition, legal_drop_zones};
use crate::events::CanvasNotification;
use crate::layout::{PaneId, SplitMode};
use crate::tab::TabId;

impl Canvas {
    /// Begin dragging a visible tab
    pub fn start_drag(&mut self, tab_id: TabId) -> bool {
        let Some(from) = self.pane_of(tab_id) else {
            return false;
        };
        if self.tab(tab_id).is_none_or(|t| t.is_hidden) {
            return false;
        }
        self.drag = Some(DragState { tab_id, from });
        true
    }

    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }

    /// Drop `tab_id`, dragged out of `from`, onto `to` at `position`.
    ///
    /// Positions not legal for the current topology are ignored. The dropped
    /// tab becomes active (a preview is committed) and its pane becomes the
    /// active group; topology collapse runs afterwards.
    pub fn handle_drop(
        &mut self,
        tab_id: TabId,
        from: PaneId,
        to: PaneId,
        position: DropPosition,
    ) -> bool {
        self.drag = None;
        let mode = self.split_mode();

        let Some(tab) = self.group(from).get(tab_id) else {
            log::debug!("handle_drop: tab {} not in {}", tab_id, from);
            return false;
        };
        if tab.is_hidden {
            return false;
        }
        let legal = legal_drop_zones(mode, self.group(from).visible_count());
        if !legal.allows(position) {
            log::debug!("handle_drop: {:?} not allowed in {:?}", position, mode);
            return false;
        }
        let inserts_into_target = position == DropPosition::Center || mode == SplitMode::Grid;
        if inserts_into_target && !mode.is_addressable(to) {
            log::debug!("handle_drop: {} is not addressable in {:?}", to, mode);
            return false;
        }

        let Some((_, mut tab)) = self.groups[from.index()].take(tab_id) else {
            return false;
        };
        tab.promote();

        let landing = match (mode, position) {
            (_, DropPosition::Center) | (SplitMode::Grid, _) => to,
            (SplitMode::None, DropPosition::Left) => {
                self.move_group(PaneId::Primary, PaneId::Secondary);
                self.layout.set_split_mode(SplitMode::Horizontal);
                PaneId::Primary
            }
            (SplitMode::None, DropPosition::Right) => {
                self.layout.set_split_mode(SplitMode::Horizontal);
                PaneId::Secondary
            }
            (SplitMode::None, DropPosition::Top) => {
                self.move_group(PaneId::Primary, PaneId::Secondary);
                self.layout.set_split_mode(SplitMode::Vertical);
                PaneId::Primary
            }
            (SplitMode::None, DropPosition::Bottom) => {
                self.layout.set_split_mode(SplitMode::Vertical);
                PaneId::Secondary
            }
            (SplitMode::Horizontal, DropPosition::Bottom) => {
                self.layout.set_split_mode(SplitMode::Grid);
                PaneId::Tertiary
            }
            (SplitMode::Horizontal, DropPosition::Top) => {
                self.absorb_group(PaneId::Primary, PaneId::Tertiary);
                self.absorb_group(PaneId::Secondary, PaneId::Tertiary);
                self.layout.set_split_mode(SplitMode::Grid);
                PaneId::Primary
            }
            (SplitMode::Horizontal, DropPosition::Left)
            | (SplitMode::Vertical, DropPosition::Top) => PaneId::Primary,
            (SplitMode::Horizontal, DropPosition::Right)
            | (SplitMode::Vertical, DropPosition::Bottom) => PaneId::Secondary,
            (SplitMode::Vertical, DropPosition::Right) => {
                self.move_group(PaneId::Secondary, PaneId::Tertiary);
                self.layout.set_split_mode(SplitMode::Grid);
                PaneId::Secondary
            }
            (SplitMode::Vertical, DropPosition::Left) => {
                self.move_group(PaneId::Secondary, PaneId::Tertiary);
                self.move_group(PaneId::Primary, PaneId::Secondary);
                self.layout.set_split_mode(SplitMode::Grid);
                PaneId::Primary
            }
        };

        let group = &mut self.groups[landing.index()];
        group.insert(0, tab);
        group.set_active(tab_id);
        self.active_group = landing;
        log::info!(
            "Dropped tab {} from {} at {:?} -> {} ({:?})",
            tab_id,
            from,
            position,
            landing,
            self.split_mode()
        );

        self.collapse_topology();
        let group = self.pane_of(tab_id).unwrap_or(landing);
        self.notify(CanvasNotification::TabInserted { tab_id, group });
        true
    }
}
