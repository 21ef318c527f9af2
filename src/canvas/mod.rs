//! Canvas store: the editor-canvas layout and tab-lifecycle engine.
//!
//! The [`Canvas`] owns three fixed editor groups, the active-group pointer,
//! the layout, the closed-tab ring and the transient drag state. Every public
//! mutation runs to completion and leaves these postconditions:
//! - each group's active pointer is `None` or names a visible tab of that group
//! - groups that are not addressable under the split mode hold no tabs
//! - no addressable group is without visible tabs unless the whole canvas is
//!   (then the split mode is `None`)
//!
//! Invalid input (unknown tab or pane, illegal drop) is logged and ignored.

mod closed_tabs;
mod collapse;
mod drop;
mod group;
mod snapshot;

pub use closed_tabs::{CLOSED_TAB_CAPACITY, ClosedTabRecord, ClosedTabRing};
pub use group::EditorGroup;
pub use snapshot::{CanvasSnapshot, GroupSnapshot, TabSnapshot};

use crate::events::CanvasNotification;
use crate::layout::{AnchorPosition, LayoutState, PaneId, SplitMode};
use crate::tab::{
    DUPLICATE_CHECK_KEY, Tab, TabContent, TabId, TabState, normalize_resource_path,
};
use chrono::Utc;
use serde_json::{Map, Value};
use tokio::sync::mpsc;

/// Result of [`Canvas::close_tab`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// Persistent-session tab kept in place but hidden
    Hidden,
    /// Tab removed from the canvas
    Removed,
    /// Unknown tab/pane pair or already hidden; nothing changed
    NotFound,
}

/// Tab currently being dragged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragState {
    pub tab_id: TabId,
    pub from: PaneId,
}

/// Ids produced by an insertion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Inserted {
    pub id: TabId,
    /// Preview tab discarded to make room
    pub replaced: Option<TabId>,
}

/// Root aggregate of the editor canvas
#[derive(Debug)]
pub struct Canvas {
    groups: [EditorGroup; 3],
    active_group: PaneId,
    layout: LayoutState,
    mission_control_open: bool,
    drag: Option<DragState>,
    closed_tabs: ClosedTabRing,
    next_tab_id: TabId,
    subscribers: Vec<mpsc::UnboundedSender<CanvasNotification>>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create an empty single-pane canvas
    pub fn new() -> Self {
        Self::with_layout(LayoutState::default())
    }

    pub fn with_layout(layout: LayoutState) -> Self {
        Self {
            groups: Default::default(),
            active_group: PaneId::Primary,
            layout,
            mission_control_open: false,
            drag: None,
            closed_tabs: ClosedTabRing::default(),
            next_tab_id: 1,
            subscribers: Vec::new(),
        }
    }

    pub fn from_config(config: &par_canvas_config::Config) -> Self {
        Self::with_layout(LayoutState::from_config(config))
    }

    // ========================================================================
    // Read access
    // ========================================================================

    pub fn group(&self, pane: PaneId) -> &EditorGroup {
        &self.groups[pane.index()]
    }

    pub fn active_group(&self) -> PaneId {
        self.active_group
    }

    pub fn layout(&self) -> &LayoutState {
        &self.layout
    }

    pub fn split_mode(&self) -> SplitMode {
        self.layout.split_mode()
    }

    pub fn is_mission_control_open(&self) -> bool {
        self.mission_control_open
    }

    pub fn drag(&self) -> Option<DragState> {
        self.drag
    }

    pub fn closed_tabs(&self) -> &ClosedTabRing {
        &self.closed_tabs
    }

    /// Active tab of the active group
    pub fn active_tab(&self) -> Option<&Tab> {
        self.group(self.active_group).active_tab()
    }

    /// Pane holding the tab
    pub fn pane_of(&self, tab_id: TabId) -> Option<PaneId> {
        PaneId::ALL
            .into_iter()
            .find(|pane| self.group(*pane).contains(tab_id))
    }

    pub fn tab(&self, tab_id: TabId) -> Option<&Tab> {
        self.groups.iter().find_map(|g| g.get(tab_id))
    }

    fn tab_mut(&mut self, tab_id: TabId) -> Option<&mut Tab> {
        self.groups.iter_mut().find_map(|g| g.get_mut(tab_id))
    }

    /// Visible tabs across all groups
    pub fn visible_tab_count(&self) -> usize {
        self.groups.iter().map(EditorGroup::visible_count).sum()
    }

    /// All tabs across all groups, hidden ones included
    pub fn tab_count(&self) -> usize {
        self.groups.iter().map(EditorGroup::len).sum()
    }

    /// First tab (hidden ones included) whose metadata matches every entry of
    /// `query`. The dedupe key compares path-normalised; other keys compare
    /// exactly. An empty query matches nothing.
    pub fn find_tab_by_metadata(&self, query: &Map<String, Value>) -> Option<(PaneId, TabId)> {
        if query.is_empty() {
            return None;
        }
        PaneId::ALL.into_iter().find_map(|pane| {
            self.group(pane)
                .tabs()
                .iter()
                .find(|tab| metadata_matches(&tab.content.metadata, query))
                .map(|tab| (pane, tab.id))
        })
    }

    /// Tab carrying the given dedupe key, compared path-normalised
    pub fn find_by_duplicate_key(&self, key: &str) -> Option<(PaneId, TabId)> {
        let mut query = Map::new();
        query.insert(DUPLICATE_CHECK_KEY.to_string(), Value::String(key.to_string()));
        self.find_tab_by_metadata(&query)
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    /// Receive every notification published from now on
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<CanvasNotification> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    fn notify(&mut self, notification: CanvasNotification) {
        // Dropped receivers unsubscribe themselves
        self.subscribers
            .retain(|tx| tx.send(notification.clone()).is_ok());
    }

    fn notify_destroyed(&mut self, tab: &Tab) {
        self.notify(CanvasNotification::TabDestroyed {
            tab_id: tab.id,
            kind: tab.content.kind.clone(),
            metadata: tab.content.metadata.clone(),
        });
    }

    // ========================================================================
    // Adding and closing
    // ========================================================================

    /// Pane a new tab lands in. `None` mode always uses primary; two-pane
    /// modes send tertiary requests to the active group (secondary when the
    /// active group is tertiary itself); no request means the active group.
    pub fn resolve_target(&self, target: Option<PaneId>) -> PaneId {
        let mode = self.split_mode();
        let requested = target.unwrap_or(self.active_group);
        match mode {
            SplitMode::None => PaneId::Primary,
            SplitMode::Horizontal | SplitMode::Vertical => match requested {
                PaneId::Tertiary if self.active_group == PaneId::Tertiary => PaneId::Secondary,
                PaneId::Tertiary => self.active_group,
                pane => pane,
            },
            SplitMode::Grid => requested,
        }
    }

    /// Add a tab and make it active in its pane, and that pane active.
    ///
    /// A preview tab replaces the pane's visible preview in place; anything
    /// else goes to the front of the pane.
    pub fn add_tab(
        &mut self,
        content: TabContent,
        state: TabState,
        target: Option<PaneId>,
    ) -> TabId {
        self.insert_new_tab(content, state, target).id
    }

    pub(crate) fn insert_new_tab(
        &mut self,
        content: TabContent,
        state: TabState,
        target: Option<PaneId>,
    ) -> Inserted {
        let pane = self.resolve_target(target);
        let id = self.next_tab_id;
        self.next_tab_id += 1;
        let tab = Tab::new(id, content, state);

        let group = &mut self.groups[pane.index()];
        let mut replaced = None;
        let mut index = 0;
        if state == TabState::Preview
            && let Some(preview_index) = group.preview_index()
        {
            let old_id = group.tabs()[preview_index].id;
            replaced = group.take(old_id).map(|(_, old)| old);
            index = preview_index;
        }
        group.insert(index, tab);
        group.set_active(id);
        self.active_group = pane;

        log::debug!(
            "Added tab {} ({:?}) to {} at index {}",
            id,
            state,
            pane,
            index
        );

        if let Some(old) = &replaced {
            log::debug!("Preview tab {} replaced by {}", old.id, id);
            if self.drag.is_some_and(|d| d.tab_id == old.id) {
                self.drag = None;
            }
            self.notify_destroyed(old);
        }
        self.notify(CanvasNotification::TabInserted { tab_id: id, group: pane });

        Inserted {
            id,
            replaced: replaced.map(|t| t.id),
        }
    }

    /// Close a tab in `pane`.
    ///
    /// Persistent-session tabs are hidden unless `force_remove` is set. A
    /// removed tab is recorded in the closed-tab ring, except a
    /// force-removed persistent session.
    pub fn close_tab(&mut self, tab_id: TabId, pane: PaneId, force_remove: bool) -> CloseOutcome {
        let group = &mut self.groups[pane.index()];
        let Some(tab) = group.get(tab_id) else {
            log::debug!("close_tab: tab {} not in {}", tab_id, pane);
            return CloseOutcome::NotFound;
        };
        let persistent = tab.is_persistent_session();

        if persistent && !force_remove {
            if group.hide(tab_id).is_none() {
                return CloseOutcome::NotFound;
            }
            log::debug!("Hid persistent-session tab {} in {}", tab_id, pane);
            if self.drag.is_some_and(|d| d.tab_id == tab_id) {
                self.drag = None;
            }
            self.collapse_topology();
            return CloseOutcome::Hidden;
        }

        let Some((index, tab)) = group.take(tab_id) else {
            return CloseOutcome::NotFound;
        };
        log::debug!("Closed tab {} from {} (index {})", tab_id, pane, index);

        if self.drag.is_some_and(|d| d.tab_id == tab_id) {
            self.drag = None;
        }
        self.notify_destroyed(&tab);
        if !persistent {
            let record = ClosedTabRecord {
                tab,
                closed_at: Utc::now(),
                group: pane,
                index,
            };
            if let Some(evicted) = self.closed_tabs.push(record) {
                log::debug!("Closed-tab ring full, dropped tab {}", evicted.tab.id);
            }
        }
        self.collapse_topology();
        CloseOutcome::Removed
    }

    /// Bring back the most recently closed tab, active, in its original
    /// pane (or wherever that pane resolves to now)
    pub fn reopen_closed_tab(&mut self) -> Option<TabId> {
        let record = self.closed_tabs.pop()?;
        let pane = self.resolve_target(Some(record.group));
        let mut tab = record.tab;
        let tab_id = tab.id;
        tab.promote();
        tab.is_hidden = false;
        tab.touch();

        let group = &mut self.groups[pane.index()];
        let index = record.index.min(group.len());
        group.insert(index, tab);
        group.set_active(tab_id);
        self.active_group = pane;

        log::info!("Reopened tab {} in {} at index {}", tab_id, pane, index);
        self.notify(CanvasNotification::TabInserted {
            tab_id,
            group: pane,
        });
        Some(tab_id)
    }

    // ========================================================================
    // Per-tab state
    // ========================================================================

    /// Make a tab active, un-hiding it, and make its pane the active group.
    /// A hidden preview comes back committed, like a reopened one.
    pub fn switch_to_tab(&mut self, tab_id: TabId) -> bool {
        let Some(pane) = self.pane_of(tab_id) else {
            log::debug!("switch_to_tab: unknown tab {}", tab_id);
            return false;
        };
        let group = &mut self.groups[pane.index()];
        if let Some(tab) = group.get_mut(tab_id) {
            if tab.is_hidden {
                tab.is_hidden = false;
                if tab.promote() {
                    log::debug!("Un-hid preview tab {} as active", tab_id);
                }
            }
            tab.touch();
        }
        group.set_active(tab_id);
        self.active_group = pane;
        true
    }

    /// Preview to active; false for any other state
    pub fn promote_tab(&mut self, tab_id: TabId) -> bool {
        self.tab_mut(tab_id).is_some_and(Tab::promote)
    }

    /// Pinned to active, anything else to pinned
    pub fn toggle_pin_tab(&mut self, tab_id: TabId) -> bool {
        let Some(tab) = self.tab_mut(tab_id) else {
            return false;
        };
        tab.state = match tab.state {
            TabState::Pinned => TabState::Active,
            TabState::Preview | TabState::Active => TabState::Pinned,
        };
        log::debug!("Tab {} is now {:?}", tab_id, tab.state);
        true
    }

    pub fn set_dirty(&mut self, tab_id: TabId, dirty: bool) -> bool {
        self.tab_mut(tab_id)
            .map(|tab| tab.is_dirty = dirty)
            .is_some()
    }

    /// Swap a tab's content; its title follows the new content
    pub fn replace_content(&mut self, tab_id: TabId, content: TabContent) -> bool {
        let Some(tab) = self.tab_mut(tab_id) else {
            return false;
        };
        tab.title = content.title.clone();
        tab.content = content;
        true
    }

    pub fn rename_tab(&mut self, tab_id: TabId, title: impl Into<String>) -> bool {
        self.tab_mut(tab_id)
            .map(|tab| tab.title = title.into())
            .is_some()
    }

    /// Move a tab within its pane; no topology effect
    pub fn reorder_tab(&mut self, tab_id: TabId, pane: PaneId, new_index: usize) -> bool {
        let moved = self.groups[pane.index()].reorder(tab_id, new_index);
        if !moved {
            log::debug!("reorder_tab: tab {} not in {}", tab_id, pane);
        }
        moved
    }

    // ========================================================================
    // Active group and keyboard navigation
    // ========================================================================

    pub fn set_active_group(&mut self, pane: PaneId) -> bool {
        if !self.split_mode().is_addressable(pane) {
            return false;
        }
        self.active_group = pane;
        true
    }

    /// Switch to the `index`th (0-based) visible tab of the active group
    pub fn switch_to_visible_index(&mut self, index: usize) -> Option<TabId> {
        let id = self.group(self.active_group).nth_visible(index)?.id;
        self.switch_to_tab(id).then_some(id)
    }

    pub fn switch_to_last_visible(&mut self) -> Option<TabId> {
        let id = self.group(self.active_group).visible_tabs().last()?.id;
        self.switch_to_tab(id).then_some(id)
    }

    // ========================================================================
    // Layout
    // ========================================================================

    /// Toggle a two-pane split.
    ///
    /// From a single pane the active tab moves into secondary (needs two
    /// visible tabs). The same mode again merges secondary back into primary.
    /// The other two-pane mode switches orientation. From grid, tertiary is
    /// merged into primary.
    pub fn toggle_split(&mut self, mode: SplitMode) -> bool {
        if !mode.is_two_pane() {
            return false;
        }
        let current = self.split_mode();
        match current {
            SplitMode::None => {
                let primary = &mut self.groups[PaneId::Primary.index()];
                if primary.visible_count() < 2 {
                    return false;
                }
                let Some((_, tab)) = primary
                    .active_tab_id()
                    .and_then(|id| primary.take(id))
                else {
                    return false;
                };
                let tab_id = tab.id;
                let secondary = &mut self.groups[PaneId::Secondary.index()];
                secondary.insert(0, tab);
                secondary.set_active(tab_id);
                self.active_group = PaneId::Secondary;
            }
            current if current == mode => {
                self.absorb_group(PaneId::Secondary, PaneId::Primary);
                self.layout.set_split_mode(SplitMode::None);
                log::info!("Split mode {:?} -> None", current);
                self.collapse_topology();
                return true;
            }
            SplitMode::Grid => self.absorb_group(PaneId::Tertiary, PaneId::Primary),
            _ => {}
        }
        log::info!("Split mode {:?} -> {:?}", current, mode);
        self.layout.set_split_mode(mode);
        self.collapse_topology();
        true
    }

    /// Enter a split without moving any tab; the caller must insert into the
    /// new pane and collapse afterwards
    pub(crate) fn pre_split(&mut self, mode: SplitMode) {
        log::info!("Pre-splitting canvas to {:?}", mode);
        self.layout.set_split_mode(mode);
    }

    pub fn set_split_ratio(&mut self, ratio: f32) {
        self.layout.set_split_ratio(ratio);
    }

    pub fn set_split_ratio2(&mut self, ratio: f32) {
        self.layout.set_split_ratio2(ratio);
    }

    pub fn set_anchor_position(&mut self, position: AnchorPosition) {
        self.layout.set_anchor_position(position);
    }

    pub fn toggle_anchor(&mut self) {
        self.layout.toggle_anchor();
    }

    pub fn set_anchor_size(&mut self, size: f32) {
        self.layout.set_anchor_size(size);
    }

    pub fn toggle_maximize(&mut self) {
        self.layout.toggle_maximize();
    }

    pub fn toggle_mission_control(&mut self) {
        self.mission_control_open = !self.mission_control_open;
    }
}

fn metadata_matches(metadata: &Map<String, Value>, query: &Map<String, Value>) -> bool {
    query.iter().all(|(key, expected)| {
        let Some(actual) = metadata.get(key) else {
            return false;
        };
        match (key.as_str(), actual, expected) {
            (DUPLICATE_CHECK_KEY, Value::String(a), Value::String(b)) => {
                normalize_resource_path(a) == normalize_resource_path(b)
            }
            _ => actual == expected,
        }
    })
}
