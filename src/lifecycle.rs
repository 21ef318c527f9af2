//! Tab lifecycle policy on top of the canvas store.
//!
//! Adds the preview/active open paths with duplicate detection, commit on
//! first edit, the dirty-close confirmation gate, and the inbound event
//! queue through which collaborators open content or tear down sessions.

use crate::canvas::{Canvas, CloseOutcome};
use crate::close_confirmation::{CloseConfirmAction, CloseConfirmation};
use crate::events::{self, ContentOpenRequest, InboundEvent, InboundSender};
use crate::layout::{PaneId, SplitMode};
use crate::shortcuts::CanvasAction;
use crate::tab::{SESSION_ID_KEY, TabContent, TabId, TabState};
use par_canvas_config::Config;
use serde_json::{Map, Value};
use tokio::sync::mpsc;

/// Result of an open request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    /// A new tab was added
    Created(TabId),
    /// An existing tab with the same dedupe key was focused
    Focused(TabId),
    /// A new preview displaced the pane's old preview, or an existing tab's
    /// content was overwritten
    Replaced(TabId),
}

impl OpenOutcome {
    pub fn tab_id(&self) -> TabId {
        match self {
            Self::Created(id) | Self::Focused(id) | Self::Replaced(id) => *id,
        }
    }
}

/// Result of a close request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseRequest {
    /// This many tabs were closed or hidden
    Closed(usize),
    /// Dirty tabs are involved; call [`TabLifecycle::resolve_close`]
    NeedsConfirmation { titles: Vec<String> },
    /// Nothing to close
    Nothing,
}

/// Canvas plus lifecycle policy
#[derive(Debug)]
pub struct TabLifecycle {
    canvas: Canvas,
    confirmation: CloseConfirmation,
    confirm_close_dirty: bool,
    inbound_tx: mpsc::UnboundedSender<InboundEvent>,
    inbound_rx: mpsc::UnboundedReceiver<InboundEvent>,
}

impl TabLifecycle {
    pub fn new(config: &Config) -> Self {
        Self::with_canvas(Canvas::from_config(config), config.confirm_close_dirty)
    }

    pub fn with_canvas(canvas: Canvas, confirm_close_dirty: bool) -> Self {
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
        Self {
            canvas,
            confirmation: CloseConfirmation::new(),
            confirm_close_dirty,
            inbound_tx,
            inbound_rx,
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn confirmation(&self) -> &CloseConfirmation {
        &self.confirmation
    }

    /// Handle for collaborators to queue inbound events
    pub fn inbound_sender(&self) -> InboundSender {
        InboundSender::new(self.inbound_tx.clone())
    }

    fn existing_duplicate(&self, content: &TabContent) -> Option<TabId> {
        let key = content.duplicate_key()?;
        self.canvas.find_by_duplicate_key(key).map(|(_, id)| id)
    }

    // ========================================================================
    // Opening
    // ========================================================================

    /// Single-click open: focus a tab with the same dedupe key, otherwise
    /// open as preview (replacing the pane's preview)
    pub fn open_preview(&mut self, content: TabContent, target: Option<PaneId>) -> OpenOutcome {
        if let Some(existing) = self.existing_duplicate(&content) {
            log::debug!("open_preview: focusing existing tab {}", existing);
            self.canvas.switch_to_tab(existing);
            return OpenOutcome::Focused(existing);
        }
        let inserted = self.canvas.insert_new_tab(content, TabState::Preview, target);
        match inserted.replaced {
            Some(_) => OpenOutcome::Replaced(inserted.id),
            None => OpenOutcome::Created(inserted.id),
        }
    }

    /// Double-click or programmatic open: like [`Self::open_preview`] but a
    /// matching preview tab is committed, and new tabs open active
    pub fn open_active(&mut self, content: TabContent, target: Option<PaneId>) -> OpenOutcome {
        if let Some(existing) = self.existing_duplicate(&content) {
            log::debug!("open_active: committing existing tab {}", existing);
            self.canvas.promote_tab(existing);
            self.canvas.switch_to_tab(existing);
            return OpenOutcome::Focused(existing);
        }
        OpenOutcome::Created(self.canvas.add_tab(content, TabState::Active, target))
    }

    /// Open content described by an inbound request
    pub fn open(&mut self, request: ContentOpenRequest) -> OpenOutcome {
        let content = request.content();

        if request.check_duplicate
            && let Some(existing) = self.existing_duplicate(&content)
        {
            self.canvas.promote_tab(existing);
            if request.replace_existing {
                self.canvas.replace_content(existing, content);
                self.canvas.switch_to_tab(existing);
                return OpenOutcome::Replaced(existing);
            }
            self.canvas.switch_to_tab(existing);
            return OpenOutcome::Focused(existing);
        }

        let pre_split = request.enable_split_view && self.canvas.split_mode() == SplitMode::None;
        let target = if pre_split {
            self.canvas.pre_split(SplitMode::Vertical);
            Some(PaneId::Secondary)
        } else {
            request.target_group
        };
        let id = self.canvas.add_tab(content, TabState::Active, target);
        if pre_split {
            // Splitting an empty canvas leaves primary empty
            self.canvas.collapse_topology();
        }
        OpenOutcome::Created(id)
    }

    /// First edit in a previewed document commits it
    pub fn on_content_edit(&mut self, tab_id: TabId) -> bool {
        self.canvas.promote_tab(tab_id)
    }

    // ========================================================================
    // Closing
    // ========================================================================

    pub fn request_close(&mut self, tab_id: TabId) -> CloseRequest {
        let visible = self.canvas.tab(tab_id).is_some_and(|t| !t.is_hidden);
        if !visible {
            return CloseRequest::Nothing;
        }
        self.request_close_ids(vec![tab_id])
    }

    /// Close the active tab of the active pane; pinned tabs are skipped
    pub fn request_close_active(&mut self) -> CloseRequest {
        match self.canvas.active_tab() {
            Some(tab) if tab.state != TabState::Pinned => {
                let id = tab.id;
                self.request_close_ids(vec![id])
            }
            _ => CloseRequest::Nothing,
        }
    }

    /// Close every other unpinned visible tab in the tab's pane
    pub fn request_close_others(&mut self, tab_id: TabId) -> CloseRequest {
        let Some(pane) = self.canvas.pane_of(tab_id) else {
            return CloseRequest::Nothing;
        };
        let ids = self
            .canvas
            .group(pane)
            .visible_tabs()
            .filter(|t| t.id != tab_id && t.state != TabState::Pinned)
            .map(|t| t.id)
            .collect();
        self.request_close_ids(ids)
    }

    /// Close every visible tab in a pane, pinned ones included
    pub fn request_close_group(&mut self, pane: PaneId) -> CloseRequest {
        let ids = self.canvas.group(pane).visible_tabs().map(|t| t.id).collect();
        self.request_close_ids(ids)
    }

    fn request_close_ids(&mut self, ids: Vec<TabId>) -> CloseRequest {
        if ids.is_empty() {
            return CloseRequest::Nothing;
        }
        let titles: Vec<String> = ids
            .iter()
            .filter_map(|id| self.canvas.tab(*id))
            .filter(|t| t.is_dirty)
            .map(|t| t.title.clone())
            .collect();

        if self.confirm_close_dirty && !titles.is_empty() {
            log::debug!("Close of {:?} needs confirmation", ids);
            self.confirmation.request(ids, titles.clone());
            return CloseRequest::NeedsConfirmation { titles };
        }
        CloseRequest::Closed(self.close_now(&ids))
    }

    /// Answer the pending confirmation. Declining leaves the canvas untouched.
    pub fn resolve_close(&mut self, confirmed: bool) -> CloseRequest {
        match self.confirmation.resolve(confirmed) {
            CloseConfirmAction::Close { tab_ids } => CloseRequest::Closed(self.close_now(&tab_ids)),
            CloseConfirmAction::Cancel | CloseConfirmAction::None => CloseRequest::Nothing,
        }
    }

    fn close_now(&mut self, ids: &[TabId]) -> usize {
        let mut closed = 0;
        for id in ids {
            let Some(pane) = self.canvas.pane_of(*id) else {
                continue;
            };
            if self.canvas.close_tab(*id, pane, false) != CloseOutcome::NotFound {
                closed += 1;
            }
        }
        closed
    }

    /// Remove the tab bound to a torn-down session. Bypasses the
    /// confirmation gate and the closed-tab ring.
    pub fn close_session(&mut self, session_id: &str) -> bool {
        let mut query = Map::new();
        query.insert(SESSION_ID_KEY.to_string(), Value::String(session_id.to_string()));
        let Some((pane, tab_id)) = self.canvas.find_tab_by_metadata(&query) else {
            log::debug!("close_session: no tab for session {}", session_id);
            return false;
        };
        self.confirmation.forget(tab_id);
        log::info!("Session {} ended, removing tab {}", session_id, tab_id);
        self.canvas.close_tab(tab_id, pane, true) == CloseOutcome::Removed
    }

    // ========================================================================
    // Inbound events and shortcuts
    // ========================================================================

    /// Apply queued inbound events in arrival order; returns how many ran
    pub fn pump(&mut self) -> usize {
        let events = events::drain(&mut self.inbound_rx);
        let count = events.len();
        for event in events {
            match event {
                InboundEvent::OpenContent(request) => {
                    self.open(*request);
                }
                InboundEvent::CloseSession { session_id } => {
                    self.close_session(&session_id);
                }
            }
        }
        count
    }

    /// Run a shortcut action. Close actions report their close request.
    pub fn apply(&mut self, action: CanvasAction) -> Option<CloseRequest> {
        log::debug!("Applying {}", action.name());
        match action {
            CanvasAction::ToggleMissionControl => self.canvas.toggle_mission_control(),
            CanvasAction::ToggleSplitHorizontal => {
                self.canvas.toggle_split(SplitMode::Horizontal);
            }
            CanvasAction::ToggleSplitVertical => {
                self.canvas.toggle_split(SplitMode::Vertical);
            }
            CanvasAction::ToggleAnchor => self.canvas.toggle_anchor(),
            CanvasAction::ToggleMaximize => self.canvas.toggle_maximize(),
            CanvasAction::CloseTab => return Some(self.request_close_active()),
            CanvasAction::ReopenClosedTab => {
                self.canvas.reopen_closed_tab();
            }
            CanvasAction::SwitchToTab(n) => {
                self.canvas
                    .switch_to_visible_index(usize::from(n).saturating_sub(1));
            }
            CanvasAction::SwitchToLastTab => {
                self.canvas.switch_to_last_visible();
            }
        }
        None
    }
}
