//! Canvas tab model
//!
//! This module defines what a tab on the editor canvas is:
//! - `Tab`: one content item with its lifecycle state and timestamps
//! - `TabState`: preview / active / pinned
//! - `TabContent` and `ContentKind`: the opaque payload owned by a rendering collaborator
//! - `TabId`: unique identifier for each tab
//!
//! Tabs carry no behaviour beyond constructors and small state helpers; all
//! structural changes go through [`crate::canvas::Canvas`].

mod content;

pub use content::{ContentKind, TabContent, normalize_resource_path};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a tab, allocated by the canvas
pub type TabId = u64;

/// Metadata key used to recognise the same underlying resource across opens
pub const DUPLICATE_CHECK_KEY: &str = "duplicateCheckKey";

/// Metadata key carrying the identifier of a long-lived session (terminal)
pub const SESSION_ID_KEY: &str = "sessionId";

/// Lifecycle state of a tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TabState {
    /// Quick-look tab, replaced by the next preview open in the same pane
    Preview,
    /// Committed tab
    #[default]
    Active,
    /// Committed tab exempt from preview replacement and default close shortcuts
    Pinned,
}

/// A single tab on the canvas
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tab {
    /// Unique identifier for this tab
    pub id: TabId,
    /// Title shown in the tab bar
    pub title: String,
    /// Opaque payload rendered by a collaborator
    pub content: TabContent,
    /// Lifecycle state
    pub state: TabState,
    /// Content has unsaved changes
    pub is_dirty: bool,
    /// Kept alive but excluded from every visible count and index
    pub is_hidden: bool,
    /// When the tab was created
    pub created_at: DateTime<Utc>,
    /// When the tab was last switched to
    pub last_accessed_at: DateTime<Utc>,
}

impl Tab {
    /// Create a new visible tab. The title is taken from the content.
    pub(crate) fn new(id: TabId, content: TabContent, state: TabState) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: content.title.clone(),
            content,
            state,
            is_dirty: false,
            is_hidden: false,
            created_at: now,
            last_accessed_at: now,
        }
    }

    /// Whether this tab is a visible preview tab
    pub fn is_visible_preview(&self) -> bool {
        self.state == TabState::Preview && !self.is_hidden
    }

    /// Whether closing this tab hides it instead of removing it
    pub fn is_persistent_session(&self) -> bool {
        self.content.kind.is_persistent_session()
    }

    /// Update the last-accessed timestamp
    pub(crate) fn touch(&mut self) {
        self.last_accessed_at = Utc::now();
    }

    /// Commit a preview tab; no-op for other states
    pub(crate) fn promote(&mut self) -> bool {
        if self.state == TabState::Preview {
            self.state = TabState::Active;
            true
        } else {
            false
        }
    }
}
