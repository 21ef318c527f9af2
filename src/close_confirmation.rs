//! Confirmation gate for closing tabs with unsaved changes.
//!
//! A close that would discard dirty content is parked here until the host
//! answers the yes/no prompt. Nothing on the canvas changes while a close is
//! pending; declining drops the pending close without side effects.

use crate::tab::TabId;

/// Action resolved from the confirmation prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseConfirmAction {
    /// User confirmed - close the tabs with the given IDs
    Close { tab_ids: Vec<TabId> },
    /// User declined - keep the tabs open
    Cancel,
    /// Nothing pending
    None,
}

/// State of the close confirmation prompt
#[derive(Debug, Default)]
pub struct CloseConfirmation {
    /// Tabs to close once confirmed
    pending_tab_ids: Vec<TabId>,
    /// Titles of the dirty tabs, for display
    dirty_titles: Vec<String>,
}

impl CloseConfirmation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a close is waiting for an answer
    pub fn is_pending(&self) -> bool {
        !self.pending_tab_ids.is_empty()
    }

    /// Titles of the dirty tabs in the pending close
    pub fn dirty_titles(&self) -> &[String] {
        &self.dirty_titles
    }

    pub fn pending_tab_ids(&self) -> &[TabId] {
        &self.pending_tab_ids
    }

    /// Park a close. Replaces any close still waiting for an answer.
    pub fn request(&mut self, tab_ids: Vec<TabId>, dirty_titles: Vec<String>) {
        if self.is_pending() {
            log::debug!(
                "Replacing pending close of {:?} with {:?}",
                self.pending_tab_ids,
                tab_ids
            );
        }
        self.pending_tab_ids = tab_ids;
        self.dirty_titles = dirty_titles;
    }

    /// Forget a tab that left the canvas by another path
    pub fn forget(&mut self, tab_id: TabId) {
        self.pending_tab_ids.retain(|id| *id != tab_id);
        if self.pending_tab_ids.is_empty() {
            self.dirty_titles.clear();
        }
    }

    /// Resolve the prompt and clear state
    pub fn resolve(&mut self, confirmed: bool) -> CloseConfirmAction {
        if !self.is_pending() {
            return CloseConfirmAction::None;
        }
        let tab_ids = std::mem::take(&mut self.pending_tab_ids);
        self.dirty_titles.clear();
        if confirmed {
            CloseConfirmAction::Close { tab_ids }
        } else {
            log::debug!("Close of {:?} declined", tab_ids);
            CloseConfirmAction::Cancel
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_without_pending_is_none() {
        let mut gate = CloseConfirmation::new();
        assert_eq!(gate.resolve(true), CloseConfirmAction::None);
    }

    #[test]
    fn decline_clears_state() {
        let mut gate = CloseConfirmation::new();
        gate.request(vec![1, 2], vec!["a.rs".to_string()]);
        assert!(gate.is_pending());
        assert_eq!(gate.dirty_titles(), ["a.rs".to_string()]);
        assert_eq!(gate.resolve(false), CloseConfirmAction::Cancel);
        assert!(!gate.is_pending());
        assert!(gate.dirty_titles().is_empty());
    }

    #[test]
    fn confirm_returns_pending_ids() {
        let mut gate = CloseConfirmation::new();
        gate.request(vec![4, 5], vec!["x".to_string()]);
        gate.forget(4);
        assert_eq!(gate.resolve(true), CloseConfirmAction::Close { tab_ids: vec![5] });
    }
}
