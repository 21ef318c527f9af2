//! A single editor group (pane): an ordered tab list plus an active pointer.

use crate::tab::{Tab, TabId};
use serde::Serialize;

/// Ordered tabs of one pane and the id of its active tab.
///
/// `active_tab_id` is either `None` or the id of a non-hidden tab in `tabs`.
/// Every mutating method restores that before returning.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EditorGroup {
    tabs: Vec<Tab>,
    active_tab_id: Option<TabId>,
}

impl EditorGroup {
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn active_tab_id(&self) -> Option<TabId> {
        self.active_tab_id
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.active_tab_id.and_then(|id| self.get(id))
    }

    /// True when the group holds no tabs at all, hidden ones included
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn visible_tabs(&self) -> impl Iterator<Item = &Tab> {
        self.tabs.iter().filter(|t| !t.is_hidden)
    }

    pub fn visible_count(&self) -> usize {
        self.visible_tabs().count()
    }

    pub fn has_visible(&self) -> bool {
        self.tabs.iter().any(|t| !t.is_hidden)
    }

    /// The `n`th visible tab (0-based)
    pub fn nth_visible(&self, n: usize) -> Option<&Tab> {
        self.visible_tabs().nth(n)
    }

    pub fn position(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == id)
    }

    pub fn contains(&self, id: TabId) -> bool {
        self.position(id).is_some()
    }

    pub fn get(&self, id: TabId) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: TabId) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|t| t.id == id)
    }

    /// Index of the visible preview tab, if any
    pub(crate) fn preview_index(&self) -> Option<usize> {
        self.tabs.iter().position(Tab::is_visible_preview)
    }

    /// Insert a tab at `index` (clamped to the list length)
    pub(crate) fn insert(&mut self, index: usize, tab: Tab) {
        let index = index.min(self.tabs.len());
        self.tabs.insert(index, tab);
        self.repair_active(index);
    }

    /// Make a visible tab active. Returns false if the tab is absent or hidden.
    pub(crate) fn set_active(&mut self, id: TabId) -> bool {
        match self.get(id) {
            Some(tab) if !tab.is_hidden => {
                self.active_tab_id = Some(id);
                true
            }
            _ => false,
        }
    }

    /// Remove a tab, returning it with the index it occupied
    pub(crate) fn take(&mut self, id: TabId) -> Option<(usize, Tab)> {
        let index = self.position(id)?;
        let tab = self.tabs.remove(index);
        self.repair_active(index);
        Some((index, tab))
    }

    /// Hide a tab in place. Returns the index when the tab was visible.
    pub(crate) fn hide(&mut self, id: TabId) -> Option<usize> {
        let index = self.position(id)?;
        let tab = &mut self.tabs[index];
        if tab.is_hidden {
            return None;
        }
        tab.is_hidden = true;
        self.repair_active(index);
        Some(index)
    }

    /// Move a tab to `new_index` within this group
    pub(crate) fn reorder(&mut self, id: TabId, new_index: usize) -> bool {
        let Some(from) = self.position(id) else {
            return false;
        };
        let tab = self.tabs.remove(from);
        let to = new_index.min(self.tabs.len());
        self.tabs.insert(to, tab);
        true
    }

    /// Append every tab of `other` after this group's tabs.
    /// The active pointer is kept if valid, otherwise `other`'s is adopted.
    /// This group's visible preview survives; an incoming one is committed.
    pub(crate) fn absorb(&mut self, other: EditorGroup) {
        if other.tabs.is_empty() {
            return;
        }
        let fallback = other.active_tab_id;
        let hint = self.tabs.len();
        let mut has_preview = self.preview_index().is_some();
        for mut tab in other.tabs {
            if tab.is_visible_preview() {
                if has_preview {
                    log::debug!("Committing preview tab {} on merge", tab.id);
                    tab.promote();
                }
                has_preview = true;
            }
            self.tabs.push(tab);
        }
        if !self.pointer_is_valid() {
            self.active_tab_id = fallback;
        }
        self.repair_active(hint);
    }

    fn pointer_is_valid(&self) -> bool {
        match self.active_tab_id {
            None => !self.has_visible(),
            Some(id) => self.get(id).is_some_and(|t| !t.is_hidden),
        }
    }

    /// Point at the nearest visible tab to `hint` if the current pointer is
    /// stale: the tab now at `hint`, else the closest one before it.
    pub(crate) fn repair_active(&mut self, hint: usize) {
        if self.pointer_is_valid() {
            return;
        }
        let hint = hint.min(self.tabs.len());
        let after = self.tabs[hint..].iter().find(|t| !t.is_hidden);
        let before = self.tabs[..hint].iter().rev().find(|t| !t.is_hidden);
        self.active_tab_id = after.or(before).map(|t| t.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tab::{TabContent, TabState};

    fn tab(id: TabId) -> Tab {
        Tab::new(id, TabContent::file(&format!("/f{id}.rs")), TabState::Active)
    }

    fn group(ids: &[TabId]) -> EditorGroup {
        let mut g = EditorGroup::default();
        for (i, id) in ids.iter().enumerate() {
            g.insert(i, tab(*id));
        }
        g
    }

    #[test]
    fn first_insert_becomes_active() {
        let g = group(&[1, 2, 3]);
        assert_eq!(g.active_tab_id(), Some(1));
        assert_eq!(g.visible_count(), 3);
    }

    #[test]
    fn removing_active_prefers_same_index() {
        let mut g = group(&[1, 2, 3]);
        g.set_active(2);
        g.take(2);
        assert_eq!(g.active_tab_id(), Some(3));
    }

    #[test]
    fn removing_last_active_falls_back_to_previous() {
        let mut g = group(&[1, 2, 3]);
        g.set_active(3);
        g.take(3);
        assert_eq!(g.active_tab_id(), Some(2));
        g.take(1);
        g.take(2);
        assert_eq!(g.active_tab_id(), None);
    }

    #[test]
    fn hiding_skips_hidden_neighbours() {
        let mut g = group(&[1, 2, 3]);
        g.hide(3);
        g.set_active(2);
        g.hide(2);
        assert_eq!(g.active_tab_id(), Some(1));
        assert_eq!(g.visible_count(), 1);
        assert_eq!(g.len(), 3);
        assert!(!g.set_active(3));
    }

    #[test]
    fn reorder_clamps_index() {
        let mut g = group(&[1, 2, 3]);
        assert!(g.reorder(1, 99));
        let ids: Vec<_> = g.tabs().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        assert!(!g.reorder(42, 0));
    }

    #[test]
    fn absorb_keeps_valid_pointer() {
        let mut a = group(&[1]);
        let mut b = group(&[2, 3]);
        b.set_active(3);
        a.absorb(b);
        assert_eq!(a.active_tab_id(), Some(1));

        let mut hidden_only = group(&[4]);
        hidden_only.hide(4);
        let mut c = group(&[5, 6]);
        c.set_active(6);
        hidden_only.absorb(c);
        assert_eq!(hidden_only.active_tab_id(), Some(6));
    }

    #[test]
    fn absorb_commits_incoming_preview() {
        let mut a = group(&[1]);
        a.insert(1, Tab::new(2, TabContent::file("/p2.rs"), TabState::Preview));
        let mut b = group(&[3]);
        b.insert(0, Tab::new(4, TabContent::file("/p4.rs"), TabState::Preview));
        a.absorb(b);

        let states: Vec<_> = a.tabs().iter().map(|t| (t.id, t.state)).collect();
        assert_eq!(
            states,
            vec![
                (1, TabState::Active),
                (2, TabState::Preview),
                (4, TabState::Active),
                (3, TabState::Active),
            ]
        );

        // Without a preview of its own the group keeps the incoming one
        let mut c = group(&[5]);
        let mut d = EditorGroup::default();
        d.insert(0, Tab::new(6, TabContent::file("/p6.rs"), TabState::Preview));
        c.absorb(d);
        assert_eq!(c.get(6).map(|t| t.state), Some(TabState::Preview));
    }
}
