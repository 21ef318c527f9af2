//! Bounded history of recently closed tabs, used by "reopen closed tab".

use crate::layout::PaneId;
use crate::tab::Tab;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;

/// Number of closed tabs remembered
pub const CLOSED_TAB_CAPACITY: usize = 10;

/// A closed tab and where it used to live
#[derive(Debug, Clone, PartialEq)]
pub struct ClosedTabRecord {
    pub tab: Tab,
    pub closed_at: DateTime<Utc>,
    pub group: PaneId,
    pub index: usize,
}

/// Ring buffer of closed tabs; the oldest entry is evicted when full
#[derive(Debug, Clone, Default)]
pub struct ClosedTabRing {
    records: VecDeque<ClosedTabRecord>,
}

impl ClosedTabRing {
    /// Record a closed tab, returning the evicted record when the ring was full
    pub(crate) fn push(&mut self, record: ClosedTabRecord) -> Option<ClosedTabRecord> {
        let evicted = if self.records.len() >= CLOSED_TAB_CAPACITY {
            self.records.pop_front()
        } else {
            None
        };
        self.records.push_back(record);
        evicted
    }

    /// Take the most recently closed tab
    pub(crate) fn pop(&mut self) -> Option<ClosedTabRecord> {
        self.records.pop_back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &ClosedTabRecord> {
        self.records.iter()
    }
}
