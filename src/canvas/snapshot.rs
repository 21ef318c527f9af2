//! Serializable read-only view of the canvas.

use super::Canvas;
use crate::layout::{LayoutState, PaneId, SplitMode};
use crate::tab::{ContentKind, TabId, TabState};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabSnapshot {
    pub id: TabId,
    pub title: String,
    pub kind: ContentKind,
    pub state: TabState,
    pub is_dirty: bool,
    pub is_hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSnapshot {
    pub id: PaneId,
    pub active_tab_id: Option<TabId>,
    pub tabs: Vec<TabSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasSnapshot {
    pub split_mode: SplitMode,
    pub active_group: PaneId,
    pub layout: LayoutState,
    pub is_mission_control_open: bool,
    pub groups: Vec<GroupSnapshot>,
    pub closed_tab_count: usize,
}

impl CanvasSnapshot {
    pub fn group(&self, pane: PaneId) -> Option<&GroupSnapshot> {
        self.groups.iter().find(|g| g.id == pane)
    }
}

impl Canvas {
    pub fn snapshot(&self) -> CanvasSnapshot {
        let groups = PaneId::ALL
            .into_iter()
            .map(|pane| {
                let group = self.group(pane);
                GroupSnapshot {
                    id: pane,
                    active_tab_id: group.active_tab_id(),
                    tabs: group
                        .tabs()
                        .iter()
                        .map(|tab| TabSnapshot {
                            id: tab.id,
                            title: tab.title.clone(),
                            kind: tab.content.kind.clone(),
                            state: tab.state,
                            is_dirty: tab.is_dirty,
                            is_hidden: tab.is_hidden,
                        })
                        .collect(),
                }
            })
            .collect();

        CanvasSnapshot {
            split_mode: self.split_mode(),
            active_group: self.active_group,
            layout: self.layout.clone(),
            is_mission_control_open: self.mission_control_open,
            groups,
            closed_tab_count: self.closed_tabs.len(),
        }
    }
}
