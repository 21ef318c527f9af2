//! Typed messages crossing the canvas boundary.
//!
//! Inbound: collaborators (file tree, git views, terminal manager, chat) send
//! [`InboundEvent`]s through an [`InboundSender`] without holding a reference
//! to the canvas. [`crate::lifecycle::TabLifecycle::pump`] drains them.
//!
//! Outbound: the canvas publishes [`CanvasNotification`]s to every receiver
//! obtained from [`crate::canvas::Canvas::subscribe`].

use crate::layout::PaneId;
use crate::tab::{ContentKind, DUPLICATE_CHECK_KEY, TabContent, TabId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::sync::mpsc;

/// Request to open content on the canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentOpenRequest {
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub title: String,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    /// Focus an existing tab with the same dedupe key instead of opening a new one
    #[serde(default)]
    pub check_duplicate: bool,
    /// Dedupe key; stored into the content metadata when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duplicate_check_key: Option<String>,
    /// With `check_duplicate`, overwrite the matched tab's content
    #[serde(default)]
    pub replace_existing: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_group: Option<PaneId>,
    /// Split vertically first when the canvas has a single pane
    #[serde(default)]
    pub enable_split_view: bool,
}

impl ContentOpenRequest {
    pub fn new(content: TabContent) -> Self {
        Self {
            kind: content.kind,
            title: content.title,
            data: content.data,
            metadata: content.metadata,
            check_duplicate: false,
            duplicate_check_key: None,
            replace_existing: false,
            target_group: None,
            enable_split_view: false,
        }
    }

    /// Enable duplicate detection on `key`
    pub fn dedupe(mut self, key: impl Into<String>) -> Self {
        self.check_duplicate = true;
        self.duplicate_check_key = Some(key.into());
        self
    }

    /// Split the content payload off the request
    pub fn content(&self) -> TabContent {
        let mut metadata = self.metadata.clone();
        if let Some(key) = &self.duplicate_check_key {
            metadata.insert(DUPLICATE_CHECK_KEY.to_string(), Value::String(key.clone()));
        }
        TabContent {
            kind: self.kind.clone(),
            title: self.title.clone(),
            data: self.data.clone(),
            metadata,
        }
    }
}

/// Event sent to the canvas by an outside collaborator
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    OpenContent(Box<ContentOpenRequest>),
    /// The owner of a persistent session tore it down
    CloseSession { session_id: String },
}

/// Event published by the canvas
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CanvasNotification {
    /// A tab entered a pane (new, reopened or dropped); the host may reveal the canvas
    TabInserted { tab_id: TabId, group: PaneId },
    /// A tab left the canvas for good
    TabDestroyed {
        tab_id: TabId,
        kind: ContentKind,
        metadata: Map<String, Value>,
    },
}

/// Cloneable handle for sending inbound events
#[derive(Debug, Clone)]
pub struct InboundSender {
    tx: mpsc::UnboundedSender<InboundEvent>,
}

impl InboundSender {
    pub(crate) fn new(tx: mpsc::UnboundedSender<InboundEvent>) -> Self {
        Self { tx }
    }

    /// Queue an open request. Returns false once the canvas is gone.
    pub fn open(&self, request: ContentOpenRequest) -> bool {
        self.tx
            .send(InboundEvent::OpenContent(Box::new(request)))
            .is_ok()
    }

    /// Queue a session teardown. Returns false once the canvas is gone.
    pub fn close_session(&self, session_id: impl Into<String>) -> bool {
        self.tx
            .send(InboundEvent::CloseSession {
                session_id: session_id.into(),
            })
            .is_ok()
    }
}

/// Drain every queued message without blocking
pub(crate) fn drain<T>(rx: &mut mpsc::UnboundedReceiver<T>) -> Vec<T> {
    let mut messages = Vec::new();
    while let Ok(msg) = rx.try_recv() {
        messages.push(msg);
    }
    messages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_request_parses_camel_case() {
        let json = r#"{
            "type": "file",
            "title": "main.rs",
            "data": "/repo/main.rs",
            "checkDuplicate": true,
            "duplicateCheckKey": "/repo/main.rs",
            "targetGroup": "secondary",
            "enableSplitView": true
        }"#;
        let request: ContentOpenRequest = serde_json::from_str(json).unwrap();
        assert!(request.check_duplicate);
        assert!(!request.replace_existing);
        assert_eq!(request.target_group, Some(PaneId::Secondary));
        let content = request.content();
        assert_eq!(content.duplicate_key(), Some("/repo/main.rs"));
        assert_eq!(content.kind, ContentKind::File);
    }

    #[test]
    fn notification_serializes_with_tag() {
        let n = CanvasNotification::TabInserted {
            tab_id: 3,
            group: PaneId::Primary,
        };
        let json = serde_json::to_value(&n).unwrap();
        assert_eq!(json["event"], "tab_inserted");
        assert_eq!(json["group"], "primary");
    }

    #[test]
    fn sender_reports_closed_receiver() {
        let (tx, rx) = mpsc::unbounded_channel();
        let sender = InboundSender::new(tx);
        assert!(sender.close_session("s-1"));
        drop(rx);
        assert!(!sender.close_session("s-2"));
    }
}
