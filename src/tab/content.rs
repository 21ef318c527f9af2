//! Opaque content payloads carried by canvas tabs.
//!
//! The engine reads only `title` and two metadata keys
//! ([`super::DUPLICATE_CHECK_KEY`], [`super::SESSION_ID_KEY`]). Everything
//! else belongs to the collaborator that renders the content.

use super::{DUPLICATE_CHECK_KEY, SESSION_ID_KEY};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Kind of content shown in a tab
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    File,
    Diff,
    /// Interactive session; closing the tab hides it instead of removing it
    Terminal,
    Markdown,
    Image,
    Webview,
    /// Collaborator-defined content type
    #[serde(untagged)]
    Custom(String),
}

impl ContentKind {
    /// Whether tabs of this kind survive an ordinary close (hidden, not removed)
    pub fn is_persistent_session(&self) -> bool {
        matches!(self, ContentKind::Terminal)
    }
}

/// Payload of a tab: `{type, title, data, metadata}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabContent {
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub title: String,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl TabContent {
    /// Content with empty data and metadata
    pub fn new(kind: ContentKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            data: Value::Null,
            metadata: Map::new(),
        }
    }

    /// File content titled by its file name and deduplicated by its path
    pub fn file(path: &str) -> Self {
        let title = path
            .rsplit(['/', '\\'])
            .find(|segment| !segment.is_empty())
            .unwrap_or(path);
        Self::new(ContentKind::File, title)
            .with_data(Value::String(path.to_string()))
            .with_duplicate_key(path)
    }

    /// Terminal content bound to a session identifier
    pub fn terminal(title: impl Into<String>, session_id: &str) -> Self {
        Self::new(ContentKind::Terminal, title).with_metadata(SESSION_ID_KEY, session_id)
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }

    pub fn with_metadata(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }

    pub fn with_duplicate_key(self, key: &str) -> Self {
        self.with_metadata(DUPLICATE_CHECK_KEY, key)
    }

    /// The dedupe key, if the content carries one
    pub fn duplicate_key(&self) -> Option<&str> {
        self.metadata.get(DUPLICATE_CHECK_KEY).and_then(Value::as_str)
    }

    /// The persistent-session identifier, if the content carries one
    pub fn session_id(&self) -> Option<&str> {
        self.metadata.get(SESSION_ID_KEY).and_then(Value::as_str)
    }
}

/// Normalise a path-like dedupe key: separators unified to `/`, repeated
/// separators collapsed, trailing separator dropped, case folded.
pub fn normalize_resource_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut last_was_sep = false;
    for ch in path.chars() {
        if ch == '/' || ch == '\\' {
            if !last_was_sep {
                out.push('/');
            }
            last_was_sep = true;
        } else {
            out.extend(ch.to_lowercase());
            last_was_sep = false;
        }
    }
    if out.len() > 1 && out.ends_with('/') {
        out.pop();
    }
    out
}
