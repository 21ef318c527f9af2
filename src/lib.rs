// Library exports for the canvas engine, its policy layers and the replay CLI.
//
// The engine is single-threaded: one owner (the host's UI thread) mutates
// the `Canvas`, and every operation completes before the next one starts.
// Collaborators on other threads talk to it only through the tokio channels
// in `events`; `parking_lot::Mutex` is used solely by the debug log sink.

/// Application version (root crate version, for use by sub-crates).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod canvas;
pub mod cli;
pub mod close_confirmation;
pub mod debug;
pub mod drop_zone;
pub mod events;
pub mod layout;
pub mod lifecycle;
pub mod script;
pub mod shortcuts;
pub mod tab;
pub mod tab_bar_ui;

pub use canvas::{Canvas, CanvasSnapshot, CloseOutcome, EditorGroup};
pub use drop_zone::DropPosition;
pub use events::{CanvasNotification, ContentOpenRequest, InboundEvent, InboundSender};
pub use layout::{AnchorPosition, LayoutState, PaneId, SplitMode};
pub use lifecycle::{CloseRequest, OpenOutcome, TabLifecycle};
pub use shortcuts::{CanvasAction, ShortcutDispatcher};
pub use tab::{ContentKind, Tab, TabContent, TabId, TabState};
