//! Replay of scripted canvas sessions.
//!
//! A script is a YAML list of steps run against a fresh [`TabLifecycle`]:
//!
//! ```yaml
//! - open_preview: { path: /repo/src/main.rs }
//! - open: { type: terminal, title: zsh, metadata: { sessionId: t1 } }
//! - drop: { tab: main.rs, to: primary, position: right }
//! - key: { chord: "CmdOrCtrl+W" }
//! - confirm: true
//! - reopen
//! ```
//!
//! Tabs are referenced by title; the first tab with that title wins.

use crate::drop_zone::DropPosition;
use crate::events::ContentOpenRequest;
use crate::layout::PaneId;
use crate::lifecycle::{CloseRequest, OpenOutcome, TabLifecycle};
use crate::shortcuts::ShortcutDispatcher;
use crate::tab::{TabContent, TabId};
use anyhow::{Context, Result};
use par_canvas_config::Config;
use par_canvas_keybindings::{KeyInput, parse_key_combo};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Failure while running a script step
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("step {step}: no tab titled '{title}'")]
    UnknownTab { step: usize, title: String },
    #[error("step {step}: invalid chord '{chord}': {reason}")]
    BadChord {
        step: usize,
        chord: String,
        reason: String,
    },
}

fn default_true() -> bool {
    true
}

/// One scripted user or collaborator action
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Inbound content-open request
    Open(Box<ContentOpenRequest>),
    /// Single-click open of a file
    OpenPreview {
        path: String,
        #[serde(default)]
        target: Option<PaneId>,
    },
    /// Double-click open of a file
    OpenActive {
        path: String,
        #[serde(default)]
        target: Option<PaneId>,
    },
    Close {
        tab: String,
    },
    /// Answer a pending close confirmation
    Confirm(bool),
    Drop {
        tab: String,
        to: PaneId,
        position: DropPosition,
    },
    Reorder {
        tab: String,
        index: usize,
    },
    Key {
        chord: String,
        #[serde(default)]
        text_input_focused: bool,
    },
    Reopen,
    CloseSession(String),
    Edit {
        tab: String,
    },
    Dirty {
        tab: String,
        #[serde(default = "default_true")]
        dirty: bool,
    },
}

/// What a step did, for logging and tests
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    Opened(OpenOutcome),
    Close(CloseRequest),
    Applied(bool),
    /// Key chord not bound, or suppressed
    Ignored,
}

/// Parse a script from YAML text
pub fn parse_script(yaml: &str) -> Result<Vec<Step>> {
    serde_yaml_ng::from_str(yaml).context("Failed to parse replay script")
}

/// Load a script file
pub fn load_script(path: &Path) -> Result<Vec<Step>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read replay script {}", path.display()))?;
    parse_script(&text)
}

/// Runs steps against a lifecycle and dispatcher built from one config
pub struct Replayer {
    lifecycle: TabLifecycle,
    dispatcher: ShortcutDispatcher,
}

impl Replayer {
    pub fn new(config: &Config) -> Self {
        Self {
            lifecycle: TabLifecycle::new(config),
            dispatcher: ShortcutDispatcher::from_config(config),
        }
    }

    pub fn lifecycle(&self) -> &TabLifecycle {
        &self.lifecycle
    }

    pub fn into_lifecycle(self) -> TabLifecycle {
        self.lifecycle
    }

    /// Run every step in order, stopping at the first failure
    pub fn run(&mut self, steps: &[Step]) -> Result<Vec<StepOutcome>, ReplayError> {
        steps
            .iter()
            .enumerate()
            .map(|(i, step)| self.run_step(i + 1, step))
            .collect()
    }

    fn tab_by_title(&self, step: usize, title: &str) -> Result<TabId, ReplayError> {
        let canvas = self.lifecycle.canvas();
        PaneId::ALL
            .into_iter()
            .flat_map(|pane| canvas.group(pane).tabs())
            .find(|tab| tab.title == title)
            .map(|tab| tab.id)
            .ok_or_else(|| ReplayError::UnknownTab {
                step,
                title: title.to_string(),
            })
    }

    pub fn run_step(&mut self, index: usize, step: &Step) -> Result<StepOutcome, ReplayError> {
        log::debug!("Replay step {}: {:?}", index, step);
        let outcome = match step {
            Step::Open(request) => StepOutcome::Opened(self.lifecycle.open((**request).clone())),
            Step::OpenPreview { path, target } => {
                StepOutcome::Opened(self.lifecycle.open_preview(TabContent::file(path), *target))
            }
            Step::OpenActive { path, target } => {
                StepOutcome::Opened(self.lifecycle.open_active(TabContent::file(path), *target))
            }
            Step::Close { tab } => {
                let id = self.tab_by_title(index, tab)?;
                StepOutcome::Close(self.lifecycle.request_close(id))
            }
            Step::Confirm(confirmed) => StepOutcome::Close(self.lifecycle.resolve_close(*confirmed)),
            Step::Drop { tab, to, position } => {
                let id = self.tab_by_title(index, tab)?;
                let canvas = self.lifecycle.canvas_mut();
                let applied = match canvas.pane_of(id) {
                    Some(from) => canvas.handle_drop(id, from, *to, *position),
                    None => false,
                };
                StepOutcome::Applied(applied)
            }
            Step::Reorder { tab, index: new_index } => {
                let id = self.tab_by_title(index, tab)?;
                let canvas = self.lifecycle.canvas_mut();
                let applied = match canvas.pane_of(id) {
                    Some(pane) => canvas.reorder_tab(id, pane, *new_index),
                    None => false,
                };
                StepOutcome::Applied(applied)
            }
            Step::Key {
                chord,
                text_input_focused,
            } => {
                let combo = parse_key_combo(chord).map_err(|e| ReplayError::BadChord {
                    step: index,
                    chord: chord.clone(),
                    reason: e.to_string(),
                })?;
                let input = KeyInput::from_combo(&combo);
                match self.dispatcher.dispatch(&input, *text_input_focused) {
                    Some(action) => match self.lifecycle.apply(action) {
                        Some(request) => StepOutcome::Close(request),
                        None => StepOutcome::Applied(true),
                    },
                    None => StepOutcome::Ignored,
                }
            }
            Step::Reopen => {
                StepOutcome::Applied(self.lifecycle.canvas_mut().reopen_closed_tab().is_some())
            }
            Step::CloseSession(session_id) => {
                StepOutcome::Applied(self.lifecycle.close_session(session_id))
            }
            Step::Edit { tab } => {
                let id = self.tab_by_title(index, tab)?;
                StepOutcome::Applied(self.lifecycle.on_content_edit(id))
            }
            Step::Dirty { tab, dirty } => {
                let id = self.tab_by_title(index, tab)?;
                StepOutcome::Applied(self.lifecycle.canvas_mut().set_dirty(id, *dirty))
            }
        };
        Ok(outcome)
    }
}
