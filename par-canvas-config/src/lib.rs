//! Configuration system for the par-canvas editor canvas.
//!
//! This crate provides configuration loading, saving, and default values
//! for the canvas engine and its host shell. It includes:
//!
//! - The [`Config`] struct with tab bar, layout and close-gate settings
//! - Keybinding entries consumed by `par-canvas-keybindings`
//! - YAML persistence with atomic writes
//! - Typed [`ConfigError`] variants for callers that want to match on failures

pub mod config;
pub mod defaults;
mod error;
mod types;

pub use config::Config;
pub use error::ConfigError;
pub use types::{AnchorPlacement, KeyBinding, LogLevel};
