//! Core `Config` struct, persistence and validation.
//!
//! Covers:
//! - `load` / `save` (YAML file I/O with atomic write)
//! - XDG-compliant path helpers (`config_path`, `config_dir`)
//! - Merging new default keybindings into an existing user config
//! - `validate` for fields that cannot simply be clamped

use crate::error::ConfigError;
use crate::types::{AnchorPlacement, KeyBinding, LogLevel};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Canvas configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    // ========================================================================
    // Keybindings
    // ========================================================================
    /// Key chord to action bindings
    #[serde(default = "crate::defaults::keybindings")]
    pub keybindings: Vec<KeyBinding>,

    // ========================================================================
    // Tab bar measurement
    // ========================================================================
    /// Minimum width of a single tab in pixels
    #[serde(default = "crate::defaults::tab_min_width")]
    pub tab_min_width: f32,

    /// Maximum width of a single tab in pixels
    #[serde(default = "crate::defaults::tab_max_width")]
    pub tab_max_width: f32,

    /// Estimated advance of a double-width glyph in a tab title
    #[serde(default = "crate::defaults::tab_wide_glyph_width")]
    pub tab_wide_glyph_width: f32,

    /// Estimated advance of any other glyph in a tab title
    #[serde(default = "crate::defaults::tab_narrow_glyph_width")]
    pub tab_narrow_glyph_width: f32,

    /// Width of the non-title parts of a tab (icon, close button, padding)
    #[serde(default = "crate::defaults::tab_chrome_width")]
    pub tab_chrome_width: f32,

    /// Width reserved for the overflow menu button
    #[serde(default = "crate::defaults::tab_overflow_button_width")]
    pub tab_overflow_button_width: f32,

    /// Keep the overflow button visible even when every tab fits,
    /// so the global tab picker stays reachable
    #[serde(default = "crate::defaults::bool_true")]
    pub always_show_tab_picker: bool,

    // ========================================================================
    // Layout
    // ========================================================================
    /// Initial primary split ratio (clamped to 0.2..=0.8)
    #[serde(default = "crate::defaults::split_ratio")]
    pub default_split_ratio: f32,

    /// Initial anchor panel placement
    #[serde(default)]
    pub default_anchor_position: AnchorPlacement,

    /// Initial anchor panel size in pixels (clamped to 100..=500)
    #[serde(default = "crate::defaults::anchor_size")]
    pub default_anchor_size: f32,

    // ========================================================================
    // Close behaviour
    // ========================================================================
    /// Ask before closing tabs with unsaved changes
    #[serde(default = "crate::defaults::bool_true")]
    pub confirm_close_dirty: bool,

    // ========================================================================
    // Debug Logging
    // ========================================================================
    /// Level for the debug log file
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            keybindings: crate::defaults::keybindings(),
            tab_min_width: crate::defaults::tab_min_width(),
            tab_max_width: crate::defaults::tab_max_width(),
            tab_wide_glyph_width: crate::defaults::tab_wide_glyph_width(),
            tab_narrow_glyph_width: crate::defaults::tab_narrow_glyph_width(),
            tab_chrome_width: crate::defaults::tab_chrome_width(),
            tab_overflow_button_width: crate::defaults::tab_overflow_button_width(),
            always_show_tab_picker: true,
            default_split_ratio: crate::defaults::split_ratio(),
            default_anchor_position: AnchorPlacement::default(),
            default_anchor_size: crate::defaults::anchor_size(),
            confirm_close_dirty: true,
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default path, creating it if missing
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();
        log::info!("Config path: {:?}", config_path);

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            log::info!(
                "Config file not found, creating default at {:?}",
                config_path
            );
            let config = Self::default();
            if let Err(e) = config.save_to(&config_path) {
                log::error!("Failed to save default config: {}", e);
                return Err(e);
            }
            Ok(config)
        }
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        log::info!("Loading config from {:?}", path);

        let contents = fs::read_to_string(path).map_err(ConfigError::from)?;
        let mut config: Config = serde_yaml_ng::from_str(&contents).map_err(ConfigError::from)?;

        config.validate()?;

        // Merge in any new default keybindings that don't exist in user's config
        config.merge_default_keybindings();

        Ok(config)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::from)?;
        }

        let yaml = serde_yaml_ng::to_string(self).map_err(ConfigError::from)?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml).map_err(ConfigError::from)?;
        fs::rename(&temp_path, path).map_err(ConfigError::from)?;

        Ok(())
    }

    /// Get the configuration file path (using XDG convention)
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Get the configuration directory path (using XDG convention)
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir()
                .map(|dir| dir.join("par-canvas"))
                .unwrap_or_else(|| PathBuf::from("."))
        }
        #[cfg(not(target_os = "windows"))]
        {
            dirs::home_dir()
                .map(|home| home.join(".config").join("par-canvas"))
                .unwrap_or_else(|| PathBuf::from("."))
        }
    }

    /// Reject values that cannot be clamped into something meaningful.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tab_min_width > self.tab_max_width {
            return Err(ConfigError::Validation(format!(
                "tab_min_width ({}) is larger than tab_max_width ({})",
                self.tab_min_width, self.tab_max_width
            )));
        }
        if self.tab_wide_glyph_width <= 0.0 || self.tab_narrow_glyph_width <= 0.0 {
            return Err(ConfigError::Validation(
                "tab glyph widths must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Merge default keybindings into the user's config.
    /// Only adds keybindings for actions that don't already exist in the user's config.
    pub(crate) fn merge_default_keybindings(&mut self) {
        let existing_actions: std::collections::HashSet<String> = self
            .keybindings
            .iter()
            .map(|kb| kb.action.clone())
            .collect();

        let mut added_count = 0;
        for default_kb in crate::defaults::keybindings() {
            if !existing_actions.contains(&default_kb.action) {
                log::info!(
                    "Adding new default keybinding: {} -> {}",
                    default_kb.key,
                    default_kb.action
                );
                self.keybindings.push(default_kb);
                added_count += 1;
            }
        }

        if added_count > 0 {
            log::info!(
                "Merged {} new default keybinding(s) into user config",
                added_count
            );
        }
    }
}
