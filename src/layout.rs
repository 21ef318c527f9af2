//! Layout model: split topology, split ratios, anchor zone, maximize flag.

use par_canvas_config::AnchorPlacement;
use serde::{Deserialize, Serialize};

pub const MIN_SPLIT_RATIO: f32 = 0.2;
pub const MAX_SPLIT_RATIO: f32 = 0.8;
pub const MIN_ANCHOR_SIZE: f32 = 100.0;
pub const MAX_ANCHOR_SIZE: f32 = 500.0;

/// One of the three fixed editor groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaneId {
    Primary,
    Secondary,
    Tertiary,
}

impl PaneId {
    /// All panes in priority order
    pub const ALL: [PaneId; 3] = [PaneId::Primary, PaneId::Secondary, PaneId::Tertiary];

    pub fn index(self) -> usize {
        match self {
            PaneId::Primary => 0,
            PaneId::Secondary => 1,
            PaneId::Tertiary => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PaneId::Primary => "primary",
            PaneId::Secondary => "secondary",
            PaneId::Tertiary => "tertiary",
        }
    }
}

impl std::fmt::Display for PaneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Arrangement of panes on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SplitMode {
    /// Single pane (primary only)
    #[default]
    None,
    /// Primary left, secondary right
    Horizontal,
    /// Primary top, secondary bottom
    Vertical,
    /// "T" layout: primary top-left, secondary top-right, tertiary bottom full width
    Grid,
}

impl SplitMode {
    /// Whether a pane can hold tabs under this topology
    pub fn is_addressable(self, pane: PaneId) -> bool {
        match self {
            SplitMode::None => pane == PaneId::Primary,
            SplitMode::Horizontal | SplitMode::Vertical => pane != PaneId::Tertiary,
            SplitMode::Grid => true,
        }
    }

    /// Number of addressable panes
    pub fn pane_count(self) -> usize {
        match self {
            SplitMode::None => 1,
            SplitMode::Horizontal | SplitMode::Vertical => 2,
            SplitMode::Grid => 3,
        }
    }

    pub fn is_two_pane(self) -> bool {
        matches!(self, SplitMode::Horizontal | SplitMode::Vertical)
    }
}

/// Where the auxiliary anchor zone sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnchorPosition {
    #[default]
    Bottom,
    Right,
    Hidden,
}

impl From<AnchorPlacement> for AnchorPosition {
    fn from(placement: AnchorPlacement) -> Self {
        match placement {
            AnchorPlacement::Bottom => AnchorPosition::Bottom,
            AnchorPlacement::Right => AnchorPosition::Right,
            AnchorPlacement::Hidden => AnchorPosition::Hidden,
        }
    }
}

/// Layout state of the canvas. Fields are private so the clamps always hold.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutState {
    split_mode: SplitMode,
    split_ratio: f32,
    split_ratio2: f32,
    anchor_position: AnchorPosition,
    anchor_size: f32,
    is_maximized: bool,
    /// Position restored when the anchor zone is toggled back on
    #[serde(skip)]
    restore_anchor: AnchorPosition,
}

impl Default for LayoutState {
    fn default() -> Self {
        Self::new(0.5, AnchorPosition::Bottom, 250.0)
    }
}

impl LayoutState {
    pub fn new(split_ratio: f32, anchor_position: AnchorPosition, anchor_size: f32) -> Self {
        let restore_anchor = match anchor_position {
            AnchorPosition::Hidden => AnchorPosition::Bottom,
            visible => visible,
        };
        Self {
            split_mode: SplitMode::None,
            split_ratio: clamp_ratio(split_ratio),
            split_ratio2: clamp_ratio(split_ratio),
            anchor_position,
            anchor_size: clamp_anchor_size(anchor_size),
            is_maximized: false,
            restore_anchor,
        }
    }

    /// Layout seeded from the user's configuration
    pub fn from_config(config: &par_canvas_config::Config) -> Self {
        Self::new(
            config.default_split_ratio,
            config.default_anchor_position.into(),
            config.default_anchor_size,
        )
    }

    pub fn split_mode(&self) -> SplitMode {
        self.split_mode
    }

    pub(crate) fn set_split_mode(&mut self, mode: SplitMode) {
        self.split_mode = mode;
    }

    pub fn split_ratio(&self) -> f32 {
        self.split_ratio
    }

    pub fn set_split_ratio(&mut self, ratio: f32) {
        self.split_ratio = clamp_ratio(ratio);
    }

    pub fn split_ratio2(&self) -> f32 {
        self.split_ratio2
    }

    pub fn set_split_ratio2(&mut self, ratio: f32) {
        self.split_ratio2 = clamp_ratio(ratio);
    }

    pub fn anchor_position(&self) -> AnchorPosition {
        self.anchor_position
    }

    pub fn set_anchor_position(&mut self, position: AnchorPosition) {
        if position != AnchorPosition::Hidden {
            self.restore_anchor = position;
        }
        self.anchor_position = position;
    }

    /// Hide the anchor zone, or bring it back where it was
    pub fn toggle_anchor(&mut self) {
        self.anchor_position = match self.anchor_position {
            AnchorPosition::Hidden => self.restore_anchor,
            _ => AnchorPosition::Hidden,
        };
    }

    pub fn anchor_size(&self) -> f32 {
        self.anchor_size
    }

    pub fn set_anchor_size(&mut self, size: f32) {
        self.anchor_size = clamp_anchor_size(size);
    }

    pub fn is_maximized(&self) -> bool {
        self.is_maximized
    }

    pub fn toggle_maximize(&mut self) {
        self.is_maximized = !self.is_maximized;
    }
}

fn clamp_ratio(ratio: f32) -> f32 {
    if ratio.is_nan() {
        return 0.5;
    }
    ratio.clamp(MIN_SPLIT_RATIO, MAX_SPLIT_RATIO)
}

fn clamp_anchor_size(size: f32) -> f32 {
    if size.is_nan() {
        return MIN_ANCHOR_SIZE;
    }
    size.clamp(MIN_ANCHOR_SIZE, MAX_ANCHOR_SIZE)
}
