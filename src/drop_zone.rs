//! Drop-zone negotiation for tab drags.
//!
//! Decides which drop affordances are legal for the current topology and drag
//! source, and maps a pointer position over a pane to one of them.

use crate::layout::SplitMode;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Fraction of a pane's width/height used for each edge band
pub const EDGE_BAND: f32 = 0.25;

/// Where a dragged tab is released relative to the hovered pane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropPosition {
    Left,
    Right,
    Top,
    Bottom,
    Center,
}

impl DropPosition {
    fn zone(self) -> DropZones {
        match self {
            DropPosition::Left => DropZones::LEFT,
            DropPosition::Right => DropZones::RIGHT,
            DropPosition::Top => DropZones::TOP,
            DropPosition::Bottom => DropZones::BOTTOM,
            DropPosition::Center => DropZones::CENTER,
        }
    }
}

bitflags! {
    /// Set of drop positions
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DropZones: u8 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const TOP = 1 << 2;
        const BOTTOM = 1 << 3;
        const CENTER = 1 << 4;
    }
}

impl DropZones {
    pub fn allows(self, position: DropPosition) -> bool {
        self.contains(position.zone())
    }
}

/// Pixel bounds of a pane
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PaneBounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PaneBounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check if a point is inside these bounds
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }
}

/// Drop positions available while dragging out of a pane holding
/// `source_visible` visible tabs.
pub fn legal_drop_zones(mode: SplitMode, source_visible: usize) -> DropZones {
    match mode {
        // Splitting off the only tab would leave the other side empty
        SplitMode::None if source_visible <= 1 => DropZones::CENTER,
        SplitMode::None | SplitMode::Horizontal | SplitMode::Vertical => DropZones::all(),
        SplitMode::Grid => DropZones::CENTER,
    }
}

/// Which zone of `bounds` the point falls into. Edge bands take
/// [`EDGE_BAND`] of each dimension; where two bands overlap the nearer
/// edge wins. Points outside the bounds yield `None`.
pub fn zone_at(bounds: &PaneBounds, x: f32, y: f32) -> Option<DropPosition> {
    if !bounds.contains(x, y) || bounds.width <= 0.0 || bounds.height <= 0.0 {
        return None;
    }
    let rel_x = (x - bounds.x) / bounds.width;
    let rel_y = (y - bounds.y) / bounds.height;

    let candidates = [
        (rel_x, DropPosition::Left),
        (1.0 - rel_x, DropPosition::Right),
        (rel_y, DropPosition::Top),
        (1.0 - rel_y, DropPosition::Bottom),
    ];
    candidates
        .into_iter()
        .filter(|(distance, _)| *distance < EDGE_BAND)
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, position)| position)
        .or(Some(DropPosition::Center))
}

/// Settle a requested position against the legal set: the request itself if
/// legal, otherwise center when center is legal.
pub fn negotiate(legal: DropZones, requested: DropPosition) -> Option<DropPosition> {
    if legal.allows(requested) {
        Some(requested)
    } else if legal.allows(DropPosition::Center) {
        Some(DropPosition::Center)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_accepts_center_only() {
        let zones = legal_drop_zones(SplitMode::Grid, 5);
        assert_eq!(zones, DropZones::CENTER);
        assert_eq!(negotiate(zones, DropPosition::Left), Some(DropPosition::Center));
    }

    #[test]
    fn single_tab_source_cannot_split_single_pane() {
        assert_eq!(legal_drop_zones(SplitMode::None, 1), DropZones::CENTER);
        assert_eq!(legal_drop_zones(SplitMode::None, 2), DropZones::all());
        assert_eq!(legal_drop_zones(SplitMode::Horizontal, 1), DropZones::all());
    }

    #[test]
    fn zone_at_bands() {
        let bounds = PaneBounds::new(100.0, 0.0, 400.0, 200.0);
        assert_eq!(zone_at(&bounds, 110.0, 100.0), Some(DropPosition::Left));
        assert_eq!(zone_at(&bounds, 490.0, 100.0), Some(DropPosition::Right));
        assert_eq!(zone_at(&bounds, 300.0, 10.0), Some(DropPosition::Top));
        assert_eq!(zone_at(&bounds, 300.0, 190.0), Some(DropPosition::Bottom));
        assert_eq!(zone_at(&bounds, 300.0, 100.0), Some(DropPosition::Center));
        assert_eq!(zone_at(&bounds, 50.0, 100.0), None);
    }

    #[test]
    fn overlapping_bands_pick_nearest_edge() {
        let bounds = PaneBounds::new(0.0, 0.0, 100.0, 100.0);
        // 5% from the left, 20% from the top
        assert_eq!(zone_at(&bounds, 5.0, 20.0), Some(DropPosition::Left));
        assert_eq!(zone_at(&bounds, 20.0, 5.0), Some(DropPosition::Top));
    }
}
