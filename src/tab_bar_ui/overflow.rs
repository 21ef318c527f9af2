//! Tab-bar overflow measurement.
//!
//! Decides how many of a pane's visible tabs fit in the tab bar and which
//! ones go to the overflow menu. This is a read-only projection of canvas
//! state, recomputed from scratch; the measured-width cache is advisory.

use crate::tab::TabId;
use lru::LruCache;
use par_canvas_config::Config;
use std::num::NonZeroUsize;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Measured widths remembered
const MEASURED_CACHE_CAPACITY: usize = 256;

/// Pixel metrics used for width estimation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TabWidthMetrics {
    pub min_width: f32,
    pub max_width: f32,
    pub wide_glyph_width: f32,
    pub narrow_glyph_width: f32,
    /// Padding, icon and close button around the title
    pub chrome_width: f32,
    pub overflow_button_width: f32,
    /// Keep the overflow button reachable even when nothing overflows
    pub always_show_picker: bool,
}

impl Default for TabWidthMetrics {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl TabWidthMetrics {
    pub fn from_config(config: &Config) -> Self {
        Self {
            min_width: config.tab_min_width,
            max_width: config.tab_max_width,
            wide_glyph_width: config.tab_wide_glyph_width,
            narrow_glyph_width: config.tab_narrow_glyph_width,
            chrome_width: config.tab_chrome_width,
            overflow_button_width: config.tab_overflow_button_width,
            always_show_picker: config.always_show_tab_picker,
        }
    }
}

/// Estimated rendered width of a tab titled `title`.
///
/// Each grapheme cluster counts as a wide glyph when it occupies two
/// terminal columns (CJK, most emoji), otherwise as a narrow one.
pub fn estimate_tab_width(title: &str, metrics: &TabWidthMetrics) -> f32 {
    let text: f32 = title
        .graphemes(true)
        .map(|g| {
            if g.width() >= 2 {
                metrics.wide_glyph_width
            } else {
                metrics.narrow_glyph_width
            }
        })
        .sum();
    (metrics.chrome_width + text).clamp(metrics.min_width, metrics.max_width)
}

/// Result of an overflow computation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverflowLayout {
    /// Number of leading tabs rendered in the bar
    pub visible_count: usize,
    /// Tabs listed in the overflow menu, in tab order
    pub overflow_ids: Vec<TabId>,
    pub show_overflow_button: bool,
}

/// Width estimator with a cache of widths measured after rendering
#[derive(Debug)]
pub struct TabOverflowMeasurer {
    metrics: TabWidthMetrics,
    measured: LruCache<(TabId, String), f32>,
}

impl Default for TabOverflowMeasurer {
    fn default() -> Self {
        Self::new(TabWidthMetrics::default())
    }
}

impl TabOverflowMeasurer {
    pub fn new(metrics: TabWidthMetrics) -> Self {
        let capacity = NonZeroUsize::new(MEASURED_CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN);
        Self {
            metrics,
            measured: LruCache::new(capacity),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(TabWidthMetrics::from_config(config))
    }

    pub fn metrics(&self) -> &TabWidthMetrics {
        &self.metrics
    }

    /// Remember the width a tab actually rendered at
    pub fn record_measured(&mut self, tab_id: TabId, title: &str, width: f32) {
        self.measured.put((tab_id, title.to_string()), width);
    }

    /// Measured width if known for this exact title, otherwise the estimate
    pub fn width_for(&mut self, tab_id: TabId, title: &str) -> f32 {
        match self.measured.get(&(tab_id, title.to_string())) {
            Some(width) => *width,
            None => estimate_tab_width(title, &self.metrics),
        }
    }

    /// Fit the longest prefix of `tabs` into `available_width` minus the
    /// actions area, keeping at least one tab visible. Room for the overflow
    /// button is reserved when tabs overflow or the picker must stay reachable.
    pub fn compute(
        &mut self,
        tabs: &[(TabId, &str)],
        available_width: f32,
        actions_width: f32,
    ) -> OverflowLayout {
        let always_show = self.metrics.always_show_picker;
        if tabs.is_empty() {
            return OverflowLayout {
                visible_count: 0,
                overflow_ids: Vec::new(),
                show_overflow_button: always_show,
            };
        }

        let widths: Vec<f32> = tabs
            .iter()
            .map(|(id, title)| self.width_for(*id, title))
            .collect();
        let budget = (available_width - actions_width).max(0.0);
        let total: f32 = widths.iter().sum();
        let overflows = total > budget;

        let limit = if overflows || always_show {
            (budget - self.metrics.overflow_button_width).max(0.0)
        } else {
            budget
        };

        let mut used = 0.0;
        let mut fitting = 0;
        for width in &widths {
            if used + width > limit {
                break;
            }
            used += width;
            fitting += 1;
        }
        let visible_count = fitting.max(1);

        OverflowLayout {
            visible_count,
            overflow_ids: tabs[visible_count..].iter().map(|(id, _)| *id).collect(),
            show_overflow_button: visible_count < tabs.len() || always_show,
        }
    }
}
