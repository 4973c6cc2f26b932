use serde::{Deserialize, Serialize};

use crate::core::{BoxSizeTable, DEFAULT_MAX_HISTORY_FRAMES, Viewport, VisibilityFilter, Window};

/// What happens to ticks that arrive for a pair with no history yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum UnknownPairPolicy {
    Drop,
    /// Keep up to `capacity` ticks per pair and replay them once history
    /// arrives. The oldest tick is discarded on overflow.
    Buffer { capacity: usize },
}

impl Default for UnknownPairPolicy {
    fn default() -> Self {
        Self::Buffer { capacity: 64 }
    }
}

/// Public engine bootstrap configuration.
///
/// Serializable so host applications can persist and reload timeline setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub box_size_table: BoxSizeTable,
    #[serde(default)]
    pub window: Window,
    #[serde(default)]
    pub visibility_filter: VisibilityFilter,
    #[serde(default = "default_max_history_frames")]
    pub max_history_frames: usize,
    #[serde(default = "default_show_trend_line")]
    pub show_trend_line: bool,
    #[serde(default = "default_column_width_px")]
    pub column_width_px: f64,
    #[serde(default)]
    pub unknown_pair_policy: UnknownPairPolicy,
}

impl TimelineConfig {
    /// Creates a config with the default size table and window.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            box_size_table: BoxSizeTable::default(),
            window: Window::default(),
            visibility_filter: VisibilityFilter::default(),
            max_history_frames: default_max_history_frames(),
            show_trend_line: default_show_trend_line(),
            column_width_px: default_column_width_px(),
            unknown_pair_policy: UnknownPairPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_box_size_table(mut self, table: BoxSizeTable) -> Self {
        self.box_size_table = table;
        self
    }

    #[must_use]
    pub fn with_window(mut self, window: Window) -> Self {
        self.window = window;
        self
    }

    #[must_use]
    pub fn with_visibility_filter(mut self, filter: VisibilityFilter) -> Self {
        self.visibility_filter = filter;
        self
    }

    #[must_use]
    pub fn with_max_history_frames(mut self, max_history_frames: usize) -> Self {
        self.max_history_frames = max_history_frames;
        self
    }

    #[must_use]
    pub fn with_show_trend_line(mut self, show_trend_line: bool) -> Self {
        self.show_trend_line = show_trend_line;
        self
    }

    #[must_use]
    pub fn with_column_width_px(mut self, column_width_px: f64) -> Self {
        self.column_width_px = column_width_px;
        self
    }

    #[must_use]
    pub fn with_unknown_pair_policy(mut self, policy: UnknownPairPolicy) -> Self {
        self.unknown_pair_policy = policy;
        self
    }
}

fn default_max_history_frames() -> usize {
    DEFAULT_MAX_HISTORY_FRAMES
}

fn default_show_trend_line() -> bool {
    true
}

fn default_column_width_px() -> f64 {
    12.0
}
