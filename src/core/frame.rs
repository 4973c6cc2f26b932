use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::ordering::order_boxes;
use crate::core::regime::{largest, smallest};
use crate::core::windowing::select_window_at;
use crate::core::{BoxSizeTable, BoxSlice, PriceBox, VisibilityFilter, Window};

/// Position of the trend-line anchor inside a frame's ordered boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineAnchor {
    pub box_index: usize,
    pub is_positive: bool,
}

/// Derived, per-slice view of what a timeline column shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub timestamp: String,
    pub ordered_boxes: Vec<PriceBox>,
    pub regime_is_positive: bool,
    pub line_anchor: LineAnchor,
}

impl RenderFrame {
    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.ordered_boxes.len()
    }
}

/// Everything a slice-to-frame derivation depends on.
#[derive(Debug, Clone, Copy)]
pub struct FrameSpec<'a> {
    pub window: Window,
    pub filter: VisibilityFilter,
    pub table: &'a BoxSizeTable,
}

impl<'a> FrameSpec<'a> {
    #[must_use]
    pub fn new(window: Window, filter: VisibilityFilter, table: &'a BoxSizeTable) -> Self {
        Self {
            window,
            filter,
            table,
        }
    }

    /// Windowed, ordered, snapped and filtered boxes of one slice.
    #[must_use]
    pub fn visible_boxes(&self, boxes: &[PriceBox]) -> Vec<PriceBox> {
        let windowed = select_window_at(boxes, self.window);
        self.filter.apply(order_boxes(&windowed, self.table))
    }
}

/// Builds the frame for one slice, or `None` when nothing is visible.
#[must_use]
pub fn build_frame(slice: &BoxSlice, spec: FrameSpec<'_>) -> Option<RenderFrame> {
    let ordered_boxes = spec.visible_boxes(&slice.boxes);
    let (_, dominant) = largest(&ordered_boxes)?;
    let (anchor_index, anchor) = smallest(&ordered_boxes)?;

    Some(RenderFrame {
        timestamp: slice.timestamp.clone(),
        regime_is_positive: dominant.is_positive(),
        line_anchor: LineAnchor {
            box_index: anchor_index,
            is_positive: anchor.is_positive(),
        },
        ordered_boxes,
    })
}

/// Builds frames for a run of slices, index-aligned with the input.
#[must_use]
pub fn build_frames(slices: &[BoxSlice], spec: FrameSpec<'_>) -> Vec<Option<RenderFrame>> {
    #[cfg(feature = "parallel-projection")]
    {
        slices
            .par_iter()
            .map(|slice| build_frame(slice, spec))
            .collect()
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        slices.iter().map(|slice| build_frame(slice, spec)).collect()
    }
}
