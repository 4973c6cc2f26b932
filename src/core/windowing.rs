use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::core::PriceBox;
use crate::error::{TimelineError, TimelineResult};

/// Contiguous magnitude-ordered sub-range of a slice's boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Window {
    pub offset: usize,
    pub count: usize,
}

impl Window {
    pub fn new(offset: usize, count: usize) -> TimelineResult<Self> {
        let window = Self { offset, count };
        window.validate()?;
        Ok(window)
    }

    pub fn validate(self) -> TimelineResult<()> {
        if self.count == 0 {
            return Err(TimelineError::InvalidConfig(
                "window count must be >= 1".to_owned(),
            ));
        }
        Ok(())
    }

    /// Resolves the window against `len` boxes.
    ///
    /// The offset is pulled back so that `count` boxes fit whenever the slice
    /// has at least `count` boxes; shorter slices yield every box.
    #[must_use]
    pub fn clamped_range(self, len: usize) -> Range<usize> {
        clamped_range(self.offset, self.count, len)
    }
}

impl Default for Window {
    fn default() -> Self {
        Self {
            offset: 0,
            count: 8,
        }
    }
}

/// Which box directions stay visible after ordering and snapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VisibilityFilter {
    #[default]
    All,
    PositiveOnly,
    NegativeOnly,
}

impl VisibilityFilter {
    #[must_use]
    pub fn admits(self, price_box: &PriceBox) -> bool {
        match self {
            Self::All => true,
            Self::PositiveOnly => price_box.is_positive(),
            Self::NegativeOnly => !price_box.is_positive(),
        }
    }

    /// Keeps admitted boxes, preserving their relative order.
    #[must_use]
    pub fn apply(self, boxes: Vec<PriceBox>) -> Vec<PriceBox> {
        match self {
            Self::All => boxes,
            _ => boxes.into_iter().filter(|b| self.admits(b)).collect(),
        }
    }
}

/// Returns the `count` boxes starting at the `offset`-th smallest magnitude.
///
/// Sorting is stable, so equal magnitudes keep their upstream order.
/// Out-of-range offsets are clamped instead of rejected.
#[must_use]
pub fn select_window(boxes: &[PriceBox], offset: isize, count: usize) -> Vec<PriceBox> {
    let offset = usize::try_from(offset).unwrap_or(0);
    select_window_at(boxes, Window { offset, count })
}

/// Same as [`select_window`] for an already non-negative window.
#[must_use]
pub fn select_window_at(boxes: &[PriceBox], window: Window) -> Vec<PriceBox> {
    let mut sorted = boxes.to_vec();
    sorted.sort_by(|left, right| left.magnitude().total_cmp(&right.magnitude()));

    let range = window.clamped_range(sorted.len());
    sorted.truncate(range.end);
    sorted.drain(..range.start);
    sorted
}

fn clamped_range(offset: usize, count: usize, len: usize) -> Range<usize> {
    let max_offset = len.saturating_sub(count);
    let start = offset.min(max_offset);
    let end = start.saturating_add(count).min(len);
    start..end
}
