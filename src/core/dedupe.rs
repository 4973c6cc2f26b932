use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::frame::{FrameSpec, RenderFrame};
use crate::core::{BoxSlice, PriceBox};

/// Comparable key of a frame's ordered, quantized values.
///
/// Compared numerically rather than as a formatted string so distinct values
/// never collide through formatting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FrameSignature(SmallVec<[OrderedFloat<f64>; 16]>);

impl FrameSignature {
    #[must_use]
    pub fn from_boxes(boxes: &[PriceBox]) -> Self {
        Self(boxes.iter().map(|b| OrderedFloat(b.value)).collect())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.0.iter().map(|value| value.into_inner()).collect()
    }
}

/// One kept position on the timeline.
///
/// A `Gap` stands for a slice whose window resolved to zero boxes: it draws
/// nothing and breaks the trend line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TimelineEntry {
    Frame(RenderFrame),
    Gap,
}

impl TimelineEntry {
    #[must_use]
    pub fn from_frame(frame: Option<RenderFrame>) -> Self {
        frame.map_or(Self::Gap, Self::Frame)
    }

    #[must_use]
    pub fn frame(&self) -> Option<&RenderFrame> {
        match self {
            Self::Frame(frame) => Some(frame),
            Self::Gap => None,
        }
    }

    #[must_use]
    pub fn signature(&self) -> FrameSignature {
        match self {
            Self::Frame(frame) => FrameSignature::from_boxes(&frame.ordered_boxes),
            Self::Gap => FrameSignature::default(),
        }
    }
}

/// Indices of the items to keep: the first one, then every item whose
/// signature differs from the last kept signature.
#[must_use]
pub fn kept_indices<'a>(signatures: impl IntoIterator<Item = &'a FrameSignature>) -> Vec<usize> {
    let mut kept = Vec::new();
    let mut last_kept: Option<&FrameSignature> = None;
    for (index, signature) in signatures.into_iter().enumerate() {
        if last_kept != Some(signature) {
            kept.push(index);
            last_kept = Some(signature);
        }
    }
    kept
}

/// Drops slices that look identical to the previously kept one under `spec`.
///
/// Deterministic and idempotent for a fixed `spec`. The result depends on
/// the window and filter, so it must be recomputed whenever either changes.
#[must_use]
pub fn dedupe(slices: &[BoxSlice], spec: FrameSpec<'_>) -> Vec<BoxSlice> {
    let signatures: Vec<FrameSignature> = slices
        .iter()
        .map(|slice| FrameSignature::from_boxes(&spec.visible_boxes(&slice.boxes)))
        .collect();

    kept_indices(&signatures)
        .into_iter()
        .map(|index| slices[index].clone())
        .collect()
}

/// Collapses an index-aligned frame sequence into kept timeline entries.
#[must_use]
pub fn collapse_frames(frames: &[Option<RenderFrame>]) -> Vec<TimelineEntry> {
    let entries: Vec<TimelineEntry> = frames
        .iter()
        .cloned()
        .map(TimelineEntry::from_frame)
        .collect();
    let signatures: Vec<FrameSignature> = entries.iter().map(TimelineEntry::signature).collect();

    kept_indices(&signatures)
        .into_iter()
        .map(|index| entries[index].clone())
        .collect()
}
