use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{
    FrameSignature, FrameSpec, RenderFrame, SliceHistory, TimelineEntry, VisibilityFilter,
    Window, build_frames, kept_indices,
};

/// Identity of everything a cached frame depends on besides the slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(super) struct FrameCacheKey {
    pub(super) window: Window,
    pub(super) filter: VisibilityFilter,
    pub(super) table_generation: u64,
}

/// Frame-cache counters exposed for diagnostics and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrameCacheStats {
    pub cached_frames: usize,
    pub last_sync_recomputed: usize,
    pub total_recomputed: u64,
}

/// Derived frames for one pair, aligned to its history by sequence number.
///
/// A sync only rebuilds the tail and newly appended slices; evicted heads
/// are dropped without touching the rest.
#[derive(Debug)]
pub(super) struct PairFrameCache {
    key: FrameCacheKey,
    first_seq: u64,
    tail_revision: u64,
    frames: VecDeque<Option<RenderFrame>>,
    signatures: VecDeque<FrameSignature>,
    stats: FrameCacheStats,
}

impl PairFrameCache {
    pub(super) fn new(key: FrameCacheKey) -> Self {
        Self {
            key,
            first_seq: 0,
            tail_revision: 0,
            frames: VecDeque::new(),
            signatures: VecDeque::new(),
            stats: FrameCacheStats::default(),
        }
    }

    pub(super) fn key(&self) -> FrameCacheKey {
        self.key
    }

    pub(super) fn stats(&self) -> FrameCacheStats {
        self.stats
    }

    pub(super) fn sync(&mut self, history: &SliceHistory, spec: FrameSpec<'_>) {
        if history.first_seq() < self.first_seq {
            self.clear(history.first_seq());
        }

        let evicted = usize::try_from(history.first_seq() - self.first_seq)
            .unwrap_or(usize::MAX)
            .min(self.frames.len());
        self.frames.drain(..evicted);
        self.signatures.drain(..evicted);
        self.first_seq = history.first_seq();

        let cached_end = self.first_seq + self.frames.len() as u64;
        let recompute_from = if self.tail_revision != history.tail_revision() {
            cached_end.saturating_sub(1).max(self.first_seq)
        } else {
            cached_end
        };
        let keep = usize::try_from(recompute_from - self.first_seq).unwrap_or(usize::MAX);
        self.frames.truncate(keep);
        self.signatures.truncate(keep);

        let (front, back) = history.slices_from(recompute_from);
        let mut recomputed = 0usize;
        for part in [front, back] {
            for frame in build_frames(part, spec) {
                self.signatures.push_back(
                    frame
                        .as_ref()
                        .map(|f| FrameSignature::from_boxes(&f.ordered_boxes))
                        .unwrap_or_default(),
                );
                self.frames.push_back(frame);
                recomputed += 1;
            }
        }

        self.tail_revision = history.tail_revision();
        self.stats.cached_frames = self.frames.len();
        self.stats.last_sync_recomputed = recomputed;
        self.stats.total_recomputed += recomputed as u64;
        if recomputed > 0 {
            trace!(
                recomputed,
                cached = self.frames.len(),
                evicted,
                "frame cache synced"
            );
        }
    }

    /// Positions (relative to the oldest cached slice) that survive dedupe.
    pub(super) fn kept_positions(&self) -> Vec<usize> {
        kept_indices(&self.signatures)
    }

    pub(super) fn entries(&self) -> Vec<TimelineEntry> {
        self.kept_positions()
            .into_iter()
            .map(|position| TimelineEntry::from_frame(self.frames[position].clone()))
            .collect()
    }

    fn clear(&mut self, first_seq: u64) {
        self.first_seq = first_seq;
        self.frames.clear();
        self.signatures.clear();
    }
}
