use std::collections::VecDeque;

use crate::core::BoxSlice;
use crate::error::{TimelineError, TimelineResult};

pub const DEFAULT_MAX_HISTORY_FRAMES: usize = 1000;

/// Bounded, append-only slice history for one pair.
///
/// Slices are addressed by an absolute sequence number that survives
/// eviction, so derived data can stay aligned after the head is dropped.
/// Only the tail may change in place; each such change bumps
/// `tail_revision`.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceHistory {
    slices: VecDeque<BoxSlice>,
    max_frames: usize,
    first_seq: u64,
    tail_revision: u64,
}

impl SliceHistory {
    pub fn new(max_frames: usize) -> TimelineResult<Self> {
        validate_max_frames(max_frames)?;
        Ok(Self {
            slices: VecDeque::new(),
            max_frames,
            first_seq: 0,
            tail_revision: 0,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    #[must_use]
    pub fn max_frames(&self) -> usize {
        self.max_frames
    }

    /// Sequence number of the oldest retained slice.
    #[must_use]
    pub fn first_seq(&self) -> u64 {
        self.first_seq
    }

    /// Sequence number the next appended slice will receive.
    #[must_use]
    pub fn next_seq(&self) -> u64 {
        self.first_seq + self.slices.len() as u64
    }

    #[must_use]
    pub fn tail_revision(&self) -> u64 {
        self.tail_revision
    }

    #[must_use]
    pub fn last(&self) -> Option<&BoxSlice> {
        self.slices.back()
    }

    /// Slice at `position`, counted from the oldest retained slice.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&BoxSlice> {
        self.slices.get(position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BoxSlice> {
        self.slices.iter()
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<BoxSlice> {
        self.slices.iter().cloned().collect()
    }

    /// Retained slices from `seq` onward, as the deque's two contiguous parts.
    #[must_use]
    pub fn slices_from(&self, seq: u64) -> (&[BoxSlice], &[BoxSlice]) {
        let skip = usize::try_from(seq.saturating_sub(self.first_seq))
            .unwrap_or(usize::MAX)
            .min(self.slices.len());
        let (front, back) = self.slices.as_slices();
        if skip <= front.len() {
            (&front[skip..], back)
        } else {
            (&front[front.len()..], &back[skip - front.len()..])
        }
    }

    /// Appends a slice and evicts the oldest ones beyond the cap.
    ///
    /// Returns the number of evicted slices.
    pub fn push(&mut self, slice: BoxSlice) -> usize {
        self.slices.push_back(slice);
        self.tail_revision = self.tail_revision.wrapping_add(1);
        self.evict_overflow()
    }

    /// Mutates the tail in place. Returns `false` when the history is empty.
    pub fn mutate_tail(&mut self, mutate: impl FnOnce(&mut BoxSlice)) -> bool {
        let Some(tail) = self.slices.back_mut() else {
            return false;
        };
        mutate(tail);
        self.tail_revision = self.tail_revision.wrapping_add(1);
        true
    }

    /// Changes the cap, evicting immediately if needed.
    pub fn set_max_frames(&mut self, max_frames: usize) -> TimelineResult<usize> {
        validate_max_frames(max_frames)?;
        self.max_frames = max_frames;
        Ok(self.evict_overflow())
    }

    fn evict_overflow(&mut self) -> usize {
        let overflow = self.slices.len().saturating_sub(self.max_frames);
        if overflow > 0 {
            self.slices.drain(..overflow);
            self.first_seq += overflow as u64;
        }
        overflow
    }
}

fn validate_max_frames(max_frames: usize) -> TimelineResult<()> {
    if max_frames == 0 {
        return Err(TimelineError::InvalidConfig(
            "max history frames must be >= 1".to_owned(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slice(timestamp: &str) -> BoxSlice {
        BoxSlice::new(timestamp, Vec::new())
    }

    #[test]
    fn eviction_advances_first_sequence() {
        let mut history = SliceHistory::new(2).expect("history");
        assert_eq!(history.push(slice("1")), 0);
        assert_eq!(history.push(slice("2")), 0);
        assert_eq!(history.push(slice("3")), 1);

        assert_eq!(history.len(), 2);
        assert_eq!(history.first_seq(), 1);
        assert_eq!(history.next_seq(), 3);
        assert_eq!(history.last().map(|s| s.timestamp.as_str()), Some("3"));
    }

    #[test]
    fn slices_from_skips_older_sequences() {
        let mut history = SliceHistory::new(8).expect("history");
        for ts in ["1", "2", "3", "4"] {
            history.push(slice(ts));
        }
        let (front, back) = history.slices_from(2);
        let tail: Vec<&str> = front
            .iter()
            .chain(back)
            .map(|s| s.timestamp.as_str())
            .collect();
        assert_eq!(tail, ["3", "4"]);
    }

    #[test]
    fn mutate_tail_on_empty_history_is_noop() {
        let mut history = SliceHistory::new(4).expect("history");
        assert!(!history.mutate_tail(|s| s.timestamp.clear()));
        assert_eq!(history.tail_revision(), 0);
    }

    #[test]
    fn rejects_zero_cap() {
        assert!(SliceHistory::new(0).is_err());
    }
}
