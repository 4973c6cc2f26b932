use std::time::Duration;

use crate::core::BoxSlice;

/// Maps elapsed time onto a looping demo pattern of `len` slices.
///
/// Returns `None` when the pattern is empty or `step` is zero.
#[must_use]
pub fn demo_slice_index(elapsed: Duration, step: Duration, len: usize) -> Option<usize> {
    if len == 0 || step.is_zero() {
        return None;
    }
    let ticks = elapsed.as_nanos() / step.as_nanos();
    usize::try_from(ticks % len as u128).ok()
}

#[must_use]
pub fn demo_slice(pattern: &[BoxSlice], elapsed: Duration, step: Duration) -> Option<&BoxSlice> {
    demo_slice_index(elapsed, step, pattern.len()).and_then(|index| pattern.get(index))
}
