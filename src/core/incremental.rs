use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::core::history::SliceHistory;
use crate::core::{BoxSlice, CurrentOhlc, Tick};

/// How a tick or committed slice was merged into history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TickOutcome {
    /// The tail slice was updated in place; history length is unchanged.
    MutatedTail,
    /// A new slice was appended.
    Appended,
    /// The pair had no history yet and the tick was queued for later replay.
    Buffered,
    /// The input was discarded.
    Dropped,
    /// The input was older than the current tail.
    RejectedOutOfOrder,
}

/// Applies a live tick to the tail of `history`.
///
/// `derived` is the slice the upstream grid computation produced for this
/// tick, if any. A derived slice with the tail's timestamp and box count
/// refreshes the tail's box values in place; any other shape is appended.
/// Without a derived slice only the tail's current OHLC moves.
pub fn apply_tick(
    history: &mut SliceHistory,
    tick: &Tick,
    derived: Option<BoxSlice>,
) -> TickOutcome {
    if let Err(err) = tick.validate() {
        warn!(pair = %tick.pair, error = %err, "dropping invalid tick");
        return TickOutcome::Dropped;
    }

    let Some(tail) = history.last() else {
        warn!(pair = %tick.pair, "dropping tick without tail slice");
        return TickOutcome::Dropped;
    };

    if tail
        .current_ohlc
        .is_some_and(|ohlc| tick.timestamp < ohlc.last_tick_millis)
    {
        warn!(
            pair = %tick.pair,
            tick_time = tick.timestamp,
            "rejecting out-of-order tick"
        );
        return TickOutcome::RejectedOutOfOrder;
    }

    let derived = derived.filter(|slice| match slice.validate() {
        Ok(()) => true,
        Err(err) => {
            warn!(pair = %tick.pair, error = %err, "ignoring malformed derived slice");
            false
        }
    });

    match derived {
        None => {
            history.mutate_tail(|tail| absorb_tick(tail, tick));
            trace!(pair = %tick.pair, price = tick.price, "tick merged into tail ohlc");
            TickOutcome::MutatedTail
        }
        Some(slice) => commit_slice(history, slice, Some(tick)),
    }
}

/// Commits an upstream slice: same shape as the tail mutates it in place,
/// a new shape is appended, an older timestamp is rejected.
pub fn commit_slice(
    history: &mut SliceHistory,
    mut slice: BoxSlice,
    tick: Option<&Tick>,
) -> TickOutcome {
    let Some(tail) = history.last() else {
        if let Some(tick) = tick {
            slice.current_ohlc = Some(CurrentOhlc::from_tick(tick));
        }
        history.push(slice);
        return TickOutcome::Appended;
    };

    if tail.same_shape(&slice) {
        history.mutate_tail(|tail| {
            for (current, fresh) in tail.boxes.iter_mut().zip(&slice.boxes) {
                *current = *fresh;
            }
            match tick {
                Some(tick) => absorb_tick(tail, tick),
                None => {
                    if slice.current_ohlc.is_some() {
                        tail.current_ohlc = slice.current_ohlc;
                    }
                }
            }
        });
        trace!(timestamp = %slice.timestamp, "tail slice refreshed in place");
        return TickOutcome::MutatedTail;
    }

    if let (Some(tail_time), Some(slice_time)) = (tail.timestamp_millis(), slice.timestamp_millis())
    {
        if slice_time < tail_time {
            warn!(
                timestamp = %slice.timestamp,
                tail = %tail.timestamp,
                "rejecting out-of-order slice"
            );
            return TickOutcome::RejectedOutOfOrder;
        }
    }

    if let Some(tick) = tick {
        slice.current_ohlc = Some(CurrentOhlc::from_tick(tick));
    }
    let evicted = history.push(slice);
    trace!(
        history_len = history.len(),
        evicted,
        "slice appended to history"
    );
    TickOutcome::Appended
}

fn absorb_tick(slice: &mut BoxSlice, tick: &Tick) {
    match slice.current_ohlc.as_mut() {
        Some(ohlc) => ohlc.absorb(tick),
        None => slice.current_ohlc = Some(CurrentOhlc::from_tick(tick)),
    }
}
