use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::core::{BoxSlice, SliceHistory, Tick, TickOutcome, apply_tick, commit_slice};
use crate::error::TimelineResult;
use crate::render::Renderer;

use super::TimelineEngine;
use super::engine::PairState;

/// Result of loading a batch of slices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IngestReport {
    pub accepted: usize,
    pub skipped: usize,
}

impl<R: Renderer> TimelineEngine<R> {
    /// Replaces a pair's history with a bulk backfill.
    ///
    /// Malformed slices are logged and skipped; only the newest
    /// `max_history_frames` slices are retained. Ticks buffered while the pair
    /// was unknown are replayed afterwards in arrival order.
    pub fn set_history(&mut self, pair: &str, slices: Vec<BoxSlice>) -> TimelineResult<IngestReport> {
        let mut history = SliceHistory::new(self.config.max_history_frames)?;
        let mut report = IngestReport::default();
        for slice in slices {
            match slice.validate() {
                Ok(()) => {
                    history.push(slice);
                    report.accepted += 1;
                }
                Err(err) => {
                    warn!(pair, error = %err, "skipping malformed slice");
                    report.skipped += 1;
                }
            }
        }

        debug!(
            pair,
            accepted = report.accepted,
            skipped = report.skipped,
            history_len = history.len(),
            "set history"
        );
        self.pairs.insert(pair.to_owned(), PairState::new(history));
        self.replay_pending_ticks(pair);
        Ok(report)
    }

    /// Appends raw JSON slices to a pair's history.
    ///
    /// `json` must hold an array of slice objects. Items whose `boxes` field
    /// is missing or not an array, or that fail validation, are skipped.
    pub fn ingest_json(&mut self, pair: &str, json: &str) -> TimelineResult<IngestReport> {
        let mut report = IngestReport::default();
        let items = match serde_json::from_str::<Value>(json) {
            Ok(Value::Array(items)) => items,
            Ok(other) => {
                warn!(pair, kind = json_kind(&other), "slice batch is not an array");
                report.skipped += 1;
                return Ok(report);
            }
            Err(err) => {
                warn!(pair, error = %err, "slice batch is not valid json");
                report.skipped += 1;
                return Ok(report);
            }
        };

        let mut started = false;
        for item in items {
            match parse_slice(item) {
                Ok(slice) => {
                    let (outcome, created) = self.commit_slice_without_replay(pair, slice)?;
                    started |= created;
                    match outcome {
                        TickOutcome::Appended | TickOutcome::MutatedTail => report.accepted += 1,
                        _ => report.skipped += 1,
                    }
                }
                Err(reason) => {
                    warn!(pair, %reason, "skipping malformed slice");
                    report.skipped += 1;
                }
            }
        }

        debug!(
            pair,
            accepted = report.accepted,
            skipped = report.skipped,
            "ingested json slices"
        );
        // Buffered ticks belong to the newest slice of the batch.
        if started {
            self.replay_pending_ticks(pair);
        }
        Ok(report)
    }

    /// Commits one upstream slice for `pair`.
    ///
    /// A slice matching the tail's timestamp and box count refreshes the tail
    /// in place; any other shape is appended. The first slice for an unknown
    /// pair starts its history.
    pub fn append_slice(&mut self, pair: &str, slice: BoxSlice) -> TimelineResult<TickOutcome> {
        let (outcome, started) = self.commit_slice_without_replay(pair, slice)?;
        if started {
            self.replay_pending_ticks(pair);
        }
        Ok(outcome)
    }

    /// Applies a live tick, optionally with the slice upstream derived for it.
    ///
    /// For a pair without history, a valid derived slice starts the history;
    /// a bare tick follows `unknown_pair_policy`. Only the pair's last slice
    /// is ever touched, or a new one appended.
    pub fn apply_tick(&mut self, tick: Tick, derived: Option<BoxSlice>) -> TickOutcome {
        if !self.pairs.contains_key(&tick.pair) {
            return self.apply_tick_to_unknown_pair(tick, derived);
        }
        let Some(state) = self.pairs.get_mut(&tick.pair) else {
            return TickOutcome::Dropped;
        };

        let outcome = apply_tick(&mut state.history, &tick, derived);
        trace!(
            pair = %tick.pair,
            ?outcome,
            history_len = state.history.len(),
            "apply tick"
        );
        outcome
    }

    /// Releases everything held for `pair`. Returns `false` if nothing was held.
    pub fn drop_pair(&mut self, pair: &str) -> bool {
        let had_history = self.pairs.shift_remove(pair).is_some();
        let had_pending = !self.pending_ticks.take(pair).is_empty();
        if had_history || had_pending {
            debug!(pair, "pair dropped");
        }
        had_history || had_pending
    }

    /// A derived slice starts the pair's history; older buffered ticks are
    /// replayed onto it before the live tick is absorbed.
    fn apply_tick_to_unknown_pair(&mut self, tick: Tick, derived: Option<BoxSlice>) -> TickOutcome {
        if let Err(err) = tick.validate() {
            warn!(pair = %tick.pair, error = %err, "dropping invalid tick");
            return TickOutcome::Dropped;
        }

        let slice = match derived.map(|slice| slice.validate().map(|()| slice)) {
            Some(Ok(slice)) => slice,
            Some(Err(err)) => {
                warn!(pair = %tick.pair, error = %err, "ignoring malformed derived slice");
                return self
                    .pending_ticks
                    .offer(tick, self.config.unknown_pair_policy);
            }
            None => {
                return self
                    .pending_ticks
                    .offer(tick, self.config.unknown_pair_policy);
            }
        };

        let pair = tick.pair.clone();
        let history = match SliceHistory::new(self.config.max_history_frames) {
            Ok(history) => history,
            Err(err) => {
                warn!(pair = %pair, error = %err, "dropping derived slice");
                return TickOutcome::Dropped;
            }
        };
        self.pairs.insert(pair.clone(), PairState::new(history));
        let outcome = match self.pairs.get_mut(&pair) {
            Some(state) => commit_slice(&mut state.history, slice, None),
            None => TickOutcome::Dropped,
        };
        self.replay_pending_ticks(&pair);

        if let Some(state) = self.pairs.get_mut(&pair) {
            let absorbed = apply_tick(&mut state.history, &tick, None);
            debug!(
                pair = %pair,
                ?absorbed,
                history_len = state.history.len(),
                "history started from derived slice"
            );
        }
        outcome
    }

    /// Commits `slice`, creating the pair's history if needed. Returns the
    /// outcome and whether the history was created by this call.
    fn commit_slice_without_replay(
        &mut self,
        pair: &str,
        slice: BoxSlice,
    ) -> TimelineResult<(TickOutcome, bool)> {
        if let Err(err) = slice.validate() {
            warn!(pair, error = %err, "skipping malformed slice");
            return Ok((TickOutcome::Dropped, false));
        }

        let started = !self.pairs.contains_key(pair);
        if started {
            let history = SliceHistory::new(self.config.max_history_frames)?;
            self.pairs.insert(pair.to_owned(), PairState::new(history));
        }
        let outcome = match self.pairs.get_mut(pair) {
            Some(state) => commit_slice(&mut state.history, slice, None),
            None => TickOutcome::Dropped,
        };
        trace!(pair, ?outcome, "append slice");
        Ok((outcome, started))
    }

    fn replay_pending_ticks(&mut self, pair: &str) {
        let pending = self.pending_ticks.take(pair);
        if pending.is_empty() {
            return;
        }
        let Some(state) = self.pairs.get_mut(pair) else {
            return;
        };

        let replayed = pending.len();
        for tick in pending {
            apply_tick(&mut state.history, &tick, None);
        }
        debug!(pair, replayed, "replayed buffered ticks");
    }
}

fn parse_slice(item: Value) -> Result<BoxSlice, String> {
    match item.get("boxes") {
        Some(Value::Array(_)) => {}
        Some(other) => return Err(format!("`boxes` is {}, not an array", json_kind(other))),
        None => return Err("`boxes` is missing".to_owned()),
    }
    let slice: BoxSlice = serde_json::from_value(item).map_err(|err| err.to_string())?;
    slice.validate().map_err(|err| err.to_string())?;
    Ok(slice)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
