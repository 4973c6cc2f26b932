use std::collections::VecDeque;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::core::{Tick, TickOutcome};

use super::UnknownPairPolicy;

/// Ticks waiting for their pair's history to arrive, in arrival order.
#[derive(Debug, Default)]
pub(super) struct TickBuffer {
    pending: IndexMap<String, VecDeque<Tick>>,
}

impl TickBuffer {
    pub(super) fn offer(&mut self, tick: Tick, policy: UnknownPairPolicy) -> TickOutcome {
        match policy {
            UnknownPairPolicy::Drop => {
                warn!(pair = %tick.pair, "dropping tick for unknown pair");
                TickOutcome::Dropped
            }
            UnknownPairPolicy::Buffer { capacity } => {
                let queue = self.pending.entry(tick.pair.clone()).or_default();
                if queue.len() >= capacity {
                    if let Some(evicted) = queue.pop_front() {
                        warn!(
                            pair = %evicted.pair,
                            tick_time = evicted.timestamp,
                            capacity,
                            "unknown-pair buffer full; discarding oldest tick"
                        );
                    }
                }
                debug!(pair = %tick.pair, pending = queue.len() + 1, "buffering tick for unknown pair");
                queue.push_back(tick);
                TickOutcome::Buffered
            }
        }
    }

    pub(super) fn take(&mut self, pair: &str) -> VecDeque<Tick> {
        self.pending.shift_remove(pair).unwrap_or_default()
    }

    pub(super) fn pending_len(&self, pair: &str) -> usize {
        self.pending.get(pair).map_or(0, VecDeque::len)
    }
}
