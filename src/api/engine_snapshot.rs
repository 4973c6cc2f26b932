use serde::{Deserialize, Serialize};

use crate::core::{TimelineEntry, TrendSegment, VisibilityFilter, Window, project_entries};
use crate::error::{TimelineError, TimelineResult};
use crate::render::Renderer;

use super::TimelineEngine;

/// Serializable deterministic per-pair state snapshot used by regression
/// tests and debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSnapshot {
    pub pair: String,
    pub window: Window,
    pub visibility_filter: VisibilityFilter,
    pub history_len: usize,
    pub first_seq: u64,
    pub entries: Vec<TimelineEntry>,
    pub trend: Vec<TrendSegment>,
}

impl<R: Renderer> TimelineEngine<R> {
    pub fn snapshot(&mut self, pair: &str) -> TimelineSnapshot {
        let entries = self.timeline_entries(pair);
        let trend = if self.config.show_trend_line {
            project_entries(&entries, self.geometry)
        } else {
            Vec::new()
        };
        let (history_len, first_seq) = self
            .history(pair)
            .map_or((0, 0), |history| (history.len(), history.first_seq()));

        TimelineSnapshot {
            pair: pair.to_owned(),
            window: self.config.window,
            visibility_filter: self.config.visibility_filter,
            history_len,
            first_seq,
            entries,
            trend,
        }
    }

    pub fn snapshot_json(&mut self, pair: &str) -> TimelineResult<String> {
        serde_json::to_string_pretty(&self.snapshot(pair))
            .map_err(|err| TimelineError::InvalidData(format!("snapshot serialization: {err}")))
    }
}
