use tracing::trace;

use crate::core::{BoxSlice, RenderFrame, TimelineEntry, TrendSegment, project_entries};
use crate::error::TimelineResult;
use crate::render::{Renderer, TimelineScene, build_scene};

use super::TimelineEngine;

impl<R: Renderer> TimelineEngine<R> {
    /// Kept timeline entries (frames and gaps) for `pair` under the current
    /// window and filter. Unknown pairs yield an empty timeline.
    pub fn timeline_entries(&mut self, pair: &str) -> Vec<TimelineEntry> {
        self.synced_cache(pair)
            .map(|cache| cache.entries())
            .unwrap_or_default()
    }

    /// Kept, non-empty frames in timeline order.
    pub fn kept_frames(&mut self, pair: &str) -> Vec<RenderFrame> {
        self.timeline_entries(pair)
            .into_iter()
            .filter_map(|entry| match entry {
                TimelineEntry::Frame(frame) => Some(frame),
                TimelineEntry::Gap => None,
            })
            .collect()
    }

    /// Raw slices that survive dedupe under the current window and filter.
    pub fn deduped_slices(&mut self, pair: &str) -> Vec<BoxSlice> {
        let Some(positions) = self.synced_cache(pair).map(|cache| cache.kept_positions()) else {
            return Vec::new();
        };
        let Some(history) = self.history(pair) else {
            return Vec::new();
        };

        positions
            .into_iter()
            .filter_map(|position| history.get(position).cloned())
            .collect()
    }

    /// Trend-line segments for `pair`, empty when the trend line is hidden.
    pub fn trend_segments(&mut self, pair: &str) -> Vec<TrendSegment> {
        if !self.config.show_trend_line {
            return Vec::new();
        }
        let entries = self.timeline_entries(pair);
        project_entries(&entries, self.geometry)
    }

    /// Projects `pair` into a drawable scene.
    pub fn build_scene(&mut self, pair: &str) -> TimelineScene {
        let entries = self.timeline_entries(pair);
        build_scene(
            &entries,
            self.config.viewport,
            self.geometry,
            self.config.show_trend_line,
        )
    }

    /// Builds `pair`'s scene and hands it to the renderer.
    pub fn render(&mut self, pair: &str) -> TimelineResult<()> {
        let scene = self.build_scene(pair);
        trace!(
            pair,
            columns = scene.columns.len(),
            segments = scene.trend.len(),
            "render timeline"
        );
        self.renderer.render(&scene)
    }
}
