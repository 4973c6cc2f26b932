use indexmap::IndexMap;
use tracing::debug;

use crate::core::{
    BoxSizeTable, FrameSpec, SliceHistory, TrendGeometry, Viewport, VisibilityFilter, Window,
};
use crate::error::TimelineResult;
use crate::render::Renderer;

use super::frame_cache::{FrameCacheKey, FrameCacheStats, PairFrameCache};
use super::tick_buffer::TickBuffer;
use super::validation::{
    resolve_trend_geometry, validate_config, validate_max_history_frames, validate_viewport,
    validate_window,
};
use super::TimelineConfig;

/// Per-pair state: the raw history owned by the tick adapter plus the
/// derived frames for the current window/filter.
#[derive(Debug)]
pub(super) struct PairState {
    pub(super) history: SliceHistory,
    pub(super) cache: Option<PairFrameCache>,
}

impl PairState {
    pub(super) fn new(history: SliceHistory) -> Self {
        Self {
            history,
            cache: None,
        }
    }
}

/// Main orchestration facade consumed by host applications.
///
/// `TimelineEngine` owns per-pair slice histories, merges live ticks into
/// them, derives deduplicated frames and trend geometry, and hands finished
/// scenes to the renderer.
pub struct TimelineEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: TimelineConfig,
    pub(super) geometry: TrendGeometry,
    pub(super) pairs: IndexMap<String, PairState>,
    pub(super) pending_ticks: TickBuffer,
    pub(super) table_generation: u64,
}

impl<R: Renderer> TimelineEngine<R> {
    pub fn new(renderer: R, config: TimelineConfig) -> TimelineResult<Self> {
        validate_config(&config)?;
        let geometry = resolve_trend_geometry(config.viewport, config.column_width_px)?;
        debug!(
            window_offset = config.window.offset,
            window_count = config.window.count,
            filter = ?config.visibility_filter,
            max_history_frames = config.max_history_frames,
            "timeline engine created"
        );

        Ok(Self {
            renderer,
            config,
            geometry,
            pairs: IndexMap::new(),
            pending_ticks: TickBuffer::default(),
            table_generation: 0,
        })
    }

    #[must_use]
    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    #[must_use]
    pub fn window(&self) -> Window {
        self.config.window
    }

    #[must_use]
    pub fn visibility_filter(&self) -> VisibilityFilter {
        self.config.visibility_filter
    }

    #[must_use]
    pub fn trend_geometry(&self) -> TrendGeometry {
        self.geometry
    }

    #[must_use]
    pub fn show_trend_line(&self) -> bool {
        self.config.show_trend_line
    }

    /// Moves the visible magnitude window. Invalidates every pair's frames.
    pub fn set_window(&mut self, window: Window) -> TimelineResult<()> {
        validate_window(window)?;
        if window != self.config.window {
            debug!(offset = window.offset, count = window.count, "set window");
            self.config.window = window;
            self.invalidate_frames();
        }
        Ok(())
    }

    pub fn set_visibility_filter(&mut self, filter: VisibilityFilter) {
        if filter != self.config.visibility_filter {
            debug!(?filter, "set visibility filter");
            self.config.visibility_filter = filter;
            self.invalidate_frames();
        }
    }

    pub fn set_box_size_table(&mut self, table: BoxSizeTable) {
        if table != self.config.box_size_table {
            debug!(entries = table.sizes().len(), "set box size table");
            self.config.box_size_table = table;
            self.table_generation += 1;
            self.invalidate_frames();
        }
    }

    pub fn set_show_trend_line(&mut self, show_trend_line: bool) {
        self.config.show_trend_line = show_trend_line;
    }

    pub fn set_viewport(&mut self, viewport: Viewport) -> TimelineResult<()> {
        validate_viewport(viewport)?;
        self.geometry = resolve_trend_geometry(viewport, self.config.column_width_px)?;
        self.config.viewport = viewport;
        Ok(())
    }

    pub fn set_column_width_px(&mut self, column_width_px: f64) -> TimelineResult<()> {
        self.geometry = resolve_trend_geometry(self.config.viewport, column_width_px)?;
        self.config.column_width_px = column_width_px;
        Ok(())
    }

    /// Changes the history cap and evicts existing histories to fit.
    pub fn set_max_history_frames(&mut self, max_history_frames: usize) -> TimelineResult<()> {
        validate_max_history_frames(max_history_frames)?;
        self.config.max_history_frames = max_history_frames;
        for (pair, state) in &mut self.pairs {
            let evicted = state.history.set_max_frames(max_history_frames)?;
            if evicted > 0 {
                debug!(pair = %pair, evicted, "history trimmed to new cap");
            }
        }
        Ok(())
    }

    pub fn pairs(&self) -> impl Iterator<Item = &str> {
        self.pairs.keys().map(String::as_str)
    }

    #[must_use]
    pub fn history(&self, pair: &str) -> Option<&SliceHistory> {
        self.pairs.get(pair).map(|state| &state.history)
    }

    #[must_use]
    pub fn pending_tick_count(&self, pair: &str) -> usize {
        self.pending_ticks.pending_len(pair)
    }

    #[must_use]
    pub fn frame_cache_stats(&self, pair: &str) -> Option<FrameCacheStats> {
        self.pairs
            .get(pair)
            .and_then(|state| state.cache.as_ref())
            .map(PairFrameCache::stats)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    pub(super) fn frame_cache_key(&self) -> FrameCacheKey {
        FrameCacheKey {
            window: self.config.window,
            filter: self.config.visibility_filter,
            table_generation: self.table_generation,
        }
    }

    /// Brings `pair`'s frame cache up to date and returns it.
    pub(super) fn synced_cache(&mut self, pair: &str) -> Option<&PairFrameCache> {
        let key = self.frame_cache_key();
        let spec = FrameSpec::new(
            self.config.window,
            self.config.visibility_filter,
            &self.config.box_size_table,
        );
        let state = self.pairs.get_mut(pair)?;

        if state.cache.as_ref().is_none_or(|cache| cache.key() != key) {
            state.cache = Some(PairFrameCache::new(key));
        }
        let cache = state.cache.as_mut()?;
        cache.sync(&state.history, spec);
        Some(&*cache)
    }

    fn invalidate_frames(&mut self) {
        for state in self.pairs.values_mut() {
            state.cache = None;
        }
        debug!(pairs = self.pairs.len(), "frame caches invalidated");
    }
}
