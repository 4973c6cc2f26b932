use crate::error::TimelineResult;
use crate::render::{Renderer, TimelineScene};

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates the scene so tests catch invalid geometry before a real
/// backend sees it.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_column_count: usize,
    pub last_segment_count: usize,
    pub last_fill_count: usize,
    pub render_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, scene: &TimelineScene) -> TimelineResult<()> {
        scene.validate()?;
        self.last_column_count = scene.columns.len();
        self.last_segment_count = scene.trend.len();
        self.last_fill_count = scene.fills.len();
        self.render_count += 1;
        Ok(())
    }
}
