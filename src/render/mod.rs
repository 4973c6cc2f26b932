mod null_renderer;
mod primitives;
mod scene;

pub use null_renderer::NullRenderer;
pub use primitives::{BoxCell, FillPolygon, Rect};
pub use scene::{SceneColumn, TimelineScene, build_scene, layout_nested_boxes};

use crate::error::TimelineResult;

/// Contract implemented by any drawing backend.
///
/// Backends receive a fully materialized, deterministic `TimelineScene`, so
/// pixel work, colors and DPI scaling stay out of the timeline engine.
pub trait Renderer {
    fn render(&mut self, scene: &TimelineScene) -> TimelineResult<()>;
}
