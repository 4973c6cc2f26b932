use serde::{Deserialize, Serialize};

use crate::core::{
    PriceBox, RenderFrame, TimelineEntry, TrendGeometry, TrendSegment, Viewport, fill_polygon,
    project_entries,
};
use crate::error::{TimelineError, TimelineResult};
use crate::render::{BoxCell, FillPolygon, Rect};

/// Everything a backend needs to draw one kept frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneColumn {
    pub x: f64,
    pub ordered_boxes: Vec<PriceBox>,
    pub regime_is_positive: bool,
    pub cells: Vec<BoxCell>,
}

/// Backend-agnostic scene for one timeline draw pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineScene {
    pub viewport: Viewport,
    pub columns: Vec<SceneColumn>,
    pub trend: Vec<TrendSegment>,
    pub fills: Vec<FillPolygon>,
}

impl TimelineScene {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            columns: Vec::new(),
            trend: Vec::new(),
            fills: Vec::new(),
        }
    }

    pub fn validate(&self) -> TimelineResult<()> {
        if !self.viewport.is_valid() {
            return Err(TimelineError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for column in &self.columns {
            if !column.x.is_finite() {
                return Err(TimelineError::InvalidData(
                    "column x must be finite".to_owned(),
                ));
            }
            for cell in &column.cells {
                cell.rect.validate()?;
            }
        }
        for segment in &self.trend {
            if ![segment.x0, segment.y0, segment.x1, segment.y1]
                .iter()
                .all(|v| v.is_finite())
            {
                return Err(TimelineError::InvalidData(
                    "trend segment coordinates must be finite".to_owned(),
                ));
            }
        }
        for fill in &self.fills {
            fill.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.trend.is_empty() && self.fills.is_empty()
    }
}

/// Lays out a frame's boxes as a flat, top-to-bottom stack of cells.
///
/// Cell `i` spans `[i * h, (i + 1) * h)` with `h = track_height / count`,
/// matching the anchor positions used by the trend line.
#[must_use]
pub fn layout_nested_boxes(frame: &RenderFrame, x: f64, geometry: TrendGeometry) -> Vec<BoxCell> {
    let box_height = geometry.box_height(frame.visible_count());
    frame
        .ordered_boxes
        .iter()
        .enumerate()
        .map(|(index, price_box)| BoxCell {
            price_box: *price_box,
            rect: Rect::new(
                x,
                index as f64 * box_height,
                geometry.column_width,
                box_height,
            ),
        })
        .collect()
}

/// Projects kept timeline entries into a drawable scene.
#[must_use]
pub fn build_scene(
    entries: &[TimelineEntry],
    viewport: Viewport,
    geometry: TrendGeometry,
    show_trend_line: bool,
) -> TimelineScene {
    let mut scene = TimelineScene::new(viewport);

    let frames = entries.iter().filter_map(TimelineEntry::frame);
    for (column, frame) in frames.enumerate() {
        let x = geometry.column_x(column);
        scene.columns.push(SceneColumn {
            x,
            ordered_boxes: frame.ordered_boxes.clone(),
            regime_is_positive: frame.regime_is_positive,
            cells: layout_nested_boxes(frame, x, geometry),
        });
    }

    if show_trend_line {
        scene.trend = project_entries(entries, geometry);
        scene.fills = scene
            .trend
            .iter()
            .map(|segment| FillPolygon {
                points: fill_polygon(*segment, geometry.track_height),
                is_positive: segment.fill_is_positive,
            })
            .collect();
    }

    scene
}
