use serde::{Deserialize, Serialize};

use crate::core::dedupe::TimelineEntry;
use crate::core::frame::RenderFrame;
use crate::error::{TimelineError, TimelineResult};

/// Projected trend-line segment in pixel coordinates.
///
/// `fill_is_positive` is the regime of the frame the segment leaves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendSegment {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub fill_is_positive: bool,
}

/// Pixel geometry of the timeline track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendGeometry {
    pub column_width: f64,
    pub track_height: f64,
}

impl TrendGeometry {
    pub fn new(column_width: f64, track_height: f64) -> TimelineResult<Self> {
        if !column_width.is_finite() || column_width <= 0.0 {
            return Err(TimelineError::InvalidConfig(
                "column width must be finite and > 0".to_owned(),
            ));
        }
        if !track_height.is_finite() || track_height <= 0.0 {
            return Err(TimelineError::InvalidConfig(
                "track height must be finite and > 0".to_owned(),
            ));
        }
        Ok(Self {
            column_width,
            track_height,
        })
    }

    #[must_use]
    pub fn column_x(self, column: usize) -> f64 {
        column as f64 * self.column_width
    }

    #[must_use]
    pub fn box_height(self, visible_count: usize) -> f64 {
        self.track_height / visible_count.max(1) as f64
    }
}

/// Vertical position of a frame's line anchor.
///
/// Positive anchors attach to the top edge of their box, negative anchors to
/// the bottom edge.
#[must_use]
pub fn anchor_y(frame: &RenderFrame, geometry: TrendGeometry) -> f64 {
    let box_height = geometry.box_height(frame.visible_count());
    let index = frame.line_anchor.box_index as f64;
    if frame.line_anchor.is_positive {
        index * box_height
    } else {
        (index + 1.0) * box_height
    }
}

/// Projects contiguous kept frames into trend segments.
///
/// Every adjacent pair yields one segment and the last frame gets a
/// terminating segment one column wide.
#[must_use]
pub fn project_trend(frames: &[RenderFrame], geometry: TrendGeometry) -> Vec<TrendSegment> {
    let entries: Vec<TimelineEntry> = frames.iter().cloned().map(TimelineEntry::Frame).collect();
    project_entries(&entries, geometry)
}

/// Projects kept timeline entries into trend segments.
///
/// Gaps take no column but end the current run: the frame before a gap is
/// terminated at its column's right edge and no segment bridges the gap.
#[must_use]
pub fn project_entries(entries: &[TimelineEntry], geometry: TrendGeometry) -> Vec<TrendSegment> {
    let mut segments = Vec::with_capacity(entries.len());
    let mut previous: Option<(f64, f64, bool)> = None;
    let mut column = 0usize;

    for entry in entries {
        match entry {
            TimelineEntry::Frame(frame) => {
                let x = geometry.column_x(column);
                let y = anchor_y(frame, geometry);
                if let Some((x0, y0, fill_is_positive)) = previous {
                    segments.push(TrendSegment {
                        x0,
                        y0,
                        x1: x,
                        y1: y,
                        fill_is_positive,
                    });
                }
                previous = Some((x, y, frame.regime_is_positive));
                column += 1;
            }
            TimelineEntry::Gap => {
                if let Some(last) = previous.take() {
                    segments.push(terminating_segment(last, geometry));
                }
            }
        }
    }

    if let Some(last) = previous {
        segments.push(terminating_segment(last, geometry));
    }
    segments
}

fn terminating_segment(
    (x, y, fill_is_positive): (f64, f64, bool),
    geometry: TrendGeometry,
) -> TrendSegment {
    TrendSegment {
        x0: x,
        y0: y,
        x1: x + geometry.column_width,
        y1: y,
        fill_is_positive,
    }
}

/// Closed fill polygon under a segment.
///
/// Positive fills reach the top of the track (y = 0), negative fills the
/// bottom (y = `track_height`). Points run clockwise from the segment start.
#[must_use]
pub fn fill_polygon(segment: TrendSegment, track_height: f64) -> [(f64, f64); 4] {
    let edge = if segment.fill_is_positive {
        0.0
    } else {
        track_height
    };
    [
        (segment.x0, segment.y0),
        (segment.x1, segment.y1),
        (segment.x1, edge),
        (segment.x0, edge),
    ]
}
