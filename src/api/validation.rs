use crate::core::{TrendGeometry, Viewport, Window};
use crate::error::{TimelineError, TimelineResult};

use super::{TimelineConfig, UnknownPairPolicy};

pub(super) fn validate_config(config: &TimelineConfig) -> TimelineResult<()> {
    validate_viewport(config.viewport)?;
    validate_window(config.window)?;
    validate_max_history_frames(config.max_history_frames)?;
    validate_unknown_pair_policy(config.unknown_pair_policy)?;
    resolve_trend_geometry(config.viewport, config.column_width_px)?;
    Ok(())
}

pub(super) fn validate_viewport(viewport: Viewport) -> TimelineResult<()> {
    if !viewport.is_valid() {
        return Err(TimelineError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }
    Ok(())
}

pub(super) fn validate_window(window: Window) -> TimelineResult<()> {
    window.validate()
}

pub(super) fn validate_max_history_frames(max_history_frames: usize) -> TimelineResult<()> {
    if max_history_frames == 0 {
        return Err(TimelineError::InvalidConfig(
            "max history frames must be >= 1".to_owned(),
        ));
    }
    Ok(())
}

fn validate_unknown_pair_policy(policy: UnknownPairPolicy) -> TimelineResult<()> {
    match policy {
        UnknownPairPolicy::Buffer { capacity: 0 } => Err(TimelineError::InvalidConfig(
            "unknown-pair buffer capacity must be >= 1".to_owned(),
        )),
        UnknownPairPolicy::Buffer { .. } | UnknownPairPolicy::Drop => Ok(()),
    }
}

/// Track height follows the viewport height; columns have a fixed width.
pub(super) fn resolve_trend_geometry(
    viewport: Viewport,
    column_width_px: f64,
) -> TimelineResult<TrendGeometry> {
    TrendGeometry::new(column_width_px, f64::from(viewport.height))
}
