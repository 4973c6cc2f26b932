pub mod dedupe;
pub mod demo;
pub mod frame;
pub mod history;
pub mod incremental;
pub mod ordering;
pub mod primitives;
pub mod regime;
pub mod size_table;
pub mod trend_line;
pub mod types;
pub mod windowing;

pub use dedupe::{FrameSignature, TimelineEntry, collapse_frames, dedupe, kept_indices};
pub use demo::{demo_slice, demo_slice_index};
pub use frame::{FrameSpec, LineAnchor, RenderFrame, build_frame, build_frames};
pub use history::{DEFAULT_MAX_HISTORY_FRAMES, SliceHistory};
pub use incremental::{TickOutcome, apply_tick, commit_slice};
pub use ordering::order_boxes;
pub use regime::{largest, regime_is_positive, smallest};
pub use size_table::{BoxSizeTable, default_box_sizes};
pub use trend_line::{
    TrendGeometry, TrendSegment, anchor_y, fill_polygon, project_entries, project_trend,
};
pub use types::{BoxSlice, CurrentOhlc, PriceBox, Tick, Viewport};
pub use windowing::{VisibilityFilter, Window, select_window, select_window_at};
