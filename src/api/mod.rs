mod data_controller;
mod engine;
mod engine_config;
mod engine_snapshot;
mod frame_cache;
mod tick_buffer;
mod timeline_projection;
mod validation;

pub use data_controller::IngestReport;
pub use engine::TimelineEngine;
pub use engine_config::{TimelineConfig, UnknownPairPolicy};
pub use engine_snapshot::TimelineSnapshot;
pub use frame_cache::FrameCacheStats;
