//! box-timeline: multi-resolution box-slice timeline engine.
//!
//! Turns a stream of box slices (historical backfill plus live ticks) into a
//! deduplicated, magnitude-windowed timeline of frames and a regime-aware
//! trend line. Drawing is delegated to a `render::Renderer` backend.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{TimelineConfig, TimelineEngine};
pub use error::{TimelineError, TimelineResult};
