//! Presentation side of the overlay.
//!
//! [`ChartModel`] turns a read-only [`fps_window::FrameTimeSource`] into a
//! [`ChartFrame`]: pixel-space polyline, axis ticks and per-bucket labels.
//! Renderers consume frames; none of them can reach the window's mutation
//! interface.

pub mod model;
pub mod render;

pub use model::{AxisTick, BucketLabel, ChartFrame, ChartModel, ChartPoint};
pub use render::{ChartRenderer, JsonLinesRenderer, LogRenderer, SparklineRenderer};
