//! Bucketed, memory-bounded history of frame intervals.
//!
//! [`FrameWindow`] is the single-threaded aggregator.  [`SharedWindow`]
//! wraps it for use across tasks and hands out [`WindowReader`]s that only
//! expose the read-only [`FrameTimeSource`] queries.

pub mod bucket;
pub mod shared;
pub mod source;
pub mod window;

pub use bucket::Bucket;
pub use shared::{SharedWindow, WindowReader};
pub use source::{BucketSummary, FrameTimeSource, PlotPoint};
pub use window::FrameWindow;
