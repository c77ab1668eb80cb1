use fps_core::{Interval, Timestamp};
use serde::{Deserialize, Serialize};

/// One vertex of the step-encoded frame-time line.
///
/// Each interval yields two points at the same height, so a plain
/// line renderer draws a horizontal segment per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlotPoint {
    pub x: Timestamp,
    /// Frame duration in milliseconds.
    pub y: u64,
}

/// Per-bucket figures used for chart labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BucketSummary {
    /// Midpoint of the bucket's first start and last end.
    pub representative_time:   f64,
    pub average_frame_time_ms: f64,
}

impl BucketSummary {
    /// `1000 / average_frame_time_ms`, `None` when every frame was zero-length.
    #[must_use]
    pub fn frames_per_second(&self) -> Option<f64> {
        if self.average_frame_time_ms > 0.0 {
            Some(1000.0 / self.average_frame_time_ms)
        } else {
            None
        }
    }
}

/// Read-only queries the presentation layer is allowed to make.
///
/// All results are owned snapshots.
pub trait FrameTimeSource {
    /// Every retained interval, oldest first.
    fn all_intervals(&self) -> Vec<Interval>;

    /// One summary per closed bucket, oldest first.
    fn per_bucket_summary(&self) -> Vec<BucketSummary>;

    /// Step-encoded plot points, two per interval.
    fn as_plot_points(&self) -> Vec<PlotPoint> {
        plot_points(&self.all_intervals())
    }
}

pub fn plot_points(intervals: &[Interval]) -> Vec<PlotPoint> {
    intervals
        .iter()
        .flat_map(|iv| {
            let y = iv.duration();
            [
                PlotPoint { x: iv.start_time, y },
                PlotPoint { x: iv.end_time, y },
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_interval_becomes_a_flat_step() {
        let points = plot_points(&[Interval::new(0, 16), Interval::new(16, 40)]);
        assert_eq!(
            points,
            vec![
                PlotPoint { x: 0, y: 16 },
                PlotPoint { x: 16, y: 16 },
                PlotPoint { x: 16, y: 24 },
                PlotPoint { x: 40, y: 24 },
            ]
        );
    }

    #[test]
    fn zero_average_has_no_rate() {
        let s = BucketSummary { representative_time: 5.0, average_frame_time_ms: 0.0 };
        assert_eq!(s.frames_per_second(), None);
        let s = BucketSummary { representative_time: 5.0, average_frame_time_ms: 20.0 };
        assert_eq!(s.frames_per_second(), Some(50.0));
    }
}
