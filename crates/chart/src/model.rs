use fps_config::ChartConfig;
use fps_core::Timestamp;
use fps_window::FrameTimeSource;
use serde::Serialize;

/// Pixels reserved on the right for the y-axis.
const AXIS_GUTTER_PX: u32 = 40;
/// Vertical position of the per-bucket labels.
const LABEL_Y_PX: f64 = 20.0;
/// Tick values used while the axis stays below `fine_ticks_below_fps`.
const FINE_TICKS: [f64; 4] = [30.0, 60.0, 90.0, 120.0];

/// One vertex of the frame-rate line, in chart pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub x:   f64,
    pub y:   f64,
    pub fps: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisTick {
    pub fps: f64,
    /// Pixel row of the tick.
    pub y: f64,
}

/// Average rate of one closed bucket, positioned at its midpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketLabel {
    pub x:    f64,
    pub y:    f64,
    pub fps:  Option<f64>,
    pub text: String,
}

/// Everything a renderer needs to draw one refresh of the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartFrame {
    pub width:  u32,
    pub height: u32,
    /// Oldest visible timestamp (left edge).
    pub x_min: Timestamp,
    /// `now` at build time (right edge of the plot area).
    pub x_max: Timestamp,
    pub axis_max_fps: f64,
    pub ticks:  Vec<AxisTick>,
    pub line:   Vec<ChartPoint>,
    pub labels: Vec<BucketLabel>,
}

impl ChartFrame {
    /// Rate of the newest closed bucket.
    pub fn latest_bucket_fps(&self) -> Option<f64> {
        self.labels.last().and_then(|l| l.fps)
    }
}

/// Scales frame-time data into chart space.
#[derive(Debug, Clone)]
pub struct ChartModel {
    config: ChartConfig,
}

impl ChartModel {
    pub fn new(config: ChartConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Build a frame from a snapshot of `source` taken now.
    ///
    /// Zero-length frames have no defined rate and are left out of the line.
    pub fn build(&self, source: &dyn FrameTimeSource, now: Timestamp) -> ChartFrame {
        let rates: Vec<(Timestamp, f64)> = source
            .as_plot_points()
            .into_iter()
            .filter(|p| p.y > 0)
            .map(|p| (p.x, 1000.0 / p.y as f64))
            .collect();

        let axis_max_fps = self.axis_max(rates.iter().map(|&(_, fps)| fps));
        let x_min = now.saturating_sub(self.config.visible_ms);
        let scale = Scale {
            x_min,
            visible_ms: self.config.visible_ms.max(1) as f64,
            plot_width: self.config.width.saturating_sub(AXIS_GUTTER_PX) as f64,
            height:     self.config.height as f64,
            axis_max_fps,
        };

        let line = rates
            .iter()
            .map(|&(t, fps)| ChartPoint {
                x: scale.x(t as f64),
                y: scale.y(fps),
                fps,
            })
            .collect();

        let labels = source
            .per_bucket_summary()
            .iter()
            .map(|summary| {
                let fps = summary.frames_per_second();
                BucketLabel {
                    x: scale.x(summary.representative_time),
                    y: LABEL_Y_PX,
                    fps,
                    text: match fps {
                        Some(fps) => format!("{fps:.2} FPS"),
                        None => "-- FPS".to_string(),
                    },
                }
            })
            .collect();

        let ticks = self
            .tick_values(axis_max_fps)
            .into_iter()
            .map(|fps| AxisTick { fps, y: scale.y(fps) })
            .collect();

        ChartFrame {
            width: self.config.width,
            height: self.config.height,
            x_min,
            x_max: now,
            axis_max_fps,
            ticks,
            line,
            labels,
        }
    }

    /// `max(min_axis_fps, headroom * highest rate)`.
    pub fn axis_max(&self, rates: impl IntoIterator<Item = f64>) -> f64 {
        let highest = rates.into_iter().fold(0.0_f64, f64::max);
        (self.config.axis_headroom * highest).max(self.config.min_axis_fps)
    }

    pub fn tick_values(&self, axis_max_fps: f64) -> Vec<f64> {
        if axis_max_fps < self.config.fine_ticks_below_fps {
            FINE_TICKS.to_vec()
        } else {
            (1..=3).map(|i| axis_max_fps * i as f64 / 3.0).collect()
        }
    }
}

struct Scale {
    x_min:        Timestamp,
    visible_ms:   f64,
    plot_width:   f64,
    height:       f64,
    axis_max_fps: f64,
}

impl Scale {
    fn x(&self, t: f64) -> f64 {
        (t - self.x_min as f64) / self.visible_ms * self.plot_width
    }

    fn y(&self, fps: f64) -> f64 {
        self.height - fps / self.axis_max_fps * self.height
    }
}
