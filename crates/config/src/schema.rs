use fps_core::{FpsError, Result};
use serde::{Deserialize, Serialize};

/// Root configuration structure parsed from `fpsmeter.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Bucketing and retention of frame samples.
    pub window: WindowConfig,
    /// Periodic chart redraw.
    pub redraw: RedrawConfig,
    /// Chart geometry and axis scaling.
    pub chart: ChartConfig,
    /// Simulated render loop used by the `fpsmeter` binary.
    pub demo: DemoConfig,
}

impl OverlayConfig {
    /// Reject values the overlay cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.redraw.interval_ms == 0 {
            return Err(invalid("redraw.interval_ms", "must be greater than zero"));
        }
        if self.chart.width == 0 {
            return Err(invalid("chart.width", "must be greater than zero"));
        }
        if self.chart.height == 0 {
            return Err(invalid("chart.height", "must be greater than zero"));
        }
        if self.chart.visible_ms == 0 {
            return Err(invalid("chart.visible_ms", "must be greater than zero"));
        }
        positive("chart.min_axis_fps", self.chart.min_axis_fps)?;
        positive("chart.axis_headroom", self.chart.axis_headroom)?;
        positive("demo.target_fps", self.demo.target_fps)?;
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> FpsError {
    FpsError::InvalidConfig {
        field,
        reason: reason.to_string(),
    }
}

fn positive(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, &format!("must be a positive number, got {value}")))
    }
}

/// How the window treats intervals that break ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimestampPolicy {
    /// Silently correct the interval so ordering holds (logged at `warn`).
    #[default]
    Clamp,
    /// `debug_assert!` on violation; release builds clamp.
    Strict,
}

/// Aggregation window settings.  Fixed once the window is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// A bucket closes once its span exceeds this many milliseconds.
    pub bucket_duration_ms: u64,
    /// Closed buckets kept before the oldest is evicted.
    pub max_retained_buckets: usize,
    /// Optional hard cap on intervals per bucket.
    pub max_frames_per_bucket: Option<usize>,
    pub timestamp_policy: TimestampPolicy,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            bucket_duration_ms:    1000,
            max_retained_buckets:  10,
            max_frames_per_bucket: None,
            timestamp_policy:      TimestampPolicy::Clamp,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedrawConfig {
    /// Redraw period in milliseconds.
    pub interval_ms: u64,
}

impl Default for RedrawConfig {
    fn default() -> Self {
        Self { interval_ms: 10 }
    }
}

/// Chart geometry and y-axis scaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Chart width in pixels.
    pub width: u32,
    /// Chart height in pixels.
    pub height: u32,
    /// Width of the scrolling time range, in milliseconds.
    pub visible_ms: u64,
    /// The y-axis never scales below this rate.
    pub min_axis_fps: f64,
    /// Multiplier applied to the highest plotted rate.
    pub axis_headroom: f64,
    /// Below this axis maximum the fixed 30/60/90/120 ticks are used.
    pub fine_ticks_below_fps: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width:                800,
            height:               120,
            visible_ms:           5_000,
            min_axis_fps:         70.0,
            axis_headroom:        1.1,
            fine_ticks_below_fps: 120.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Frame rate the simulated render loop aims for.
    pub target_fps: f64,
    /// How long the demo runs before printing its summary.
    pub run_seconds: u64,
    /// Pause the loop every N frames (0 = never).
    pub pause_every: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            target_fps:  60.0,
            run_seconds: 5,
            pause_every: 0,
        }
    }
}
