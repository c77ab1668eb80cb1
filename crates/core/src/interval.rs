use serde::{Deserialize, Serialize};

/// Milliseconds from the overlay's clock source.
pub type Timestamp = u64;

/// One completed frame: the span between two consecutive new-frame marks.
///
/// `end_time >= start_time` is expected; zero-length frames are valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start_time: Timestamp,
    pub end_time:   Timestamp,
}

impl Interval {
    pub const fn new(start_time: Timestamp, end_time: Timestamp) -> Self {
        Self { start_time, end_time }
    }

    /// Frame duration in milliseconds (0 for a reversed pair).
    #[inline]
    #[must_use]
    pub fn duration(&self) -> u64 {
        self.end_time.saturating_sub(self.start_time)
    }

    /// `true` if the end does not precede the start.
    #[inline]
    pub fn is_well_formed(&self) -> bool {
        self.end_time >= self.start_time
    }

    /// Instantaneous frame rate, `None` for zero-length frames.
    #[must_use]
    pub fn frames_per_second(&self) -> Option<f64> {
        match self.duration() {
            0 => None,
            d => Some(1000.0 / d as f64),
        }
    }
}
