use crate::source::BucketSummary;
use fps_core::Interval;

/// A contiguous run of intervals, appended in start-time order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bucket {
    intervals: Vec<Interval>,
}

impl Bucket {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, interval: Interval) {
        self.intervals.push(interval);
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn first(&self) -> Option<&Interval> {
        self.intervals.first()
    }

    pub fn last(&self) -> Option<&Interval> {
        self.intervals.last()
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// `last.end_time - first.start_time`, or 0 for an empty bucket.
    pub fn span(&self) -> u64 {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => last.end_time.saturating_sub(first.start_time),
            _ => 0,
        }
    }

    /// Mean frame duration in milliseconds.
    pub fn average_frame_time_ms(&self) -> Option<f64> {
        if self.intervals.is_empty() {
            return None;
        }
        let total: u64 = self.intervals.iter().map(Interval::duration).sum();
        Some(total as f64 / self.intervals.len() as f64)
    }

    /// Midpoint of the bucket's covered time range.
    pub fn representative_time(&self) -> Option<f64> {
        let first = self.first()?;
        let last = self.last()?;
        Some((first.start_time as f64 + last.end_time as f64) / 2.0)
    }

    pub fn summary(&self) -> Option<BucketSummary> {
        Some(BucketSummary {
            representative_time:   self.representative_time()?,
            average_frame_time_ms: self.average_frame_time_ms()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket(intervals: &[(u64, u64)]) -> Bucket {
        let mut b = Bucket::new();
        for &(s, e) in intervals {
            b.push(Interval::new(s, e));
        }
        b
    }

    #[test]
    fn empty_bucket_has_no_summary() {
        let b = Bucket::new();
        assert_eq!(b.span(), 0);
        assert!(b.summary().is_none());
    }

    #[test]
    fn span_uses_first_start_and_last_end() {
        assert_eq!(bucket(&[(100, 116), (116, 140), (140, 150)]).span(), 50);
    }

    #[test]
    fn summary_midpoint_and_mean() {
        let s = bucket(&[(0, 10), (10, 30), (30, 61)]).summary().unwrap();
        assert_eq!(s.representative_time, 30.5);
        assert!((s.average_frame_time_ms - 61.0 / 3.0).abs() < 1e-9);
    }
}
