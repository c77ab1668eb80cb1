use crate::{
    bucket::Bucket,
    source::{BucketSummary, FrameTimeSource},
};
use fps_config::{TimestampPolicy, WindowConfig};
use fps_core::{Interval, Timestamp};
use std::collections::VecDeque;
use tracing::{debug, trace, warn};

/// Retained frame history: closed buckets (oldest first) plus one open bucket.
///
/// Invariants:
/// - `current` always exists, possibly empty;
/// - every closed bucket holds at least one interval;
/// - closed buckets followed by `current` are in start-time order;
/// - `closed.len() <= config.max_retained_buckets` after every `add_frame`.
#[derive(Debug, Clone)]
pub struct FrameWindow {
    config:  WindowConfig,
    closed:  VecDeque<Bucket>,
    current: Bucket,
}

impl FrameWindow {
    pub fn new(config: WindowConfig) -> Self {
        Self {
            closed: VecDeque::with_capacity(config.max_retained_buckets.saturating_add(1)),
            current: Bucket::new(),
            config,
        }
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    /// Append a finished frame, sealing the open bucket once it is long enough.
    ///
    /// Out-of-order input is corrected per [`TimestampPolicy`] before it is
    /// stored.  Retention is enforced afterwards.
    pub fn add_frame(&mut self, interval: Interval) {
        let interval = self.normalise(interval);
        self.current.push(interval);

        let span_done = self.current.span() > self.config.bucket_duration_ms;
        let cap_done = self
            .config
            .max_frames_per_bucket
            .is_some_and(|cap| self.current.len() >= cap);

        if span_done || cap_done {
            self.seal_current();
        }

        self.prune_oldest(self.config.max_retained_buckets);
    }

    /// Evict the oldest closed buckets until at most `max_buckets` remain.
    pub fn prune_oldest(&mut self, max_buckets: usize) {
        while self.closed.len() > max_buckets {
            if let Some(evicted) = self.closed.pop_front() {
                trace!(frames = evicted.len(), "evicted oldest bucket");
            }
        }
    }

    /// Drop all history and start over with an empty open bucket.
    pub fn clear(&mut self) {
        self.closed.clear();
        self.current = Bucket::new();
        debug!("frame window cleared");
    }

    pub fn closed(&self) -> impl ExactSizeIterator<Item = &Bucket> + '_ {
        self.closed.iter()
    }

    pub fn closed_len(&self) -> usize {
        self.closed.len()
    }

    pub fn current(&self) -> &Bucket {
        &self.current
    }

    /// Total number of retained intervals.
    pub fn len(&self) -> usize {
        self.closed.iter().map(Bucket::len).sum::<usize>() + self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty() && self.closed.is_empty()
    }

    fn seal_current(&mut self) {
        let sealed = std::mem::take(&mut self.current);
        debug!(
            frames = sealed.len(),
            span_ms = sealed.span(),
            "bucket closed"
        );
        self.closed.push_back(sealed);
    }

    fn last_end(&self) -> Option<Timestamp> {
        self.current
            .last()
            .or_else(|| self.closed.back().and_then(Bucket::last))
            .map(|iv| iv.end_time)
    }

    /// Bring `interval` back in line with the ordering invariants.
    fn normalise(&self, interval: Interval) -> Interval {
        let floor = self.last_end().unwrap_or(interval.start_time);
        let start_time = interval.start_time.max(floor);
        let end_time = interval.end_time.max(start_time);
        let fixed = Interval { start_time, end_time };

        if fixed != interval {
            if self.config.timestamp_policy == TimestampPolicy::Strict {
                debug_assert!(
                    false,
                    "out-of-order frame interval {interval:?} (previous end {floor})"
                );
            }
            warn!(
                start = interval.start_time,
                end = interval.end_time,
                "out-of-order frame interval clamped"
            );
        }
        fixed
    }
}

impl Default for FrameWindow {
    fn default() -> Self {
        Self::new(WindowConfig::default())
    }
}

impl FrameTimeSource for FrameWindow {
    fn all_intervals(&self) -> Vec<Interval> {
        let mut all = Vec::with_capacity(self.len());
        for bucket in &self.closed {
            all.extend_from_slice(bucket.intervals());
        }
        all.extend_from_slice(self.current.intervals());
        all
    }

    fn per_bucket_summary(&self) -> Vec<BucketSummary> {
        self.closed.iter().filter_map(Bucket::summary).collect()
    }
}
