use crate::{
    source::{BucketSummary, FrameTimeSource, PlotPoint},
    window::FrameWindow,
};
use fps_config::WindowConfig;
use fps_core::Interval;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A [`FrameWindow`] behind a mutex, for when the sampler and the redraw
/// task run on different threads.
///
/// Cloning shares the same window.  Only the owner of a `SharedWindow` can
/// mutate; presentation code gets a [`WindowReader`].
#[derive(Debug, Clone)]
pub struct SharedWindow {
    inner: Arc<Mutex<FrameWindow>>,
}

impl SharedWindow {
    pub fn new(config: WindowConfig) -> Self {
        Self::from_window(FrameWindow::new(config))
    }

    pub fn from_window(window: FrameWindow) -> Self {
        Self {
            inner: Arc::new(Mutex::new(window)),
        }
    }

    pub fn add_frame(&self, interval: Interval) {
        lock(&self.inner).add_frame(interval);
    }

    pub fn clear(&self) {
        lock(&self.inner).clear();
    }

    /// Run `f` against the window while holding the lock.
    pub fn with<R>(&self, f: impl FnOnce(&FrameWindow) -> R) -> R {
        f(&lock(&self.inner))
    }

    pub fn reader(&self) -> WindowReader {
        WindowReader {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Default for SharedWindow {
    fn default() -> Self {
        Self::new(WindowConfig::default())
    }
}

/// Read-only view of a [`SharedWindow`].
#[derive(Debug, Clone)]
pub struct WindowReader {
    inner: Arc<Mutex<FrameWindow>>,
}

impl WindowReader {
    pub fn closed_len(&self) -> usize {
        lock(&self.inner).closed_len()
    }

    pub fn len(&self) -> usize {
        lock(&self.inner).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.inner).is_empty()
    }
}

impl FrameTimeSource for WindowReader {
    fn all_intervals(&self) -> Vec<Interval> {
        lock(&self.inner).all_intervals()
    }

    fn per_bucket_summary(&self) -> Vec<BucketSummary> {
        lock(&self.inner).per_bucket_summary()
    }

    fn as_plot_points(&self) -> Vec<PlotPoint> {
        lock(&self.inner).as_plot_points()
    }
}

// The window holds plain values, so a panic mid-update cannot leave it in a
// state worse than "one frame missing".  Keep serving it.
fn lock(inner: &Mutex<FrameWindow>) -> MutexGuard<'_, FrameWindow> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reader_sees_writes_through_shared_handle() {
        let shared = SharedWindow::default();
        let reader = shared.reader();
        assert!(reader.is_empty());

        shared.add_frame(Interval::new(0, 16));
        shared.add_frame(Interval::new(16, 33));
        assert_eq!(reader.len(), 2);
        assert_eq!(reader.as_plot_points().len(), 4);

        shared.clear();
        assert!(reader.all_intervals().is_empty());
    }

    #[test]
    fn snapshot_does_not_track_later_writes() {
        let shared = SharedWindow::default();
        shared.add_frame(Interval::new(0, 16));
        let snapshot = shared.reader().all_intervals();
        shared.add_frame(Interval::new(16, 33));
        assert_eq!(snapshot.len(), 1);
    }

    #[test]
    fn poisoned_lock_is_recovered() {
        let shared = SharedWindow::default();
        shared.add_frame(Interval::new(0, 16));

        let poisoner = shared.clone();
        let _ = std::thread::spawn(move || {
            poisoner.with(|_| panic!("reader panicked"));
        })
        .join();

        let reader = shared.reader();
        assert_eq!(reader.all_intervals(), vec![Interval::new(0, 16)]);
        shared.add_frame(Interval::new(16, 33));
        assert_eq!(reader.len(), 2);
    }

    #[test]
    fn writer_and_reader_on_separate_threads() {
        let shared = SharedWindow::default();
        let reader = shared.reader();

        let writer = {
            let shared = shared.clone();
            std::thread::spawn(move || {
                for i in 0..500u64 {
                    shared.add_frame(Interval::new(i * 10, i * 10 + 10));
                }
            })
        };
        for _ in 0..50 {
            let snapshot = reader.all_intervals();
            assert!(snapshot.windows(2).all(|p| p[0].start_time <= p[1].start_time));
        }
        writer.join().unwrap();

        // 500 frames of 10 ms: 101 per bucket, so 4 sealed and 96 open.
        assert_eq!(reader.closed_len(), 4);
        assert_eq!(reader.len(), 500);
    }
}
