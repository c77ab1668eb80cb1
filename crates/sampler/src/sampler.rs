use crate::sink::FrameSink;
use fps_config::WindowConfig;
use fps_core::{Clock, Interval, Timestamp};
use fps_window::FrameWindow;
use tracing::{debug, trace};

/// Whether a frame is currently open, and when it started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SamplerState {
    pub in_frame: bool,
    /// `Some` exactly when `in_frame` is true.
    pub frame_start_time: Option<Timestamp>,
}

/// Turns a stream of "a new frame has begun" marks into intervals.
///
/// Each frame is reported when the next one begins, so the first mark of a
/// session produces nothing.
///
/// # Example
/// ```
/// use fps_core::ManualClock;
/// use fps_sampler::Sampler;
/// use fps_window::FrameTimeSource;
///
/// let clock = ManualClock::new(0);
/// let mut sampler = Sampler::with_window(clock.clone(), Default::default());
/// sampler.mark_new_frame();
/// clock.advance(16);
/// sampler.mark_new_frame();
/// assert_eq!(sampler.sink().all_intervals().len(), 1);
/// ```
#[derive(Debug)]
pub struct Sampler<C, S = FrameWindow> {
    clock: C,
    sink:  S,
    state: SamplerState,
}

impl<C: Clock> Sampler<C, FrameWindow> {
    /// Sampler feeding a freshly built, privately owned window.
    pub fn with_window(clock: C, config: WindowConfig) -> Self {
        Self::new(clock, FrameWindow::new(config))
    }
}

impl<C: Clock, S: FrameSink> Sampler<C, S> {
    pub fn new(clock: C, sink: S) -> Self {
        Self {
            clock,
            sink,
            state: SamplerState::default(),
        }
    }

    /// Close the open frame (if any) at the current time and open the next.
    pub fn mark_new_frame(&mut self) {
        let now = self.clock.now_ms();

        if let SamplerState {
            in_frame: true,
            frame_start_time: Some(start),
        } = self.state
        {
            let frame = Interval::new(start, now);
            trace!(start, end = now, "frame");
            self.sink.add_frame(frame);
        }

        self.state = SamplerState {
            in_frame:         true,
            frame_start_time: Some(now),
        };
    }

    /// Frame production paused.  The next mark starts a fresh frame instead
    /// of reporting one that spans the pause.
    pub fn mark_end_of_frames(&mut self) {
        if self.state.in_frame {
            debug!("frame sampling paused");
        }
        self.state = SamplerState::default();
    }

    /// Forget the open frame and discard all recorded data.
    pub fn reset(&mut self) {
        self.state = SamplerState::default();
        self.sink.clear();
        debug!("frame sampler reset");
    }

    /// Alias of [`Sampler::reset`].
    pub fn clear_frame_time_data(&mut self) {
        self.reset();
    }

    pub fn state(&self) -> SamplerState {
        self.state
    }

    pub fn is_in_frame(&self) -> bool {
        self.state.in_frame
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fps_core::ManualClock;
    use fps_window::{FrameTimeSource, SharedWindow};

    fn sampler() -> (ManualClock, Sampler<ManualClock, Vec<Interval>>) {
        let clock = ManualClock::new(1_000);
        (clock.clone(), Sampler::new(clock, Vec::new()))
    }

    #[test]
    fn first_mark_emits_nothing() {
        let (_, mut s) = sampler();
        s.mark_new_frame();
        assert!(s.sink().is_empty());
        assert_eq!(
            s.state(),
            SamplerState { in_frame: true, frame_start_time: Some(1_000) }
        );
    }

    #[test]
    fn n_marks_emit_n_minus_one_consecutive_intervals() {
        let (clock, mut s) = sampler();
        let times = [1_000, 1_016, 1_033, 1_050, 1_100, 1_101];
        for &t in &times {
            clock.set(t);
            s.mark_new_frame();
        }

        let expected: Vec<Interval> = times
            .windows(2)
            .map(|p| Interval::new(p[0], p[1]))
            .collect();
        assert_eq!(s.sink(), &expected);
    }

    #[test]
    fn pause_never_spans_the_gap() {
        let (clock, mut s) = sampler();
        s.mark_new_frame();
        clock.advance(16);
        s.mark_new_frame();
        s.mark_end_of_frames();
        assert_eq!(s.state(), SamplerState::default());

        clock.advance(5_000);
        s.mark_new_frame();
        clock.advance(17);
        s.mark_new_frame();

        assert_eq!(
            s.sink(),
            &vec![Interval::new(1_000, 1_016), Interval::new(6_016, 6_033)]
        );
    }

    #[test]
    fn end_of_frames_when_idle_is_harmless() {
        let (_, mut s) = sampler();
        s.mark_end_of_frames();
        s.mark_end_of_frames();
        assert!(!s.is_in_frame());
        assert!(s.sink().is_empty());
    }

    #[test]
    fn zero_length_frames_under_frozen_clock() {
        let (_, mut s) = sampler();
        for _ in 0..3 {
            s.mark_new_frame();
        }
        assert_eq!(s.sink(), &vec![Interval::new(1_000, 1_000); 2]);
    }

    #[test]
    fn reset_discards_window_data() {
        let clock = ManualClock::new(0);
        let mut s = Sampler::with_window(clock.clone(), WindowConfig::default());
        for _ in 0..40 {
            s.mark_new_frame();
            clock.advance(100);
        }
        assert!(s.sink().closed_len() > 0);

        s.reset();
        assert!(!s.is_in_frame());
        assert!(s.sink().all_intervals().is_empty());
        assert!(s.sink().current().is_empty());

        // Sampling restarts without a bogus interval.
        s.mark_new_frame();
        clock.advance(16);
        s.mark_new_frame();
        assert_eq!(s.sink().all_intervals(), vec![Interval::new(4_000, 4_016)]);
    }

    #[test]
    fn retention_is_enforced_while_sampling() {
        let clock = ManualClock::new(0);
        let mut s = Sampler::with_window(clock.clone(), WindowConfig::default());
        // 15 buckets of 11 frames each, plus the opening mark.
        for _ in 0..=(15 * 11) {
            s.mark_new_frame();
            clock.advance(100);
        }
        assert_eq!(s.sink().closed_len(), 10);
        assert_eq!(s.sink().per_bucket_summary().len(), 10);
    }

    #[test]
    fn feeds_a_shared_window() {
        let clock = ManualClock::new(0);
        let shared = SharedWindow::default();
        let reader = shared.reader();
        let mut s = Sampler::new(clock.clone(), shared);

        s.mark_new_frame();
        clock.advance(20);
        s.mark_new_frame();
        assert_eq!(reader.all_intervals(), vec![Interval::new(0, 20)]);

        s.clear_frame_time_data();
        assert!(reader.is_empty());
    }

    #[test]
    fn backwards_clock_is_clamped_by_window() {
        let clock = ManualClock::new(500);
        let mut s = Sampler::with_window(clock.clone(), WindowConfig::default());
        s.mark_new_frame();
        clock.set(480);
        s.mark_new_frame();
        assert_eq!(s.sink().all_intervals(), vec![Interval::new(500, 500)]);
    }
}
