use fps_core::Interval;
use fps_window::{FrameWindow, SharedWindow};

/// The mutation side of the aggregator, as seen by the sampler.
pub trait FrameSink {
    fn add_frame(&mut self, interval: Interval);
    fn clear(&mut self);
}

impl FrameSink for FrameWindow {
    fn add_frame(&mut self, interval: Interval) {
        FrameWindow::add_frame(self, interval);
    }

    fn clear(&mut self) {
        FrameWindow::clear(self);
    }
}

impl FrameSink for SharedWindow {
    fn add_frame(&mut self, interval: Interval) {
        SharedWindow::add_frame(self, interval);
    }

    fn clear(&mut self) {
        SharedWindow::clear(self);
    }
}

/// Collects intervals in a plain `Vec`; handy for tests.
impl FrameSink for Vec<Interval> {
    fn add_frame(&mut self, interval: Interval) {
        self.push(interval);
    }

    fn clear(&mut self) {
        Vec::clear(self);
    }
}
