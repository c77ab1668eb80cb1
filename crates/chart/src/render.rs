use crate::model::ChartFrame;
use std::io::Write;
use tracing::{debug, warn};

/// Consumes chart frames on each redraw.
///
/// Rendering must not fail loudly: a broken renderer degrades to a stale or
/// blank chart, it never takes the host down.
pub trait ChartRenderer: Send {
    fn render(&mut self, frame: &ChartFrame);
}

impl<F> ChartRenderer for F
where
    F: FnMut(&ChartFrame) + Send,
{
    fn render(&mut self, frame: &ChartFrame) {
        self(frame)
    }
}

/// Reports each frame as a `tracing` event at `debug` level.
#[derive(Debug, Default)]
pub struct LogRenderer {
    refreshes: u64,
}

impl LogRenderer {
    pub fn refreshes(&self) -> u64 {
        self.refreshes
    }
}

impl ChartRenderer for LogRenderer {
    fn render(&mut self, frame: &ChartFrame) {
        self.refreshes += 1;
        debug!(
            refresh = self.refreshes,
            points = frame.line.len(),
            buckets = frame.labels.len(),
            axis_max_fps = frame.axis_max_fps,
            latest_fps = ?frame.latest_bucket_fps(),
            "chart refresh"
        );
    }
}

const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// One-line unicode sparkline of the most recent frame rates.
#[derive(Debug, Clone)]
pub struct SparklineRenderer {
    columns: usize,
    line:    String,
}

impl SparklineRenderer {
    pub fn new(columns: usize) -> Self {
        Self {
            columns,
            line: String::new(),
        }
    }

    pub fn last_line(&self) -> &str {
        &self.line
    }
}

impl ChartRenderer for SparklineRenderer {
    fn render(&mut self, frame: &ChartFrame) {
        // The line holds two points per frame; one is enough here.
        let rates: Vec<f64> = frame.line.iter().step_by(2).map(|p| p.fps).collect();
        let skip = rates.len().saturating_sub(self.columns);

        self.line = rates[skip..]
            .iter()
            .map(|fps| {
                let level = (fps / frame.axis_max_fps * BARS.len() as f64).floor();
                BARS[(level.max(0.0) as usize).min(BARS.len() - 1)]
            })
            .collect();
    }
}

/// Writes every frame as one JSON object per line.
#[derive(Debug)]
pub struct JsonLinesRenderer<W> {
    out:      W,
    failures: u64,
}

impl<W: Write + Send> JsonLinesRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, failures: 0 }
    }

    /// Number of frames that could not be written.
    pub fn failures(&self) -> u64 {
        self.failures
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_frame(&mut self, frame: &ChartFrame) -> std::io::Result<()> {
        serde_json::to_writer(&mut self.out, frame)?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }
}

impl<W: Write + Send> ChartRenderer for JsonLinesRenderer<W> {
    fn render(&mut self, frame: &ChartFrame) {
        if let Err(e) = self.write_frame(frame) {
            self.failures += 1;
            // First failure at warn, later ones at debug.
            if self.failures == 1 {
                warn!("Chart output failed: {e}");
            } else {
                debug!("Chart output failed: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ChartModel;
    use fps_config::ChartConfig;
    use fps_core::Interval;
    use fps_window::FrameWindow;

    fn frame_for(durations: &[u64]) -> ChartFrame {
        let mut w = FrameWindow::default();
        let mut t = 0;
        for &d in durations {
            w.add_frame(Interval::new(t, t + d));
            t += d;
        }
        ChartModel::new(ChartConfig::default()).build(&w, t)
    }

    #[test]
    fn sparkline_keeps_latest_columns() {
        // 10 ms = 100 FPS on a 110 FPS axis; 50 ms = 20 FPS lands on level 1.
        let frame = frame_for(&[50, 50, 10, 50, 10]);
        let mut spark = SparklineRenderer::new(3);
        spark.render(&frame);
        assert_eq!(spark.last_line(), "█▂█");
    }

    #[test]
    fn log_renderer_counts_refreshes() {
        let mut log = LogRenderer::default();
        log.render(&frame_for(&[]));
        log.render(&frame_for(&[16, 17]));

        // Usable behind the trait like any other renderer.
        let renderer: &mut dyn ChartRenderer = &mut log;
        renderer.render(&frame_for(&[16]));
        assert_eq!(log.refreshes(), 3);
    }

    #[test]
    fn sparkline_of_empty_frame_is_blank() {
        let mut spark = SparklineRenderer::new(10);
        spark.render(&frame_for(&[]));
        assert_eq!(spark.last_line(), "");
    }

    #[test]
    fn json_lines_one_object_per_frame() {
        let mut json = JsonLinesRenderer::new(Vec::new());
        json.render(&frame_for(&[16, 17]));
        json.render(&frame_for(&[16]));

        let out = String::from_utf8(json.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["line"].as_array().map(Vec::len), Some(4));
        assert_eq!(first["width"], 800);
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failures_are_counted_not_raised() {
        let mut json = JsonLinesRenderer::new(Broken);
        json.render(&frame_for(&[16]));
        json.render(&frame_for(&[16]));
        assert_eq!(json.failures(), 2);
    }

    #[test]
    fn closures_are_renderers() {
        let mut seen = 0;
        {
            let mut count = |_: &ChartFrame| seen += 1;
            ChartRenderer::render(&mut count, &frame_for(&[16]));
        }
        assert_eq!(seen, 1);
    }
}
