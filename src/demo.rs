use anyhow::Result;
use fps_chart::{ChartFrame, ChartRenderer, LogRenderer, SparklineRenderer};
use fps_config::OverlayConfig;
use fps_core::SystemClock;
use fps_redraw::RedrawTimer;
use fps_sampler::Sampler;
use fps_window::{FrameTimeSource, SharedWindow};
use std::time::Duration;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{info, warn};

const SPARKLINE_COLUMNS: usize = 60;
/// Length of each simulated pause.
const PAUSE: Duration = Duration::from_millis(500);
/// Shortest frame period the simulated loop will run at.
const MIN_FRAME_PERIOD: Duration = Duration::from_micros(100);

/// Drive a fake render loop for `demo.run_seconds`, redrawing the chart into
/// the log, then print the per-bucket summary.
pub async fn run(config: OverlayConfig) -> Result<()> {
    let shared = SharedWindow::new(config.window);
    let reader = shared.reader();
    let mut sampler = Sampler::new(SystemClock, shared);
    sampler.reset();

    let timer = RedrawTimer::from_config(&config)?;
    let handle = timer.start(reader.clone(), SystemClock, sparkline_logger(&config))?;

    let period = Duration::try_from_secs_f64(1.0 / config.demo.target_fps)?.max(MIN_FRAME_PERIOD);
    let mut frames = time::interval(period);
    frames.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let deadline = time::sleep_until(Instant::now() + Duration::from_secs(config.demo.run_seconds));
    tokio::pin!(deadline);
    let interrupted = tokio::signal::ctrl_c();
    tokio::pin!(interrupted);
    let pause_every = config.demo.pause_every;
    let mut frame_no: u64 = 0;

    info!(
        target_fps = config.demo.target_fps,
        run_seconds = config.demo.run_seconds,
        "render loop started"
    );

    loop {
        tokio::select! {
            _ = &mut deadline => break,
            _ = &mut interrupted => {
                warn!("Interrupted; stopping early");
                break;
            }
            _ = frames.tick() => {}
        }

        sampler.mark_new_frame();
        frame_no += 1;

        if pause_every > 0 && frame_no % pause_every == 0 {
            sampler.mark_end_of_frames();
            info!(frame = frame_no, "simulated pause");
            // The pause must not hold off the deadline or ctrl-c.
            tokio::select! {
                _ = &mut deadline => break,
                _ = &mut interrupted => {
                    warn!("Interrupted during pause; stopping early");
                    break;
                }
                _ = time::sleep(PAUSE) => frames.reset(),
            }
        }
    }

    sampler.mark_end_of_frames();
    handle.stop().await?;

    info!(frames = frame_no, retained = reader.len(), "render loop finished");
    for (i, summary) in reader.per_bucket_summary().iter().enumerate() {
        match summary.frames_per_second() {
            Some(fps) => info!(bucket = i, "{fps:.2} FPS"),
            None => info!(bucket = i, "-- FPS"),
        }
    }
    Ok(())
}

/// Every refresh goes to the debug log; the sparkline is logged at info
/// roughly once per second.
fn sparkline_logger(config: &OverlayConfig) -> impl ChartRenderer {
    let mut log = LogRenderer::default();
    let mut spark = SparklineRenderer::new(SPARKLINE_COLUMNS);
    let every = (1000 / config.redraw.interval_ms).max(1);
    let mut ticks: u64 = 0;

    move |frame: &ChartFrame| {
        log.render(frame);
        spark.render(frame);
        ticks += 1;
        if ticks % every == 0 {
            match frame.latest_bucket_fps() {
                Some(fps) => info!("{} {fps:.2} FPS", spark.last_line()),
                None => info!("{}", spark.last_line()),
            }
        }
    }
}
