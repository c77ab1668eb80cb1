//! Periodic chart redraw.
//!
//! The timer is an explicit, cancellable task: nothing starts it implicitly,
//! and stopping it leaves the sampler and window untouched.

use fps_chart::{ChartModel, ChartRenderer};
use fps_config::{ChartConfig, OverlayConfig, RedrawConfig};
use fps_core::{Clock, FpsError, Result};
use fps_window::FrameTimeSource;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

/// Redraw settings: how often, and how to scale the chart.
#[derive(Debug, Clone)]
pub struct RedrawTimer {
    interval: Duration,
    model:    ChartModel,
}

impl RedrawTimer {
    pub fn new(redraw: &RedrawConfig, chart: ChartConfig) -> Result<Self> {
        if redraw.interval_ms == 0 {
            return Err(FpsError::InvalidConfig {
                field:  "redraw.interval_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(Self {
            interval: Duration::from_millis(redraw.interval_ms),
            model:    ChartModel::new(chart),
        })
    }

    pub fn from_config(config: &OverlayConfig) -> Result<Self> {
        Self::new(&config.redraw, config.chart)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Spawn the redraw loop on the current Tokio runtime.
    ///
    /// Every tick builds a [`fps_chart::ChartFrame`] from `source` at
    /// `clock.now_ms()` and hands it to `renderer`.  Ticks missed while the
    /// runtime was busy are skipped, not replayed.
    pub fn start<S, C, R>(&self, source: S, clock: C, mut renderer: R) -> Result<RedrawHandle<R>>
    where
        S: FrameTimeSource + Send + 'static,
        C: Clock + 'static,
        R: ChartRenderer + 'static,
    {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| FpsError::Redraw(format!("no Tokio runtime: {e}")))?;

        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        let redraws = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&redraws);
        let interval = self.interval;
        let model = self.model.clone();

        let task = runtime.spawn(async move {
            let mut ticker = time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    // Resolves on `stop()` or when the handle's sender is dropped.
                    _ = &mut stop_rx => break,
                    _ = ticker.tick() => {
                        let frame = model.build(&source, clock.now_ms());
                        renderer.render(&frame);
                        counter.fetch_add(1, Ordering::Relaxed);
                    }
                }
            }

            debug!("redraw loop exited");
            renderer
        });

        info!(interval_ms = interval.as_millis() as u64, "redraw timer started");

        Ok(RedrawHandle {
            stop_tx: Some(stop_tx),
            task:    Some(task),
            redraws,
        })
    }
}

/// Owner of a running redraw loop.  Dropping it aborts the loop.
#[derive(Debug)]
pub struct RedrawHandle<R> {
    stop_tx: Option<oneshot::Sender<()>>,
    task:    Option<JoinHandle<R>>,
    redraws: Arc<AtomicU64>,
}

impl<R> RedrawHandle<R> {
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Number of refreshes performed so far.
    pub fn redraw_count(&self) -> u64 {
        self.redraws.load(Ordering::Relaxed)
    }

    /// Stop the loop, wait for it, and hand the renderer back.
    pub async fn stop(mut self) -> Result<R> {
        if let Some(tx) = self.stop_tx.take() {
            // Err means the loop is already gone; the join below reports why.
            let _ = tx.send(());
        }

        let task = self
            .task
            .take()
            .ok_or_else(|| FpsError::Redraw("redraw loop already stopped".to_string()))?;

        let renderer = task
            .await
            .map_err(|e| FpsError::Redraw(format!("redraw loop failed: {e}")))?;

        info!(redraws = self.redraw_count(), "redraw timer stopped");
        Ok(renderer)
    }
}

impl<R> Drop for RedrawHandle<R> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
