use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::task::JoinHandle;

use crate::{EngineEvent, EventSink, SubmissionId};

#[derive(Debug, Clone, Copy)]
pub struct TickerSettings {
    pub interval: Duration,
    /// Upper bound of the random increment sent with each tick.
    pub max_step: f64,
}

// Mirrors `PROGRESS_TICK_INTERVAL` and `PROGRESS_MAX_STEP` in mockpaper_core.
impl Default for TickerSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(250),
            max_step: 6.0,
        }
    }
}

/// Emits `EngineEvent::ProgressTick` on a fixed interval until dropped.
///
/// Must be started from within a tokio runtime.
pub struct ProgressTicker {
    handle: JoinHandle<()>,
}

impl ProgressTicker {
    pub fn start(
        submission_id: SubmissionId,
        settings: TickerSettings,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        let handle = tokio::spawn(async move {
            let mut rng = StdRng::from_entropy();
            let max_step = settings.max_step.max(0.0);
            let mut interval = tokio::time::interval(settings.interval);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // The first tick completes immediately; progress starts at the floor.
            interval.tick().await;
            loop {
                interval.tick().await;
                let increment = rng.gen_range(0.0..=max_step);
                sink.emit(EngineEvent::ProgressTick {
                    submission_id,
                    increment,
                });
            }
        });
        Self { handle }
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
