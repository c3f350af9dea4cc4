use std::time::Duration;

use engine_logging::{engine_debug, engine_trace};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Recurring refresh trigger. The first tick fires one interval after start.
#[derive(Debug, Clone, Copy)]
pub struct RefreshScheduler {
    interval: Duration,
}

impl Default for RefreshScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_REFRESH_INTERVAL)
    }
}

impl RefreshScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(MIN_INTERVAL),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Spawns the timer on the current tokio runtime.
    ///
    /// Must be called from within a runtime context. The returned handle owns
    /// the timer: cancelling or dropping it stops all further ticks.
    pub fn start<F>(&self, on_tick: F) -> RefreshHandle
    where
        F: Fn() + Send + 'static,
    {
        let cancel = CancellationToken::new();
        let stopped = cancel.clone();
        let period = self.interval;

        tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = stopped.cancelled() => break,
                    _ = ticker.tick() => {
                        engine_trace!("Refresh timer tick");
                        on_tick();
                    }
                }
            }
        });

        engine_debug!("Refresh timer started interval={:?}", period);
        RefreshHandle { cancel }
    }
}

#[derive(Debug)]
pub struct RefreshHandle {
    cancel: CancellationToken,
}

impl RefreshHandle {
    /// Stops the timer. Consumes the handle so it can only happen once.
    pub fn cancel(mut self) {
        self.stop();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    fn stop(&mut self) {
        if !self.cancel.is_cancelled() {
            self.cancel.cancel();
            engine_debug!("Refresh timer cancelled");
        }
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
