//! Polling Infrastructure
//!
//! Periodic background jobs whose lifetime is tied to a handle, so a view
//! that stops caring about fresh data also stops issuing requests.

use std::future::Future;
use std::time::Duration;

use kernel::id::PollerId;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Spawner for periodic jobs
pub struct Poller;

impl Poller {
    /// Run `job` now and then once per `interval` until the handle is
    /// stopped or dropped
    ///
    /// A run that overruns the interval delays the next one; ticks are
    /// never bursted to catch up. Must be called inside a tokio runtime.
    pub fn spawn<F, Fut>(interval: Duration, mut job: F) -> PollHandle
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let id = PollerId::new();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                tracing::trace!(poller_id = %id, "Poll tick");
                job().await;
            }
        });

        tracing::debug!(poller_id = %id, interval_secs = interval.as_secs(), "Poller started");

        PollHandle { id, task }
    }
}

/// Owner of a running poller
#[derive(Debug)]
pub struct PollHandle {
    id: PollerId,
    task: JoinHandle<()>,
}

impl PollHandle {
    pub fn id(&self) -> PollerId {
        self.id
    }

    /// Whether the background task is still alive
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stop polling
    ///
    /// An in-flight run is cancelled at its next await point.
    pub fn stop(&self) {
        if !self.task.is_finished() {
            self.task.abort();
            tracing::debug!(poller_id = %self.id, "Poller stopped");
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
