//! Display Ticker
//!
//! Once-a-second elapsed-time refresh for a running session. The task lives
//! exactly as long as the [`Ticker`] guard: dropping it aborts the task.

use chrono::{DateTime, Utc};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::clock::{format_elapsed, ZERO_ELAPSED};

/// Refresh period of the elapsed display
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Guard over the periodic display task
#[derive(Debug)]
pub struct Ticker {
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Start ticking from `start` using the wall clock
    pub fn spawn(start: DateTime<Utc>) -> (Self, watch::Receiver<String>) {
        Self::spawn_with_clock(start, TICK_PERIOD, Utc::now)
    }

    /// Start ticking with an explicit period and clock
    ///
    /// The first value is computed immediately, then once per `period`.
    pub fn spawn_with_clock<F>(
        start: DateTime<Utc>,
        period: Duration,
        clock: F,
    ) -> (Self, watch::Receiver<String>)
    where
        F: Fn() -> DateTime<Utc> + Send + 'static,
    {
        let (tx, rx) = watch::channel(ZERO_ELAPSED.to_string());

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                if tx.send(format_elapsed(clock() - start)).is_err() {
                    break;
                }
            }
        });

        (Self { handle }, rx)
    }

    /// Stop the display task
    pub fn cancel(self) {}
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
