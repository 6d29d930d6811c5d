use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::metrics::STOPWATCHES_ACTIVE;

const TICK: Duration = Duration::from_secs(1);

/// Seconds spent on a problem page, counted from creation.
///
/// Never reset; it keeps counting after the problem is locked in.
pub struct Stopwatch {
    elapsed: Arc<AtomicU64>,
    handle: JoinHandle<()>,
}

impl Stopwatch {
    /// Must be called inside a tokio runtime.
    pub fn start() -> Self {
        let elapsed = Arc::new(AtomicU64::new(0));
        let counter = elapsed.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + TICK, TICK);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);
            loop {
                ticker.tick().await;
                counter.fetch_add(1, Ordering::Relaxed);
            }
        });

        STOPWATCHES_ACTIVE.inc();
        Self { elapsed, handle }
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed.load(Ordering::Relaxed)
    }
}

impl Drop for Stopwatch {
    fn drop(&mut self) {
        self.handle.abort();
        STOPWATCHES_ACTIVE.dec();
    }
}
