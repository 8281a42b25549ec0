//! Resend countdown

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant};

const TICK: Duration = Duration::from_secs(1);

/// One-second resolution countdown running on a background task.
///
/// The task is aborted on [`cancel`](Self::cancel), on restart and on drop, so
/// nothing writes to the counter once its owner is gone. Must be started from
/// within a tokio runtime.
#[derive(Debug, Default)]
pub struct ResendCooldown {
    remaining: Arc<AtomicU32>,
    ticker: Option<JoinHandle<()>>,
}

impl ResendCooldown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restart the countdown at `seconds`
    pub fn start(&mut self, seconds: u32) {
        self.abort_ticker();
        self.remaining.store(seconds, Ordering::SeqCst);
        if seconds == 0 {
            return;
        }

        let remaining = Arc::clone(&self.remaining);
        self.ticker = Some(tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + TICK, TICK);
            loop {
                ticks.tick().await;
                let previous = remaining
                    .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |s| s.checked_sub(1));
                match previous {
                    Ok(1) | Err(_) => break,
                    Ok(_) => {}
                }
            }
        }));
    }

    /// Stop counting and zero the counter
    pub fn cancel(&mut self) {
        self.abort_ticker();
        self.remaining.store(0, Ordering::SeqCst);
    }

    pub fn remaining(&self) -> u32 {
        self.remaining.load(Ordering::SeqCst)
    }

    pub fn is_active(&self) -> bool {
        self.remaining() > 0
    }

    fn abort_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }
}

impl Drop for ResendCooldown {
    fn drop(&mut self) {
        self.abort_ticker();
    }
}
