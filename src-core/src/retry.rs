//! Retry Policy
//!
//! Fixed-delay retries for collection fetches, and the `Delay` seam that
//! lets each host (tokio, browser timers, tests) provide the wait.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// `retries` counts attempts after the first one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    pub retries: u32,
    pub delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 3,
            delay_ms: 2000,
        }
    }
}

impl RetryPolicy {
    pub fn new(retries: u32, delay: Duration) -> Self {
        Self {
            retries,
            delay_ms: delay.as_millis() as u64,
        }
    }

    /// No retries at all
    pub fn none() -> Self {
        Self {
            retries: 0,
            delay_ms: 0,
        }
    }

    /// Total attempts including the first
    pub fn max_attempts(&self) -> u32 {
        self.retries.saturating_add(1)
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Wait before the next attempt, given how many attempts have failed
    /// so far. `None` once the budget is spent.
    pub fn delay_after(&self, failed_attempts: u32) -> Option<Duration> {
        (failed_attempts < self.max_attempts()).then(|| self.delay())
    }
}

/// Sleeps between attempts
#[async_trait(?Send)]
pub trait Delay: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Delay backed by the tokio timer
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDelay;

#[cfg(not(target_arch = "wasm32"))]
#[async_trait(?Send)]
impl Delay for TokioDelay {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
