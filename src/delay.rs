//! Browser Timers

use std::time::Duration;

use async_trait::async_trait;
use folio_core::retry::Delay;

/// Retry delay backed by `setTimeout`
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooDelay;

#[async_trait(?Send)]
impl Delay for GlooDelay {
    async fn sleep(&self, duration: Duration) {
        gloo_timers::future::sleep(duration).await;
    }
}
