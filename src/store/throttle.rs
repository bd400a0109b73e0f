use std::time::Duration;

use super::Throttle;
use crate::config::PACING_DELAY;

/// Sleeps a fixed delay between posts.
#[derive(Debug, Clone, Copy)]
pub struct TokioThrottle {
    delay: Duration,
}

impl TokioThrottle {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for TokioThrottle {
    fn default() -> Self {
        Self::new(PACING_DELAY)
    }
}

impl Throttle for TokioThrottle {
    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

/// Does not pause.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoThrottle;

impl Throttle for NoThrottle {
    async fn pause(&self) {}
}
