//! Politeness delays between requests
//!
//! The origin rate limits aggressively; the crawler spaces its requests with
//! uniformly sampled delays instead of hammering. A short delay follows each
//! item (once per item, however many requests the item needed), a longer one
//! follows each listing page. These are backpressure toward the origin, not
//! a correctness mechanism, and tests switch them off.

use crate::config::PacingConfig;
use rand::Rng;
use std::time::Duration;

/// Applies the configured inter-request delays
#[derive(Debug, Clone)]
pub struct Pacer {
    item_delay_ms: (u64, u64),
    page_delay_ms: (u64, u64),
    enabled: bool,
}

impl Pacer {
    pub fn new(config: &PacingConfig) -> Self {
        Self {
            item_delay_ms: (config.item_delay_min_ms, config.item_delay_max_ms),
            page_delay_ms: (config.page_delay_min_ms, config.page_delay_max_ms),
            enabled: config.enabled,
        }
    }

    /// A pacer that never sleeps, for tests
    pub fn disabled() -> Self {
        Self::new(&PacingConfig::disabled())
    }

    /// Sleeps the short randomized delay applied after each item
    pub async fn after_item(&self) {
        self.sleep_in_range(self.item_delay_ms).await;
    }

    /// Sleeps the longer randomized delay applied after each listing page
    pub async fn after_page(&self) {
        self.sleep_in_range(self.page_delay_ms).await;
    }

    async fn sleep_in_range(&self, (min_ms, max_ms): (u64, u64)) {
        if !self.enabled {
            return;
        }
        let delay = sample_uniform_ms(min_ms, max_ms);
        tracing::trace!("Pacing delay: {:?}", delay);
        tokio::time::sleep(delay).await;
    }
}

fn sample_uniform_ms(min_ms: u64, max_ms: u64) -> Duration {
    let millis = if min_ms >= max_ms {
        min_ms
    } else {
        rand::thread_rng().gen_range(min_ms..=max_ms)
    };
    Duration::from_millis(millis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_sample_within_bounds() {
        for _ in 0..100 {
            let d = sample_uniform_ms(1000, 2000);
            assert!(d >= Duration::from_millis(1000));
            assert!(d <= Duration::from_millis(2000));
        }
    }

    #[test]
    fn test_sample_degenerate_range() {
        assert_eq!(sample_uniform_ms(500, 500), Duration::from_millis(500));
    }

    #[tokio::test]
    async fn test_disabled_pacer_does_not_sleep() {
        let pacer = Pacer::disabled();
        let start = Instant::now();
        pacer.after_item().await;
        pacer.after_page().await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_enabled_pacer_sleeps() {
        let config = PacingConfig {
            item_delay_min_ms: 20,
            item_delay_max_ms: 30,
            page_delay_min_ms: 20,
            page_delay_max_ms: 30,
            enabled: true,
        };
        let pacer = Pacer::new(&config);
        let start = Instant::now();
        pacer.after_item().await;
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
