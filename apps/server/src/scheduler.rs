//! Background scheduler for simulated market prices.
//!
//! Every tick walks each catalog price and revalues all open positions.
//! A failed cycle is logged and followed by a back-off pause.

use std::sync::Arc;

use financehub_core::investments::PriceUpdateServiceTrait;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Starts the background price update scheduler.
pub fn start_price_update_scheduler(
    service: Arc<dyn PriceUpdateServiceTrait>,
    period: Duration,
    backoff: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            "Price update scheduler started ({}s interval)",
            period.as_secs()
        );

        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; prices start moving one period after boot.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            if !run_price_update(service.as_ref()) {
                tokio::time::sleep(backoff).await;
            }
        }
    })
}

/// Runs a single price update cycle. Returns false when the cycle failed.
fn run_price_update(service: &dyn PriceUpdateServiceTrait) -> bool {
    match service.run_cycle() {
        Ok(summary) => {
            debug!(
                "Price update: {} assets, {} positions revalued",
                summary.assets_updated, summary.positions_updated
            );
            true
        }
        Err(e) => {
            warn!("Price update cycle failed: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use financehub_core::errors::{Error, Result};
    use financehub_core::investments::PriceUpdateSummary;
    use rust_decimal::Decimal;

    struct CountingService {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingService {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl PriceUpdateServiceTrait for CountingService {
        fn apply_prices(&self, _prices: &HashMap<String, Decimal>) -> Result<PriceUpdateSummary> {
            Ok(PriceUpdateSummary::default())
        }

        fn run_cycle(&self) -> Result<PriceUpdateSummary> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(Error::Unexpected("market closed".to_string()))
            } else {
                Ok(PriceUpdateSummary::default())
            }
        }
    }

    async fn advance_to(secs: u64, started: tokio::time::Instant) {
        tokio::time::sleep_until(started + Duration::from_secs(secs)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_cycles_follow_the_interval() {
        let service = CountingService::new(false);
        let started = tokio::time::Instant::now();
        let handle = start_price_update_scheduler(
            service.clone(),
            Duration::from_secs(30),
            Duration::from_secs(60),
        );

        advance_to(29, started).await;
        assert_eq!(service.calls(), 0);
        advance_to(31, started).await;
        assert_eq!(service.calls(), 1);
        advance_to(61, started).await;
        assert_eq!(service.calls(), 2);
        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_cycle_backs_off() {
        let service = CountingService::new(true);
        let started = tokio::time::Instant::now();
        let handle = start_price_update_scheduler(
            service.clone(),
            Duration::from_secs(30),
            Duration::from_secs(60),
        );

        advance_to(31, started).await;
        assert_eq!(service.calls(), 1);
        // Without the back-off the next cycle would run at 60s.
        advance_to(89, started).await;
        assert_eq!(service.calls(), 1);
        advance_to(91, started).await;
        assert_eq!(service.calls(), 2);
        handle.abort();
    }
}
