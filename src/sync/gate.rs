//! Explicit-wait synchronization
//!
//! Bounded polling against asynchronous DOM state: overlays that must
//! clear before interaction continues, and elements that must become
//! visible first.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::{debug, info};

use crate::driver::{DriverCapabilities, DriverError, ElementHandle, Locator};

/// Wait errors
#[derive(Debug, thiserror::Error)]
pub enum WaitError {
    #[error("Timed out after {elapsed:?} waiting on {locator}")]
    Timeout { locator: String, elapsed: Duration },

    #[error(transparent)]
    Driver(#[from] DriverError),
}

/// Bounded-polling gate over one browser session.
///
/// Blocks the calling flow for up to the configured timeout, polling at
/// a fixed interval. On timeout the browser state is left as-is; the
/// caller decides whether to retry or fail the scenario.
pub struct SynchronizationGate {
    driver: Arc<dyn DriverCapabilities>,
    timeout: Duration,
    poll_interval: Duration,
}

impl SynchronizationGate {
    pub fn new(
        driver: Arc<dyn DriverCapabilities>,
        timeout: Duration,
        poll_interval: Duration,
    ) -> Self {
        Self {
            driver,
            timeout,
            poll_interval,
        }
    }

    /// Wait until every overlay that is currently showing has cleared.
    ///
    /// The matching element set is captured once up front. An empty
    /// snapshot returns immediately: the overlay never appeared, which
    /// is not an error. Elements appearing after the snapshot are not
    /// waited on; the contract is "wait for the overlay that was
    /// already showing to clear", not "wait for overlays to stop
    /// appearing". A stale element counts as gone.
    pub async fn wait_for_overlays_gone(&self, locator: &Locator) -> Result<(), WaitError> {
        let overlays = self.driver.find_elements(locator).await?;
        debug!("Overlay count for {}: {}", locator, overlays.len());
        if overlays.is_empty() {
            debug!("No overlays found, nothing to wait on");
            return Ok(());
        }

        let start = Instant::now();
        loop {
            let mut all_gone = true;
            for overlay in &overlays {
                match self.driver.is_displayed(overlay).await {
                    Ok(false) => {}
                    Ok(true) => {
                        all_gone = false;
                        break;
                    }
                    Err(DriverError::StaleElement(_)) => {}
                    Err(e) => return Err(e.into()),
                }
            }
            if all_gone {
                info!("Overlays matching {} have disappeared", locator);
                return Ok(());
            }
            if start.elapsed() >= self.timeout {
                return Err(WaitError::Timeout {
                    locator: locator.to_string(),
                    elapsed: start.elapsed(),
                });
            }
            sleep(self.poll_interval).await;
        }
    }

    /// Wait until at least one element matching the locator is visible
    /// and return it. Unlike the overlay gate this re-queries every
    /// poll, because the element may not exist yet when the wait
    /// starts.
    pub async fn wait_for_visible(&self, locator: &Locator) -> Result<ElementHandle, WaitError> {
        let start = Instant::now();
        loop {
            let elements = self.driver.find_elements(locator).await?;
            for element in elements {
                match self.driver.is_displayed(&element).await {
                    Ok(true) => return Ok(element),
                    Ok(false) => {}
                    Err(DriverError::StaleElement(_)) => {}
                    Err(e) => return Err(e.into()),
                }
            }
            if start.elapsed() >= self.timeout {
                return Err(WaitError::Timeout {
                    locator: locator.to_string(),
                    elapsed: start.elapsed(),
                });
            }
            sleep(self.poll_interval).await;
        }
    }
}
