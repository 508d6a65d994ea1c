//! HTTP-session-to-browser injection
//!
//! Takes the cookie jar an HTTP-layer operation produced and makes the
//! live browser session adopt it: translate every cookie, apply them in
//! order, reload the page so server-side session state keyed by the new
//! cookies takes effect, then wait for the page to stabilize.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::cookies::{CookieError, CookieTranslator, HttpCookie};
use crate::driver::{DriverCapabilities, DriverError, Locator};
use crate::sync::{SynchronizationGate, WaitError};

/// Session bridge errors
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Cookie(#[from] CookieError),

    #[error(transparent)]
    Driver(#[from] DriverError),

    #[error(transparent)]
    Wait(#[from] WaitError),
}

/// Injects an HTTP-derived session into a running browser instance.
///
/// The bridge reads the caller's jar as an immutable snapshot and holds
/// no state across calls.
pub struct SessionBridge {
    driver: Arc<dyn DriverCapabilities>,
    gate: SynchronizationGate,
    overlay_locator: Option<Locator>,
}

impl SessionBridge {
    pub fn new(driver: Arc<dyn DriverCapabilities>, gate: SynchronizationGate) -> Self {
        Self {
            driver,
            gate,
            overlay_locator: None,
        }
    }

    /// Wait for this overlay to clear after the post-injection refresh.
    pub fn with_overlay_locator(mut self, locator: Locator) -> Self {
        self.overlay_locator = Some(locator);
        self
    }

    /// Translate and apply every cookie from the HTTP session, then
    /// refresh the page once.
    ///
    /// An empty jar is a legitimate transient state and a logged no-op,
    /// not an error. A cookie the browser rejects aborts the call with
    /// the offending cookie's name: silently skipping an auth cookie
    /// would surface as a misleading UI failure far from the root
    /// cause. After a successful return the browser's outgoing requests
    /// carry every cookie that was in the jar at call time.
    pub async fn inject_http_session(&self, cookies: &[HttpCookie]) -> Result<(), SessionError> {
        if cookies.is_empty() {
            warn!("No cookies available to inject into the browser");
            return Ok(());
        }

        // Translate everything up front so a bad cookie aborts before
        // the browser is touched at all.
        let browser_cookies = CookieTranslator::to_browser_cookies(cookies)?;

        for (index, cookie) in browser_cookies.iter().enumerate() {
            debug!("Injecting cookie {}: '{}'", index, cookie.name);
            match self.driver.add_cookie(cookie).await {
                Ok(()) => {}
                Err(DriverError::CookieRejected(reason)) => {
                    return Err(CookieError::InjectionRejected {
                        name: cookie.name.clone(),
                        reason,
                    }
                    .into());
                }
                Err(e) => return Err(e.into()),
            }
        }

        self.driver.refresh().await?;

        if let Some(locator) = &self.overlay_locator {
            self.gate.wait_for_overlays_gone(locator).await?;
        }

        info!(
            "Injected {} cookies and refreshed the page",
            browser_cookies.len()
        );
        Ok(())
    }
}
