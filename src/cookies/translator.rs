//! HTTP-to-browser cookie translation
//!
//! Pure, order-preserving mapping from the HTTP response representation
//! to the browser's native one. The translator never invents a domain or
//! path; an absent attribute stays absent and the consuming layer
//! decides what "apply to the current context" means.

use super::{BrowserCookie, CookieError, HttpCookie, SameSite};

/// Converts HTTP cookies into the browser's native representation.
pub struct CookieTranslator;

impl CookieTranslator {
    /// Map a single cookie, normalizing the SameSite vocabulary.
    ///
    /// Fails without partial output when the cookie name is empty.
    pub fn to_browser_cookie(cookie: &HttpCookie) -> Result<BrowserCookie, CookieError> {
        if cookie.name.trim().is_empty() {
            return Err(CookieError::InvalidCookie {
                reason: "cookie name cannot be empty".to_string(),
            });
        }
        Ok(BrowserCookie {
            name: cookie.name.clone(),
            value: cookie.value.clone(),
            domain: cookie.domain.clone(),
            path: cookie.path.clone(),
            expiry: cookie.expiry,
            secure: cookie.secure,
            http_only: cookie.http_only,
            same_site: cookie
                .same_site
                .as_deref()
                .map(SameSite::from_attribute)
                .unwrap_or(SameSite::Unset),
        })
    }

    /// Map a whole jar, preserving input order. Order matters: later
    /// same-name cookies overwrite earlier ones when applied.
    pub fn to_browser_cookies(cookies: &[HttpCookie]) -> Result<Vec<BrowserCookie>, CookieError> {
        cookies.iter().map(Self::to_browser_cookie).collect()
    }
}
