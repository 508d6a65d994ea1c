//! Driver capability surface
//!
//! Abstract interface over the browser driver (WebDriver, CDP, ...).
//! The bridge never talks to a concrete driver binding; everything goes
//! through this trait so suites can swap in a real session or the
//! [`FakeDriver`](super::FakeDriver) test double.

use std::fmt;

use async_trait::async_trait;

use crate::cookies::BrowserCookie;

/// Opaque identifier for a top-level browsing context (window or tab).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub String);

impl WindowHandle {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque reference to a DOM element held by the driver.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementHandle(pub String);

impl ElementHandle {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Element lookup strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    Css(String),
    XPath(String),
    Id(String),
}

impl Locator {
    pub fn css(selector: impl Into<String>) -> Self {
        Locator::Css(selector.into())
    }

    pub fn xpath(expression: impl Into<String>) -> Self {
        Locator::XPath(expression.into())
    }

    pub fn id(id: impl Into<String>) -> Self {
        Locator::Id(id.into())
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Css(s) => write!(f, "css={}", s),
            Locator::XPath(s) => write!(f, "xpath={}", s),
            Locator::Id(s) => write!(f, "id={}", s),
        }
    }
}

/// Errors reported by the underlying driver.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("No such window: {0}")]
    NoSuchWindow(String),

    #[error("No such frame: {0}")]
    NoSuchFrame(String),

    #[error("Stale element reference: {0}")]
    StaleElement(String),

    #[error("Cookie rejected by browser: {0}")]
    CookieRejected(String),

    #[error("Driver backend error: {0}")]
    Backend(String),
}

/// Capability surface the bridge requires from a browser session.
///
/// Implementations wrap one live browser session. All calls are
/// sequential from the caller's perspective; the trait provides no
/// internal synchronization for concurrent logical flows.
#[async_trait]
pub trait DriverCapabilities: Send + Sync {
    /// Navigate back in the session history.
    async fn navigate_back(&self) -> Result<(), DriverError>;

    /// Navigate forward in the session history.
    async fn navigate_forward(&self) -> Result<(), DriverError>;

    /// Reload the current page.
    async fn refresh(&self) -> Result<(), DriverError>;

    /// Handle of the currently active window.
    async fn window_handle(&self) -> Result<WindowHandle, DriverError>;

    /// Handles of all open windows, in discovery order.
    async fn window_handles(&self) -> Result<Vec<WindowHandle>, DriverError>;

    /// Switch the active context to the given window.
    async fn switch_to_window(&self, handle: &WindowHandle) -> Result<(), DriverError>;

    /// Close the currently active window.
    async fn close_window(&self) -> Result<(), DriverError>;

    /// Switch into a frame by its name or id attribute.
    async fn switch_to_frame_by_name(&self, name: &str) -> Result<(), DriverError>;

    /// Switch into a frame by its zero-based index.
    async fn switch_to_frame_by_index(&self, index: u16) -> Result<(), DriverError>;

    /// Switch into the frame owned by the given element.
    async fn switch_to_frame_by_element(&self, element: &ElementHandle)
        -> Result<(), DriverError>;

    /// Leave all frames and return to the top-level document.
    async fn switch_to_default_content(&self) -> Result<(), DriverError>;

    /// Add a cookie to the active browsing context.
    async fn add_cookie(&self, cookie: &BrowserCookie) -> Result<(), DriverError>;

    /// All elements currently matching the locator, in document order.
    async fn find_elements(&self, locator: &Locator) -> Result<Vec<ElementHandle>, DriverError>;

    /// Whether the element is currently rendered visible. A detached
    /// element reports [`DriverError::StaleElement`].
    async fn is_displayed(&self, element: &ElementHandle) -> Result<bool, DriverError>;
}
