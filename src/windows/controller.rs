//! Window and frame multiplexing
//!
//! Indexes browser windows by discovery order and switches between
//! windows and frames. Popups are transient, so ordinals are only valid
//! within one enumeration snapshot: every index-based operation
//! re-enumerates instead of trusting a cached list.

use std::fmt;
use std::sync::Arc;

use tracing::{info, warn};

use super::WindowError;
use crate::driver::{DriverCapabilities, DriverError, ElementHandle, WindowHandle};

/// Target frame for a switch call. Exactly one variant per call.
#[derive(Debug, Clone)]
pub enum FrameLocator {
    /// Frame `name` or `id` attribute.
    ByNameOrId(String),
    /// Zero-based frame index within the current context.
    ByIndex(u16),
    /// A previously located frame element.
    ByElement(ElementHandle),
}

impl fmt::Display for FrameLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameLocator::ByNameOrId(name) => write!(f, "name or id '{}'", name),
            FrameLocator::ByIndex(index) => write!(f, "index {}", index),
            FrameLocator::ByElement(element) => write!(f, "element '{}'", element),
        }
    }
}

/// Window and frame controller over one browser session.
///
/// The handle at ordinal 0 of a fresh enumeration is the parent window
/// by convention.
pub struct WindowFrameController {
    driver: Arc<dyn DriverCapabilities>,
}

impl WindowFrameController {
    pub fn new(driver: Arc<dyn DriverCapabilities>) -> Self {
        Self { driver }
    }

    /// Navigate back in the session history.
    pub async fn navigate_back(&self) -> Result<(), WindowError> {
        self.driver.navigate_back().await?;
        info!("Navigated to the previous page in the browser");
        Ok(())
    }

    /// Navigate forward in the session history.
    pub async fn navigate_forward(&self) -> Result<(), WindowError> {
        self.driver.navigate_forward().await?;
        info!("Navigated to the next page in the browser");
        Ok(())
    }

    /// Reload the current page.
    pub async fn refresh(&self) -> Result<(), WindowError> {
        self.driver.refresh().await?;
        info!("The current page in the browser is refreshed");
        Ok(())
    }

    /// Handle of the currently active window.
    pub async fn current_window_handle(&self) -> Result<WindowHandle, WindowError> {
        let handle = self.driver.window_handle().await?;
        info!("Captured browser window handle '{}'", handle);
        Ok(handle)
    }

    /// Fresh enumeration of all open windows, in discovery order.
    /// Never cached: the set can change between any two calls.
    pub async fn list_windows(&self) -> Result<Vec<WindowHandle>, WindowError> {
        let handles = self.driver.window_handles().await?;
        info!("Captured {} browser window handles", handles.len());
        Ok(handles)
    }

    /// Switch to the window at `index` in a fresh enumeration.
    ///
    /// Bounds are validated before any switch is attempted. A window
    /// that closed between enumeration and switch surfaces as
    /// [`WindowError::WindowGone`]; the caller retries with a fresh
    /// enumeration if it wants to.
    pub async fn switch_to_window(&self, index: usize) -> Result<(), WindowError> {
        let windows = self.driver.window_handles().await?;
        if index >= windows.len() {
            return Err(WindowError::InvalidIndex {
                index,
                count: windows.len(),
            });
        }
        match self.driver.switch_to_window(&windows[index]).await {
            Ok(()) => {
                info!("Switched to browser window at index {}", index);
                Ok(())
            }
            Err(DriverError::NoSuchWindow(_)) => Err(WindowError::WindowGone { index }),
            Err(e) => Err(e.into()),
        }
    }

    /// Switch to the parent window (ordinal 0 of a fresh enumeration).
    pub async fn switch_to_parent(&self) -> Result<(), WindowError> {
        self.switch_to_window(0).await
    }

    /// Close every child window and return to the parent.
    ///
    /// Fails with [`WindowError::NoWindows`] when there is nothing to
    /// close. A child that was already closed externally is logged and
    /// skipped rather than aborting the sweep.
    pub async fn close_children_and_return_to_parent(&self) -> Result<(), WindowError> {
        let windows = self.driver.window_handles().await?;
        info!("Total windows before closing the children: {}", windows.len());
        if windows.len() < 2 {
            return Err(WindowError::NoWindows);
        }

        for (index, child) in windows.iter().enumerate().skip(1) {
            match self.driver.switch_to_window(child).await {
                Ok(()) => match self.driver.close_window().await {
                    Ok(()) => info!("Closed child browser window '{}'", child),
                    Err(DriverError::NoSuchWindow(_)) => {
                        warn!("Child window '{}' already closed, skipping", child);
                    }
                    Err(e) => return Err(e.into()),
                },
                Err(DriverError::NoSuchWindow(_)) => {
                    warn!(
                        "Child window at index {} already closed, skipping",
                        index
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }

        match self.driver.switch_to_window(&windows[0]).await {
            Ok(()) => {
                info!("Switched back to the parent browser window '{}'", windows[0]);
                Ok(())
            }
            Err(DriverError::NoSuchWindow(_)) => Err(WindowError::WindowGone { index: 0 }),
            Err(e) => Err(e.into()),
        }
    }

    /// Switch into a frame. Dispatches on the locator variant; a blank
    /// name is rejected before any driver call, and a missing or stale
    /// target surfaces as [`WindowError::FrameNotFound`].
    pub async fn switch_to_frame(&self, locator: FrameLocator) -> Result<(), WindowError> {
        let result = match &locator {
            FrameLocator::ByNameOrId(name) => {
                if name.trim().is_empty() {
                    return Err(WindowError::EmptyFrameName);
                }
                self.driver.switch_to_frame_by_name(name).await
            }
            FrameLocator::ByIndex(index) => self.driver.switch_to_frame_by_index(*index).await,
            FrameLocator::ByElement(element) => {
                self.driver.switch_to_frame_by_element(element).await
            }
        };
        match result {
            Ok(()) => {
                info!("Switched to the frame using {}", locator);
                Ok(())
            }
            Err(DriverError::NoSuchFrame(_)) | Err(DriverError::StaleElement(_)) => {
                Err(WindowError::FrameNotFound {
                    locator: locator.to_string(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Leave all frames and return to the top-level document.
    pub async fn switch_to_default_content(&self) -> Result<(), WindowError> {
        self.driver.switch_to_default_content().await?;
        info!("Switched back to the top-level document");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::FakeDriver;

    fn controller(driver: &Arc<FakeDriver>) -> WindowFrameController {
        WindowFrameController::new(driver.clone() as Arc<dyn DriverCapabilities>)
    }

    #[tokio::test]
    async fn test_switch_to_window_by_index() {
        let driver = Arc::new(FakeDriver::with_windows(3));
        let controller = controller(&driver);

        controller.switch_to_window(2).await.unwrap();
        let handle = controller.current_window_handle().await.unwrap();
        let windows = controller.list_windows().await.unwrap();
        assert_eq!(handle, windows[2]);

        controller.switch_to_window(1).await.unwrap();
        assert_eq!(driver.active_window().unwrap().as_str(), "w1");
    }

    #[tokio::test]
    async fn test_switch_to_window_out_of_range_never_hits_driver() {
        let driver = Arc::new(FakeDriver::with_windows(2));
        let controller = controller(&driver);

        let err = controller.switch_to_window(2).await.unwrap_err();
        assert!(matches!(
            err,
            WindowError::InvalidIndex { index: 2, count: 2 }
        ));
        assert_eq!(driver.switch_window_calls(), 0);
    }

    #[tokio::test]
    async fn test_switch_to_window_closed_between_enumeration_and_switch() {
        let driver = Arc::new(FakeDriver::with_windows(2));
        driver.vanish_window("w1");
        let controller = controller(&driver);

        let err = controller.switch_to_window(1).await.unwrap_err();
        assert!(matches!(err, WindowError::WindowGone { index: 1 }));
    }

    #[tokio::test]
    async fn test_switch_to_parent() {
        let driver = Arc::new(FakeDriver::with_windows(3));
        let controller = controller(&driver);

        controller.switch_to_window(2).await.unwrap();
        controller.switch_to_parent().await.unwrap();
        assert_eq!(driver.active_window().unwrap().as_str(), "w0");
    }

    #[tokio::test]
    async fn test_close_children_on_single_window_session() {
        let driver = Arc::new(FakeDriver::new());
        let controller = controller(&driver);

        let err = controller
            .close_children_and_return_to_parent()
            .await
            .unwrap_err();
        assert!(matches!(err, WindowError::NoWindows));
        assert_eq!(driver.open_windows().len(), 1);
    }

    #[tokio::test]
    async fn test_close_children_leaves_parent_active() {
        let driver = Arc::new(FakeDriver::with_windows(4));
        let controller = controller(&driver);

        controller.close_children_and_return_to_parent().await.unwrap();

        let open = driver.open_windows();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].as_str(), "w0");
        assert_eq!(driver.active_window().unwrap().as_str(), "w0");
    }

    #[tokio::test]
    async fn test_close_children_skips_externally_closed_child() {
        let driver = Arc::new(FakeDriver::with_windows(3));
        driver.vanish_window("w1");
        let controller = controller(&driver);

        controller.close_children_and_return_to_parent().await.unwrap();

        let open = driver.open_windows();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].as_str(), "w0");
    }

    #[tokio::test]
    async fn test_switch_to_frame_by_name() {
        let driver = Arc::new(FakeDriver::new());
        driver.script_frames(&["checkout-frame"], 0);
        let controller = controller(&driver);

        controller
            .switch_to_frame(FrameLocator::ByNameOrId("checkout-frame".to_string()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_switch_to_frame_blank_name_rejected() {
        let driver = Arc::new(FakeDriver::new());
        let controller = controller(&driver);

        let err = controller
            .switch_to_frame(FrameLocator::ByNameOrId("   ".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, WindowError::EmptyFrameName));
    }

    #[tokio::test]
    async fn test_switch_to_frame_unknown_name() {
        let driver = Arc::new(FakeDriver::new());
        driver.script_frames(&["other"], 0);
        let controller = controller(&driver);

        let err = controller
            .switch_to_frame(FrameLocator::ByNameOrId("missing".to_string()))
            .await
            .unwrap_err();
        match err {
            WindowError::FrameNotFound { locator } => assert!(locator.contains("missing")),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[tokio::test]
    async fn test_switch_to_frame_by_index() {
        let driver = Arc::new(FakeDriver::new());
        driver.script_frames(&[], 2);
        let controller = controller(&driver);

        controller
            .switch_to_frame(FrameLocator::ByIndex(1))
            .await
            .unwrap();

        let err = controller
            .switch_to_frame(FrameLocator::ByIndex(2))
            .await
            .unwrap_err();
        assert!(matches!(err, WindowError::FrameNotFound { .. }));
    }

    #[tokio::test]
    async fn test_switch_to_frame_by_stale_element() {
        let driver = Arc::new(FakeDriver::new());
        driver.mark_stale("e1");
        let controller = controller(&driver);

        let err = controller
            .switch_to_frame(FrameLocator::ByElement(ElementHandle("e1".to_string())))
            .await
            .unwrap_err();
        assert!(matches!(err, WindowError::FrameNotFound { .. }));
    }
}
