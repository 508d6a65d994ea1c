//! Scripted in-memory driver
//!
//! A deterministic [`DriverCapabilities`] implementation for suites that
//! exercise window, wait, and cookie flows without a real browser. State
//! is scripted up front (windows, frames, element visibility schedules)
//! and every mutating call is recorded for assertions.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{DriverCapabilities, DriverError, ElementHandle, Locator, WindowHandle};
use crate::cookies::BrowserCookie;

#[derive(Default)]
struct FakeState {
    windows: Vec<WindowHandle>,
    active: Option<WindowHandle>,
    /// Handles that still show up in enumeration but are gone by the
    /// time the driver is asked to switch to or close them.
    vanishing: HashSet<String>,
    frame_names: HashSet<String>,
    frame_count: u16,
    elements: HashMap<String, Vec<ElementHandle>>,
    /// Element id -> number of `is_displayed` queries left that still
    /// report the element as visible.
    displayed_for: HashMap<String, u32>,
    stale: HashSet<String>,
    rejected_cookies: HashSet<String>,
    cookies: Vec<BrowserCookie>,
    refreshes: u32,
    back_count: u32,
    forward_count: u32,
    switch_window_calls: u32,
    find_element_calls: u32,
    is_displayed_calls: u32,
}

/// Scripted driver double with recorded calls.
pub struct FakeDriver {
    state: Mutex<FakeState>,
}

impl FakeDriver {
    /// One open window (`w0`), active.
    pub fn new() -> Self {
        Self::with_windows(1)
    }

    /// `count` open windows named `w0..wN`, with `w0` active.
    pub fn with_windows(count: usize) -> Self {
        let windows: Vec<WindowHandle> =
            (0..count).map(|i| WindowHandle(format!("w{}", i))).collect();
        let active = windows.first().cloned();
        Self {
            state: Mutex::new(FakeState {
                windows,
                active,
                ..FakeState::default()
            }),
        }
    }

    /// Mark a window as closed externally: it still appears in
    /// `window_handles` but switching to or closing it fails.
    pub fn vanish_window(&self, handle: &str) {
        self.state.lock().vanishing.insert(handle.to_string());
    }

    /// Register frames reachable by name and the count reachable by index.
    pub fn script_frames(&self, names: &[&str], count: u16) {
        let mut state = self.state.lock();
        state.frame_names = names.iter().map(|s| s.to_string()).collect();
        state.frame_count = count;
    }

    /// Script an element matched by `locator` that reports visible for
    /// the next `visible_queries` `is_displayed` calls, then invisible.
    pub fn script_element(&self, locator: &Locator, id: &str, visible_queries: u32) {
        let mut state = self.state.lock();
        state
            .elements
            .entry(locator.to_string())
            .or_default()
            .push(ElementHandle(id.to_string()));
        state.displayed_for.insert(id.to_string(), visible_queries);
    }

    /// Mark an element as detached; `is_displayed` reports it stale.
    pub fn mark_stale(&self, id: &str) {
        self.state.lock().stale.insert(id.to_string());
    }

    /// Make `add_cookie` refuse cookies with the given name.
    pub fn reject_cookie(&self, name: &str) {
        self.state.lock().rejected_cookies.insert(name.to_string());
    }

    pub fn added_cookies(&self) -> Vec<BrowserCookie> {
        self.state.lock().cookies.clone()
    }

    pub fn refresh_count(&self) -> u32 {
        self.state.lock().refreshes
    }

    pub fn back_count(&self) -> u32 {
        self.state.lock().back_count
    }

    pub fn forward_count(&self) -> u32 {
        self.state.lock().forward_count
    }

    pub fn switch_window_calls(&self) -> u32 {
        self.state.lock().switch_window_calls
    }

    pub fn find_element_calls(&self) -> u32 {
        self.state.lock().find_element_calls
    }

    pub fn is_displayed_calls(&self) -> u32 {
        self.state.lock().is_displayed_calls
    }

    pub fn open_windows(&self) -> Vec<WindowHandle> {
        self.state.lock().windows.clone()
    }

    pub fn active_window(&self) -> Option<WindowHandle> {
        self.state.lock().active.clone()
    }
}

impl Default for FakeDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DriverCapabilities for FakeDriver {
    async fn navigate_back(&self) -> Result<(), DriverError> {
        self.state.lock().back_count += 1;
        Ok(())
    }

    async fn navigate_forward(&self) -> Result<(), DriverError> {
        self.state.lock().forward_count += 1;
        Ok(())
    }

    async fn refresh(&self) -> Result<(), DriverError> {
        self.state.lock().refreshes += 1;
        Ok(())
    }

    async fn window_handle(&self) -> Result<WindowHandle, DriverError> {
        self.state
            .lock()
            .active
            .clone()
            .ok_or_else(|| DriverError::NoSuchWindow("no active window".into()))
    }

    async fn window_handles(&self) -> Result<Vec<WindowHandle>, DriverError> {
        Ok(self.state.lock().windows.clone())
    }

    async fn switch_to_window(&self, handle: &WindowHandle) -> Result<(), DriverError> {
        let mut state = self.state.lock();
        state.switch_window_calls += 1;
        if state.vanishing.contains(handle.as_str()) {
            state.windows.retain(|w| w != handle);
            return Err(DriverError::NoSuchWindow(handle.to_string()));
        }
        if !state.windows.contains(handle) {
            return Err(DriverError::NoSuchWindow(handle.to_string()));
        }
        state.active = Some(handle.clone());
        Ok(())
    }

    async fn close_window(&self) -> Result<(), DriverError> {
        let mut state = self.state.lock();
        let active = state
            .active
            .take()
            .ok_or_else(|| DriverError::NoSuchWindow("no active window".into()))?;
        if state.vanishing.contains(active.as_str()) {
            state.windows.retain(|w| w != &active);
            return Err(DriverError::NoSuchWindow(active.to_string()));
        }
        state.windows.retain(|w| w != &active);
        Ok(())
    }

    async fn switch_to_frame_by_name(&self, name: &str) -> Result<(), DriverError> {
        if self.state.lock().frame_names.contains(name) {
            Ok(())
        } else {
            Err(DriverError::NoSuchFrame(name.to_string()))
        }
    }

    async fn switch_to_frame_by_index(&self, index: u16) -> Result<(), DriverError> {
        if index < self.state.lock().frame_count {
            Ok(())
        } else {
            Err(DriverError::NoSuchFrame(format!("index {}", index)))
        }
    }

    async fn switch_to_frame_by_element(
        &self,
        element: &ElementHandle,
    ) -> Result<(), DriverError> {
        if self.state.lock().stale.contains(element.as_str()) {
            Err(DriverError::StaleElement(element.to_string()))
        } else {
            Ok(())
        }
    }

    async fn switch_to_default_content(&self) -> Result<(), DriverError> {
        Ok(())
    }

    async fn add_cookie(&self, cookie: &BrowserCookie) -> Result<(), DriverError> {
        let mut state = self.state.lock();
        if state.rejected_cookies.contains(&cookie.name) {
            return Err(DriverError::CookieRejected(format!(
                "invalid cookie domain for '{}'",
                cookie.name
            )));
        }
        state.cookies.push(cookie.clone());
        Ok(())
    }

    async fn find_elements(&self, locator: &Locator) -> Result<Vec<ElementHandle>, DriverError> {
        let mut state = self.state.lock();
        state.find_element_calls += 1;
        Ok(state
            .elements
            .get(&locator.to_string())
            .cloned()
            .unwrap_or_default())
    }

    async fn is_displayed(&self, element: &ElementHandle) -> Result<bool, DriverError> {
        let mut state = self.state.lock();
        state.is_displayed_calls += 1;
        if state.stale.contains(element.as_str()) {
            return Err(DriverError::StaleElement(element.to_string()));
        }
        match state.displayed_for.get_mut(element.as_str()) {
            Some(0) | None => Ok(false),
            Some(remaining) => {
                *remaining -= 1;
                Ok(true)
            }
        }
    }
}
