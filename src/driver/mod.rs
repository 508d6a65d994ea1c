//! Browser driver abstraction
//!
//! The bridge consumes the browser through the [`DriverCapabilities`]
//! trait rather than a concrete WebDriver/CDP binding. `FakeDriver` is a
//! scripted double for wiring suites without a live browser.

mod capabilities;
mod fake;

pub use capabilities::{DriverCapabilities, DriverError, ElementHandle, Locator, WindowHandle};
pub use fake::FakeDriver;
