//! Window and frame error types

use thiserror::Error;

use crate::driver::DriverError;

/// Window and frame management errors
#[derive(Debug, Error)]
pub enum WindowError {
    #[error("Browser window index {index} out of range (open windows: {count})")]
    InvalidIndex { index: usize, count: usize },

    #[error("Browser window at index {index} no longer exists")]
    WindowGone { index: usize },

    #[error("No browser windows available to close")]
    NoWindows,

    #[error("Frame name or id cannot be empty")]
    EmptyFrameName,

    #[error("Frame not found: {locator}")]
    FrameNotFound { locator: String },

    #[error(transparent)]
    Driver(#[from] DriverError),
}
