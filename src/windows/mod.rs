//! Window and frame management
//!
//! Multiplexes browser windows/tabs and frames over one session, with
//! fresh enumeration before every index-based operation.

mod controller;
mod errors;

pub use controller::{FrameLocator, WindowFrameController};
pub use errors::WindowError;
