//! Session bridging
//!
//! Translates server-issued session state into the browser's live
//! cookie store.

mod bridge;

pub use bridge::{SessionBridge, SessionError};
