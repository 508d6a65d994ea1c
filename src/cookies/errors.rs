//! Cookie error types

use thiserror::Error;

/// Cookie translation and injection errors
#[derive(Debug, Error)]
pub enum CookieError {
    #[error("Invalid cookie: {reason}")]
    InvalidCookie { reason: String },

    #[error("Browser rejected cookie '{name}': {reason}")]
    InjectionRejected { name: String, reason: String },
}
