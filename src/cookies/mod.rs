//! Cookie model and translation
//!
//! HTTP-layer cookies, their browser-native counterparts, and the pure
//! translation between the two.

mod errors;
mod translator;
mod types;

pub use errors::CookieError;
pub use translator::CookieTranslator;
pub use types::{BrowserCookie, HttpCookie, SameSite};
