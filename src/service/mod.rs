//! Direct backend service layer
//!
//! Drives the application through HTTP next to the browser; the cookie
//! jars it returns are what the session bridge injects.

mod cart;
mod endpoints;
mod request;

pub use cart::CartService;
pub use endpoints::Endpoint;
pub use request::{ServiceClient, ServiceError, ServiceResponse};
