//! Cart operations via direct service calls
//!
//! Adds items to the cart without going through the UI, keeping the
//! session cookie jar as an immutable snapshot that is replaced, never
//! mutated in place, after each call.

use std::sync::Arc;

use tracing::info;

use super::{Endpoint, ServiceClient, ServiceError};
use crate::cookies::HttpCookie;

/// Cart service over the backend's AJAX endpoints.
///
/// Holds the current cookie jar snapshot; `cookies()` hands it to the
/// session bridge for browser injection.
pub struct CartService {
    client: Arc<ServiceClient>,
    cookies: Vec<HttpCookie>,
}

impl CartService {
    pub fn new(client: Arc<ServiceClient>, cookies: Vec<HttpCookie>) -> Self {
        Self { client, cookies }
    }

    /// The cookie jar as of the last completed call.
    pub fn cookies(&self) -> &[HttpCookie] {
        &self.cookies
    }

    /// Add a product to the cart via the AJAX endpoint.
    ///
    /// Requires a 200 response; on success the held jar is replaced by
    /// the response cookies merged over it, later same-name cookies
    /// overwriting earlier ones.
    pub async fn add_to_cart(&mut self, product_id: u32, quantity: u32) -> Result<(), ServiceError> {
        let form = [
            ("product_sku", String::new()),
            ("product_id", product_id.to_string()),
            ("quantity", quantity.to_string()),
        ];

        let response = self
            .client
            .post_form(Endpoint::AddToCart, &form, &self.cookies)
            .await?;

        if response.status != 200 {
            return Err(ServiceError::UnexpectedStatus {
                status: response.status,
                endpoint: Endpoint::AddToCart,
            });
        }

        self.cookies = merge_cookies(&self.cookies, response.cookies);
        info!(
            "Added product {} (quantity {}) to the cart, jar now holds {} cookies",
            product_id,
            quantity,
            self.cookies.len()
        );
        Ok(())
    }
}

/// Merge response cookies over the current jar: same-name cookies are
/// replaced in place, new ones appended in response order.
fn merge_cookies(current: &[HttpCookie], updates: Vec<HttpCookie>) -> Vec<HttpCookie> {
    let mut merged = current.to_vec();
    for update in updates {
        match merged.iter_mut().find(|c| c.name == update.name) {
            Some(existing) => *existing = update,
            None => merged.push(update),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_replaces_same_name_in_place() {
        let current = vec![
            HttpCookie::new("session_id", "old"),
            HttpCookie::new("cart", "1"),
        ];
        let updates = vec![HttpCookie::new("session_id", "new")];

        let merged = merge_cookies(&current, updates);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].name, "session_id");
        assert_eq!(merged[0].value, "new");
        assert_eq!(merged[1].name, "cart");
    }

    #[test]
    fn test_merge_appends_new_cookies_in_order() {
        let current = vec![HttpCookie::new("session_id", "abc")];
        let updates = vec![
            HttpCookie::new("cart", "1"),
            HttpCookie::new("items", "2"),
        ];

        let merged = merge_cookies(&current, updates);
        let names: Vec<&str> = merged.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["session_id", "cart", "items"]);
    }

    #[test]
    fn test_merge_with_empty_jar() {
        let merged = merge_cookies(&[], vec![HttpCookie::new("session_id", "abc")]);
        assert_eq!(merged.len(), 1);
    }
}
