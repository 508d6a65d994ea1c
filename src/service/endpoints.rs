//! Backend endpoints exercised by the service layer

use std::fmt;

/// Application endpoints, relative to the configured base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Store,
    Account,
    /// AJAX add-to-cart call.
    AddToCart,
    Checkout,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Store => "/store",
            Endpoint::Account => "/account",
            Endpoint::AddToCart => "/?wc-ajax=add_to_cart",
            Endpoint::Checkout => "/checkout",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(Endpoint::Store.path(), "/store");
        assert_eq!(Endpoint::AddToCart.path(), "/?wc-ajax=add_to_cart");
        assert_eq!(Endpoint::Checkout.to_string(), "/checkout");
    }
}
