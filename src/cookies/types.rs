//! Cookie data model
//!
//! Two representations of the same logical cookie: [`HttpCookie`] as it
//! comes off an HTTP response, and [`BrowserCookie`] as the browser's
//! cookie store wants it (normalized `SameSite` vocabulary).

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Normalized SameSite policy as browsers understand it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SameSite {
    Strict,
    Lax,
    None,
    /// Attribute absent or unrecognized.
    Unset,
}

impl SameSite {
    /// Normalize the free-form HTTP attribute vocabulary. Unrecognized
    /// values map to `Unset` rather than failing the whole cookie.
    pub fn from_attribute(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "strict" => SameSite::Strict,
            "lax" => SameSite::Lax,
            "none" => SameSite::None,
            _ => SameSite::Unset,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
            SameSite::Unset => "",
        }
    }
}

/// A cookie as produced by an HTTP response.
///
/// `same_site` keeps the raw attribute text; normalization happens in
/// the translator. `expiry` absent means a session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpCookie {
    pub name: String,
    pub value: String,
    pub domain: Option<String>,
    pub path: Option<String>,
    pub expiry: Option<DateTime<Utc>>,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: Option<String>,
}

impl HttpCookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: None,
            path: None,
            expiry: None,
            secure: false,
            http_only: false,
            same_site: None,
        }
    }

    /// Parse one `Set-Cookie` header value. Returns `None` when the
    /// header has no name=value pair to work with; unknown attributes
    /// are ignored, `Max-Age` wins over `Expires` when both appear.
    pub fn parse_set_cookie(header: &str) -> Option<Self> {
        let mut parts = header.split(';');

        let pair = parts.next()?.trim();
        let eq = pair.find('=')?;
        let (name, value) = pair.split_at(eq);
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let mut cookie = HttpCookie::new(name, value[1..].trim());

        let mut max_age: Option<i64> = None;
        for attribute in parts {
            let attribute = attribute.trim();
            let (key, val) = match attribute.find('=') {
                Some(pos) => (&attribute[..pos], attribute[pos + 1..].trim()),
                None => (attribute, ""),
            };
            match key.trim().to_ascii_lowercase().as_str() {
                "domain" => cookie.domain = Some(val.trim_start_matches('.').to_string()),
                "path" => cookie.path = Some(val.to_string()),
                "secure" => cookie.secure = true,
                "httponly" => cookie.http_only = true,
                "samesite" => cookie.same_site = Some(val.to_string()),
                "expires" => {
                    match DateTime::parse_from_rfc2822(val) {
                        Ok(instant) => cookie.expiry = Some(instant.with_timezone(&Utc)),
                        Err(e) => debug!("Ignoring unparseable Expires '{}': {}", val, e),
                    }
                }
                "max-age" => max_age = val.parse().ok(),
                _ => {}
            }
        }

        if let Some(seconds) = max_age {
            cookie.expiry = Some(Utc::now() + Duration::seconds(seconds));
        }

        Some(cookie)
    }
}

/// A cookie in the browser's native representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserCookie {
    pub name: String,
    pub value: String,
    /// Absent means "apply to the current browsing context"; the
    /// translator never invents a domain.
    pub domain: Option<String>,
    pub path: Option<String>,
    /// Absent means a session cookie.
    pub expiry: Option<DateTime<Utc>>,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_same_site_normalization() {
        assert_eq!(SameSite::from_attribute("Strict"), SameSite::Strict);
        assert_eq!(SameSite::from_attribute("lax"), SameSite::Lax);
        assert_eq!(SameSite::from_attribute(" NONE "), SameSite::None);
        assert_eq!(SameSite::from_attribute("whatever"), SameSite::Unset);
        assert_eq!(SameSite::from_attribute(""), SameSite::Unset);
    }

    #[test]
    fn test_parse_set_cookie_full() {
        let cookie = HttpCookie::parse_set_cookie(
            "session_id=abc123; Domain=.askomdch.com; Path=/; \
             Expires=Wed, 21 Oct 2065 07:28:00 GMT; Secure; HttpOnly; SameSite=Lax",
        )
        .unwrap();

        assert_eq!(cookie.name, "session_id");
        assert_eq!(cookie.value, "abc123");
        assert_eq!(cookie.domain.as_deref(), Some("askomdch.com"));
        assert_eq!(cookie.path.as_deref(), Some("/"));
        assert_eq!(
            cookie.expiry,
            Some(Utc.with_ymd_and_hms(2065, 10, 21, 7, 28, 0).unwrap())
        );
        assert!(cookie.secure);
        assert!(cookie.http_only);
        assert_eq!(cookie.same_site.as_deref(), Some("Lax"));
    }

    #[test]
    fn test_parse_set_cookie_minimal() {
        let cookie = HttpCookie::parse_set_cookie("woocommerce_items_in_cart=1").unwrap();
        assert_eq!(cookie.name, "woocommerce_items_in_cart");
        assert_eq!(cookie.value, "1");
        assert_eq!(cookie.domain, None);
        assert_eq!(cookie.expiry, None);
        assert!(!cookie.secure);
        assert!(!cookie.http_only);
    }

    #[test]
    fn test_parse_set_cookie_max_age_wins_over_expires() {
        let cookie = HttpCookie::parse_set_cookie(
            "sid=x; Expires=Wed, 21 Oct 2015 07:28:00 GMT; Max-Age=3600",
        )
        .unwrap();
        let expiry = cookie.expiry.unwrap();
        assert!(expiry > Utc::now() + Duration::seconds(3500));
        assert!(expiry < Utc::now() + Duration::seconds(3700));
    }

    #[test]
    fn test_parse_set_cookie_malformed() {
        assert_eq!(HttpCookie::parse_set_cookie(""), None);
        assert_eq!(HttpCookie::parse_set_cookie("no-equals-sign"), None);
        assert_eq!(HttpCookie::parse_set_cookie("=value-without-name"), None);
    }

    #[test]
    fn test_parse_set_cookie_keeps_value_with_equals() {
        let cookie = HttpCookie::parse_set_cookie("token=a=b=c; Path=/").unwrap();
        assert_eq!(cookie.value, "a=b=c");
    }
}
