//! HTTP service requests
//!
//! Thin client for driving the backend directly, next to the browser.
//! The cookie jar is explicit data: callers pass the cookies to send
//! and get back the cookies the response set, in order. No automatic
//! cookie store sits in between.

use std::time::Duration;

use reqwest::header::{HeaderValue, ACCEPT, CONTENT_TYPE, COOKIE, SET_COOKIE};
use reqwest::redirect::Policy;
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use super::Endpoint;
use crate::cookies::HttpCookie;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Service layer errors
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected HTTP status {status} from {endpoint}")]
    UnexpectedStatus { status: u16, endpoint: Endpoint },

    #[error("Cookie '{name}' cannot be encoded into a request header")]
    InvalidCookieValue { name: String },
}

/// Status code and response cookie jar of one service call.
#[derive(Debug)]
pub struct ServiceResponse {
    pub status: u16,
    /// Cookies from the response's `Set-Cookie` headers, in order.
    pub cookies: Vec<HttpCookie>,
    pub body: String,
}

/// HTTP client for direct backend calls.
pub struct ServiceClient {
    client: Client,
    base_url: Url,
}

impl ServiceClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ServiceError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ServiceError::InvalidBaseUrl(e.to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(USER_AGENT)
            .redirect(Policy::limited(10))
            .build()
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// GET an endpoint with the given cookie jar.
    pub async fn get(
        &self,
        endpoint: Endpoint,
        cookies: &[HttpCookie],
    ) -> Result<ServiceResponse, ServiceError> {
        let url = self.endpoint_url(endpoint)?;
        debug!("GET {}", url);

        let mut request = self
            .client
            .get(url)
            .header(ACCEPT, "text/html,application/xhtml+xml,*/*;q=0.8");
        if let Some(header) = cookie_header(cookies)? {
            request = request.header(COOKIE, header);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;
        Self::into_service_response(response).await
    }

    /// POST url-encoded form parameters to an endpoint with the given
    /// cookie jar.
    pub async fn post_form(
        &self,
        endpoint: Endpoint,
        form: &[(&str, String)],
        cookies: &[HttpCookie],
    ) -> Result<ServiceResponse, ServiceError> {
        let url = self.endpoint_url(endpoint)?;
        debug!("POST {}", url);

        let mut request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .form(form);
        if let Some(header) = cookie_header(cookies)? {
            request = request.header(COOKIE, header);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;
        Self::into_service_response(response).await
    }

    fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url, ServiceError> {
        self.base_url
            .join(endpoint.path())
            .map_err(|e| ServiceError::InvalidBaseUrl(e.to_string()))
    }

    async fn into_service_response(
        response: reqwest::Response,
    ) -> Result<ServiceResponse, ServiceError> {
        let status = response.status().as_u16();

        let mut cookies = Vec::new();
        for header in response.headers().get_all(SET_COOKIE) {
            let Ok(raw) = header.to_str() else {
                warn!("Skipping Set-Cookie header with non-ASCII bytes");
                continue;
            };
            match HttpCookie::parse_set_cookie(raw) {
                Some(cookie) => cookies.push(cookie),
                None => warn!("Skipping unparseable Set-Cookie header: '{}'", raw),
            }
        }
        debug!("Response status {} with {} cookies", status, cookies.len());

        let body = response
            .text()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        Ok(ServiceResponse {
            status,
            cookies,
            body,
        })
    }
}

/// Assemble a `Cookie` request header from the jar. Later same-name
/// cookies overwrite earlier ones, matching browser behavior.
///
/// A cookie whose name or value cannot live in a header (control
/// bytes, line breaks) fails the whole call with the offending
/// cookie's name. Dropping the header instead would send the request
/// unauthenticated and surface as a failure far from the root cause.
pub(crate) fn cookie_header(
    cookies: &[HttpCookie],
) -> Result<Option<HeaderValue>, ServiceError> {
    if cookies.is_empty() {
        return Ok(None);
    }
    let mut pairs: Vec<(String, String)> = Vec::new();
    for cookie in cookies {
        if HeaderValue::from_str(&format!("{}={}", cookie.name, cookie.value)).is_err() {
            return Err(ServiceError::InvalidCookieValue {
                name: cookie.name.clone(),
            });
        }
        match pairs.iter_mut().find(|(name, _)| *name == cookie.name) {
            Some((_, value)) => *value = cookie.value.clone(),
            None => pairs.push((cookie.name.clone(), cookie.value.clone())),
        }
    }
    let header = pairs
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join("; ");
    let header = HeaderValue::from_str(&header).map_err(|_| ServiceError::InvalidCookieValue {
        name: cookies[0].name.clone(),
    })?;
    Ok(Some(header))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_header_assembly() {
        let jar = vec![
            HttpCookie::new("session_id", "abc"),
            HttpCookie::new("cart", "2"),
        ];
        let header = cookie_header(&jar).unwrap().unwrap();
        assert_eq!(header.to_str().unwrap(), "session_id=abc; cart=2");
    }

    #[test]
    fn test_cookie_header_later_same_name_wins() {
        let jar = vec![
            HttpCookie::new("session_id", "old"),
            HttpCookie::new("session_id", "new"),
        ];
        let header = cookie_header(&jar).unwrap().unwrap();
        assert_eq!(header.to_str().unwrap(), "session_id=new");
    }

    #[test]
    fn test_empty_jar_means_no_header() {
        assert!(cookie_header(&[]).unwrap().is_none());
    }

    #[test]
    fn test_unencodable_cookie_fails_with_its_name() {
        // A jar with one bad value must not drop valid auth cookies on
        // the floor and send the request unauthenticated.
        let jar = vec![
            HttpCookie::new("auth_token", "good-value"),
            HttpCookie::new("weird", "bad\nvalue"),
        ];
        match cookie_header(&jar) {
            Err(ServiceError::InvalidCookieValue { name }) => assert_eq!(name, "weird"),
            other => panic!("expected InvalidCookieValue, got {:?}", other),
        }
    }

    #[test]
    fn test_base_url_must_parse() {
        assert!(matches!(
            ServiceClient::new("not a url", 30),
            Err(ServiceError::InvalidBaseUrl(_))
        ));
        assert!(ServiceClient::new("https://askomdch.com", 30).is_ok());
    }
}
