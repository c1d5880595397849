//! Client identification utilities
//!
//! Common functions for classifying callers via HTTP headers.

use axum::http::HeaderMap;
use std::net::IpAddr;

/// Header set by script callers (jQuery and friends) on asynchronous requests
pub const X_REQUESTED_WITH: &str = "x-requested-with";

/// Value of [`X_REQUESTED_WITH`] that marks a script caller
pub const XML_HTTP_REQUEST: &str = "XMLHttpRequest";

/// Whether the request was issued by a script rather than by page navigation
///
/// Header names are case-insensitive by construction of [`HeaderMap`];
/// the value is compared case-insensitively as well. Only the first
/// occurrence of the header is considered.
pub fn is_script_request(headers: &HeaderMap) -> bool {
    headers
        .get(X_REQUESTED_WITH)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case(XML_HTTP_REQUEST))
}

/// Extract client IP address from headers
///
/// Checks X-Forwarded-For first (for reverse proxy setups), then
/// X-Real-IP, then falls back to the direct connection IP.
pub fn extract_client_ip(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Option<IpAddr> {
    if let Some(xff) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first_ip) = xff.split(',').next() {
            if let Ok(ip) = first_ip.trim().parse::<IpAddr>() {
                return Some(ip);
            }
        }
    }
    if let Some(ip) = headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<IpAddr>().ok())
    {
        return Some(ip);
    }
    direct_ip
}
