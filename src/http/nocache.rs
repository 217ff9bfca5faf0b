//! No-cache header injection module
//!
//! Appends the cache-disabling header triplet to every outgoing response,
//! after whatever headers the static file handler already set.

use hyper::header::{HeaderValue, CACHE_CONTROL, EXPIRES, PRAGMA};
use hyper::Response;

/// `Cache-Control` value that forbids storing or reusing the response.
pub const CACHE_CONTROL_VALUE: &str = "no-store, no-cache, must-revalidate, max-age=0";

/// `Pragma` value for HTTP/1.0 clients and proxies.
pub const PRAGMA_VALUE: &str = "no-cache";

/// `Expires` value; `0` means "already expired".
pub const EXPIRES_VALUE: &str = "0";

/// Append the no-cache triplet to a response.
///
/// Runs unconditionally for every response the server emits, including
/// error responses. `HeaderMap` preserves insertion order for distinct
/// names, so the triplet lands after the handler's own headers.
pub fn apply<B>(response: &mut Response<B>) {
    let headers = response.headers_mut();
    headers.append(CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL_VALUE));
    headers.append(PRAGMA, HeaderValue::from_static(PRAGMA_VALUE));
    headers.append(EXPIRES, HeaderValue::from_static(EXPIRES_VALUE));
}
