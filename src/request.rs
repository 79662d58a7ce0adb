//! Read-only request view used to classify incoming traffic.

use std::sync::Arc;

use http::Method;
use smallvec::SmallVec;

/// Maximum number of headers stored inline before spilling to the heap.
pub const MAX_INLINE_HEADERS: usize = 16;

/// Stack-allocated header storage.
///
/// Header names use `Arc<str>` because the CORS header names repeat across
/// requests and `Arc::clone()` is an O(1) atomic increment; values are
/// per-request data and stay `String`.
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// Headers attached to a preflight request by the browser.
pub const ORIGIN: &str = "Origin";
pub const ACCESS_CONTROL_REQUEST_METHOD: &str = "Access-Control-Request-Method";
pub const ACCESS_CONTROL_REQUEST_HEADERS: &str = "Access-Control-Request-Headers";

/// The slice of an incoming HTTP request the CORS engine needs: the method
/// and named header values. The host framework builds one of these per
/// request; the engine never mutates it.
#[derive(Debug, Clone)]
pub struct CorsRequest {
    /// HTTP method (GET, OPTIONS, etc.)
    pub method: Method,
    /// Request headers
    pub headers: HeaderVec,
}

impl CorsRequest {
    #[must_use]
    pub fn new(method: Method, headers: HeaderVec) -> Self {
        Self { method, headers }
    }

    /// Get a header value by name (case-insensitive).
    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Determine if the request carries the given header.
    #[inline]
    #[must_use]
    pub fn has_header(&self, name: &str) -> bool {
        self.get_header(name).is_some()
    }

    /// The `Origin` header value, if any.
    #[must_use]
    pub fn origin(&self) -> Option<&str> {
        self.get_header(ORIGIN)
    }

    /// The `Access-Control-Request-Method` header value, if any.
    #[must_use]
    pub fn access_control_request_method(&self) -> Option<&str> {
        self.get_header(ACCESS_CONTROL_REQUEST_METHOD)
    }

    /// The `Access-Control-Request-Headers` header value, if any.
    #[must_use]
    pub fn access_control_request_headers(&self) -> Option<&str> {
        self.get_header(ACCESS_CONTROL_REQUEST_HEADERS)
    }

    /// The `Host` header value, if any.
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.get_header("Host")
    }

    /// Determine if this is a cross-origin request at all.
    #[must_use]
    pub fn is_cors(&self) -> bool {
        self.has_header(ORIGIN)
    }

    /// Determine if this is a CORS preflight request.
    ///
    /// Requires `OPTIONS` plus all three preflight headers, including
    /// `Access-Control-Request-Headers` even when the eventual request
    /// carries no custom headers. That is a stricter-than-minimum reading
    /// of the protocol, kept deliberately.
    #[must_use]
    pub fn is_preflight(&self) -> bool {
        self.method == Method::OPTIONS
            && self.has_header(ORIGIN)
            && self.has_header(ACCESS_CONTROL_REQUEST_METHOD)
            && self.has_header(ACCESS_CONTROL_REQUEST_HEADERS)
    }
}
