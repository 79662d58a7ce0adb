//! Response accumulator that collects the CORS headers for one request.

use std::sync::Arc;

use http::StatusCode;

use crate::pattern;
use crate::request::HeaderVec;

/// Headers attached to a preflight or actual response by the server.
pub const VARY: &str = "Vary";
pub const ACCESS_CONTROL_ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
pub const ACCESS_CONTROL_ALLOW_HEADERS: &str = "Access-Control-Allow-Headers";
pub const ACCESS_CONTROL_ALLOW_METHODS: &str = "Access-Control-Allow-Methods";
pub const ACCESS_CONTROL_ALLOW_CREDENTIALS: &str = "Access-Control-Allow-Credentials";
pub const ACCESS_CONTROL_EXPOSE_HEADERS: &str = "Access-Control-Expose-Headers";
pub const ACCESS_CONTROL_MAX_AGE: &str = "Access-Control-Max-Age";

/// The slice of the outgoing HTTP response the CORS engine writes: the
/// status code and named header values. The host framework folds these back
/// into its native response type.
///
/// `Vary` is additive and deduplicated; every other CORS header is written
/// at most once per request lifecycle.
#[derive(Debug, Clone)]
pub struct CorsResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderVec,
}

impl Default for CorsResponse {
    fn default() -> Self {
        Self::new(StatusCode::OK)
    }
}

impl CorsResponse {
    #[must_use]
    pub fn new(status: StatusCode) -> Self {
        Self {
            status: status.as_u16(),
            headers: HeaderVec::new(),
        }
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

    /// Determine if the response carries the given header.
    #[inline]
    #[must_use]
    pub fn has_header(&self, name: &str) -> bool {
        self.get_header(name).is_some()
    }

    /// Set a header, replacing any existing value (case-insensitive).
    pub fn set_header(&mut self, name: &str, value: String) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((Arc::from(name), value));
    }

    pub fn set_status(&mut self, status: StatusCode) {
        self.status = status.as_u16();
    }

    /// Append a token to the `Vary` header, comma-space joined, never
    /// duplicating a token already present.
    pub fn set_vary_header(&mut self, value: &str) {
        match self.get_header(VARY) {
            None => self.set_header(VARY, value.to_string()),
            Some(existing) => {
                if !pattern::contains_all(&pattern::split_list(existing), value) {
                    let joined = format!("{existing}, {value}");
                    self.set_header(VARY, joined);
                }
            }
        }
    }

    pub fn set_access_control_allow_origin(&mut self, value: &str) {
        self.set_header(ACCESS_CONTROL_ALLOW_ORIGIN, value.to_string());
    }

    pub fn set_access_control_allow_headers(&mut self, value: &str) {
        self.set_header(ACCESS_CONTROL_ALLOW_HEADERS, value.to_string());
    }

    pub fn set_access_control_allow_methods(&mut self, value: &str) {
        self.set_header(ACCESS_CONTROL_ALLOW_METHODS, value.to_string());
    }

    pub fn set_access_control_allow_credentials(&mut self, value: &str) {
        self.set_header(ACCESS_CONTROL_ALLOW_CREDENTIALS, value.to_string());
    }

    pub fn set_access_control_expose_headers(&mut self, value: &str) {
        self.set_header(ACCESS_CONTROL_EXPOSE_HEADERS, value.to_string());
    }

    pub fn set_access_control_max_age(&mut self, seconds: u32) {
        self.set_header(ACCESS_CONTROL_MAX_AGE, seconds.to_string());
    }
}
