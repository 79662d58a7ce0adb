//! Per-origin CORS policy and the ordered header-configuration steps.

mod error;
mod options;

pub use error::CorsError;
pub use options::{PolicyOptions, StringOrList};

use tracing::debug;

use crate::pattern::{self, WILDCARD};
use crate::request::{
    CorsRequest, ACCESS_CONTROL_REQUEST_HEADERS, ACCESS_CONTROL_REQUEST_METHOD, ORIGIN,
};
use crate::response::CorsResponse;

/// A policy field that is either the universal wildcard or an explicit
/// allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Allowed {
    /// Allow any value
    Any,
    /// Allow exactly these values
    List(Vec<String>),
}

impl Allowed {
    #[must_use]
    pub fn is_any(&self) -> bool {
        matches!(self, Allowed::Any)
    }

    /// True if this field is the wildcard, or every token of `required`
    /// (itself possibly comma-separated) is listed. An absent request value
    /// means nothing was requested, which is always permitted.
    #[must_use]
    pub fn contains_all(&self, required: Option<&str>) -> bool {
        match self {
            Allowed::Any => true,
            Allowed::List(values) => {
                pattern::contains_all(values, required.unwrap_or_default())
            }
        }
    }
}

/// The allow-rules applied to requests matching one origin key.
///
/// Constructed once during registration and read-only during request
/// handling; one policy may be registered under many origin keys. The
/// `configure_*` methods perform the ordered side effects that produce a
/// protocol-compliant response for the paired request.
///
/// # Example
///
/// ```rust
/// use corsgate::policy::CorsPolicy;
///
/// let mut policy = CorsPolicy::new();
/// policy
///     .set_allowed_origins("https://example.com")
///     .set_allowed_methods("GET, HEAD, POST")
///     .set_allowed_credentials(true)
///     .set_max_age(600);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsPolicy {
    allowed_origins: Allowed,
    allowed_headers: Allowed,
    allowed_methods: Allowed,
    allowed_credentials: bool,
    exposed_headers: Vec<String>,
    max_age: u32,
}

impl Default for CorsPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl CorsPolicy {
    /// Create a policy allowing any origin, header, and method, with no
    /// credentials, no exposed headers, and no preflight caching.
    #[must_use]
    pub fn new() -> Self {
        Self {
            allowed_origins: Allowed::Any,
            allowed_headers: Allowed::Any,
            allowed_methods: Allowed::Any,
            allowed_credentials: false,
            exposed_headers: Vec::new(),
            max_age: 0,
        }
    }

    /// Create the deny policy the resolver falls back to for unrecognized
    /// origins: an origin key nothing real can match and an empty method
    /// list, so the method gate deterministically fails closed through the
    /// same path as an ordinary mismatch.
    #[must_use]
    pub fn deny() -> Self {
        let mut policy = Self::new();
        policy.allowed_origins = Allowed::List(vec![Self::DENY_ORIGIN.to_string()]);
        policy.allowed_headers = Allowed::List(Vec::new());
        policy.allowed_methods = Allowed::List(Vec::new());
        policy
    }

    /// Synthetic origin key used by [`CorsPolicy::deny`]. The scheme is not
    /// routable and the host is empty, so no `Origin` header can equal it
    /// and no wildcard pattern reassembles to it.
    pub const DENY_ORIGIN: &'static str = "forbidden://";

    /// Set allowed origins. The wildcard token anywhere in the input
    /// collapses the whole field to the wildcard marker.
    pub fn set_allowed_origins(&mut self, origins: impl Into<StringOrList>) -> &mut Self {
        self.allowed_origins = Self::collapse(origins.into().into_tokens());
        self
    }

    /// Set allowed request headers, case-folded to lowercase.
    pub fn set_allowed_headers(&mut self, headers: impl Into<StringOrList>) -> &mut Self {
        let tokens = headers
            .into()
            .into_tokens()
            .into_iter()
            .map(|token| token.to_ascii_lowercase())
            .collect();
        self.allowed_headers = Self::collapse(tokens);
        self
    }

    /// Set allowed request methods, upper-cased.
    pub fn set_allowed_methods(&mut self, methods: impl Into<StringOrList>) -> &mut Self {
        let tokens = methods
            .into()
            .into_tokens()
            .into_iter()
            .map(|token| token.to_ascii_uppercase())
            .collect();
        self.allowed_methods = Self::collapse(tokens);
        self
    }

    pub fn set_allowed_credentials(&mut self, value: bool) -> &mut Self {
        self.allowed_credentials = value;
        self
    }

    /// Set the headers exposed to browser-side code. Wildcard tokens are
    /// silently discarded rather than dominating (credentialed responses
    /// may not expose `*`); an all-wildcard or empty input leaves the field
    /// unset.
    pub fn set_exposed_headers(&mut self, headers: impl Into<StringOrList>) -> &mut Self {
        let tokens: Vec<String> = headers
            .into()
            .into_tokens()
            .into_iter()
            .filter(|token| token != WILDCARD)
            .collect();
        if !tokens.is_empty() {
            self.exposed_headers = tokens;
        }
        self
    }

    /// Set the preflight cache duration in seconds. Zero means "do not
    /// emit the max-age header".
    pub fn set_max_age(&mut self, seconds: u32) -> &mut Self {
        self.max_age = seconds;
        self
    }

    fn collapse(tokens: Vec<String>) -> Allowed {
        if tokens.iter().any(|token| token == WILDCARD) {
            Allowed::Any
        } else {
            Allowed::List(tokens)
        }
    }

    #[must_use]
    pub fn allowed_origins(&self) -> &Allowed {
        &self.allowed_origins
    }

    #[must_use]
    pub fn allowed_headers(&self) -> &Allowed {
        &self.allowed_headers
    }

    #[must_use]
    pub fn allowed_methods(&self) -> &Allowed {
        &self.allowed_methods
    }

    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.allowed_credentials
    }

    #[must_use]
    pub fn exposed_headers(&self) -> &[String] {
        &self.exposed_headers
    }

    #[must_use]
    pub fn max_age(&self) -> u32 {
        self.max_age
    }

    /// Whether the request's `Origin` is covered by this policy. Listed
    /// entries may be literal origins or wildcard-subdomain patterns; a
    /// missing `Origin` is treated as nothing to check.
    #[must_use]
    pub fn origin_allowed(&self, req: &CorsRequest) -> bool {
        match (&self.allowed_origins, req.origin()) {
            (Allowed::Any, _) => true,
            (Allowed::List(_), None) => true,
            (Allowed::List(entries), Some(origin)) => entries
                .iter()
                .any(|entry| pattern::matches(entry, origin)),
        }
    }

    fn headers_allowed(&self, req: &CorsRequest) -> bool {
        let requested = req
            .access_control_request_headers()
            .map(str::to_ascii_lowercase);
        self.allowed_headers.contains_all(requested.as_deref())
    }

    fn method_allowed(&self, req: &CorsRequest) -> bool {
        let requested = req
            .access_control_request_method()
            .map(str::to_ascii_uppercase);
        self.allowed_methods.contains_all(requested.as_deref())
    }

    /// Whether this is an actual cross-origin request this policy covers,
    /// deciding if origin/credentials/exposed-headers configuration applies
    /// to a non-preflight response at all.
    #[must_use]
    pub fn is_actual_request(&self, req: &CorsRequest) -> bool {
        req.is_cors() && self.origin_allowed(req)
    }

    /// Configure `Access-Control-Allow-Origin` onto the response.
    ///
    /// When the policy is wildcard or lists the request's origin, the
    /// literal origin value is echoed back (never the wildcard token, to
    /// stay compatible with credentialed requests) and `Origin` is added to
    /// `Vary`. An unmatched origin is a no-op; the caller decides how to
    /// react.
    pub fn configure_allowed_origins(&self, req: &CorsRequest, res: &mut CorsResponse) -> &Self {
        if self.origin_allowed(req) {
            res.set_vary_header(ORIGIN);
            if let Some(origin) = req.origin() {
                res.set_access_control_allow_origin(origin);
            }
        } else {
            debug!(origin = req.origin(), "origin not allowed, skipping allow-origin header");
        }
        self
    }

    /// Configure `Access-Control-Allow-Headers` onto the response, echoing
    /// the request's header list verbatim. A disallowed list is a no-op. A
    /// missing `Access-Control-Request-Headers` is "nothing requested",
    /// which is always permitted.
    pub fn configure_allowed_headers(&self, req: &CorsRequest, res: &mut CorsResponse) -> &Self {
        if self.headers_allowed(req) {
            res.set_vary_header(ACCESS_CONTROL_REQUEST_HEADERS);
            if let Some(headers) = req.access_control_request_headers() {
                res.set_access_control_allow_headers(headers);
            }
        } else {
            debug!(
                headers = req.access_control_request_headers(),
                "headers not allowed, skipping allow-headers header"
            );
        }
        self
    }

    /// Configure `Access-Control-Allow-Methods` onto the response.
    ///
    /// Unlike origins and headers, a method the policy does not cover is a
    /// hard gate: browsers always allow the safe methods regardless of this
    /// header, so an unmet method requirement would otherwise abort the
    /// exchange uselessly.
    ///
    /// # Errors
    ///
    /// Returns [`CorsError::MethodNotAllowed`] when the requested method is
    /// outside the policy's allowed methods.
    pub fn configure_allowed_methods(
        &self,
        req: &CorsRequest,
        res: &mut CorsResponse,
    ) -> Result<&Self, CorsError> {
        if self.method_allowed(req) {
            res.set_vary_header(ACCESS_CONTROL_REQUEST_METHOD);
            if let Some(method) = req.access_control_request_method() {
                res.set_access_control_allow_methods(method);
            }
            return Ok(self);
        }

        Err(CorsError::MethodNotAllowed {
            method: req
                .access_control_request_method()
                .unwrap_or_default()
                .to_string(),
        })
    }

    /// Configure `Access-Control-Allow-Credentials` onto the response,
    /// unconditionally, as the string `"true"` or `"false"`.
    pub fn configure_allowed_credentials(&self, res: &mut CorsResponse) -> &Self {
        res.set_access_control_allow_credentials(if self.allowed_credentials {
            "true"
        } else {
            "false"
        });
        self
    }

    /// Configure `Access-Control-Expose-Headers` onto the response, only
    /// when a non-empty list was configured.
    pub fn configure_exposed_headers(&self, res: &mut CorsResponse) -> &Self {
        if !self.exposed_headers.is_empty() {
            res.set_access_control_expose_headers(&self.exposed_headers.join(","));
        }
        self
    }

    /// Configure `Access-Control-Max-Age` onto the response, only when a
    /// positive duration was configured.
    pub fn configure_max_age(&self, res: &mut CorsResponse) -> &Self {
        if self.max_age > 0 {
            res.set_access_control_max_age(self.max_age);
        }
        self
    }
}
