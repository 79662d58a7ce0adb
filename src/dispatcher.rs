//! Per-request policy resolution and the preflight/actual header flows.

use std::sync::Arc;

use http::StatusCode;
use tracing::debug;

use crate::pattern::WILDCARD;
use crate::policy::{CorsError, CorsPolicy};
use crate::registry::PolicyRegistry;
use crate::request::CorsRequest;
use crate::response::CorsResponse;

/// Selects which registered policy applies to each incoming request and
/// replays the header-configuration sequence against its response.
///
/// Resolution order, checked per request:
///
/// 1. The request's `Origin` equals the server's own origin, or the
///    registry is empty: a fresh wildcard-open policy. Same-site calls and
///    unconfigured servers are permissive by default.
/// 2. A wildcard-key policy is registered: it wins over every narrower
///    entry. That precedence is a deliberate rule, not an oversight.
/// 3. The origin resolves through an exact or pattern key: that policy.
/// 4. Otherwise: the deny policy, so unrecognized origins fail closed
///    through the ordinary method gate instead of a separate branch.
///
/// The server's own origin is an externally supplied configuration string;
/// the dispatcher never infers it from the environment.
#[derive(Debug, Clone, Default)]
pub struct CorsDispatcher {
    registry: PolicyRegistry,
    own_origin: Option<String>,
}

impl CorsDispatcher {
    #[must_use]
    pub fn new(registry: PolicyRegistry) -> Self {
        Self {
            registry,
            own_origin: None,
        }
    }

    /// Set the server's own origin (scheme+host), enabling the same-site
    /// bypass.
    #[must_use]
    pub fn with_own_origin(mut self, origin: impl Into<String>) -> Self {
        self.own_origin = Some(origin.into());
        self
    }

    #[must_use]
    pub fn registry(&self) -> &PolicyRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut PolicyRegistry {
        &mut self.registry
    }

    fn is_same_origin(&self, req: &CorsRequest) -> bool {
        match (req.origin(), self.own_origin.as_deref()) {
            (Some(origin), Some(own)) => origin.eq_ignore_ascii_case(own),
            _ => false,
        }
    }

    /// Resolve the policy governing this request.
    #[must_use]
    pub fn resolve(&self, req: &CorsRequest) -> Arc<CorsPolicy> {
        if self.registry.is_empty() || self.is_same_origin(req) {
            return Arc::new(CorsPolicy::new());
        }

        if let Some(policy) = self.registry.get(WILDCARD) {
            return Arc::clone(policy);
        }

        if let Some(policy) = req.origin().and_then(|origin| self.registry.get(origin)) {
            return Arc::clone(policy);
        }

        debug!(origin = req.origin(), "no policy matched, resolving to deny policy");
        Arc::new(CorsPolicy::deny())
    }

    /// Answer a preflight request.
    ///
    /// Replays origins, headers, methods, and max-age configuration in that
    /// order onto a fresh `204 No Content` response, telling the browser
    /// the actual request may follow.
    ///
    /// # Errors
    ///
    /// Returns [`CorsError::MethodNotAllowed`] when the requested method is
    /// outside the resolved policy, including the deny-policy path taken by
    /// unrecognized origins.
    pub fn handle_preflight(&self, req: &CorsRequest) -> Result<CorsResponse, CorsError> {
        let policy = self.resolve(req);
        let mut res = CorsResponse::new(StatusCode::NO_CONTENT);
        policy
            .configure_allowed_origins(req, &mut res)
            .configure_allowed_headers(req, &mut res)
            .configure_allowed_methods(req, &mut res)?
            .configure_max_age(&mut res);
        Ok(res)
    }

    /// Apply CORS headers to an actual (non-preflight) response.
    ///
    /// Origin, credentials, and exposed-headers configuration run only when
    /// the request is cross-origin and its origin is covered by the
    /// resolved policy; anything else leaves the response untouched.
    pub fn apply_actual(&self, req: &CorsRequest, res: &mut CorsResponse) {
        let policy = self.resolve(req);
        if policy.is_actual_request(req) {
            policy
                .configure_allowed_origins(req, res)
                .configure_allowed_credentials(res)
                .configure_exposed_headers(res);
        } else {
            debug!(
                origin = req.origin(),
                "request is same-origin or unmatched, leaving response untouched"
            );
        }
    }
}
