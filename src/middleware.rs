//! Middleware seam for host HTTP servers.

use std::time::Duration;

use http::StatusCode;
use tracing::warn;

use crate::dispatcher::CorsDispatcher;
use crate::request::CorsRequest;
use crate::response::CorsResponse;

/// Hook points a host server drives around its handler: `before` may
/// short-circuit with a response, `after` mutates the handler's response in
/// place.
pub trait Middleware: Send + Sync {
    fn before(&self, _req: &CorsRequest) -> Option<CorsResponse> {
        None
    }
    fn after(&self, _req: &CorsRequest, _res: &mut CorsResponse, _latency: Duration) {}
}

/// CORS enforcement as a middleware.
///
/// Preflight requests are answered in `before` without reaching the
/// handler: `204 No Content` with the configured allow headers, or `403
/// Forbidden` when the policy rejects the requested method (which is also
/// how unrecognized origins surface, via the resolver's deny policy). All
/// other requests proceed to the handler and pick up their CORS headers in
/// `after`.
pub struct CorsMiddleware {
    dispatcher: CorsDispatcher,
}

impl CorsMiddleware {
    #[must_use]
    pub fn new(dispatcher: CorsDispatcher) -> Self {
        Self { dispatcher }
    }

    #[must_use]
    pub fn dispatcher(&self) -> &CorsDispatcher {
        &self.dispatcher
    }
}

impl Middleware for CorsMiddleware {
    fn before(&self, req: &CorsRequest) -> Option<CorsResponse> {
        if !req.is_preflight() {
            return None;
        }

        match self.dispatcher.handle_preflight(req) {
            Ok(res) => Some(res),
            Err(err) => {
                warn!(origin = req.origin(), error = %err, "preflight denied");
                Some(CorsResponse::new(StatusCode::FORBIDDEN))
            }
        }
    }

    fn after(&self, req: &CorsRequest, res: &mut CorsResponse, _latency: Duration) {
        self.dispatcher.apply_actual(req, res);
    }
}
