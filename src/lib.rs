//! # corsgate
//!
//! **corsgate** enforces Cross-Origin Resource Sharing (CORS) policy for an
//! HTTP server: given an incoming request and a set of registered
//! per-origin policies, it decides whether the request is permitted and
//! computes the exact response headers the CORS protocol requires.
//!
//! ## Overview
//!
//! Policies are registered per origin, per wildcard-subdomain pattern
//! (`*.example.com`), or under the bare wildcard. A dispatcher resolves the
//! policy governing each request, classifies the request as preflight,
//! actual cross-origin, or plain same-origin, and replays the ordered
//! header-configuration sequence onto the response: successful preflights
//! are answered `204 No Content` with the allow headers, actual responses
//! pick up origin/credentials/exposed headers, and the `Vary` contract is
//! maintained across both. "Allowed" means "matches a registered pattern";
//! no DNS or TLS identity validation is involved.
//!
//! ## Architecture
//!
//! - **[`pattern`]** - Wildcard domain-suffix matching over `.`-delimited segments
//! - **[`policy`]** - Per-origin allow-rules and the `configure_*` header steps
//! - **[`registry`]** - Insertion-ordered origin-key to policy mapping
//! - **[`request`]** / **[`response`]** - Thin header views the engine reads and writes
//! - **[`dispatcher`]** - Per-request policy resolution and the preflight/actual flows
//! - **[`manager`]** - Fluent and options-table registration
//! - **[`middleware`]** - `before`/`after` seam for host servers
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use corsgate::{CorsManager, CorsMiddleware, CorsRequest, HeaderVec, Middleware};
//! use http::Method;
//!
//! let mut manager = CorsManager::new();
//! manager
//!     .origins("https://app.example.com, *.example.org")
//!     .methods("GET, HEAD, POST")
//!     .credentials(true);
//!
//! let cors = CorsMiddleware::new(manager.into_dispatcher());
//!
//! let mut headers = HeaderVec::new();
//! headers.push((Arc::from("Origin"), "https://app.example.com".to_string()));
//! headers.push((Arc::from("Access-Control-Request-Method"), "POST".to_string()));
//! headers.push((Arc::from("Access-Control-Request-Headers"), "content-type".to_string()));
//! let preflight = CorsRequest::new(Method::OPTIONS, headers);
//!
//! let res = cors.before(&preflight).expect("preflight is answered directly");
//! assert_eq!(res.status, 204);
//! ```

pub mod dispatcher;
pub mod manager;
pub mod middleware;
pub mod pattern;
pub mod policy;
pub mod registry;
pub mod request;
pub mod response;

pub use dispatcher::CorsDispatcher;
pub use manager::{CorsManager, PolicyRegistrar};
pub use middleware::{CorsMiddleware, Middleware};
pub use policy::{Allowed, CorsError, CorsPolicy, PolicyOptions, StringOrList};
pub use registry::PolicyRegistry;
pub use request::{CorsRequest, HeaderVec, MAX_INLINE_HEADERS};
pub use response::CorsResponse;
