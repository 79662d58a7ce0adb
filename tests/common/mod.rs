#![allow(dead_code)]

use std::sync::Arc;

use corsgate::{CorsRequest, HeaderVec};
use http::Method;
use tracing_subscriber::EnvFilter;

/// Install a test subscriber once per process; repeated calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn header_vec(pairs: &[(&str, &str)]) -> HeaderVec {
    let mut headers = HeaderVec::new();
    for (name, value) in pairs {
        headers.push((Arc::from(*name), (*value).to_string()));
    }
    headers
}

/// Build a request the way a browser sends it, headers as given.
pub fn request(method: Method, pairs: &[(&str, &str)]) -> CorsRequest {
    CorsRequest::new(method, header_vec(pairs))
}

/// Build an OPTIONS request carrying the given headers.
pub fn preflight(pairs: &[(&str, &str)]) -> CorsRequest {
    request(Method::OPTIONS, pairs)
}
