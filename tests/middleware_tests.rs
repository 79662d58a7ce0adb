use std::time::Duration;

use corsgate::response::CorsResponse;
use corsgate::{CorsManager, CorsMiddleware, Middleware};
use http::Method;

mod common;
use common::{init_tracing, preflight, request};

fn middleware() -> CorsMiddleware {
    let mut manager = CorsManager::new();
    manager
        .origins("https://app.example.com")
        .methods("GET, POST")
        .credentials(true)
        .exposed_headers("X-Request-Id");
    CorsMiddleware::new(manager.into_dispatcher())
}

#[test]
fn test_before_answers_preflight_with_204() {
    init_tracing();
    let mw = middleware();
    let req = preflight(&[
        ("Origin", "https://app.example.com"),
        ("Access-Control-Request-Method", "POST"),
        ("Access-Control-Request-Headers", "content-type"),
    ]);

    let res = mw.before(&req).expect("preflight short-circuits");

    assert_eq!(res.status, 204);
    assert_eq!(
        res.get_header("Access-Control-Allow-Origin"),
        Some("https://app.example.com")
    );
    assert_eq!(res.get_header("Access-Control-Allow-Methods"), Some("POST"));
    assert_eq!(
        res.get_header("Access-Control-Allow-Headers"),
        Some("content-type")
    );
}

#[test]
fn test_before_rejects_denied_preflight_with_403() {
    init_tracing();
    let mw = middleware();
    let req = preflight(&[
        ("Origin", "https://app.example.com"),
        ("Access-Control-Request-Method", "DELETE"),
        ("Access-Control-Request-Headers", "content-type"),
    ]);

    let res = mw.before(&req).expect("denied preflight short-circuits");

    assert_eq!(res.status, 403);
    assert!(res.headers.is_empty());
}

#[test]
fn test_before_rejects_unknown_origin_with_403() {
    let mw = middleware();
    let req = preflight(&[
        ("Origin", "https://evil.example.net"),
        ("Access-Control-Request-Method", "GET"),
        ("Access-Control-Request-Headers", "content-type"),
    ]);

    let res = mw.before(&req).expect("denied preflight short-circuits");
    assert_eq!(res.status, 403);
}

#[test]
fn test_before_ignores_non_preflight_requests() {
    let mw = middleware();

    // OPTIONS without the full preflight header set is not a preflight.
    let bare_options = preflight(&[("Origin", "https://app.example.com")]);
    assert!(mw.before(&bare_options).is_none());

    let get = request(Method::GET, &[("Origin", "https://app.example.com")]);
    assert!(mw.before(&get).is_none());
}

#[test]
fn test_after_decorates_actual_response() {
    let mw = middleware();
    let req = request(Method::GET, &[("Origin", "https://app.example.com")]);
    let mut res = CorsResponse::default();

    mw.after(&req, &mut res, Duration::from_millis(1));

    assert_eq!(
        res.get_header("Access-Control-Allow-Origin"),
        Some("https://app.example.com")
    );
    assert_eq!(
        res.get_header("Access-Control-Allow-Credentials"),
        Some("true")
    );
    assert_eq!(
        res.get_header("Access-Control-Expose-Headers"),
        Some("X-Request-Id")
    );
    assert_eq!(res.get_header("Vary"), Some("Origin"));
}

#[test]
fn test_after_skips_non_cors_requests() {
    let mw = middleware();
    let req = request(Method::GET, &[]);
    let mut res = CorsResponse::default();

    mw.after(&req, &mut res, Duration::from_millis(1));

    assert!(res.headers.is_empty());
}
