//! Router construction and the cross-origin contract.
//!
//! The hosted viewer is a foreign origin fetching byte ranges from this
//! server, so every response must grant any origin read access, expose the
//! range-related headers, and advertise byte-range support:
//!
//! - `Access-Control-Allow-Origin: *` on every response, including errors
//!   and preflights
//! - `Access-Control-Expose-Headers: content-length, content-range,
//!   accept-ranges` so the viewer can read them
//! - `Range` and `Content-Type` allowed as request headers
//! - `Accept-Ranges: bytes` on every response
//!
//! A plain (non-preflight) `OPTIONS` request is answered with `204 No
//! Content` advertising `GET, OPTIONS`; it never touches the filesystem.
//! Preflight `OPTIONS` requests are answered by the CORS layer itself.

use std::path::Path;

use axum::body::Body;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use http::header::{
    ACCEPT_RANGES, ACCESS_CONTROL_ALLOW_METHODS, ALLOW, CONTENT_LENGTH, CONTENT_RANGE,
    CONTENT_TYPE, RANGE,
};
use http::{HeaderValue, Method, StatusCode};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

/// Build the router serving `root`.
///
/// `ServeDir` handles GET/HEAD with byte-range support and resolves every
/// request path inside the root; anything that escapes it (or does not
/// exist) is a 404, never content from outside the root.
pub fn create_router(root: impl AsRef<Path>, enable_tracing: bool) -> Router {
    let serve_dir = ServeDir::new(root).append_index_html_on_directories(false);

    let router = Router::new()
        .fallback_service(serve_dir)
        .layer(middleware::from_fn(options_no_content))
        .layer(SetResponseHeaderLayer::if_not_present(
            ACCEPT_RANGES,
            HeaderValue::from_static("bytes"),
        ))
        .layer(build_cors_layer());

    if enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

/// Build the wildcard CORS layer the viewer requires.
fn build_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
        .allow_headers([RANGE, CONTENT_TYPE])
        .expose_headers([CONTENT_LENGTH, CONTENT_RANGE, ACCEPT_RANGES])
}

/// Answer plain OPTIONS requests with 204 instead of handing them to the
/// file service.
async fn options_no_content(req: Request, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        return Response::builder()
            .status(StatusCode::NO_CONTENT)
            .header(ALLOW, "GET, OPTIONS")
            .header(ACCESS_CONTROL_ALLOW_METHODS, "GET, OPTIONS")
            .body(Body::empty())
            .unwrap();
    }
    next.run(req).await
}
