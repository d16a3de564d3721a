//! HTTP integration tests for the CORS static file server.
//!
//! Tests verify:
//! - File retrieval with the cross-origin headers the viewer needs
//! - Byte-range requests (206 + Content-Range)
//! - Plain and preflight OPTIONS handling
//! - 404s for missing paths and traversal attempts, with CORS headers intact

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use ng_serve::create_router;

use super::test_utils::{make_zarr_store, CHUNK_BYTES};

#[tokio::test]
async fn test_get_file_has_cors_and_range_headers() {
    let root = tempfile::tempdir().unwrap();
    make_zarr_store(root.path(), "vol.zarr");
    let router = create_router(root.path(), false);

    let request = Request::builder()
        .uri("/vol.zarr/.zattrs")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
    assert_eq!(response.headers().get(header::ACCEPT_RANGES).unwrap(), "bytes");

    let exposed = response
        .headers()
        .get(header::ACCESS_CONTROL_EXPOSE_HEADERS)
        .unwrap()
        .to_str()
        .unwrap()
        .to_lowercase();
    assert!(exposed.contains("content-length"));
    assert!(exposed.contains("content-range"));
    assert!(exposed.contains("accept-ranges"));

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"{}");
}

#[tokio::test]
async fn test_range_request_returns_partial_content() {
    let root = tempfile::tempdir().unwrap();
    make_zarr_store(root.path(), "vol.zarr");
    let router = create_router(root.path(), false);

    let request = Request::builder()
        .uri("/vol.zarr/0.0")
        .header(header::RANGE, "bytes=0-3")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::PARTIAL_CONTENT);
    let content_range = response
        .headers()
        .get(header::CONTENT_RANGE)
        .unwrap()
        .to_str()
        .unwrap();
    assert_eq!(content_range, format!("bytes 0-3/{}", CHUNK_BYTES.len()));

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], &CHUNK_BYTES[0..4]);
}

#[tokio::test]
async fn test_head_request_reports_length_without_body() {
    let root = tempfile::tempdir().unwrap();
    make_zarr_store(root.path(), "vol.zarr");
    let router = create_router(root.path(), false);

    let request = Request::builder()
        .method(Method::HEAD)
        .uri("/vol.zarr/0.0")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_LENGTH)
            .unwrap()
            .to_str()
            .unwrap(),
        CHUNK_BYTES.len().to_string()
    );

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_missing_path_is_404_with_cors() {
    let root = tempfile::tempdir().unwrap();
    let router = create_router(root.path(), false);

    let request = Request::builder()
        .uri("/nope.zarr/.zattrs")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    // Errors carry the CORS headers too, or the viewer cannot read them
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_path_traversal_is_rejected() {
    // Layout: parent/root is served; parent/secret.txt must stay unreachable.
    let parent = tempfile::tempdir().unwrap();
    let root = parent.path().join("root");
    std::fs::create_dir(&root).unwrap();
    std::fs::write(root.join("inside.txt"), b"inside").unwrap();
    std::fs::write(parent.path().join("secret.txt"), b"secret").unwrap();

    let router = create_router(&root, false);

    for uri in ["/../secret.txt", "/%2e%2e/secret.txt", "/a/../../secret.txt"] {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = router.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND, "uri: {uri}");
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(!body.windows(6).any(|w| w == b"secret"), "uri: {uri}");
    }
}

#[tokio::test]
async fn test_plain_options_is_no_content() {
    let root = tempfile::tempdir().unwrap();
    make_zarr_store(root.path(), "vol.zarr");
    let router = create_router(root.path(), false);

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/vol.zarr/.zattrs")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );

    let methods = response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_METHODS)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(methods.contains("GET"));
    assert!(methods.contains("OPTIONS"));

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_preflight_options_allows_range_header() {
    let root = tempfile::tempdir().unwrap();
    make_zarr_store(root.path(), "vol.zarr");
    let router = create_router(root.path(), false);

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/vol.zarr/0.0")
        .header(header::ORIGIN, "https://neuroglancer-demo.appspot.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "range")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert!(response.status().is_success());
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );

    let allowed = response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_HEADERS)
        .unwrap()
        .to_str()
        .unwrap()
        .to_lowercase();
    assert!(allowed.contains("range"));
}
