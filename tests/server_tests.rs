use apt_repository::test_utils::{control_paragraph, deb_package, write_file};
use apt_repository::ControlCompression;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use debserver::{indexer, server};
use tempfile::TempDir;
use tower::ServiceExt;

async fn get(folder: &std::path::Path, uri: &str) -> axum::response::Response {
    server::router(folder)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_serves_index_and_packages() {
    let temp_dir = TempDir::new().unwrap();
    let deb = deb_package(
        control_paragraph("hello", "amd64").as_bytes(),
        ControlCompression::Xz,
    )
    .unwrap();
    write_file(temp_dir.path(), "hello_1.0.0_amd64.deb", &deb).unwrap();
    assert_eq!(indexer::run_cycle(temp_dir.path(), 1).unwrap(), 1);

    let response = get(temp_dir.path(), "/Packages").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let packages = std::fs::read(temp_dir.path().join("Packages")).unwrap();
    assert_eq!(body.as_ref(), packages.as_slice());
    assert!(body.starts_with(b"Package: hello\n"));

    let response = get(temp_dir.path(), "/hello_1.0.0_amd64.deb").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(body.as_ref(), deb.as_slice());
}

#[tokio::test]
async fn test_serves_nested_files() {
    let temp_dir = TempDir::new().unwrap();
    write_file(temp_dir.path(), "pool/main/readme.txt", b"nested").unwrap();

    let response = get(temp_dir.path(), "/pool/main/readme.txt").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(body.as_ref(), b"nested");
}

#[tokio::test]
async fn test_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let response = get(temp_dir.path(), "/Packages.xz").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_head_request() {
    let temp_dir = TempDir::new().unwrap();
    write_file(temp_dir.path(), "Packages", b"Package: a\n\n").unwrap();

    let response = server::router(temp_dir.path())
        .oneshot(
            Request::builder()
                .method(Method::HEAD)
                .uri("/Packages")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_LENGTH], "12");
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_range_request() {
    let temp_dir = TempDir::new().unwrap();
    write_file(temp_dir.path(), "Packages", b"Package: ranged\n\n").unwrap();

    let response = server::router(temp_dir.path())
        .oneshot(
            Request::builder()
                .uri("/Packages")
                .header(header::RANGE, "bytes=9-14")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PARTIAL_CONTENT);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(body.as_ref(), b"ranged");
}
