// tests/probe_test.rs

use sheet_links::{
    client::RobustClient,
    config::AppConfig,
    models::Category,
    probe::{ContentTypeProbe, ProbeFailure},
};
use std::sync::Arc;

fn probe() -> ContentTypeProbe {
    let config = AppConfig::default();
    ContentTypeProbe::new(Arc::new(RobustClient::new(&config.network).unwrap()))
}

#[tokio::test]
async fn test_probe_maps_media_types() {
    let mut server = mockito::Server::new_async().await;
    let cases = [
        ("/photo", "image/png", Category::Image),
        ("/clip", "video/mp4", Category::Video),
        ("/story", "text/html; charset=utf-8", Category::News),
    ];
    let mut mocks = Vec::new();
    for (path, content_type, _) in &cases {
        mocks.push(
            server
                .mock("HEAD", *path)
                .with_status(200)
                .with_header("content-type", content_type)
                .create_async()
                .await,
        );
    }

    let probe = probe();
    for (path, _, expected) in &cases {
        let category = probe
            .probe(&format!("{}{}", server.url(), path))
            .await
            .unwrap();
        assert_eq!(category, *expected, "{}", path);
    }
    for mock in mocks {
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn test_probe_follows_redirect_once() {
    let mut server = mockito::Server::new_async().await;
    let redirect = server
        .mock("HEAD", "/short")
        .with_status(301)
        .with_header("location", &format!("{}/full.webp", server.url()))
        .create_async()
        .await;
    let target = server
        .mock("HEAD", "/full.webp")
        .with_status(200)
        .with_header("content-type", "image/webp")
        .create_async()
        .await;

    let category = probe()
        .probe(&format!("{}/short", server.url()))
        .await
        .unwrap();
    assert_eq!(category, Category::Image);
    redirect.assert_async().await;
    target.assert_async().await;
}

#[tokio::test]
async fn test_probe_failures() {
    let mut server = mockito::Server::new_async().await;
    let not_found = server
        .mock("HEAD", "/missing")
        .with_status(404)
        .expect(1)
        .create_async()
        .await;
    let _binary = server
        .mock("HEAD", "/blob")
        .with_status(200)
        .with_header("content-type", "application/octet-stream")
        .create_async()
        .await;

    let probe = probe();
    assert!(matches!(
        probe.probe(&format!("{}/missing", server.url())).await,
        Err(ProbeFailure::Status(s)) if s.as_u16() == 404
    ));
    assert!(matches!(
        probe.probe(&format!("{}/blob", server.url())).await,
        Err(ProbeFailure::UnrecognizedContentType(ct)) if ct == "application/octet-stream"
    ));
    assert!(matches!(
        probe.probe("http://127.0.0.1:1/refused").await,
        Err(ProbeFailure::Transport(_))
    ));
    // 探测从不重试
    not_found.assert_async().await;
}
