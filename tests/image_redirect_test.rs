// tests/image_redirect_test.rs

use async_trait::async_trait;
use sheet_links::{
    client::RobustClient,
    config::{AppConfig, patterns::PatternSet},
    error::{AppError, AppResult},
    render::PageRenderer,
    resolver::ImageRedirectResolver,
};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

/// 返回固定 DOM 的渲染器，记录调用次数
struct FakeRenderer {
    dom: Option<String>,
    calls: AtomicUsize,
}

#[async_trait]
impl PageRenderer for FakeRenderer {
    async fn render(&self, _url: &str) -> AppResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.dom
            .clone()
            .ok_or_else(|| AppError::ExternalTool("浏览器不可用".into()))
    }
}

fn resolver(renderer: Option<Arc<dyn PageRenderer>>) -> ImageRedirectResolver {
    let config = AppConfig::default();
    let client = Arc::new(RobustClient::new(&config.network).unwrap());
    ImageRedirectResolver::new(
        client,
        PatternSet::from_strings(&["127.0.0.1/imgres".to_string()]),
        renderer,
    )
}

#[tokio::test]
async fn test_imgurl_taken_from_final_url_after_redirect() {
    let mut server = mockito::Server::new_async().await;
    let redirect = server
        .mock("GET", "/imgres/abc")
        .with_status(302)
        .with_header(
            "location",
            &format!(
                "{}/landing?imgurl=https%3A%2F%2Fcdn.example%2Fphotos%2Fa.png&imgrefurl=x",
                server.url()
            ),
        )
        .create_async()
        .await;
    let landing = server
        .mock("GET", mockito::Matcher::Regex(r"^/landing".to_string()))
        .with_status(200)
        .with_body("<html><body>redirecting</body></html>")
        .create_async()
        .await;

    let direct = resolver(None)
        .resolve_direct(&format!("{}/imgres/abc", server.url()))
        .await;

    assert_eq!(direct, "https://cdn.example/photos/a.png");
    redirect.assert_async().await;
    landing.assert_async().await;
}

#[tokio::test]
async fn test_bare_image_url_in_body() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/imgres/body")
        .with_status(200)
        .with_body(r#"<script>var u = "https://cdn.example/pic.webp?w=1200";</script>"#)
        .create_async()
        .await;

    let direct = resolver(None)
        .resolve_direct(&format!("{}/imgres/body", server.url()))
        .await;
    assert_eq!(direct, "https://cdn.example/pic.webp?w=1200");
}

#[tokio::test]
async fn test_rendered_page_used_when_static_steps_fail() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/imgres/js")
        .with_status(200)
        .with_body("<html><body><div id=app></div></body></html>")
        .create_async()
        .await;
    let renderer = Arc::new(FakeRenderer {
        dom: Some(r#"<img src="/logo.gif"><img src="https://cdn.example/full.jpg">"#.into()),
        calls: AtomicUsize::new(0),
    });

    let direct = resolver(Some(renderer.clone() as Arc<dyn PageRenderer>))
        .resolve_direct(&format!("{}/imgres/js", server.url()))
        .await;

    assert_eq!(direct, "https://cdn.example/full.jpg");
    assert_eq!(renderer.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_failure_returns_input_unchanged() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/imgres/gone")
        .with_status(404)
        .create_async()
        .await;
    let renderer = Arc::new(FakeRenderer {
        dom: None,
        calls: AtomicUsize::new(0),
    });

    let input = format!("{}/imgres/gone", server.url());
    let direct = resolver(Some(renderer.clone() as Arc<dyn PageRenderer>)).resolve_direct(&input).await;

    assert_eq!(direct, input);
    assert_eq!(renderer.calls.load(Ordering::SeqCst), 1);
}
