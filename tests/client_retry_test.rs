// tests/client_retry_test.rs

use sheet_links::client::RobustClient;
use sheet_links::config::AppConfig;

#[tokio::test(flavor = "multi_thread")]
async fn test_download_retries_transient_server_errors() {
    // --- 1. Arrange (准备阶段) ---
    let mut server = mockito::Server::new_async().await;
    let server_url = server.url();

    // 第一次请求 -> 503，第二次 -> 200
    let mock_503 = server
        .mock("GET", "/media.jpg")
        .with_status(503)
        .with_body("busy")
        .expect(1)
        .create_async()
        .await;
    let mock_200 = server
        .mock("GET", "/media.jpg")
        .with_status(200)
        .with_header("content-type", "image/jpeg")
        .with_body("jpeg-bytes")
        .create_async()
        .await;

    let config = AppConfig::default();
    let client = RobustClient::new(&config.network).expect("Failed to create client");

    // --- 2. Act (执行阶段) ---
    let response = client
        .download(format!("{}/media.jpg", server_url))
        .await
        .expect("Request should eventually succeed");

    // --- 3. Assert (断言阶段) ---
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "jpeg-bytes");
    mock_503.assert_async().await;
    mock_200.assert_async().await;
}

#[tokio::test]
async fn test_page_fetch_does_not_retry() {
    let mut server = mockito::Server::new_async().await;
    let mock_500 = server
        .mock("GET", "/page")
        .with_status(500)
        .expect(1)
        .create_async()
        .await;

    let config = AppConfig::default();
    let client = RobustClient::new(&config.network).unwrap();
    let response = client
        .get_page(format!("{}/page", server.url()))
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
    mock_500.assert_async().await;
}

#[tokio::test]
async fn test_download_gives_up_on_client_errors() {
    let mut server = mockito::Server::new_async().await;
    let mock_404 = server
        .mock("GET", "/gone.png")
        .with_status(404)
        .expect(1)
        .create_async()
        .await;

    let config = AppConfig::default();
    let client = RobustClient::new(&config.network).unwrap();
    let result = client.download(format!("{}/gone.png", server.url())).await;

    assert!(result.is_err());
    mock_404.assert_async().await;
}
