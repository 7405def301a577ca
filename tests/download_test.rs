// tests/download_test.rs

use async_trait::async_trait;
use sheet_links::{
    LinkJobContext,
    config::{AppConfig, patterns::PatternSet},
    error::AppResult,
    fetcher::{VideoFetcher, VideoOutcome},
    workflows,
};
use std::{fs, path::Path, sync::Mutex};
use tempfile::tempdir;

/// 不启动外部进程的视频下载器：按链接返回预设结果
struct ScriptedFetcher {
    calls: Mutex<Vec<String>>,
}

#[async_trait]
impl VideoFetcher for ScriptedFetcher {
    async fn fetch(&self, url: &str, dir: &Path, stem: &str) -> AppResult<VideoOutcome> {
        self.calls.lock().unwrap().push(url.to_string());
        if url.contains("/ok/") {
            fs::write(dir.join(format!("{}.mp4", stem)), b"video")?;
            return Ok(VideoOutcome::Downloaded);
        }
        if url.contains("/broken/") {
            return Ok(VideoOutcome::Failed("ERROR: Unsupported URL".into()));
        }
        Ok(VideoOutcome::NoVideo("ERROR: There is no video in this post".into()))
    }
}

#[tokio::test]
async fn test_download_images() {
    let mut server = mockito::Server::new_async().await;
    let base = server.url();
    let ok = server
        .mock("GET", "/img/1")
        .with_status(200)
        .with_header("content-type", "image/png")
        .with_body(b"\x89PNG-data")
        .create_async()
        .await;
    let _missing = server
        .mock("GET", "/img/2")
        .with_status(404)
        .create_async()
        .await;

    let dir = tempdir().unwrap();
    let records = dir.path().join("image_links.txt");
    fs::write(
        &records,
        format!("# category: image\nA1_1 : {base}/img/1\nbroken line\nA1_2 : {base}/img/2\n"),
    )
    .unwrap();

    let context = LinkJobContext::new(AppConfig::default(), dir.path().join("out")).unwrap();
    let report = workflows::run_download_images(&context, &records).await.unwrap();

    assert_eq!(report.total, 2);
    assert_eq!(report.success, 1);
    assert_eq!(report.failed.len(), 1);
    ok.assert_async().await;

    let saved = dir.path().join("out").join("images").join("A1_1.png");
    assert_eq!(fs::read(saved).unwrap(), b"\x89PNG-data");
    let errors = fs::read_to_string(dir.path().join("out").join("download_img_errors.txt")).unwrap();
    assert_eq!(errors, format!("A1 [2]: {base}/img/2\n"));
}

#[tokio::test]
async fn test_download_videos_with_social_fallback() {
    let mut server = mockito::Server::new_async().await;
    let base = server.url();
    let post = server
        .mock("GET", "/p/photo")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(r#"<meta property="og:image" content="/media/cover.jpg">"#)
        .create_async()
        .await;
    let cover = server
        .mock("GET", "/media/cover.jpg")
        .with_status(200)
        .with_header("content-type", "image/jpeg")
        .with_body("jpeg")
        .create_async()
        .await;

    let dir = tempdir().unwrap();
    let records = dir.path().join("video_links.txt");
    fs::write(
        &records,
        format!(
            "B2_1 : {base}/ok/1\nB3_1 : {base}/p/photo\nB4_1 : https://news.example/no-video\nB5_1 : {base}/broken/1\n"
        ),
    )
    .unwrap();

    let mut config = AppConfig::default();
    config.social.posts = PatternSet::from_strings(&["127.0.0.1/p/".to_string()]);
    let out = dir.path().join("out");
    let context = LinkJobContext::new(config, out.clone()).unwrap();
    let fetcher = ScriptedFetcher {
        calls: Mutex::new(Vec::new()),
    };

    let report = workflows::run_download_videos(&context, &fetcher, &records)
        .await
        .unwrap();

    assert_eq!(fetcher.calls.lock().unwrap().len(), 4);
    assert_eq!(report.success, 2);
    assert_eq!(report.failed.len(), 2);
    post.assert_async().await;
    cover.assert_async().await;

    let videos = out.join("videos");
    assert!(videos.join("B2_1.mp4").is_file());
    assert_eq!(fs::read_to_string(videos.join("B3_1.jpg")).unwrap(), "jpeg");

    let errors = fs::read_to_string(out.join("download_video_errors.txt")).unwrap();
    assert_eq!(
        errors,
        format!("B4 [1]: https://news.example/no-video\nB5 [1]: {base}/broken/1\n")
    );
}
