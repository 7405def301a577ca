// src/fetcher/video.rs

use crate::{
    config::NetworkSettings,
    error::{AppError, AppResult},
};
use async_trait::async_trait;
use log::{debug, info, warn};
use std::{path::Path, process::Stdio};
use tokio::process::Command;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoOutcome {
    Downloaded,
    /// 下载工具明确报告页面中没有视频
    NoVideo(String),
    Failed(String),
}

/// 视频下载的外部协作者
#[async_trait]
pub trait VideoFetcher: Send + Sync {
    async fn fetch(&self, url: &str, dir: &Path, stem: &str) -> AppResult<VideoOutcome>;
}

/// 调用外部 yt-dlp 进程下载视频
pub struct YtDlp {
    program: String,
    user_agent: String,
    no_video_markers: Vec<String>,
}

impl YtDlp {
    pub fn new(program: String, network: &NetworkSettings, no_video_markers: Vec<String>) -> Self {
        Self {
            program,
            user_agent: network.user_agent.clone(),
            no_video_markers,
        }
    }

    fn args(&self, url: &str, dir: &Path, stem: &str) -> Vec<String> {
        let template = dir.join(format!("{}.%(ext)s", stem));
        vec![
            "-o".into(),
            template.to_string_lossy().into_owned(),
            "-f".into(),
            "bestvideo[ext=mp4]+bestaudio[ext=m4a]/best[ext=mp4]/best".into(),
            "--merge-output-format".into(),
            "mp4".into(),
            "--user-agent".into(),
            self.user_agent.clone(),
            "--no-playlist".into(),
            "-N".into(),
            "8".into(),
            "--fragment-retries".into(),
            "10".into(),
            url.into(),
        ]
    }
}

#[async_trait]
impl VideoFetcher for YtDlp {
    async fn fetch(&self, url: &str, dir: &Path, stem: &str) -> AppResult<VideoOutcome> {
        let args = self.args(url, dir, stem);
        debug!("执行 {} {:?}", self.program, args);
        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| AppError::ExternalTool(format!("无法启动 {}: {}", self.program, e)))?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        let outcome = interpret(output.status.success(), &stderr, &self.no_video_markers);
        match &outcome {
            VideoOutcome::Downloaded => info!("视频下载完成: {} -> {}", url, stem),
            VideoOutcome::NoVideo(_) => info!("'{}' 中没有视频", url),
            VideoOutcome::Failed(reason) => warn!("视频下载失败 '{}': {}", url, reason),
        }
        Ok(outcome)
    }
}

/// 根据退出状态与错误输出判断结果
pub fn interpret(success: bool, stderr: &str, no_video_markers: &[String]) -> VideoOutcome {
    if success {
        return VideoOutcome::Downloaded;
    }
    let last_error = stderr
        .lines()
        .rev()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("未知错误")
        .to_string();
    if no_video_markers.iter().any(|m| stderr.contains(m.as_str())) {
        VideoOutcome::NoVideo(last_error)
    } else {
        VideoOutcome::Failed(last_error)
    }
}
