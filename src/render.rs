// src/render.rs

use crate::{
    constants,
    error::{AppError, AppResult},
};
use async_trait::async_trait;
use log::{debug, warn};
use std::{path::PathBuf, process::Stdio, time::Duration};
use tokio::process::Command;

/// 渲染依赖 JavaScript 的页面，返回渲染后的 DOM
#[async_trait]
pub trait PageRenderer: Send + Sync {
    async fn render(&self, url: &str) -> AppResult<String>;
}

/// 调用本机无头浏览器 (Chrome / Chromium) 的 --dump-dom。
/// 每次渲染启动一个独立进程；无论成功、失败还是超时，进程都会被回收或杀掉。
pub struct HeadlessBrowser {
    program: PathBuf,
    timeout: Duration,
}

impl HeadlessBrowser {
    pub fn new(program: PathBuf, page_timeout: Duration) -> Self {
        Self {
            program,
            timeout: page_timeout + Duration::from_millis(constants::BROWSER_VIRTUAL_TIME_MS),
        }
    }
}

#[async_trait]
impl PageRenderer for HeadlessBrowser {
    async fn render(&self, url: &str) -> AppResult<String> {
        debug!("使用浏览器 {:?} 渲染: {}", self.program, url);
        let child = Command::new(&self.program)
            .args([
                "--headless",
                "--disable-gpu",
                "--no-sandbox",
                "--dump-dom",
            ])
            .arg(format!(
                "--virtual-time-budget={}",
                constants::BROWSER_VIRTUAL_TIME_MS
            ))
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        // 超时后 future 被丢弃，kill_on_drop 负责杀掉子进程
        match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) if output.status.success() => {
                Ok(String::from_utf8_lossy(&output.stdout).into_owned())
            }
            Ok(Ok(output)) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                warn!("浏览器异常退出 ({}): {}", output.status, stderr.trim());
                Err(AppError::ExternalTool(format!(
                    "浏览器退出状态 {}",
                    output.status
                )))
            }
            Ok(Err(e)) => Err(e.into()),
            Err(_) => Err(AppError::ExternalTool(format!(
                "浏览器渲染超时 ({:?})",
                self.timeout
            ))),
        }
    }
}
