// src/probe.rs

use crate::{client::RobustClient, models::Category};
use log::debug;
use reqwest::{StatusCode, header::CONTENT_TYPE};
use std::sync::Arc;
use thiserror::Error;

/// 探测失败的原因。分类器不区分原因，统一按约定兜底。
#[derive(Error, Debug)]
pub enum ProbeFailure {
    #[error("请求失败: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("服务器返回状态码 {0}")]
    Status(StatusCode),
    #[error("响应缺少 Content-Type")]
    MissingContentType,
    #[error("无法识别的 Content-Type: {0}")]
    UnrecognizedContentType(String),
}

/// 通过 HEAD 请求的 Content-Type 判断类别，仅在静态规则无法判定时使用
pub struct ContentTypeProbe {
    http_client: Arc<RobustClient>,
}

impl ContentTypeProbe {
    pub fn new(http_client: Arc<RobustClient>) -> Self {
        Self { http_client }
    }

    pub async fn probe(&self, url: &str) -> Result<Category, ProbeFailure> {
        let res = self.http_client.head(url).await?;
        let status = res.status();
        if !status.is_success() {
            return Err(ProbeFailure::Status(status));
        }
        let content_type = res
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim().to_ascii_lowercase())
            .ok_or(ProbeFailure::MissingContentType)?;
        debug!("探测 '{}' 得到 Content-Type: {}", url, content_type);
        category_for_media_type(&content_type)
            .ok_or(ProbeFailure::UnrecognizedContentType(content_type))
    }
}

/// 按媒体类型前缀映射类别
pub fn category_for_media_type(content_type: &str) -> Option<Category> {
    if content_type.starts_with("image/") {
        Some(Category::Image)
    } else if content_type.starts_with("video/") {
        Some(Category::Video)
    } else if content_type.starts_with("text/html") {
        Some(Category::News)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_for_media_type() {
        assert_eq!(category_for_media_type("image/webp"), Some(Category::Image));
        assert_eq!(category_for_media_type("video/mp4"), Some(Category::Video));
        assert_eq!(
            category_for_media_type("text/html; charset=utf-8"),
            Some(Category::News)
        );
        assert_eq!(category_for_media_type("application/json"), None);
        assert_eq!(category_for_media_type("text/plain"), None);
    }
}
