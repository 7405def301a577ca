// src/fetcher/image.rs

use crate::{client::RobustClient, error::*};
use futures::StreamExt;
use log::{debug, info, warn};
use reqwest::header::CONTENT_TYPE;
use std::{
    io::Write,
    path::{Path, PathBuf},
    sync::Arc,
};
use tempfile::NamedTempFile;
use url::Url;

const DEFAULT_EXTENSION: &str = ".jpg";

const KNOWN_EXTENSIONS: [&str; 8] = [".jpg", ".jpeg", ".png", ".gif", ".webp", ".bmp", ".tiff", ".svg"];

/// 直接下载图片文件，瞬时错误由客户端中间件重试
pub struct ImageFetcher {
    http_client: Arc<RobustClient>,
}

impl ImageFetcher {
    pub fn new(http_client: Arc<RobustClient>) -> Self {
        Self { http_client }
    }

    /// 下载到 `<dir>/<stem><ext>`，写入临时文件，完成后再改名，返回最终路径
    pub async fn fetch(&self, url: &str, dir: &Path, stem: &str) -> AppResult<PathBuf> {
        let res = self.http_client.download(url).await?;
        let content_type = res
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim().to_ascii_lowercase());
        match content_type.as_deref() {
            Some(ct) if ct.starts_with("image/") => debug!("'{}' Content-Type: {}", url, ct),
            other => warn!("'{}' 的 Content-Type 不是图片: {:?}", url, other),
        }

        let ext = choose_extension(content_type.as_deref(), url);
        let mut tmp = NamedTempFile::new_in(dir)?;
        let mut stream = res.bytes_stream();
        while let Some(chunk) = stream.next().await {
            tmp.write_all(&chunk?)?;
        }
        tmp.flush()?;

        let target = dir.join(format!("{}{}", stem, ext));
        tmp.persist(&target)?;
        info!("图片已保存: {:?}", target);
        Ok(target)
    }
}

/// 先看 Content-Type，再看链接路径的扩展名，都不认识时用 .jpg
pub fn choose_extension(content_type: Option<&str>, url: &str) -> &'static str {
    content_type
        .and_then(extension_for_media_type)
        .or_else(|| extension_from_url(url))
        .unwrap_or(DEFAULT_EXTENSION)
}

fn extension_for_media_type(content_type: &str) -> Option<&'static str> {
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    Some(match essence {
        "image/jpeg" | "image/jpg" | "image/pjpeg" => ".jpg",
        "image/png" => ".png",
        "image/gif" => ".gif",
        "image/webp" => ".webp",
        "image/bmp" => ".bmp",
        "image/tiff" => ".tiff",
        "image/svg+xml" => ".svg",
        _ => return None,
    })
}

fn extension_from_url(url: &str) -> Option<&'static str> {
    let path = Url::parse(url).ok()?.path().to_ascii_lowercase();
    KNOWN_EXTENSIONS
        .into_iter()
        .find(|ext| path.ends_with(*ext))
}
