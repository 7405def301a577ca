// src/resolver/mod.rs

pub mod image_redirect;
pub mod social;
pub mod yandex;

pub use image_redirect::ImageRedirectResolver;
pub use social::SocialFallbackResolver;
pub use yandex::YandexResolver;

use crate::{
    client::RobustClient,
    models::{Category, Platform},
};
use async_trait::async_trait;
use log::{debug, warn};
use url::Url;

/// 平台解析器：把间接链接拆解为可直接获取的资源链接。
/// `resolve` 收到的是单元格中的原始字符串，未经 `Url` 规范化。
/// 返回 `None` 表示没有找到候选链接，而不是出错。
#[async_trait]
pub trait Resolver: Send + Sync {
    fn platform(&self) -> Platform;
    /// 解析成功时链接所属的类别
    fn category(&self) -> Category;
    fn handles(&self, url: &Url) -> bool;
    async fn resolve(&self, raw_url: &str) -> Option<String>;
}

/// 获取页面 HTML，返回重定向后的最终地址与正文。任何失败都只记录日志并返回 `None`。
pub(crate) async fn fetch_html(http_client: &RobustClient, url: &str) -> Option<(Url, String)> {
    let res = match http_client.get_page(url).await {
        Ok(res) => res,
        Err(e) => {
            warn!("获取页面 '{}' 失败: {}", url, e);
            return None;
        }
    };
    let status = res.status();
    if !status.is_success() {
        warn!("无法打开页面 '{}' (状态码 {})", url, status);
        return None;
    }
    let final_url = res.url().clone();
    debug!("页面 '{}' 的最终地址: {}", url, final_url);
    match res.text().await {
        Ok(body) => Some((final_url, body)),
        Err(e) => {
            warn!("读取页面 '{}' 内容失败: {}", url, e);
            None
        }
    }
}
