// src/resolver/image_redirect.rs

use super::{Resolver, fetch_html};
use crate::{
    client::RobustClient,
    config::patterns::PatternSet,
    models::{Category, Platform},
    render::PageRenderer,
};
use async_trait::async_trait;
use log::{debug, info, warn};
use percent_encoding::percent_decode_str;
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::{Arc, LazyLock};
use url::Url;

static BARE_IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)https://[^"'<>\s]+\.(?:jpg|jpeg|png|gif|webp|bmp|tiff)(?:\?[^"'<>\s]*)?"#).unwrap()
});
static IMG: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img[src]").unwrap());

/// 搜索引擎图片跳转链接解析器。找不到直链时原样返回输入，不视为失败。
pub struct ImageRedirectResolver {
    http_client: Arc<RobustClient>,
    patterns: PatternSet,
    renderer: Option<Arc<dyn PageRenderer>>,
}

impl ImageRedirectResolver {
    pub fn new(
        http_client: Arc<RobustClient>,
        patterns: PatternSet,
        renderer: Option<Arc<dyn PageRenderer>>,
    ) -> Self {
        Self {
            http_client,
            patterns,
            renderer,
        }
    }

    pub async fn resolve_direct(&self, redirect_url: &str) -> String {
        info!("提取图片跳转链接的直链: {}", redirect_url);
        if let Some(direct) = self.resolve_static(redirect_url).await {
            info!("找到图片直链: {}", direct);
            return direct;
        }
        if let Some(renderer) = &self.renderer
            && let Some(direct) = self.resolve_rendered(renderer.as_ref(), redirect_url).await
        {
            info!("通过浏览器渲染找到图片直链: {}", direct);
            return direct;
        }
        warn!("无法提取 '{}' 的图片直链，保留原链接", redirect_url);
        redirect_url.to_string()
    }

    async fn resolve_static(&self, redirect_url: &str) -> Option<String> {
        let (final_url, body) = fetch_html(&self.http_client, redirect_url).await?;
        imgurl_param(&final_url).or_else(|| first_bare_image(&body))
    }

    async fn resolve_rendered(&self, renderer: &dyn PageRenderer, url: &str) -> Option<String> {
        match renderer.render(url).await {
            Ok(dom) => first_rendered_image(&dom),
            Err(e) => {
                warn!("浏览器渲染 '{}' 失败: {}", url, e);
                None
            }
        }
    }
}

#[async_trait]
impl Resolver for ImageRedirectResolver {
    fn platform(&self) -> Platform {
        Platform::ImageRedirect
    }

    fn category(&self) -> Category {
        Category::Image
    }

    fn handles(&self, url: &Url) -> bool {
        self.patterns.matches(url)
    }

    async fn resolve(&self, raw_url: &str) -> Option<String> {
        Some(self.resolve_direct(raw_url).await)
    }
}

/// 跳转后最终地址里的 imgurl 参数
pub fn imgurl_param(final_url: &Url) -> Option<String> {
    let (_, value) = final_url.query_pairs().find(|(k, _)| k == "imgurl")?;
    let decoded = percent_decode_str(&value).decode_utf8_lossy().trim().to_string();
    debug!("imgurl 参数: {}", decoded);
    (!decoded.is_empty()).then_some(decoded)
}

/// 页面源码里第一个裸露的图片文件链接
pub fn first_bare_image(body: &str) -> Option<String> {
    BARE_IMAGE_RE.find(body).map(|m| m.as_str().to_string())
}

/// 渲染后 DOM 中第一个看起来像图片文件的 <img>
pub fn first_rendered_image(dom: &str) -> Option<String> {
    let doc = Html::parse_document(dom);
    doc.select(&IMG)
        .filter_map(|img| img.value().attr("src"))
        .find(|src| {
            src.starts_with("http") && [".jpg", ".png", ".webp"].iter().any(|ext| src.contains(ext))
        })
        .map(str::to_string)
}
