// src/resolver/social.rs

use super::{Resolver, fetch_html};
use crate::{
    client::RobustClient,
    config::SocialRules,
    models::{Category, Platform},
};
use async_trait::async_trait;
use log::info;
use scraper::{Html, Selector};
use std::sync::{Arc, LazyLock};
use url::Url;

static OG_IMAGE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[property="og:image"]"#).unwrap());
static IMG: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img[src]").unwrap());

/// 社交平台帖子里没有视频时，退而取帖子的封面图
pub struct SocialFallbackResolver {
    http_client: Arc<RobustClient>,
    rules: SocialRules,
}

impl SocialFallbackResolver {
    pub fn new(http_client: Arc<RobustClient>, rules: SocialRules) -> Self {
        Self { http_client, rules }
    }

    pub fn is_post(&self, url: &str) -> bool {
        self.rules.posts.matches_str(url)
    }

    pub async fn resolve_post(&self, post_url: &str) -> Option<String> {
        info!("帖子中没有视频，尝试提取封面图: {}", post_url);
        let (final_url, body) = fetch_html(&self.http_client, post_url).await?;
        let image = still_image(&final_url, &body);
        if let Some(url) = &image {
            info!("找到帖子封面图: {}", url);
        }
        image
    }
}

#[async_trait]
impl Resolver for SocialFallbackResolver {
    fn platform(&self) -> Platform {
        Platform::SocialFallback
    }

    fn category(&self) -> Category {
        Category::Image
    }

    fn handles(&self, url: &Url) -> bool {
        self.rules.posts.matches(url)
    }

    async fn resolve(&self, raw_url: &str) -> Option<String> {
        self.resolve_post(raw_url).await
    }
}

/// og:image 优先，否则取第一个 <img>；相对地址按页面地址补全
pub fn still_image(page_url: &Url, html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let og = doc
        .select(&OG_IMAGE)
        .filter_map(|m| m.value().attr("content"))
        .map(str::trim)
        .find(|c| !c.is_empty());
    let candidate = og.or_else(|| {
        doc.select(&IMG)
            .filter_map(|img| img.value().attr("src"))
            .map(str::trim)
            .find(|s| !s.is_empty())
    })?;
    page_url.join(candidate).ok().map(String::from)
}
