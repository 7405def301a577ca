// src/resolver/yandex.rs

use super::{Resolver, fetch_html};
use crate::{
    client::RobustClient,
    config::YandexRules,
    models::{Category, Platform},
};
use async_trait::async_trait;
use log::{debug, info};
use percent_encoding::percent_decode_str;
use regex::Regex;
use scraper::{Html, Selector};
use serde_json::Value;
use std::sync::{Arc, LazyLock};
use url::Url;

static IFRAME: LazyLock<Selector> = LazyLock::new(|| Selector::parse("iframe").unwrap());
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());
static OG_VIDEO_URL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[property="og:video:url"]"#).unwrap());
static NESTED_SRC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"src=["']([^"']+)["']"#).unwrap());

/// 解析后的聚合页，供各个策略读取
pub struct AggregatorPage {
    base: Url,
    doc: Html,
}

impl AggregatorPage {
    pub fn parse(base: Url, html: &str) -> Self {
        Self {
            base,
            doc: Html::parse_document(html),
        }
    }

    /// 页面中第一个 iframe 的原始 src 及其绝对地址
    fn frame(&self) -> Option<(&str, Url)> {
        let src = self.doc.select(&IFRAME).next()?.value().attr("src")?.trim();
        let absolute = self.base.join(src).ok()?;
        Some((src, absolute))
    }
}

type Strategy = fn(&YandexRules, &AggregatorPage) -> Option<String>;

/// 按顺序尝试，第一个给出结果的策略胜出
const STRATEGIES: [(&str, Strategy); 5] = [
    ("final-frame", final_frame),
    ("player-widget", player_widget),
    ("generic-frame", generic_frame),
    ("anchor", anchor_target),
    ("og:video:url", og_video_url),
];

/// 视频聚合页 (yandex.ru/video) 解析器，找出页面嵌入的原始视频链接
pub struct YandexResolver {
    http_client: Arc<RobustClient>,
    rules: YandexRules,
}

impl YandexResolver {
    pub fn new(http_client: Arc<RobustClient>, rules: YandexRules) -> Self {
        Self { http_client, rules }
    }

    pub async fn resolve_page(&self, page_url: &str) -> Option<String> {
        info!("解析视频聚合页: {}", page_url);
        let (final_url, body) = fetch_html(&self.http_client, page_url).await?;
        let found = self.resolve_html(final_url, &body);
        match &found {
            Some(origin) => info!("聚合页 '{}' 的原始链接: {}", page_url, origin),
            None => info!("聚合页 '{}' 中未找到原始链接", page_url),
        }
        found
    }

    pub fn resolve_html(&self, page_url: Url, html: &str) -> Option<String> {
        let page = AggregatorPage::parse(page_url, html);
        STRATEGIES.iter().find_map(|(name, strategy)| {
            let found = strategy(&self.rules, &page);
            if let Some(url) = &found {
                debug!("策略 '{}' 命中: {}", name, url);
            }
            found
        })
    }
}

#[async_trait]
impl Resolver for YandexResolver {
    fn platform(&self) -> Platform {
        Platform::Yandex
    }

    fn category(&self) -> Category {
        Category::Video
    }

    fn handles(&self, url: &Url) -> bool {
        self.rules.pages.matches(url)
    }

    async fn resolve(&self, raw_url: &str) -> Option<String> {
        self.resolve_page(raw_url).await
    }
}

/// (a) iframe 直接指向最终的视频站点，src 原样返回
pub fn final_frame(rules: &YandexRules, page: &AggregatorPage) -> Option<String> {
    let (src, url) = page.frame()?;
    rules
        .final_frames
        .matches(&url)
        .then(|| src.to_string())
}

/// (b) iframe 是通用播放器组件，从它的 html 或 counters 参数里取出真实地址
pub fn player_widget(rules: &YandexRules, page: &AggregatorPage) -> Option<String> {
    let (_, url) = page.frame()?;
    if !rules.player_widgets.matches(&url) {
        return None;
    }
    let param = |key: &str| {
        url.query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| percent_decode_str(&v).decode_utf8_lossy().into_owned())
    };

    let from_html = param("html").and_then(|html| {
        NESTED_SRC_RE
            .captures(&html)
            .and_then(|caps| caps.get(1))
            .map(|m| normalize_frame_src(m.as_str()))
    });
    if from_html.is_some() {
        return from_html;
    }

    param("counters").and_then(|raw| {
        serde_json::from_str::<Value>(&raw)
            .ok()?
            .get("videoUrl")?
            .as_str()
            .map(str::to_string)
    })
}

/// (c) iframe 属于已知的通用视频站点路径
pub fn generic_frame(rules: &YandexRules, page: &AggregatorPage) -> Option<String> {
    let (src, url) = page.frame()?;
    rules
        .generic_frames
        .matches(&url)
        .then(|| src.to_string())
}

/// (d) 页面中第一个指向已知视频站点的链接，协议相对地址补上 https:
pub fn anchor_target(rules: &YandexRules, page: &AggregatorPage) -> Option<String> {
    page.doc
        .select(&ANCHOR)
        .filter_map(|a| a.value().attr("href"))
        .map(str::trim)
        .find(|href| {
            page.base
                .join(href)
                .is_ok_and(|u| rules.anchor_targets.matches(&u))
        })
        .map(normalize_frame_src)
}

/// (e) og:video:url 元信息
pub fn og_video_url(_rules: &YandexRules, page: &AggregatorPage) -> Option<String> {
    page.doc
        .select(&OG_VIDEO_URL)
        .filter_map(|m| m.value().attr("content"))
        .map(str::trim)
        .find(|c| !c.is_empty())
        .map(str::to_string)
}

/// 去掉重复的斜杠，并为协议相对地址补上 https:
pub fn normalize_frame_src(src: &str) -> String {
    let collapsed = src.trim().replace("////", "//");
    match collapsed.strip_prefix("//") {
        Some(rest) => format!("https://{}", rest.trim_start_matches('/')),
        None => collapsed,
    }
}
