// src/classifier/heuristics.rs

use crate::{config::ClassifierRules, models::Category};
use url::Url;

/// 静态规则 (不访问网络)：先看域名白名单，再看路径扩展名
pub fn static_category(rules: &ClassifierRules, url: &Url) -> Option<Category> {
    domain_category(rules, url).or_else(|| extension_category(rules, url))
}

pub fn domain_category(rules: &ClassifierRules, url: &Url) -> Option<Category> {
    if rules.video_hosts.matches(url) {
        Some(Category::Video)
    } else if rules.image_hosts.matches(url) || has_image_marker(rules, url) {
        Some(Category::Image)
    } else if rules.news_hosts.matches(url) {
        Some(Category::News)
    } else {
        None
    }
}

/// 路径或查询串中出现的图片相关标记，例如缩放参数
fn has_image_marker(rules: &ClassifierRules, url: &Url) -> bool {
    let tail = match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    };
    rules
        .image_url_markers
        .iter()
        .any(|marker| tail.contains(marker.as_str()))
}

/// 检查去掉查询串后的路径扩展名，大小写不敏感
pub fn extension_category(rules: &ClassifierRules, url: &Url) -> Option<Category> {
    let path = url.path().to_ascii_lowercase();
    let ends_with_any = |exts: &[String]| exts.iter().any(|ext| path.ends_with(ext.as_str()));
    if ends_with_any(rules.video_extensions.as_slice()) {
        Some(Category::Video)
    } else if ends_with_any(rules.image_extensions.as_slice()) {
        Some(Category::Image)
    } else {
        None
    }
}
