// src/config/patterns.rs

use url::Url;

/// 形如 "vk.com/video" 的主机规则：匹配该主机及其所有子域名，并可附带路径前缀
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPattern {
    host: String,
    path_prefix: Option<String>,
}

impl HostPattern {
    pub fn parse(pattern: &str) -> Option<Self> {
        let pattern = pattern.trim();
        let (host, path) = match pattern.find('/') {
            Some(pos) => (&pattern[..pos], Some(&pattern[pos..])),
            None => (pattern, None),
        };
        let host = host.trim_start_matches("www.").to_ascii_lowercase();
        if host.is_empty() {
            return None;
        }
        Some(Self {
            host,
            path_prefix: path.filter(|p| *p != "/").map(str::to_string),
        })
    }

    pub fn matches(&self, url: &Url) -> bool {
        let Some(host) = url.host_str() else {
            return false;
        };
        let host = host.to_ascii_lowercase();
        let host_ok = host == self.host
            || host
                .strip_suffix(self.host.as_str())
                .is_some_and(|rest| rest.ends_with('.'));
        host_ok
            && self
                .path_prefix
                .as_deref()
                .is_none_or(|prefix| url.path().starts_with(prefix))
    }
}

/// 一组有序的主机规则
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternSet(Vec<HostPattern>);

impl PatternSet {
    pub fn from_strings(patterns: &[String]) -> Self {
        let compiled = patterns
            .iter()
            .filter_map(|p| {
                let parsed = HostPattern::parse(p);
                if parsed.is_none() {
                    log::warn!("忽略无效的主机规则: '{}'", p);
                }
                parsed
            })
            .collect();
        Self(compiled)
    }

    pub fn matches(&self, url: &Url) -> bool {
        self.0.iter().any(|p| p.matches(url))
    }

    pub fn matches_str(&self, url: &str) -> bool {
        Url::parse(url).is_ok_and(|u| self.matches(&u))
    }
}
