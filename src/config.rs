// src/config.rs

pub mod file;
pub mod patterns;

use self::{file::load_or_create_external_config, patterns::PatternSet};
use crate::{cli::Cli, constants, error::AppResult};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub user_agent: Option<String>,
    pub connect_timeout_secs: Option<u64>,
    pub probe_timeout_secs: Option<u64>,
    pub page_timeout_secs: Option<u64>,
    pub download_timeout_secs: Option<u64>,
    pub max_retries: Option<u32>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            user_agent: Some(constants::USER_AGENT.into()),
            connect_timeout_secs: Some(10),
            probe_timeout_secs: Some(10),
            page_timeout_secs: Some(15),
            download_timeout_secs: Some(30),
            max_retries: Some(3),
        }
    }
}

/// 静态分类规则：域名白名单与扩展名
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainConfig {
    pub video_hosts: Vec<String>,
    pub image_hosts: Vec<String>,
    pub news_hosts: Vec<String>,
    pub image_url_markers: Vec<String>,
    pub video_extensions: Vec<String>,
    pub image_extensions: Vec<String>,
}

impl Default for DomainConfig {
    fn default() -> Self {
        Self {
            video_hosts: strings(&[
                "youtube.com", "youtu.be", "vimeo.com", "vk.com/video", "rutube.ru",
                "dailymotion.com", "tiktok.com", "facebook.com", "bilibili.com", "ok.ru",
                "dzen.ru", "instagram.com", "twitch.tv", "megabook.ru/stream",
            ]),
            image_hosts: strings(&[
                "avatars.mds.yandex.net", "avatars.dzeninfra.ru", "cdn.i.haymarketmedia.asia",
                "images.steamusercontent.com", "play-lh.googleusercontent.com",
            ]),
            news_hosts: strings(&["starhit.ru", "rbc.ru", "rambler.ru"]),
            image_url_markers: strings(&["scale_", "resize", "XXXL", "diploma", "thumbs"]),
            video_extensions: strings(&[".mp4", ".webm", ".mov", ".avi", ".mkv", ".flv", ".m4v", ".3gp"]),
            image_extensions: strings(&[".jpg", ".jpeg", ".png", ".gif", ".webp", ".bmp", ".tiff", ".svg"]),
        }
    }
}

/// 需要平台解析器拆解的间接链接规则
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndirectionConfig {
    pub aggregator_pages: Vec<String>,
    pub image_redirects: Vec<String>,
    pub social_posts: Vec<String>,
    pub no_video_markers: Vec<String>,
}

impl Default for IndirectionConfig {
    fn default() -> Self {
        Self {
            aggregator_pages: strings(&["yandex.ru/video/"]),
            image_redirects: strings(&["images.app.goo.gl", "share.google", "google.com/imgres"]),
            social_posts: strings(&["instagram.com", "facebook.com", "vk.com", "tiktok.com"]),
            no_video_markers: strings(&["There is no video in this post", "No video formats found"]),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YandexConfig {
    pub final_frames: Vec<String>,
    pub player_widgets: Vec<String>,
    pub generic_frames: Vec<String>,
    pub anchor_targets: Vec<String>,
}

impl Default for YandexConfig {
    fn default() -> Self {
        Self {
            final_frames: strings(&["ok.ru/videoembed", "youtube.com", "rutube.ru"]),
            player_widgets: strings(&["yastatic.net/video-player"]),
            generic_frames: strings(&["ok.ru/video"]),
            anchor_targets: strings(&[
                "youtube.com", "youtu.be", "vk.com", "rutube.ru", "ok.ru", "dzen.ru", "vimeo.com",
            ]),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ToolsConfig {
    pub yt_dlp_path: Option<String>,
    pub browser_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExternalConfig {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub domains: DomainConfig,
    #[serde(default)]
    pub indirection: IndirectionConfig,
    #[serde(default)]
    pub yandex: YandexConfig,
    #[serde(default)]
    pub tools: ToolsConfig,
}

// --- 编译后的运行时配置，按组件拆分，显式传入各个组件 ---

#[derive(Debug, Clone)]
pub struct NetworkSettings {
    pub user_agent: String,
    pub connect_timeout: Duration,
    pub probe_timeout: Duration,
    pub page_timeout: Duration,
    pub download_timeout: Duration,
    pub max_retries: u32,
}

#[derive(Debug, Clone)]
pub struct ClassifierRules {
    pub video_hosts: PatternSet,
    pub image_hosts: PatternSet,
    pub news_hosts: PatternSet,
    pub image_url_markers: Vec<String>,
    pub video_extensions: Vec<String>,
    pub image_extensions: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct YandexRules {
    pub pages: PatternSet,
    pub final_frames: PatternSet,
    pub player_widgets: PatternSet,
    pub generic_frames: PatternSet,
    pub anchor_targets: PatternSet,
}

#[derive(Debug, Clone)]
pub struct SocialRules {
    pub posts: PatternSet,
    pub no_video_markers: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub network: NetworkSettings,
    pub classifier: ClassifierRules,
    pub yandex: YandexRules,
    pub image_redirects: PatternSet,
    pub social: SocialRules,
    pub yt_dlp_path: String,
    pub browser_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn new(args: &Cli) -> AppResult<Self> {
        let external_config = load_or_create_external_config()?;
        let mut config = Self::from_external(external_config);
        if let Some(path) = &args.yt_dlp {
            config.yt_dlp_path = path.clone();
        }
        if let Some(path) = &args.browser {
            config.browser_path = Some(path.clone());
        }
        Ok(config)
    }

    pub fn from_external(external: ExternalConfig) -> Self {
        let defaults = NetworkConfig::default();
        let net = external.network;
        let secs = |value: Option<u64>, fallback: Option<u64>| {
            Duration::from_secs(value.or(fallback).unwrap_or(10))
        };

        let lowercase = |items: Vec<String>| -> Vec<String> {
            items.into_iter().map(|s| s.to_ascii_lowercase()).collect()
        };

        Self {
            network: NetworkSettings {
                user_agent: net
                    .user_agent
                    .unwrap_or_else(|| constants::USER_AGENT.into()),
                connect_timeout: secs(net.connect_timeout_secs, defaults.connect_timeout_secs),
                probe_timeout: secs(net.probe_timeout_secs, defaults.probe_timeout_secs),
                page_timeout: secs(net.page_timeout_secs, defaults.page_timeout_secs),
                download_timeout: secs(net.download_timeout_secs, defaults.download_timeout_secs),
                max_retries: net.max_retries.or(defaults.max_retries).unwrap_or(3),
            },
            classifier: ClassifierRules {
                video_hosts: PatternSet::from_strings(&external.domains.video_hosts),
                image_hosts: PatternSet::from_strings(&external.domains.image_hosts),
                news_hosts: PatternSet::from_strings(&external.domains.news_hosts),
                image_url_markers: external.domains.image_url_markers,
                video_extensions: lowercase(external.domains.video_extensions),
                image_extensions: lowercase(external.domains.image_extensions),
            },
            yandex: YandexRules {
                pages: PatternSet::from_strings(&external.indirection.aggregator_pages),
                final_frames: PatternSet::from_strings(&external.yandex.final_frames),
                player_widgets: PatternSet::from_strings(&external.yandex.player_widgets),
                generic_frames: PatternSet::from_strings(&external.yandex.generic_frames),
                anchor_targets: PatternSet::from_strings(&external.yandex.anchor_targets),
            },
            image_redirects: PatternSet::from_strings(&external.indirection.image_redirects),
            social: SocialRules {
                posts: PatternSet::from_strings(&external.indirection.social_posts),
                no_video_markers: external.indirection.no_video_markers,
            },
            yt_dlp_path: external
                .tools
                .yt_dlp_path
                .unwrap_or_else(|| constants::DEFAULT_YT_DLP.into()),
            browser_path: external.tools.browser_path.map(PathBuf::from),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_external(ExternalConfig::default())
    }
}
