// src/classifier/mod.rs

pub mod heuristics;

use crate::{
    client::RobustClient,
    config::{AppConfig, ClassifierRules},
    models::{Category, Classification, Link, LinkOutcome, ErrorRecord, ResolutionMethod, ResolvedLink},
    probe::ContentTypeProbe,
    render::PageRenderer,
    resolver::{ImageRedirectResolver, Resolver, YandexResolver},
};
use log::{debug, info, warn};
use std::sync::Arc;
use url::Url;

/// 无法得出结果的原因，连同已经走到的解析方式一起返回
#[derive(Debug, Clone)]
struct Unresolved {
    method: ResolutionMethod,
    reason: String,
}

/// 分类器：按层级依次尝试，先命中者胜出，不回退到更早的层级。
///
/// 1. 已知的间接链接交给平台解析器，解析失败直接判为无法识别；
/// 2. 域名白名单；
/// 3. 路径扩展名；
/// 4. HEAD 探测 Content-Type，探测失败时默认归为新闻。
pub struct Classifier {
    rules: ClassifierRules,
    resolvers: Vec<Box<dyn Resolver>>,
    probe: ContentTypeProbe,
}

impl Classifier {
    pub fn new(
        config: &AppConfig,
        http_client: Arc<RobustClient>,
        renderer: Option<Arc<dyn PageRenderer>>,
    ) -> Self {
        let resolvers: Vec<Box<dyn Resolver>> = vec![
            Box::new(YandexResolver::new(
                http_client.clone(),
                config.yandex.clone(),
            )),
            Box::new(ImageRedirectResolver::new(
                http_client.clone(),
                config.image_redirects.clone(),
                renderer,
            )),
        ];
        Self::with_resolvers(config.classifier.clone(), resolvers, http_client)
    }

    pub fn with_resolvers(
        rules: ClassifierRules,
        resolvers: Vec<Box<dyn Resolver>>,
        http_client: Arc<RobustClient>,
    ) -> Self {
        Self {
            rules,
            resolvers,
            probe: ContentTypeProbe::new(http_client),
        }
    }

    /// 返回 (类别, 解析后的链接)，失败时类别为 Unrecognized 且链接保持原样
    pub async fn classify(&self, url: &str) -> Classification {
        match self.try_classify(url).await {
            Ok(classification) => classification,
            Err(unresolved) => Classification {
                category: Category::Unrecognized,
                resolved_url: url.to_string(),
                method: unresolved.method,
            },
        }
    }

    /// 处理单条链接，结果要么是 ResolvedLink，要么是 ErrorRecord
    pub async fn evaluate(&self, link: Link) -> LinkOutcome {
        match self.try_classify(&link.raw_url).await {
            Ok(c) => {
                debug!("{} [{}] -> {} ({})", link.cell_reference, link.position_index, c.category, c.method);
                LinkOutcome::Resolved(ResolvedLink {
                    link,
                    category: c.category,
                    resolved_url: c.resolved_url,
                    resolution_method: c.method,
                })
            }
            Err(unresolved) => {
                warn!(
                    "{} [{}] 无法识别 '{}': {}",
                    link.cell_reference, link.position_index, link.raw_url, unresolved.reason
                );
                LinkOutcome::Failed(ErrorRecord::for_link(&link, unresolved.reason))
            }
        }
    }

    async fn try_classify(&self, raw_url: &str) -> Result<Classification, Unresolved> {
        let url = Url::parse(raw_url).map_err(|e| Unresolved {
            method: ResolutionMethod::Direct,
            reason: format!("无效的 URL: {}", e),
        })?;

        // 1. 间接链接
        if let Some(resolver) = self.resolvers.iter().find(|r| r.handles(&url)) {
            let platform = resolver.platform();
            let method = ResolutionMethod::PlatformResolved(platform);
            return match resolver.resolve(raw_url).await {
                Some(resolved_url) => Ok(Classification {
                    category: resolver.category(),
                    resolved_url,
                    method,
                }),
                None => Err(Unresolved {
                    method,
                    reason: format!("{} 解析器未找到目标链接", platform),
                }),
            };
        }

        // 2 & 3. 静态规则
        if let Some(category) = heuristics::static_category(&self.rules, &url) {
            return Ok(Classification {
                category,
                resolved_url: raw_url.to_string(),
                method: ResolutionMethod::Direct,
            });
        }

        // 4. Content-Type 探测
        match self.probe.probe(raw_url).await {
            Ok(category) => Ok(Classification {
                category,
                resolved_url: raw_url.to_string(),
                method: ResolutionMethod::HeaderProbe,
            }),
            Err(failure) => {
                info!("探测 '{}' 失败 ({})，默认归为新闻", raw_url, failure);
                Ok(Classification {
                    category: Category::News,
                    resolved_url: raw_url.to_string(),
                    method: ResolutionMethod::ProbeFallback,
                })
            }
        }
    }
}
