// src/models.rs

use crate::symbols;
use colored::ColoredString;
use std::fmt;

/// 链接指向的媒体类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Image,
    Video,
    News,
    Unrecognized,
}

impl Category {
    /// 用于输出文件名与日志的小写名称
    pub fn label(&self) -> &'static str {
        match self {
            Category::Image => "image",
            Category::Video => "video",
            Category::News => "news",
            Category::Unrecognized => "unrecognized",
        }
    }

    pub fn symbol(&self) -> &'static ColoredString {
        match self {
            Category::Image => &symbols::IMAGE,
            Category::Video => &symbols::VIDEO,
            Category::News => &symbols::NEWS,
            Category::Unrecognized => &symbols::UNRECOGNIZED,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 负责拆解间接链接的平台解析器
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Yandex,
    ImageRedirect,
    SocialFallback,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Yandex => "yandex-video",
            Platform::ImageRedirect => "image-redirect",
            Platform::SocialFallback => "social-fallback",
        };
        f.write_str(name)
    }
}

/// 最终类别是如何得出的
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionMethod {
    /// 域名或扩展名的静态规则命中
    Direct,
    /// HEAD 探测返回了可识别的 Content-Type
    HeaderProbe,
    /// 探测失败，按约定默认归为新闻
    ProbeFallback,
    PlatformResolved(Platform),
}

impl fmt::Display for ResolutionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionMethod::Direct => f.write_str("direct"),
            ResolutionMethod::HeaderProbe => f.write_str("header-probe"),
            ResolutionMethod::ProbeFallback => f.write_str("probe-fallback"),
            ResolutionMethod::PlatformResolved(p) => write!(f, "platform:{}", p),
        }
    }
}

/// 从单元格文本中提取出的一条链接，创建后不再修改
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub raw_url: String,
    pub cell_reference: String,
    /// 在单元格内的序号，从 1 开始
    pub position_index: usize,
}

impl Link {
    /// 下载阶段使用的文件名主干，例如 "B17_2"
    pub fn stem(&self) -> String {
        format!("{}_{}", self.cell_reference, self.position_index)
    }
}

/// 分类器对单个 URL 的判定结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub category: Category,
    pub resolved_url: String,
    pub method: ResolutionMethod,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    pub link: Link,
    pub category: Category,
    pub resolved_url: String,
    pub resolution_method: ResolutionMethod,
}

impl ResolvedLink {
    /// 结果来自静默兜底 (探测失败归为新闻，或图片跳转未能拆解)，需要人工复核
    pub fn is_unverified(&self) -> bool {
        match self.resolution_method {
            ResolutionMethod::ProbeFallback => true,
            ResolutionMethod::PlatformResolved(Platform::ImageRedirect) => {
                self.resolved_url == self.link.raw_url
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    pub cell_reference: String,
    pub position_index: Option<usize>,
    pub url: String,
    pub reason: String,
}

impl ErrorRecord {
    pub fn for_link(link: &Link, reason: impl Into<String>) -> Self {
        Self {
            cell_reference: link.cell_reference.clone(),
            position_index: Some(link.position_index),
            url: link.raw_url.clone(),
            reason: reason.into(),
        }
    }
}

/// 每条链接恰好产生一个结果：要么解析成功，要么进入错误日志
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    Resolved(ResolvedLink),
    Failed(ErrorRecord),
}
