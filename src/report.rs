// src/report.rs

use crate::{
    models::{Category, ResolvedLink},
    symbols, ui,
};
use colored::*;
use itertools::Itertools;
use log::info;
use std::collections::BTreeMap;

/// 分类阶段的统计
#[derive(Debug, Default)]
pub struct ClassifyReport {
    pub per_category: BTreeMap<Category, usize>,
    /// (文件名主干, 原因)
    pub failed: Vec<(String, String)>,
    pub unverified: Vec<(String, String)>,
}

impl ClassifyReport {
    pub fn record_resolved(&mut self, resolved: &ResolvedLink) {
        *self.per_category.entry(resolved.category).or_default() += 1;
        if resolved.is_unverified() {
            self.unverified.push((
                resolved.link.stem(),
                resolved.resolution_method.to_string(),
            ));
        }
    }

    pub fn record_failure(&mut self, stem: String, reason: String) {
        self.failed.push((stem, reason));
    }

    pub fn count(&self, category: Category) -> usize {
        self.per_category.get(&category).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.per_category.values().sum::<usize>() + self.failed.len()
    }

    pub fn print_report(&self) {
        info!(
            "分类报告: Total={}, Image={}, Video={}, News={}, Failed={}, Unverified={}",
            self.total(),
            self.count(Category::Image),
            self.count(Category::Video),
            self.count(Category::News),
            self.failed.len(),
            self.unverified.len()
        );
        if !self.unverified.is_empty() || !self.failed.is_empty() {
            ui::print_sub_header("分类详情报告");
            if !self.unverified.is_empty() {
                println!(
                    "\n{} 需要人工复核的链接 ({}个):",
                    *symbols::WARN,
                    self.unverified.len()
                );
                print_grouped_report(&self.unverified, |s| s.yellow());
            }
            if !self.failed.is_empty() {
                println!("\n{} 无法识别的链接 ({}个):", *symbols::ERROR, self.failed.len());
                print_grouped_report(&self.failed, |s| s.red());
            }
        }
        ui::print_sub_header("任务总结");
        println!(
            "{} | {} | {} | {}",
            format!("图片: {}", self.count(Category::Image)).magenta(),
            format!("视频: {}", self.count(Category::Video)).blue(),
            format!("新闻: {}", self.count(Category::News)).cyan(),
            format!("失败: {}", self.failed.len()).red()
        );
    }
}

/// 下载阶段的统计
#[derive(Debug, Default)]
pub struct DownloadReport {
    pub total: usize,
    pub success: usize,
    pub failed: Vec<(String, String)>,
}

impl DownloadReport {
    pub fn new(total: usize) -> Self {
        info!("开始新一批下载任务，总数: {}", total);
        Self {
            total,
            ..Default::default()
        }
    }

    pub fn record_success(&mut self) {
        self.success += 1;
    }

    pub fn record_failure(&mut self, stem: &str, reason: &str) {
        log::error!("'{}' 下载失败: {}", stem, reason);
        self.failed.push((stem.to_string(), reason.to_string()));
    }

    pub fn did_all_succeed(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn print_report(&self) {
        info!(
            "下载报告: Total={}, Success={}, Failed={}",
            self.total,
            self.success,
            self.failed.len()
        );
        if !self.failed.is_empty() {
            ui::print_sub_header("下载详情报告");
            println!("\n{} 失败的文件 ({}个):", *symbols::ERROR, self.failed.len());
            print_grouped_report(&self.failed, |s| s.red());
        }
        ui::print_sub_header("任务总结");
        if self.total > 0 && self.did_all_succeed() {
            println!("{} 所有 {} 个任务均已成功。", *symbols::OK, self.total);
        } else {
            println!(
                "{} | {}",
                format!("成功: {}", self.success).green(),
                format!("失败: {}", self.failed.len()).red()
            );
        }
    }
}

fn print_grouped_report(items: &[(String, String)], color_fn: fn(ColoredString) -> ColoredString) {
    let grouped = items
        .iter()
        .map(|(stem, reason)| (reason, stem))
        .into_group_map();
    for reason in grouped.keys().sorted() {
        println!("  - {}", color_fn(format!("原因: {}", reason).into()));
        for stem in grouped[reason].iter().sorted() {
            println!("    - {}", stem);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Link, Platform, ResolutionMethod};

    fn resolved(category: Category, method: ResolutionMethod) -> ResolvedLink {
        ResolvedLink {
            link: Link {
                raw_url: "https://a.example/x".into(),
                cell_reference: "E9".into(),
                position_index: 1,
            },
            category,
            resolved_url: "https://a.example/x".into(),
            resolution_method: method,
        }
    }

    #[test]
    fn test_counts() {
        let mut report = ClassifyReport::default();
        report.record_resolved(&resolved(Category::Video, ResolutionMethod::Direct));
        report.record_resolved(&resolved(Category::News, ResolutionMethod::ProbeFallback));
        report.record_resolved(&resolved(
            Category::Image,
            ResolutionMethod::PlatformResolved(Platform::ImageRedirect),
        ));
        report.record_failure("E9_2".into(), "yandex-video 解析器未找到目标链接".into());

        assert_eq!(report.count(Category::Video), 1);
        assert_eq!(report.count(Category::Unrecognized), 0);
        assert_eq!(report.total(), 4);
        assert_eq!(report.unverified.len(), 2);
    }
}
