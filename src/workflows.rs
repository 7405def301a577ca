// src/workflows.rs

use crate::{
    LinkJobContext,
    constants::files,
    error::AppResult,
    error_log::ErrorLog,
    extractor,
    fetcher::{ImageFetcher, VideoFetcher, VideoOutcome},
    models::{Category, Classification, ErrorRecord, LinkOutcome},
    records::{self, Record},
    report::{ClassifyReport, DownloadReport},
    symbols, ui, utils,
};
use anyhow::Context;
use colored::*;
use log::{debug, info};
use std::{collections::BTreeMap, fs, path::Path};

/// 按类别输出的链接文件名，例如 `video_links.txt`
pub fn category_file_name(category: Category) -> String {
    format!("{}_links.txt", category.label())
}

/// 提取并分类导出文件中的全部链接。逐行、逐链接顺序处理，单条失败不影响后续。
pub async fn run_classify(
    context: &LinkJobContext,
    input: &Path,
    column: char,
    start_row: usize,
) -> AppResult<ClassifyReport> {
    let content =
        fs::read_to_string(input).with_context(|| format!("无法读取输入文件 {:?}", input))?;
    utils::ensure_dir(&context.output_dir)?;

    ui::print_header(&format!("分类链接: {:?} (列 {})", input, column));
    println!("逐条处理，按 {} 可随时中断。", *symbols::CTRL_C);
    let classifier = context.classifier();
    let error_log = ErrorLog::new(context.output_dir.join(files::PARSE_ERRORS));
    let review_log = ErrorLog::new(context.output_dir.join(files::UNVERIFIED));

    let mut report = ClassifyReport::default();
    let mut grouped: BTreeMap<Category, Vec<Record>> = BTreeMap::new();

    for (offset, text) in content.lines().enumerate() {
        let cell = extractor::cell_reference(column, start_row + offset);
        let links = extractor::extract_links(text, &cell);
        if links.is_empty() {
            continue;
        }
        debug!("{} 中找到 {} 条链接", cell, links.len());

        for link in links {
            match classifier.evaluate(link).await {
                LinkOutcome::Resolved(resolved) => {
                    ui::print_link_line(
                        resolved.category,
                        &resolved.link.stem(),
                        &resolved.resolved_url,
                    );
                    if resolved.is_unverified() {
                        review_log.append(&ErrorRecord::for_link(
                            &resolved.link,
                            resolved.resolution_method.to_string(),
                        ))?;
                    }
                    report.record_resolved(&resolved);
                    grouped
                        .entry(resolved.category)
                        .or_default()
                        .push(Record::from(&resolved));
                }
                LinkOutcome::Failed(record) => {
                    let stem = format!(
                        "{}_{}",
                        record.cell_reference,
                        record.position_index.unwrap_or_default()
                    );
                    ui::print_failure_line(&stem, &record.url, &record.reason);
                    error_log.append(&record)?;
                    report.record_failure(stem, record.reason);
                }
            }
        }
    }

    for (category, category_records) in &grouped {
        let path = context.output_dir.join(category_file_name(*category));
        records::write_category_file(&path, *category, column, category_records)?;
    }

    report.print_report();
    if !report.failed.is_empty() {
        println!(
            "\n{} 无法识别的链接已记录到 {:?}",
            *symbols::INFO,
            error_log.path()
        );
    }
    if !report.unverified.is_empty() {
        println!(
            "{} 需要复核的链接已记录到 {:?}",
            *symbols::INFO,
            review_log.path()
        );
    }
    Ok(report)
}

/// 对单个链接进行分类并显示结果
pub async fn run_single(context: &LinkJobContext, url: &str) -> AppResult<Classification> {
    let classification = context.classifier().classify(url).await;
    info!(
        "'{}' -> {} ({}) {}",
        url, classification.category, classification.method, classification.resolved_url
    );
    let category_line = format!("类别: {}", classification.category.symbol());
    let resolved_line = format!("链接: {}", classification.resolved_url);
    let method_line = format!("方式: {}", classification.method);
    ui::box_message(
        "分类结果",
        &[&category_line, &resolved_line, &method_line],
        |s| s.cyan(),
    );
    Ok(classification)
}

/// 按链接记录下载图片到 `<output>/images`
pub async fn run_download_images(
    context: &LinkJobContext,
    records_path: &Path,
) -> AppResult<DownloadReport> {
    let items = records::read_records(records_path)?;
    let dir = context.output_dir.join(files::IMAGE_DIR);
    utils::ensure_dir(&dir)?;
    let error_log = ErrorLog::new(context.output_dir.join(files::IMAGE_ERRORS));
    let fetcher = ImageFetcher::new(context.http_client.clone());

    ui::print_header(&format!("下载图片 ({} 条)", items.len()));
    let mut report = DownloadReport::new(items.len());
    for record in &items {
        let stem = record.stem();
        match fetcher.fetch(&record.url, &dir, &stem).await {
            Ok(path) => {
                println!("{} {} -> {:?}", *symbols::OK, stem, path);
                report.record_success();
            }
            Err(e) => {
                let reason = e.to_string();
                ui::print_failure_line(&stem, &record.url, &reason);
                error_log.append(&record.error(reason.clone()))?;
                report.record_failure(&stem, &reason);
            }
        }
    }
    report.print_report();
    Ok(report)
}

/// 按链接记录下载视频到 `<output>/videos`。
/// 社交平台帖子没有视频时，改为下载帖子封面图，文件名主干不变。
pub async fn run_download_videos(
    context: &LinkJobContext,
    fetcher: &dyn VideoFetcher,
    records_path: &Path,
) -> AppResult<DownloadReport> {
    let items = records::read_records(records_path)?;
    let dir = context.output_dir.join(files::VIDEO_DIR);
    utils::ensure_dir(&dir)?;
    let error_log = ErrorLog::new(context.output_dir.join(files::VIDEO_ERRORS));
    let social = context.social_resolver();
    let images = ImageFetcher::new(context.http_client.clone());

    ui::print_header(&format!("下载视频 ({} 条)", items.len()));
    let mut report = DownloadReport::new(items.len());
    for record in &items {
        let stem = record.stem();
        let result = match fetcher.fetch(&record.url, &dir, &stem).await {
            Ok(VideoOutcome::Downloaded) => Ok(()),
            Ok(VideoOutcome::NoVideo(reason)) if !social.is_post(&record.url) => Err(reason),
            Ok(VideoOutcome::NoVideo(reason)) => match social.resolve_post(&record.url).await {
                Some(image_url) => images
                    .fetch(&image_url, &dir, &stem)
                    .await
                    .map(|path| {
                        println!("{} {} 没有视频，已保存封面图 {:?}", *symbols::INFO, stem, path)
                    })
                    .map_err(|e| e.to_string()),
                None => Err(format!("{}; 也未找到封面图", reason)),
            },
            Ok(VideoOutcome::Failed(reason)) => Err(reason),
            Err(e) => Err(e.to_string()),
        };

        match result {
            Ok(()) => {
                println!("{} {}", *symbols::OK, stem);
                report.record_success();
            }
            Err(reason) => {
                ui::print_failure_line(&stem, &record.url, &reason);
                error_log.append(&record.error(reason.clone()))?;
                report.record_failure(&stem, &reason);
            }
        }
    }
    report.print_report();
    Ok(report)
}
