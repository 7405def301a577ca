// src/records.rs

use crate::{
    error::{AppError, AppResult},
    models::{Category, ErrorRecord, ResolvedLink},
};
use anyhow::Context;
use log::{info, warn};
use std::{fmt, fs, io::Write, path::Path, str::FromStr};

const SEPARATOR: &str = " : ";

/// 下载阶段的一行输入：`<cell>_<idx> : <url>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub cell_reference: String,
    pub position_index: usize,
    pub url: String,
}

impl Record {
    pub fn stem(&self) -> String {
        format!("{}_{}", self.cell_reference, self.position_index)
    }

    pub fn error(&self, reason: impl Into<String>) -> ErrorRecord {
        ErrorRecord {
            cell_reference: self.cell_reference.clone(),
            position_index: Some(self.position_index),
            url: self.url.clone(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.stem(), SEPARATOR, self.url)
    }
}

impl FromStr for Record {
    type Err = AppError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let invalid = || AppError::InvalidRecord(line.to_string());
        let (stem, url) = line.trim().split_once(SEPARATOR).ok_or_else(invalid)?;
        let (cell, index) = stem.trim().rsplit_once('_').ok_or_else(invalid)?;
        let url = url.trim();
        if cell.is_empty() || url.is_empty() {
            return Err(invalid());
        }
        Ok(Self {
            cell_reference: cell.to_string(),
            position_index: index.parse().map_err(|_| invalid())?,
            url: url.to_string(),
        })
    }
}

impl From<&ResolvedLink> for Record {
    fn from(resolved: &ResolvedLink) -> Self {
        Self {
            cell_reference: resolved.link.cell_reference.clone(),
            position_index: resolved.link.position_index,
            url: resolved.resolved_url.clone(),
        }
    }
}

/// 读取链接记录文件，跳过空行与 `#` 注释，格式错误的行记警告后跳过
pub fn read_records(path: &Path) -> AppResult<Vec<Record>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("无法读取链接记录文件 {:?}", path))?;
    let records: Vec<Record> = content
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .filter_map(|(no, line)| match line.parse::<Record>() {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("{:?} 第 {} 行: {}", path, no + 1, e);
                None
            }
        })
        .collect();
    info!("从 {:?} 读取了 {} 条链接记录", path, records.len());
    Ok(records)
}

/// 写出某一类别的链接文件，开头是 `#` 说明行
pub fn write_category_file(
    path: &Path,
    category: Category,
    column: char,
    records: &[Record],
) -> AppResult<()> {
    let mut file = fs::File::create(path)?;
    writeln!(file, "# category: {}", category)?;
    writeln!(
        file,
        "# generated: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    )?;
    writeln!(file, "# column: {}", column)?;
    writeln!(file, "# count: {}", records.len())?;
    for record in records {
        writeln!(file, "{}", record)?;
    }
    info!("已写入 {} 条 {} 链接到 {:?}", records.len(), category, path);
    Ok(())
}
