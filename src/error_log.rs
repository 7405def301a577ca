// src/error_log.rs

use crate::{error::AppResult, models::ErrorRecord};
use anyhow::Context;
use log::warn;
use std::{
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
};

/// 只追加的文本日志。每次写入都单独打开、追加一行、关闭，运行中从不回读。
#[derive(Debug, Clone)]
pub struct ErrorLog {
    path: PathBuf,
}

impl ErrorLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, record: &ErrorRecord) -> AppResult<()> {
        warn!("记录到 {:?}: {} ({})", self.path, record.url, record.reason);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("无法打开日志文件 {:?}", self.path))?;
        writeln!(file, "{}", format_line(record))?;
        Ok(())
    }
}

/// `<cell> [<idx>]: <url>`，没有序号时为 `<cell>: <url>`
pub fn format_line(record: &ErrorRecord) -> String {
    match record.position_index {
        Some(index) => format!("{} [{}]: {}", record.cell_reference, index, record.url),
        None => format!("{}: {}", record.cell_reference, record.url),
    }
}
