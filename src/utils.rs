// src/utils.rs

use crate::{constants, error::*};
use anyhow::Context;
use std::path::Path;

/// 按显示宽度截断 (非 ASCII 字符按 2 计)，超长时以 "..." 结尾
pub fn truncate_text(text: &str, max_width: usize) -> String {
    let limit = max_width.saturating_sub(3);
    let mut width = 0;
    for (i, c) in text.char_indices() {
        width += if c.is_ascii() { 1 } else { 2 };
        if width > limit {
            return format!("{}...", &text[..i]);
        }
    }
    text.to_string()
}

/// 控制台输出中链接的统一截断长度
pub fn display_url(url: &str) -> String {
    truncate_text(url, constants::URL_DISPLAY_LENGTH)
}

pub fn ensure_dir(dir: &Path) -> AppResult<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("无法创建目录 {:?}", dir))?;
    Ok(())
}
