// src/cli.rs

use crate::constants;
use clap::{Parser, ValueEnum, crate_version};
use std::path::PathBuf;

/// 定义日志输出级别
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// 列字母只接受单个 A-Z，小写自动转为大写
fn parse_column(s: &str) -> Result<char, String> {
    let mut chars = s.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Ok(c.to_ascii_uppercase()),
        _ => Err(format!("'{}' 不是有效的列字母 (A-Z)", s)),
    }
}

/// 行号从 1 开始
fn parse_start_row(s: &str) -> Result<usize, String> {
    match s.trim().parse::<usize>() {
        Ok(row) if row >= 1 => Ok(row),
        _ => Err(format!("'{}' 不是有效的行号 (从 1 开始)", s)),
    }
}

#[derive(Parser, Debug, Clone)]
#[command(
    version = crate_version!(),
    about,
    long_about = None,
    arg_required_else_help = true,
    disable_help_flag = true,
    disable_version_flag = true,
)]
#[command(group(
    clap::ArgGroup::new("mode")
        .required(true)
        .args(&["input", "url", "download_images", "download_videos"]),
))]
pub struct Cli {
    // --- 运行模式 (Mode) ---
    /// 从导出的单列文本文件中提取并分类链接 (每行一个单元格)
    #[arg(short, long, value_name = "FILE", help_heading = "Mode", requires = "column")]
    pub input: Option<PathBuf>,
    /// 对单个链接进行分类并显示解析结果
    #[arg(long, help_heading = "Mode")]
    pub url: Option<String>,
    /// 按链接记录文件下载图片
    #[arg(long, value_name = "FILE", help_heading = "Mode")]
    pub download_images: Option<PathBuf>,
    /// 按链接记录文件下载视频 (调用外部 yt-dlp)
    #[arg(long, value_name = "FILE", help_heading = "Mode")]
    pub download_videos: Option<PathBuf>,

    // --- 选项 (Options) ---
    /// 单元格所在列的字母，用于生成单元格引用 (例如 B17)
    #[arg(short, long, value_parser = parse_column, help_heading = "Options")]
    pub column: Option<char>,
    /// 输入文件第一行对应的行号
    #[arg(long, default_value_t = 1, value_parser = parse_start_row, help_heading = "Options")]
    pub start_row: usize,
    /// 设置输出目录
    #[arg(short, long, value_name = "DIR", default_value_os_t = PathBuf::from(constants::DEFAULT_OUTPUT_DIR), help_heading = "Options")]
    pub output: PathBuf,
    /// 无头浏览器可执行文件路径，用于渲染依赖 JavaScript 的图片跳转页
    #[arg(long, value_name = "PATH", help_heading = "Options")]
    pub browser: Option<PathBuf>,
    /// yt-dlp 可执行文件路径
    #[arg(long, value_name = "PATH", help_heading = "Options")]
    pub yt_dlp: Option<String>,

    // --- 通用选项 (General) ---
    /// 显示此帮助信息并退出
    #[arg(short = 'h', long, action = clap::ArgAction::Help, global = true, help_heading = "General")]
    _help: Option<bool>,
    /// 显示版本信息并退出
    #[arg(short = 'V', long, action = clap::ArgAction::Version, global = true, help_heading = "General")]
    _version: Option<bool>,
    /// (隐藏参数) 设置日志文件的输出级别，用于调试
    #[arg(long, value_enum, default_value_t = LogLevel::Off, global = true, hide = true)]
    pub log_level: LogLevel,
}
