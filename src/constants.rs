// src/constants.rs

pub const UI_WIDTH: usize = 88;
pub const URL_DISPLAY_LENGTH: usize = 70;
pub const CONFIG_DIR_NAME: &str = concat!(".", clap::crate_name!());
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const LOG_FILE_NAME: &str = concat!(clap::crate_name!(), ".log");
pub const LOG_FALLBACK_FILE_NAME: &str = "fallback.log";
pub const DEFAULT_OUTPUT_DIR: &str = "links_output";
pub const DEFAULT_YT_DLP: &str = "yt-dlp";
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// 输出目录中各类文件的固定名称
pub mod files {
    pub const PARSE_ERRORS: &str = "parse_links_errors.txt";
    pub const UNVERIFIED: &str = "unverified_links.txt";
    pub const IMAGE_ERRORS: &str = "download_img_errors.txt";
    pub const VIDEO_ERRORS: &str = "download_video_errors.txt";
    pub const IMAGE_DIR: &str = "images";
    pub const VIDEO_DIR: &str = "videos";
}

/// 浏览器渲染时留给页面脚本执行的虚拟时间 (毫秒)
pub const BROWSER_VIRTUAL_TIME_MS: u64 = 5000;
