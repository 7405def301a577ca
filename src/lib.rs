// src/lib.rs

pub mod classifier;
pub mod cli;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod error_log;
pub mod extractor;
pub mod fetcher;
pub mod models;
pub mod probe;
pub mod records;
pub mod render;
pub mod report;
pub mod resolver;
pub mod symbols;
pub mod ui;
pub mod utils;
pub mod workflows;

use crate::{
    classifier::Classifier,
    cli::Cli,
    client::RobustClient,
    config::AppConfig,
    error::{AppError, AppResult},
    fetcher::YtDlp,
    render::{HeadlessBrowser, PageRenderer},
    resolver::SocialFallbackResolver,
};
use log::debug;
use std::{path::PathBuf, sync::Arc};

/// 执行上下文，包含所有任务共用的配置与客户端
#[derive(Clone)]
pub struct LinkJobContext {
    pub config: Arc<AppConfig>,
    pub http_client: Arc<RobustClient>,
    pub output_dir: PathBuf,
}

impl LinkJobContext {
    pub fn new(config: AppConfig, output_dir: PathBuf) -> AppResult<Self> {
        let http_client = Arc::new(RobustClient::new(&config.network)?);
        Ok(Self {
            config: Arc::new(config),
            http_client,
            output_dir,
        })
    }

    /// 配置了浏览器路径时才启用页面渲染
    pub fn renderer(&self) -> Option<Arc<dyn PageRenderer>> {
        self.config.browser_path.clone().map(|path| {
            Arc::new(HeadlessBrowser::new(path, self.config.network.page_timeout))
                as Arc<dyn PageRenderer>
        })
    }

    pub fn classifier(&self) -> Classifier {
        Classifier::new(&self.config, self.http_client.clone(), self.renderer())
    }

    pub fn social_resolver(&self) -> SocialFallbackResolver {
        SocialFallbackResolver::new(self.http_client.clone(), self.config.social.clone())
    }

    pub fn yt_dlp(&self) -> YtDlp {
        YtDlp::new(
            self.config.yt_dlp_path.clone(),
            &self.config.network,
            self.config.social.no_video_markers.clone(),
        )
    }
}

/// 库的公共入口点，由 `main.rs` 调用
pub async fn run_from_cli(args: Arc<Cli>) -> AppResult<()> {
    debug!("CLI 参数: {:?}", args);
    let config = AppConfig::new(&args)?;
    debug!("加载的应用配置: {:?}", config);
    let context = LinkJobContext::new(config, args.output.clone())?;

    if let Some(input) = &args.input {
        let column = args
            .column
            .ok_or_else(|| AppError::UserInputError("使用 --input 时必须提供 --column".into()))?;
        workflows::run_classify(&context, input, column, args.start_row).await?;
    } else if let Some(url) = &args.url {
        workflows::run_single(&context, url).await?;
    } else if let Some(path) = &args.download_images {
        workflows::run_download_images(&context, path).await?;
    } else if let Some(path) = &args.download_videos {
        let yt_dlp = context.yt_dlp();
        workflows::run_download_videos(&context, &yt_dlp, path).await?;
    }
    Ok(())
}
