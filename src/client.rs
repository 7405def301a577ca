// src/client.rs

use crate::{config::NetworkSettings, error::*};
use reqwest::{Client, IntoUrl, Response};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use std::time::Duration;

/// HTTP 客户端。分类与解析只走 `plain` (不重试)，媒体下载走带重试的中间件客户端。
#[derive(Clone)]
pub struct RobustClient {
    plain: Client,
    retrying: ClientWithMiddleware,
    network: NetworkSettings,
}

impl RobustClient {
    pub fn new(network: &NetworkSettings) -> AppResult<Self> {
        let plain = reqwest::Client::builder()
            .user_agent(network.user_agent.clone())
            .connect_timeout(network.connect_timeout)
            .build()?;

        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(Duration::from_millis(200), Duration::from_secs(10))
            .build_with_max_retries(network.max_retries);
        let retrying = ClientBuilder::new(plain.clone())
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            plain,
            retrying,
            network: network.clone(),
        })
    }

    /// 仅获取响应头的探测请求，跟随重定向，不重试
    pub async fn head<T: IntoUrl>(&self, url: T) -> reqwest::Result<Response> {
        self.plain
            .head(url)
            .timeout(self.network.probe_timeout)
            .send()
            .await
    }

    /// 获取页面 (解析器使用)，跟随重定向，不重试，不检查状态码
    pub async fn get_page<T: IntoUrl>(&self, url: T) -> reqwest::Result<Response> {
        self.plain
            .get(url)
            .timeout(self.network.page_timeout)
            .send()
            .await
    }

    /// 下载媒体文件，瞬时错误自动重试
    pub async fn download<T: IntoUrl>(&self, url: T) -> AppResult<Response> {
        let res = self
            .retrying
            .get(url)
            .timeout(self.network.download_timeout)
            .send()
            .await?;
        Ok(res.error_for_status()?)
    }
}
