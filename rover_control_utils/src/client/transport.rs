// rover_control_utils/src/client/transport.rs

//! 控制通道的 HTTP 传输层。
//!
//! [`ControlTransport`] 抽象了控制通道需要的两种请求：无请求体的 POST（控制命令）
//! 和读取文本响应的 GET（距离查询）。生产环境使用基于 `reqwest` 的
//! [`HttpControlTransport`]，测试中可以替换为记录请求的实现。
//!
//! 传输层不配置超时、不重试，也不合并请求：一次调用对应一次请求。

use std::future::Future;

use log::{debug, warn};
use url::Url;

use crate::error::ControlError;

/// 控制通道的传输抽象。
pub trait ControlTransport: Send + Sync {
    /// 向 `url` 发送一个没有请求体的 POST，只关心是否成功送达。
    fn post_empty(&self, url: Url) -> impl Future<Output = Result<(), ControlError>> + Send;

    /// 向 `url` 发送 GET，返回响应体文本。
    fn get_text(&self, url: Url) -> impl Future<Output = Result<String, ControlError>> + Send;
}

/// 基于 `reqwest::Client` 的传输实现。
#[derive(Debug, Clone, Default)]
pub struct HttpControlTransport {
    client: reqwest::Client,
}

impl HttpControlTransport {
    pub fn new() -> Self {
        Self { client: reqwest::Client::new() }
    }

    /// 复用已有的 `reqwest::Client`（例如与账户客户端共享连接池）。
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl ControlTransport for HttpControlTransport {
    async fn post_empty(&self, url: Url) -> Result<(), ControlError> {
        debug!("[控制传输] POST {}", url);
        let response = self
            .client
            .post(url.clone())
            .send()
            .await
            .map_err(|source| ControlError::Request { url: url.to_string(), source })?;

        let status = response.status();
        if !status.is_success() {
            warn!("[控制传输] POST {} 返回状态 {}", url, status);
            return Err(ControlError::Status { url: url.to_string(), status: status.as_u16() });
        }
        Ok(())
    }

    async fn get_text(&self, url: Url) -> Result<String, ControlError> {
        debug!("[控制传输] GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| ControlError::Request { url: url.to_string(), source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ControlError::Status { url: url.to_string(), status: status.as_u16() });
        }
        response
            .text()
            .await
            .map_err(|e| ControlError::Decode { url: url.to_string(), reason: e.to_string() })
    }
}
