// rover_control_utils/src/error.rs

//! 定义遥控工具库相关的错误类型。
//!
//! 每一层各有一个错误枚举：控制通道 (`ControlError`)、捕获管线 (`CaptureError`)、
//! 账户服务 (`AccountError`) 与本地会话存储 (`SessionError`)。
//! 调用方统一按"就地捕获、不重抛、不重试"的策略处理，错误只用于记录日志或决定提示内容。

use std::path::PathBuf;

use thiserror::Error;

/// 控制通道（移动 / 停止 / 速度 / 距离查询）可能产生的错误。
#[derive(Error, Debug)]
pub enum ControlError {
    /// 配置的服务器地址无法解析为 URL。
    #[error("无效的服务器地址 '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// 服务器地址可以解析，但不能作为拼接路径的基地址（例如 `mailto:`）。
    #[error("服务器地址 '{0}' 不能作为基地址")]
    CannotBeABase(String),

    /// 请求未能送达（连接失败、连接被重置等）。
    #[error("HTTP 请求发送失败 ({url}): {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// 服务器返回了非 2xx 状态码。
    #[error("服务器返回非成功状态 {status} ({url})")]
    Status { url: String, status: u16 },

    /// 响应体无法解析。
    #[error("解析服务器响应失败 ({url}): {reason}")]
    Decode { url: String, reason: String },
}

/// 捕获管线在注入、解码、写文件、登记相册各阶段可能产生的错误。
///
/// 面向用户时这些错误不做区分，统一显示一次失败提示。
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("渲染面回传的 data URL 格式不正确: {0}")]
    MalformedDataUrl(String),

    #[error("Base64 解码失败: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("写入文件 '{}' 失败: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("登记相册资源失败: {0}")]
    Gallery(String),

    #[error("渲染面不可用或脚本注入失败: {0}")]
    Surface(String),

    /// 当前直播来源不支持脚本注入（普通图片流）。
    #[error("当前直播来源不支持拍照")]
    CaptureUnsupported,
}

/// 账户服务器交互错误。
#[derive(Error, Debug)]
pub enum AccountError {
    #[error("账户服务器地址无效: {0}")]
    InvalidBaseUrl(#[from] ControlError),

    #[error("登录请求发送失败: {0}")]
    Request(#[from] reqwest::Error),

    #[error("登录被拒绝: 状态码 {status}, 响应: {body}")]
    Rejected { status: u16, body: String },

    #[error("保存登录状态失败: {0}")]
    Session(#[from] SessionError),
}

/// 本地键值存储（登录状态标记）错误。
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("读写会话存储文件 '{}' 失败: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("会话存储文件 '{}' 内容无效: {source}", .path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
