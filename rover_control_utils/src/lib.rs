//! `rover_control_utils` 是遥控小车客户端的核心工具库。
//!
//! 它封装了客户端与小车控制服务器之间的全部交互，且不依赖任何 UI 框架，
//! 便于在 Tauri 应用和测试中复用。
//!
//! 主要模块包括：
//! - `endpoint`: 控制服务器基地址校验与请求地址拼接。
//! - `client`: HTTP 传输层 (`ControlTransport`) 与命令分发器 (`CommandDispatcher`, `ControlPanel`)。
//! - `capture`: 直播画面拍照管线（脚本注入、data URL 解码、落盘、相册登记）。
//! - `account`: 账户服务器登录与登录状态。
//! - `session_store`: 登录状态标记使用的本地键值存储。
//! - `error`: 各层的错误类型。

pub mod account;
pub mod capture;
pub mod client;
pub mod endpoint;
pub mod error;
pub mod session_store;

pub use client::{CommandDispatcher, ControlPanel, ControlTransport, HttpControlTransport};
pub use endpoint::ControlEndpoints;
pub use error::{AccountError, CaptureError, ControlError, SessionError};
