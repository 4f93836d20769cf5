// RoverRemoteMobile/src-tauri/src/api_client/mod.rs

//! 外部 HTTP API 客户端。
//!
//! - `service`: 小车控制服务器的命令发送与直播地址管理 (`ControlApiService`)。
//!
//! 账户服务器的登录逻辑直接复用 `rover_control_utils::account::AccountService`。

pub mod service;

pub use service::ControlApiService;
