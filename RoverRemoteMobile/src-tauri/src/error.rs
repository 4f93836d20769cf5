// RoverRemoteMobile/src-tauri/src/error.rs

//! `RoverRemoteMobile` 应用层错误。
//!
//! Tauri 命令统一返回 `Result<T, String>`，命令内部先得到 `AppError`，
//! 再通过 `to_string()` 转成前端可读的中文描述。

use common_models::control::SpeedLevelOutOfRange;
use rover_control_utils::{AccountError, CaptureError, ControlError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("控制视图尚未挂载")]
    ViewNotMounted,

    #[error("直播窗口不可用: {0}")]
    LiveViewUnavailable(String),

    #[error("无法定位应用目录: {0}")]
    PathResolution(String),

    #[error("无效的速度档位: {0}")]
    InvalidSpeed(#[from] SpeedLevelOutOfRange),

    #[error(transparent)]
    Control(#[from] ControlError),

    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Account(#[from] AccountError),

    #[error("Tauri 运行时错误: {0}")]
    Tauri(#[from] tauri::Error),
}
