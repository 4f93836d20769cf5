//! `common_models` 公共模型库 crate。
//!
//! 本 crate 集中定义了 `RoverRemote` 项目各 Rust 组件（`rover_control_utils` 工具库、
//! `RoverRemoteMobile` 移动端应用的 Tauri 后端）以及 Web 前端之间共享的数据结构与枚举。
//!
//! 主要包含：
//! - **通用枚举 (`enums`)**: 移动方向 `Direction`、识别模式 `DetectionMode`。
//! - **遥控模型 (`control`)**: 速度档位、方向键按下状态、模式开关、出站控制命令、直播来源。
//! - **捕获模型 (`capture_models`)**: 渲染面回传消息、用户提示、相册资源、权限状态。
//! - **账户模型 (`account_models`)**: 登录请求体与登录状态。
//!
//! 所有模型都派生 `serde::Serialize` / `serde::Deserialize` 以及 `Debug` / `Clone`，
//! 以便作为 Tauri 命令参数和事件负载直接传递。

pub mod account_models;
pub mod capture_models;
pub mod control;
pub mod enums;

pub use account_models::{JoinRequest, LoginStatus};
pub use capture_models::{AlertKind, GalleryAsset, PermissionStatus, SurfaceMessagePayload, UserAlert};
pub use control::{ControlCommand, ControlViewSnapshot, LiveViewSource, ModeFlags, PressState, SpeedLevel};
pub use enums::{DetectionMode, Direction};
