// RoverRemoteMobile/src-tauri/src/commands/mod.rs

//! 供前端通过 `invoke` 调用的 Tauri 命令。
//!
//! 命令统一返回 `Result<T, String>`，`String` 为中文错误描述。

/// 控制视图：挂载/卸载、方向键、速度、识别模式、距离查询。
pub mod control_cmds;

/// 拍照：注入捕获脚本与接收回传画面。
pub mod capture_cmds;

/// 账户：登录、登录状态、退出。
pub mod account_cmds;
