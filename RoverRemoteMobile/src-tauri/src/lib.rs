//! `RoverRemoteMobile` 遥控小车移动端应用核心逻辑。

pub mod api_client;
pub mod commands;
pub mod config;
pub mod error;
pub mod event;
pub mod live_view;
pub mod state;

use std::sync::Arc;

use log::{info, LevelFilter};
use rover_control_utils::account::{AccountClient, AccountService};
use rover_control_utils::session_store::SessionStore;
use tauri::Manager;

use crate::api_client::ControlApiService;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::state::CaptureViewState;

/// 登录状态标记所在的键值存储文件名（位于应用数据目录）。
const SESSION_STORE_FILE: &str = "session_store.json";

/// 应用入口。
///
/// 1. 初始化 `env_logger` 日志。
/// 2. 加载配置，失败时使用默认配置。
/// 3. 在 `setup` 钩子中创建控制服务、拍照状态和账户服务，并注册为托管状态。
/// 4. 注册所有前端可调用的命令并运行应用。
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let _ = env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .filter_module("app_lib", LevelFilter::Debug)
        .filter_module("rover_control_utils", LevelFilter::Debug)
        .filter_module("common_models", LevelFilter::Debug)
        .try_init();

    info!("遥控小车移动端 (RoverRemoteMobile) 正在启动...");
    let config = AppConfig::load_or_default();

    tauri::Builder::default()
        .setup(move |app| {
            info!("Tauri 应用的 setup 钩子函数开始执行...");
            let app_handle = app.handle().clone();

            let control = ControlApiService::new(
                app_handle.clone(),
                &config.control_server,
                config.initial_speed_level(),
            )?;
            live_view::allow_remote_ipc(&app_handle, control.base_url())?;
            app.manage(Arc::new(control));

            let capture = CaptureViewState::from_app(&app_handle, &config.capture)?;
            app.manage(Arc::new(capture));

            let data_dir = app.path().app_data_dir().map_err(|e| AppError::PathResolution(e.to_string()))?;
            let account_client = AccountClient::new(&config.account_server.base_url)?;
            let account = AccountService::new(account_client, SessionStore::new(data_dir.join(SESSION_STORE_FILE)));
            app.manage(Arc::new(account));

            info!("Tauri 应用的 setup 钩子函数执行完毕。");
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::control_cmds::control_view_mounted,
            commands::control_cmds::control_view_unmounted,
            commands::control_cmds::press_direction_in,
            commands::control_cmds::press_direction_out,
            commands::control_cmds::change_speed,
            commands::control_cmds::toggle_mode,
            commands::control_cmds::get_control_snapshot,
            commands::control_cmds::query_distance,
            commands::capture_cmds::capture_photo,
            commands::capture_cmds::deliver_capture_frame,
            commands::account_cmds::try_login,
            commands::account_cmds::check_login_status,
            commands::account_cmds::logout,
        ])
        .build(tauri::generate_context!())
        .expect("构建 Tauri 应用核心失败 (RoverRemoteMobile)，请检查配置。")
        .run(|_app_handle, event| match event {
            tauri::RunEvent::ExitRequested { .. } => {
                info!("Tauri 运行时事件：用户请求退出应用。");
            }
            tauri::RunEvent::Exit => {
                info!("Tauri 运行时事件：应用即将退出。");
            }
            _ => {}
        });
}
