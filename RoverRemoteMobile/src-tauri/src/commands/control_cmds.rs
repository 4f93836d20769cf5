// RoverRemoteMobile/src-tauri/src/commands/control_cmds.rs

//! 控制视图相关的 Tauri 命令：生命周期、方向键、速度、识别模式、距离查询。
//!
//! 方向与速度命令只等待本地状态更新，控制请求在后台发出，
//! 请求失败不会反映到命令的返回值上。

use std::sync::Arc;

use common_models::{ControlViewSnapshot, DetectionMode, Direction, SpeedLevel};
use log::{error, info};
use tauri::{AppHandle, State};

use crate::api_client::ControlApiService;
use crate::error::AppError;
use crate::event::emit_user_alert;
use crate::live_view;
use crate::state::CaptureViewState;

/// Tauri 命令：控制视图挂载。
///
/// 创建新的面板状态（初始速度来自配置），申请一次相册权限，
/// 注册捕获消息处理器，并在直播窗口中打开初始视频流。
#[tauri::command]
pub async fn control_view_mounted(
    app_handle: AppHandle,
    control: State<'_, Arc<ControlApiService>>,
    capture: State<'_, Arc<CaptureViewState>>,
) -> Result<ControlViewSnapshot, String> {
    info!("Tauri 命令 'control_view_mounted' 被调用");
    let snapshot = control.mount().await;

    if let Some(alert) = capture.mount().await {
        emit_user_alert(&app_handle, &alert);
    }
    if let Err(e) = live_view::show_stream(&app_handle, &snapshot.stream_url) {
        error!("命令 'control_view_mounted': 打开直播窗口失败: {}", e);
    }
    Ok(snapshot)
}

/// Tauri 命令：控制视图卸载。丢弃面板状态，拆除捕获消息处理器，关闭直播窗口。
#[tauri::command]
pub async fn control_view_unmounted(
    app_handle: AppHandle,
    control: State<'_, Arc<ControlApiService>>,
    capture: State<'_, Arc<CaptureViewState>>,
) -> Result<(), String> {
    info!("Tauri 命令 'control_view_unmounted' 被调用");
    control.unmount().await;
    capture.unmount().await;
    live_view::close(&app_handle);
    Ok(())
}

#[tauri::command]
pub async fn press_direction_in(
    control: State<'_, Arc<ControlApiService>>,
    direction: Direction,
) -> Result<(), String> {
    info!("Tauri 命令 'press_direction_in' 被调用: {}", direction);
    control.press_in(direction).await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn press_direction_out(
    control: State<'_, Arc<ControlApiService>>,
    direction: Direction,
) -> Result<(), String> {
    info!("Tauri 命令 'press_direction_out' 被调用: {}", direction);
    control.press_out(direction).await.map_err(|e| e.to_string())
}

/// Tauri 命令：滑块每移动一档提交一次速度档位 (0..=10)。
#[tauri::command]
pub async fn change_speed(
    control: State<'_, Arc<ControlApiService>>,
    level: u8,
) -> Result<ControlViewSnapshot, String> {
    info!("Tauri 命令 'change_speed' 被调用: {}", level);
    let level = SpeedLevel::try_from(level).map_err(|e| AppError::from(e).to_string())?;
    control.change_speed(level).await.map_err(|e| e.to_string())
}

/// Tauri 命令：切换人脸/手势识别。不发送控制请求，只更新直播地址。
#[tauri::command]
pub async fn toggle_mode(
    app_handle: AppHandle,
    control: State<'_, Arc<ControlApiService>>,
    mode: DetectionMode,
) -> Result<ControlViewSnapshot, String> {
    info!("Tauri 命令 'toggle_mode' 被调用: {}", mode);
    let snapshot = control.toggle_mode(mode).await.map_err(|e| e.to_string())?;
    if let Err(e) = live_view::show_stream(&app_handle, &snapshot.stream_url) {
        error!("命令 'toggle_mode': 切换直播画面失败: {}", e);
    }
    Ok(snapshot)
}

#[tauri::command]
pub async fn get_control_snapshot(control: State<'_, Arc<ControlApiService>>) -> Result<ControlViewSnapshot, String> {
    control.snapshot().await.map_err(|e| e.to_string())
}

/// Tauri 命令：查询最近一次超声波距离读数（厘米）。
#[tauri::command]
pub async fn query_distance(control: State<'_, Arc<ControlApiService>>) -> Result<Option<f64>, String> {
    control.query_distance().await.map_err(|e| {
        error!("命令 'query_distance' 失败: {}", e);
        e.to_string()
    })
}
