// RoverRemoteMobile/src-tauri/src/commands/capture_cmds.rs

//! 拍照相关的 Tauri 命令。
//!
//! `capture_photo` 由主窗口调用，向直播窗口注入捕获脚本；
//! `deliver_capture_frame` 由注入的脚本在直播窗口中调用，回传画面数据。

use std::sync::Arc;

use common_models::SurfaceMessagePayload;
use log::{info, warn};
use tauri::{AppHandle, State};

use crate::api_client::ControlApiService;
use crate::error::AppError;
use crate::event::emit_user_alert;
use crate::live_view::LiveViewSurface;
use crate::state::CaptureViewState;

/// Tauri 命令：拍照。只负责注入脚本，结果通过 `user_alert` 事件通知。
#[tauri::command]
pub async fn capture_photo(
    app_handle: AppHandle,
    control: State<'_, Arc<ControlApiService>>,
    capture: State<'_, Arc<CaptureViewState>>,
) -> Result<(), String> {
    info!("Tauri 命令 'capture_photo' 被调用");
    request_capture(&app_handle, &control, &capture).await.map_err(|e| {
        warn!("命令 'capture_photo' 失败: {}", e);
        e.to_string()
    })
}

async fn request_capture(
    app_handle: &AppHandle,
    control: &ControlApiService,
    capture: &CaptureViewState,
) -> Result<(), AppError> {
    let source = control.live_view_source().await.ok_or(AppError::ViewNotMounted)?;
    let surface = LiveViewSurface::attach(app_handle);
    capture.request_capture(&surface, &source).await
}

/// Tauri 命令：捕获脚本回传的画面。处理器已拆除时静默丢弃。
#[tauri::command]
pub async fn deliver_capture_frame(
    app_handle: AppHandle,
    capture: State<'_, Arc<CaptureViewState>>,
    payload: SurfaceMessagePayload,
) -> Result<(), String> {
    info!("Tauri 命令 'deliver_capture_frame' 被调用，data URL 长度 {}", payload.data_url.len());
    if let Some(outcome) = capture.deliver(payload).await {
        emit_user_alert(&app_handle, &outcome.alert);
    }
    Ok(())
}
