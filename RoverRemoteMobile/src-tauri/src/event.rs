// RoverRemoteMobile/src-tauri/src/event.rs

//! Rust 后端发往前端 `main` 窗口的 Tauri 事件。

use common_models::{LiveViewSource, PressState, UserAlert};
use log::warn;
use serde::Serialize;
use tauri::{AppHandle, Emitter, Runtime};

/// 前端事件监听所在的窗口标签。
pub const MAIN_WINDOW_LABEL: &str = "main";

/// 需要以弹窗形式展示给用户的提示。Payload 为 [`UserAlert`]。
pub const USER_ALERT_EVENT: &str = "user_alert";

/// 方向键按下状态变化。Payload 为 [`PressState`]。
pub const PRESS_STATE_EVENT: &str = "press_state_changed";

/// 直播画面来源变化（挂载、切换识别模式）。
pub const LIVE_VIEW_SOURCE_EVENT: &str = "live_view_source_changed";

/// `LIVE_VIEW_SOURCE_EVENT` 事件的 Payload。
#[derive(Clone, Serialize, Debug)]
pub struct LiveViewSourceEventPayload {
    pub source: LiveViewSource,
    pub stream_url: String,
}

/// 向主窗口发送事件。发送失败只记录日志。
pub fn emit_to_main<R: Runtime, S: Serialize + Clone>(app_handle: &AppHandle<R>, event: &str, payload: S) {
    if let Err(e) = app_handle.emit_to(MAIN_WINDOW_LABEL, event, payload) {
        warn!("[事件] 发送事件 '{}' 失败: {}", event, e);
    }
}

pub fn emit_user_alert<R: Runtime>(app_handle: &AppHandle<R>, alert: &UserAlert) {
    emit_to_main(app_handle, USER_ALERT_EVENT, alert.clone());
}

pub fn emit_press_state<R: Runtime>(app_handle: &AppHandle<R>, press: PressState) {
    emit_to_main(app_handle, PRESS_STATE_EVENT, press);
}
