// RoverRemoteMobile/src-tauri/src/live_view.rs

//! 直播窗口：加载控制服务器视频流的独立 WebView。
//!
//! 桌面端打开一个 `live-view` 窗口显示嵌入式视频流，拍照时向它注入捕获脚本。
//! 移动端只有一个 WebView，不打开额外窗口：直播来源固定为普通图片流 `/video`，
//! 由主窗口根据 `live_view_source_changed` 事件用 `<img>` 显示，拍照不可用。

use rover_control_utils::capture::RenderingSurface;
use rover_control_utils::CaptureError;
use tauri::{AppHandle, Manager, WebviewWindow};
use url::Url;

use crate::error::AppError;

pub const LIVE_VIEW_WINDOW_LABEL: &str = "live-view";

/// 允许直播窗口中的远程页面调用命令的运行时权限标识。
pub const LIVE_VIEW_CAPABILITY: &str = "live-view-remote";

/// 当前平台能否使用可注入脚本的嵌入式渲染面。
pub const EMBEDDED_SURFACE_AVAILABLE: bool = cfg!(desktop);

/// 控制服务器下所有页面的远程地址匹配模式，例如 `http://10.0.0.2:8000/*`。
pub fn remote_url_pattern(base: &Url) -> String {
    format!("{}/*", base.as_str().trim_end_matches('/'))
}

/// 为直播窗口添加远程 IPC 权限，使捕获脚本能从控制服务器的页面回传画面。
#[cfg(desktop)]
pub fn allow_remote_ipc(app_handle: &AppHandle, base: &Url) -> Result<(), AppError> {
    use tauri::ipc::CapabilityBuilder;

    let pattern = remote_url_pattern(base);
    app_handle.add_capability(
        CapabilityBuilder::new(LIVE_VIEW_CAPABILITY)
            .remote(pattern.clone())
            .window(LIVE_VIEW_WINDOW_LABEL)
            .permission("core:default"),
    )?;
    log::info!("[直播窗口] 已允许 {} 下的页面调用命令", pattern);
    Ok(())
}

#[cfg(mobile)]
pub fn allow_remote_ipc(_app_handle: &AppHandle, _base: &Url) -> Result<(), AppError> {
    Ok(())
}

/// 以直播窗口为载体的渲染面。窗口不存在时注入会失败。
pub struct LiveViewSurface {
    window: Option<WebviewWindow>,
}

impl LiveViewSurface {
    pub fn attach(app_handle: &AppHandle) -> Self {
        Self { window: app_handle.get_webview_window(LIVE_VIEW_WINDOW_LABEL) }
    }
}

impl RenderingSurface for LiveViewSurface {
    fn inject_script(&self, script: &str) -> Result<(), CaptureError> {
        match &self.window {
            Some(window) => window.eval(script).map_err(|e| CaptureError::Surface(e.to_string())),
            None => Err(CaptureError::Surface("直播窗口尚未打开".to_string())),
        }
    }
}

/// 在直播窗口中显示指定的视频流地址：窗口已存在则跳转，否则新建。
#[cfg(desktop)]
pub fn show_stream(app_handle: &AppHandle, stream_url: &str) -> Result<(), AppError> {
    use tauri::{WebviewUrl, WebviewWindowBuilder};

    let url = Url::parse(stream_url).map_err(|e| AppError::LiveViewUnavailable(format!("{}: {}", stream_url, e)))?;

    match app_handle.get_webview_window(LIVE_VIEW_WINDOW_LABEL) {
        Some(mut window) => {
            log::info!("[直播窗口] 切换视频流 -> {}", url);
            window.navigate(url)?;
        }
        None => {
            log::info!("[直播窗口] 打开视频流 {}", url);
            WebviewWindowBuilder::new(app_handle, LIVE_VIEW_WINDOW_LABEL, WebviewUrl::External(url))
                .title("RoverRemote Live")
                .inner_size(640.0, 480.0)
                .build()?;
        }
    }
    Ok(())
}

/// 移动端由主窗口自行显示图片流。
#[cfg(mobile)]
pub fn show_stream(_app_handle: &AppHandle, stream_url: &str) -> Result<(), AppError> {
    log::debug!("[直播窗口] 移动端由主窗口显示 {}", stream_url);
    Ok(())
}

/// 关闭直播窗口（控制视图卸载时）。
#[cfg(desktop)]
pub fn close(app_handle: &AppHandle) {
    if let Some(window) = app_handle.get_webview_window(LIVE_VIEW_WINDOW_LABEL) {
        if let Err(e) = window.close() {
            log::warn!("[直播窗口] 关闭失败: {}", e);
        }
    }
}

#[cfg(mobile)]
pub fn close(_app_handle: &AppHandle) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_pattern_follows_configured_base() {
        let lan = Url::parse("http://10.0.0.2:8000").unwrap();
        assert_eq!(remote_url_pattern(&lan), "http://10.0.0.2:8000/*");

        let nested = Url::parse("http://robot.local/api/").unwrap();
        assert_eq!(remote_url_pattern(&nested), "http://robot.local/api/*");
    }
}
