// RoverRemoteMobile/src-tauri/src/api_client/service.rs

//! 小车控制服务器的 API 服务。
//!
//! `ControlApiService` 持有共享的 [`CommandDispatcher`] 和当前控制视图的
//! [`ControlPanel`]。控制视图挂载时创建面板，卸载时丢弃；方向、速度命令
//! 以独立任务发出，命令函数不等待服务器响应，失败只在分发器中记录日志。

use std::sync::Arc;

use common_models::{ControlCommand, ControlViewSnapshot, DetectionMode, Direction, LiveViewSource, SpeedLevel};
use log::{debug, info};
use rover_control_utils::{CommandDispatcher, ControlEndpoints, ControlPanel, HttpControlTransport};
use tauri::{AppHandle, Runtime, Wry};
use tokio::sync::Mutex as TokioMutex;
use url::Url;

use crate::config::ControlServerConfig;
use crate::error::AppError;
use crate::event::{emit_press_state, emit_to_main, LiveViewSourceEventPayload, LIVE_VIEW_SOURCE_EVENT};
use crate::live_view::EMBEDDED_SURFACE_AVAILABLE;

pub struct ControlApiService<R: Runtime = Wry> {
    app_handle: AppHandle<R>,
    dispatcher: Arc<CommandDispatcher<HttpControlTransport>>,
    panel: TokioMutex<Option<ControlPanel>>,
    initial_speed: SpeedLevel,
    embedded_supported: bool,
}

impl<R: Runtime> ControlApiService<R> {
    /// 平台不支持嵌入式渲染面或配置要求时，直播固定使用普通图片流。
    pub fn new(
        app_handle: AppHandle<R>,
        config: &ControlServerConfig,
        initial_speed: SpeedLevel,
    ) -> Result<Self, AppError> {
        let endpoints = ControlEndpoints::parse(&config.base_url)?;
        info!("[控制服务] 控制服务器基地址: {}", endpoints.base());
        Ok(Self {
            app_handle,
            dispatcher: Arc::new(CommandDispatcher::new(HttpControlTransport::new(), endpoints)),
            panel: TokioMutex::new(None),
            initial_speed,
            embedded_supported: EMBEDDED_SURFACE_AVAILABLE && !config.prefer_plain_stream,
        })
    }

    /// 控制服务器基地址。
    pub fn base_url(&self) -> &Url {
        self.dispatcher.endpoints().base()
    }

    /// 控制视图挂载：创建全新的面板状态，并广播初始直播来源。挂载时不发送任何控制请求。
    pub async fn mount(&self) -> ControlViewSnapshot {
        let panel = ControlPanel::new(self.initial_speed, self.embedded_supported);
        let snapshot = panel.snapshot(self.dispatcher.endpoints());
        let source = panel.live_view_source();
        *self.panel.lock().await = Some(panel);
        info!("[控制服务] 控制视图已挂载，初始速度 {}，直播地址 {}", self.initial_speed, snapshot.stream_url);
        self.emit_source(source, &snapshot.stream_url);
        snapshot
    }

    /// 控制视图卸载：丢弃面板状态。已发出的请求不会被取消。
    pub async fn unmount(&self) {
        if self.panel.lock().await.take().is_some() {
            info!("[控制服务] 控制视图已卸载");
        }
    }

    pub async fn press_in(&self, direction: Direction) -> Result<(), AppError> {
        self.apply(|panel| panel.press_in(direction)).await
    }

    pub async fn press_out(&self, direction: Direction) -> Result<(), AppError> {
        self.apply(|panel| panel.press_out(direction)).await
    }

    pub async fn change_speed(&self, level: SpeedLevel) -> Result<ControlViewSnapshot, AppError> {
        self.apply(|panel| panel.change_speed(level)).await?;
        self.snapshot().await
    }

    /// 切换识别模式。只改变直播地址，不发送控制请求。
    pub async fn toggle_mode(&self, mode: DetectionMode) -> Result<ControlViewSnapshot, AppError> {
        let (source, snapshot) = {
            let mut guard = self.panel.lock().await;
            let panel = guard.as_mut().ok_or(AppError::ViewNotMounted)?;
            let source = panel.toggle_mode(mode);
            (source, panel.snapshot(self.dispatcher.endpoints()))
        };
        debug!("[控制服务] 模式 {} 已切换，新的直播来源: {:?}", mode, source);
        self.emit_source(source, &snapshot.stream_url);
        Ok(snapshot)
    }

    pub async fn snapshot(&self) -> Result<ControlViewSnapshot, AppError> {
        let guard = self.panel.lock().await;
        let panel = guard.as_ref().ok_or(AppError::ViewNotMounted)?;
        Ok(panel.snapshot(self.dispatcher.endpoints()))
    }

    /// 当前直播来源，未挂载时返回 `None`。
    pub async fn live_view_source(&self) -> Option<LiveViewSource> {
        self.panel.lock().await.as_ref().map(ControlPanel::live_view_source)
    }

    pub async fn query_distance(&self) -> Result<Option<f64>, AppError> {
        Ok(self.dispatcher.query_distance().await?)
    }

    /// 更新面板状态，再以独立任务发出得到的命令。
    async fn apply<F>(&self, update: F) -> Result<(), AppError>
    where
        F: FnOnce(&mut ControlPanel) -> ControlCommand,
    {
        let (command, press) = {
            let mut guard = self.panel.lock().await;
            let panel = guard.as_mut().ok_or(AppError::ViewNotMounted)?;
            let command = update(panel);
            (command, panel.press_state())
        };
        if matches!(command, ControlCommand::Move { .. } | ControlCommand::Stop) {
            emit_press_state(&self.app_handle, press);
        }
        // 不等待结果，失败由分发器记录日志
        drop(self.dispatcher.dispatch_detached(command));
        Ok(())
    }

    fn emit_source(&self, source: LiveViewSource, stream_url: &str) {
        emit_to_main(
            &self.app_handle,
            LIVE_VIEW_SOURCE_EVENT,
            LiveViewSourceEventPayload { source, stream_url: stream_url.to_string() },
        );
    }
}
