// rover_control_utils/src/client/dispatcher.rs

//! 命令分发器。
//!
//! 分两部分：
//! - [`ControlPanel`]：控制视图的本地状态（方向键按下标志、速度档位、模式开关）。
//!   它的方法是同步的，只修改状态并返回需要发送的 [`ControlCommand`]。
//! - [`CommandDispatcher`]：把 `ControlCommand` 解析成 URL 并通过传输层发出。
//!
//! 把"改状态"和"发请求"拆开，调用方就可以在持有状态锁时只做前者，
//! 放开锁之后再等待网络。按下标志只反映用户操作，与请求是否完成无关：
//! 请求失败时标志保持原样，不做任何纠正。

use std::sync::Arc;

use common_models::{
    ControlCommand, ControlViewSnapshot, DetectionMode, Direction, LiveViewSource, ModeFlags, PressState,
    SpeedLevel,
};
use log::{debug, info, warn};
use serde::Deserialize;
use tokio::task::JoinHandle;
use url::Url;

use super::transport::ControlTransport;
use crate::endpoint::ControlEndpoints;
use crate::error::ControlError;

/// 控制视图的本地状态，每个视图实例一份。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlPanel {
    press: PressState,
    speed: SpeedLevel,
    modes: ModeFlags,
    embedded_supported: bool,
}

impl ControlPanel {
    /// 创建挂载时的初始状态：所有方向未按下、模式全部关闭。
    pub fn new(initial_speed: SpeedLevel, embedded_supported: bool) -> Self {
        Self {
            press: PressState::default(),
            speed: initial_speed,
            modes: ModeFlags::default(),
            embedded_supported,
        }
    }

    /// 方向键按下：置位对应标志，返回 `move` 命令。
    ///
    /// 不检查其他方向是否已按下，多个方向可以同时处于按下状态。
    pub fn press_in(&mut self, direction: Direction) -> ControlCommand {
        self.press.set(direction, true);
        ControlCommand::Move { direction }
    }

    /// 方向键松开：清除对应标志，返回共享的 `stop` 命令。
    pub fn press_out(&mut self, direction: Direction) -> ControlCommand {
        self.press.set(direction, false);
        ControlCommand::Stop
    }

    /// 速度滑块变化：记录新档位，返回 `speed` 命令。
    pub fn change_speed(&mut self, level: SpeedLevel) -> ControlCommand {
        self.speed = level;
        ControlCommand::Speed { level }
    }

    /// 翻转模式开关，返回切换后的直播来源。没有任何网络副作用。
    pub fn toggle_mode(&mut self, mode: DetectionMode) -> LiveViewSource {
        let enabled = self.modes.toggle(mode);
        debug!("[控制面板] 模式 {} 已切换为 {}", mode, enabled);
        self.live_view_source()
    }

    pub fn live_view_source(&self) -> LiveViewSource {
        LiveViewSource::resolve(&self.modes, self.embedded_supported)
    }

    pub fn press_state(&self) -> PressState {
        self.press
    }

    pub fn speed(&self) -> SpeedLevel {
        self.speed
    }

    pub fn modes(&self) -> ModeFlags {
        self.modes
    }

    pub fn snapshot(&self, endpoints: &ControlEndpoints) -> ControlViewSnapshot {
        ControlViewSnapshot {
            press: self.press,
            speed: self.speed,
            modes: self.modes,
            stream_url: endpoints.stream_url(&self.live_view_source()).to_string(),
        }
    }
}

/// `GET /distance` 的响应体。
#[derive(Debug, Deserialize)]
struct DistanceReading {
    distance: Option<f64>,
}

/// 把控制命令发送到控制服务器。
#[derive(Debug)]
pub struct CommandDispatcher<T> {
    transport: T,
    endpoints: ControlEndpoints,
}

impl<T: ControlTransport> CommandDispatcher<T> {
    pub fn new(transport: T, endpoints: ControlEndpoints) -> Self {
        Self { transport, endpoints }
    }

    pub fn endpoints(&self) -> &ControlEndpoints {
        &self.endpoints
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// 发送一条控制命令并返回结果。
    ///
    /// 失败只记录日志后原样返回，是否向用户展示由调用方决定。
    pub async fn dispatch(&self, command: ControlCommand) -> Result<(), ControlError> {
        let url = self.endpoints.command_url(&command);
        info!("[控制分发] 发送命令 {} -> {}", command, url);
        match self.transport.post_empty(url).await {
            Ok(()) => {
                debug!("[控制分发] 命令 {} 已送达", command);
                Ok(())
            }
            Err(e) => {
                warn!("[控制分发] 命令 {} 发送失败: {}", command, e);
                Err(e)
            }
        }
    }

    /// 当前模式下直播画面的地址。
    pub fn stream_url(&self, source: &LiveViewSource) -> Url {
        self.endpoints.stream_url(source)
    }

    /// 查询小车最近一次上报的超声波距离。服务器尚未收到读数时返回 `None`。
    pub async fn query_distance(&self) -> Result<Option<f64>, ControlError> {
        let url = self.endpoints.distance_url();
        let body = self.transport.get_text(url.clone()).await?;
        let reading: DistanceReading = serde_json::from_str(&body)
            .map_err(|e| ControlError::Decode { url: url.to_string(), reason: e.to_string() })?;
        Ok(reading.distance)
    }
}

impl<T: ControlTransport + 'static> CommandDispatcher<T> {
    /// 在独立任务中发送命令，不等待结果。
    ///
    /// 每次调用都是一个互不关联的任务，先发出的 `move` 与后发出的 `stop`
    /// 到达服务器的顺序不做保证。返回的句柄可以丢弃。
    pub fn dispatch_detached(self: &Arc<Self>, command: ControlCommand) -> JoinHandle<Result<(), ControlError>> {
        let dispatcher = Arc::clone(self);
        tokio::spawn(async move { dispatcher.dispatch(command).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// 记录所有请求路径的传输实现，可配置为全部失败。
    #[derive(Default)]
    struct RecordingTransport {
        requests: Mutex<Vec<String>>,
        fail_posts: bool,
        distance_body: Option<String>,
    }

    impl RecordingTransport {
        fn paths(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl ControlTransport for RecordingTransport {
        async fn post_empty(&self, url: Url) -> Result<(), ControlError> {
            self.requests.lock().unwrap().push(format!("POST {}", url.path()));
            if self.fail_posts {
                return Err(ControlError::Status { url: url.to_string(), status: 503 });
            }
            Ok(())
        }

        async fn get_text(&self, url: Url) -> Result<String, ControlError> {
            self.requests.lock().unwrap().push(format!("GET {}", url.path()));
            Ok(self.distance_body.clone().unwrap_or_else(|| r#"{"distance":null}"#.to_string()))
        }
    }

    fn dispatcher_with(transport: RecordingTransport) -> CommandDispatcher<RecordingTransport> {
        CommandDispatcher::new(transport, ControlEndpoints::parse("http://localhost:8000").unwrap())
    }

    #[tokio::test]
    async fn test_press_and_release_issue_move_then_stop() {
        for direction in Direction::ALL {
            let dispatcher = dispatcher_with(RecordingTransport::default());
            let mut panel = ControlPanel::new(SpeedLevel::default(), true);

            let cmd = panel.press_in(direction);
            assert!(panel.press_state().is_pressed(direction));
            dispatcher.dispatch(cmd).await.unwrap();

            let cmd = panel.press_out(direction);
            assert!(!panel.press_state().is_pressed(direction));
            dispatcher.dispatch(cmd).await.unwrap();

            assert_eq!(
                dispatcher.transport().paths(),
                vec![format!("POST /move/{}", direction), "POST /stop".to_string()],
                "方向 {} 的按下/松开应当恰好产生一次 move 和一次 stop",
                direction
            );
        }
    }

    #[tokio::test]
    async fn test_speed_change_posts_scaled_value() {
        for n in 0u8..=10 {
            let dispatcher = dispatcher_with(RecordingTransport::default());
            let mut panel = ControlPanel::new(SpeedLevel::default(), true);
            let level = SpeedLevel::try_from(n).unwrap();
            dispatcher.dispatch(panel.change_speed(level)).await.unwrap();

            assert_eq!(panel.speed(), level);
            assert_eq!(dispatcher.transport().paths(), vec![format!("POST /speed/{}", u16::from(n) * 10)]);
        }
    }

    #[tokio::test]
    async fn test_concurrent_presses_are_not_exclusive() {
        let dispatcher = dispatcher_with(RecordingTransport::default());
        let mut panel = ControlPanel::new(SpeedLevel::default(), true);

        dispatcher.dispatch(panel.press_in(Direction::Up)).await.unwrap();
        dispatcher.dispatch(panel.press_in(Direction::Left)).await.unwrap();

        let press = panel.press_state();
        assert!(press.up && press.left, "两个方向应同时处于按下状态");
        assert_eq!(dispatcher.transport().paths(), vec!["POST /move/up", "POST /move/left"]);
    }

    #[tokio::test]
    async fn test_failed_move_leaves_press_flag_set() {
        let dispatcher = dispatcher_with(RecordingTransport { fail_posts: true, ..Default::default() });
        let mut panel = ControlPanel::new(SpeedLevel::default(), true);

        let result = dispatcher.dispatch(panel.press_in(Direction::Down)).await;
        assert!(matches!(result, Err(ControlError::Status { status: 503, .. })));
        assert!(panel.press_state().down, "请求失败不应回滚按下标志");
        assert_eq!(dispatcher.transport().paths().len(), 1, "失败后不应重试");
    }

    #[tokio::test]
    async fn test_face_toggle_changes_stream_without_requests() {
        let dispatcher = dispatcher_with(RecordingTransport::default());
        let mut panel = ControlPanel::new(SpeedLevel::default(), true);

        let before = dispatcher.stream_url(&panel.live_view_source());
        let after = dispatcher.stream_url(&panel.toggle_mode(DetectionMode::FaceDetection));

        assert_eq!(before.path(), "/video_feed/false");
        assert_eq!(after.path(), "/video_feed/true");
        assert!(dispatcher.transport().paths().is_empty(), "切换模式不应产生任何请求");

        panel.toggle_mode(DetectionMode::GestureDetection);
        assert_eq!(dispatcher.stream_url(&panel.live_view_source()).path(), "/video_feed/true");
    }

    #[tokio::test]
    async fn test_query_distance() {
        let dispatcher = dispatcher_with(RecordingTransport {
            distance_body: Some(r#"{"distance":12.5}"#.to_string()),
            ..Default::default()
        });
        assert_eq!(dispatcher.query_distance().await.unwrap(), Some(12.5));
        assert_eq!(dispatcher.transport().paths(), vec!["GET /distance"]);

        let empty = dispatcher_with(RecordingTransport::default());
        assert_eq!(empty.query_distance().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_dispatch_detached_runs_in_background() {
        let dispatcher = Arc::new(dispatcher_with(RecordingTransport::default()));
        let handle = dispatcher.dispatch_detached(ControlCommand::Stop);
        handle.await.expect("后台任务不应 panic").unwrap();
        assert_eq!(dispatcher.transport().paths(), vec!["POST /stop"]);
    }

    #[test]
    fn test_snapshot_reports_initial_state() {
        let endpoints = ControlEndpoints::parse("http://localhost:8000").unwrap();
        let panel = ControlPanel::new(SpeedLevel::default(), false);
        let snapshot = panel.snapshot(&endpoints);
        assert_eq!(snapshot.press, PressState::default());
        assert_eq!(snapshot.speed.level(), 5);
        assert_eq!(snapshot.stream_url, "http://localhost:8000/video");
    }
}
