// rover_control_utils/tests/control_channel_integration_test.rs

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::routing::get;
use axum::{Json, Router};
use common_models::{DetectionMode, Direction, SpeedLevel};
use log::{LevelFilter, info};
use rover_control_utils::{CommandDispatcher, ControlEndpoints, ControlError, ControlPanel, HttpControlTransport};
use serde_json::{Value, json};

type Recorder = Arc<Mutex<Vec<String>>>;

// 辅助函数：初始化日志，仅用于测试，避免多次初始化
fn init_test_logger() {
    let _ = env_logger::builder().filter_level(LevelFilter::Info).is_test(true).try_init();
}

async fn record_request(State(recorder): State<Recorder>, method: Method, uri: Uri) -> StatusCode {
    recorder.lock().unwrap().push(format!("{} {}", method, uri.path()));
    StatusCode::OK
}

async fn distance(State(recorder): State<Recorder>) -> Json<Value> {
    recorder.lock().unwrap().push("GET /distance".to_string());
    Json(json!({ "distance": 42.0 }))
}

// 启动一个模拟控制服务器，记录收到的每个请求的方法和路径
async fn start_mock_control_server() -> (SocketAddr, Recorder, tokio::task::JoinHandle<()>) {
    let recorder: Recorder = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/distance", get(distance))
        .fallback(record_request)
        .with_state(recorder.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("无法绑定到随机端口");
    let addr = listener.local_addr().expect("无法获取本地监听地址");
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("模拟控制服务器异常退出");
    });
    info!("[Test Main] 模拟控制服务器监听于 {}", addr);
    (addr, recorder, handle)
}

fn http_dispatcher(addr: SocketAddr) -> CommandDispatcher<HttpControlTransport> {
    let endpoints = ControlEndpoints::parse(&format!("http://{}", addr)).expect("测试地址应当合法");
    CommandDispatcher::new(HttpControlTransport::new(), endpoints)
}

#[tokio::test]
async fn test_press_release_over_http() {
    init_test_logger();
    let (addr, recorder, server) = start_mock_control_server().await;
    let dispatcher = http_dispatcher(addr);
    let mut panel = ControlPanel::new(SpeedLevel::default(), true);

    for direction in Direction::ALL {
        dispatcher.dispatch(panel.press_in(direction)).await.expect("move 请求应成功");
        dispatcher.dispatch(panel.press_out(direction)).await.expect("stop 请求应成功");
    }

    let expected: Vec<String> = Direction::ALL
        .iter()
        .flat_map(|d| [format!("POST /move/{}", d), "POST /stop".to_string()])
        .collect();
    assert_eq!(*recorder.lock().unwrap(), expected);
    server.abort();
}

#[tokio::test]
async fn test_speed_levels_over_http() {
    init_test_logger();
    let (addr, recorder, server) = start_mock_control_server().await;
    let dispatcher = http_dispatcher(addr);
    let mut panel = ControlPanel::new(SpeedLevel::default(), true);

    for n in 0u8..=10 {
        let level = SpeedLevel::try_from(n).unwrap();
        dispatcher.dispatch(panel.change_speed(level)).await.unwrap();
    }

    let expected: Vec<String> = (0u16..=10).map(|n| format!("POST /speed/{}", n * 10)).collect();
    assert_eq!(*recorder.lock().unwrap(), expected);
    assert_eq!(panel.speed(), SpeedLevel::MAX);
    server.abort();
}

#[tokio::test]
async fn test_mode_toggle_issues_no_requests() {
    init_test_logger();
    let (addr, recorder, server) = start_mock_control_server().await;
    let dispatcher = http_dispatcher(addr);
    let mut panel = ControlPanel::new(SpeedLevel::default(), true);

    let url = dispatcher.stream_url(&panel.toggle_mode(DetectionMode::FaceDetection));
    assert_eq!(url.as_str(), format!("http://{}/video_feed/true", addr));
    panel.toggle_mode(DetectionMode::GestureDetection);

    assert!(recorder.lock().unwrap().is_empty(), "切换模式不应访问控制服务器");
    server.abort();
}

#[tokio::test]
async fn test_query_distance_over_http() {
    init_test_logger();
    let (addr, _recorder, server) = start_mock_control_server().await;
    let dispatcher = http_dispatcher(addr);
    assert_eq!(dispatcher.query_distance().await.unwrap(), Some(42.0));
    server.abort();
}

#[tokio::test]
async fn test_unreachable_server_keeps_press_flag() {
    init_test_logger();
    // 绑定后立即释放，得到一个大概率无人监听的端口
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let dispatcher = http_dispatcher(addr);
    let mut panel = ControlPanel::new(SpeedLevel::default(), true);

    let result = dispatcher.dispatch(panel.press_in(Direction::Right)).await;
    assert!(matches!(result, Err(ControlError::Request { .. })), "应返回请求发送失败: {:?}", result);
    assert!(panel.press_state().right, "网络失败后按下标志保持不变");
}
