//! 遥控通道的核心数据模型。
//!
//! 这里的类型全部是瞬态的 UI 状态或出站命令描述，不做任何持久化：
//! - [`SpeedLevel`]：速度滑块的档位 (0..=10)，发送前按固定系数 ×10 换算。
//! - [`PressState`]：四个方向键各自的"按下"标志，仅用于视觉反馈。
//! - [`ModeFlags`]：人脸识别 / 手势识别两个独立开关。
//! - [`ControlCommand`]：一次出站控制请求（move / stop / speed）。
//! - [`LiveViewSource`]：直播画面的来源（嵌入式渲染面或普通图片流）。

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::enums::{DetectionMode, Direction};

/// 速度档位换算成出站数值时使用的线性系数。
pub const SPEED_SCALE_FACTOR: u16 = 10;

/// 速度滑块的默认初始档位。
pub const DEFAULT_SPEED_LEVEL: u8 = 5;

/// 速度档位，取值范围 `0..=10`。
///
/// 通过 `TryFrom<u8>` 构造，越界值会被拒绝；反序列化同样走该校验。
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "u8", into = "u8")]
pub struct SpeedLevel(u8);

impl SpeedLevel {
    pub const MIN: SpeedLevel = SpeedLevel(0);
    pub const MAX: SpeedLevel = SpeedLevel(10);

    /// 档位原始值。
    pub fn level(&self) -> u8 {
        self.0
    }

    /// 发送到控制服务器的速度数值，即 `level × 10`（0, 10, ..., 100）。
    pub fn magnitude(&self) -> u16 {
        u16::from(self.0) * SPEED_SCALE_FACTOR
    }
}

impl Default for SpeedLevel {
    fn default() -> Self {
        SpeedLevel(DEFAULT_SPEED_LEVEL)
    }
}

/// 速度档位越界时的错误。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedLevelOutOfRange(pub u8);

impl fmt::Display for SpeedLevelOutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "速度档位 {} 超出范围 0..=10", self.0)
    }
}

impl std::error::Error for SpeedLevelOutOfRange {}

impl TryFrom<u8> for SpeedLevel {
    type Error = SpeedLevelOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value <= Self::MAX.0 {
            Ok(SpeedLevel(value))
        } else {
            Err(SpeedLevelOutOfRange(value))
        }
    }
}

impl From<SpeedLevel> for u8 {
    fn from(value: SpeedLevel) -> Self {
        value.0
    }
}

impl fmt::Display for SpeedLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 四个方向键的按下标志。
///
/// 各标志互不排斥：同时按住多个方向时它们可以同时为 `true`，
/// 客户端不定义任何组合行为。
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PressState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl PressState {
    pub fn is_pressed(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    pub fn set(&mut self, direction: Direction, pressed: bool) {
        let flag = match direction {
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
        };
        *flag = pressed;
    }

    /// 当前处于按下状态的方向。
    pub fn pressed_directions(&self) -> Vec<Direction> {
        Direction::ALL.into_iter().filter(|d| self.is_pressed(*d)).collect()
    }
}

/// 识别模式开关。两个标志互相独立，初始均为关闭。
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModeFlags {
    pub face_detection: bool,
    pub gesture_detection: bool,
}

impl ModeFlags {
    pub fn is_enabled(&self, mode: DetectionMode) -> bool {
        match mode {
            DetectionMode::FaceDetection => self.face_detection,
            DetectionMode::GestureDetection => self.gesture_detection,
        }
    }

    /// 翻转指定模式，返回翻转后的值。
    pub fn toggle(&mut self, mode: DetectionMode) -> bool {
        let flag = match mode {
            DetectionMode::FaceDetection => &mut self.face_detection,
            DetectionMode::GestureDetection => &mut self.gesture_detection,
        };
        *flag = !*flag;
        *flag
    }
}

/// 一次出站控制请求。全部为无请求体的 POST。
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ControlCommand {
    /// `POST /move/{direction}`
    Move { direction: Direction },
    /// `POST /stop`，与松开的是哪个方向无关。
    Stop,
    /// `POST /speed/{level × 10}`
    Speed { level: SpeedLevel },
}

impl ControlCommand {
    /// 相对于控制服务器基地址的路径段。
    pub fn path_segments(&self) -> Vec<String> {
        match self {
            ControlCommand::Move { direction } => vec!["move".to_string(), direction.as_str().to_string()],
            ControlCommand::Stop => vec!["stop".to_string()],
            ControlCommand::Speed { level } => vec!["speed".to_string(), level.magnitude().to_string()],
        }
    }
}

impl fmt::Display for ControlCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.path_segments().join("/"))
    }
}

/// 直播画面的来源。
///
/// `Embedded` 由可执行脚本的嵌入式渲染面加载，路径末段为人脸识别标志；
/// `Plain` 是不具备该能力时使用的普通图片流 `/video`。
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LiveViewSource {
    Embedded { face_detection: bool },
    Plain,
}

impl LiveViewSource {
    /// 根据当前模式开关选择来源。`embedded_supported` 为 `false` 时总是退回普通图片流。
    pub fn resolve(modes: &ModeFlags, embedded_supported: bool) -> Self {
        if embedded_supported {
            LiveViewSource::Embedded { face_detection: modes.face_detection }
        } else {
            LiveViewSource::Plain
        }
    }

    pub fn path_segments(&self) -> Vec<String> {
        match self {
            LiveViewSource::Embedded { face_detection } => {
                vec!["video_feed".to_string(), face_detection.to_string()]
            }
            LiveViewSource::Plain => vec!["video".to_string()],
        }
    }

    /// 只有嵌入式渲染面才能注入捕获脚本。
    pub fn supports_capture(&self) -> bool {
        matches!(self, LiveViewSource::Embedded { .. })
    }
}

/// 控制视图状态的只读快照，供前端刷新界面。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ControlViewSnapshot {
    pub press: PressState,
    pub speed: SpeedLevel,
    pub modes: ModeFlags,
    pub stream_url: String,
}
