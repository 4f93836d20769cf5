//! 通用枚举模块。
//!
//! 本模块定义了在 `RoverRemote` 项目多个组件之间共享的枚举类型：
//! 方向键对应的 [`Direction`]，以及控制视图上两个识别模式开关对应的 [`DetectionMode`]。
//!
//! 所有枚举都派生 `Serialize`, `Deserialize`, `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`，
//! 以便在前端命令参数、事件负载以及集合键中使用。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 小车的移动方向。
///
/// 仅作为分发键使用：它决定 `/move/{direction}` 请求路径的最后一段，
/// 以及 [`crate::control::PressState`] 中哪一个按下标志被修改。
/// 线上表示为小写名称（`up`、`down`、`left`、`right`）。
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// 全部四个方向，按方向键面板的布局顺序排列。
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Left, Direction::Right, Direction::Down];

    /// 返回方向在 URL 路径中使用的小写名称。
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 解析方向名称失败时返回的错误。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDirection(pub String);

impl fmt::Display for UnknownDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "未知的移动方向: '{}'", self.0)
    }
}

impl std::error::Error for UnknownDirection {}

impl FromStr for Direction {
    type Err = UnknownDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(UnknownDirection(s.to_string())),
        }
    }
}

/// 控制视图上可切换的识别模式。
///
/// 两个模式彼此独立。只有 `FaceDetection` 会影响直播流地址，
/// `GestureDetection` 目前仅是本地标志，不产生任何网络请求。
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMode {
    /// 人脸识别（服务端在视频帧上标注人脸）。
    FaceDetection,
    /// 手势识别。
    GestureDetection,
}

impl fmt::Display for DetectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectionMode::FaceDetection => write!(f, "face_detection"),
            DetectionMode::GestureDetection => write!(f, "gesture_detection"),
        }
    }
}
