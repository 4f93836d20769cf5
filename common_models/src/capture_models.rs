//! 捕获管线与用户提示相关的负载。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 渲染面通过单向消息通道回传给宿主的消息。
///
/// 只有一个字段：完整的 data URL 字符串（`data:image/jpeg;base64,...`）。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SurfaceMessagePayload {
    #[serde(rename = "dataUrl")]
    pub data_url: String,
}

/// 提示框的类别。
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Success,
    Failure,
    PermissionNeeded,
}

/// 需要以模态提示框展示给用户的一条消息。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserAlert {
    pub kind: AlertKind,
    pub title: String,
    pub message: String,
}

impl UserAlert {
    pub fn capture_saved() -> Self {
        Self {
            kind: AlertKind::Success,
            title: "拍照完成".to_string(),
            message: "照片已保存到相册。".to_string(),
        }
    }

    pub fn capture_failed() -> Self {
        Self {
            kind: AlertKind::Failure,
            title: "拍照失败".to_string(),
            message: "发生了错误。".to_string(),
        }
    }

    pub fn permission_needed() -> Self {
        Self {
            kind: AlertKind::PermissionNeeded,
            title: "需要权限".to_string(),
            message: "本应用需要访问您的相册。".to_string(),
        }
    }
}

/// 相册中新登记的一条资源记录。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GalleryAsset {
    pub id: Uuid,
    /// 资源在相册中的文件名。
    pub file_name: String,
    pub registered_at: DateTime<Utc>,
}

/// 相册访问权限状态。
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PermissionStatus {
    Granted,
    Denied,
}

impl PermissionStatus {
    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionStatus::Granted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_message_uses_camel_case_field() {
        let payload: SurfaceMessagePayload =
            serde_json::from_str(r#"{"dataUrl":"data:image/jpeg;base64,AAAA"}"#).unwrap();
        assert_eq!(payload.data_url, "data:image/jpeg;base64,AAAA");
    }

    #[test]
    fn test_alert_kinds() {
        assert_eq!(UserAlert::capture_saved().kind, AlertKind::Success);
        assert_eq!(UserAlert::capture_failed().kind, AlertKind::Failure);
        assert_eq!(UserAlert::permission_needed().kind, AlertKind::PermissionNeeded);
    }
}
