//! 渲染面回传的 data URL 解码。

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

use crate::error::CaptureError;

/// 解码后的单帧图像。只在写文件之前短暂存在。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedImage {
    /// data URL 中声明的媒体类型，例如 `image/jpeg`。
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// 去掉 `data:<mime>;base64,` 前缀并解码剩余的 Base64 负载。
///
/// 与渲染面的约定是"第一个逗号之后全部是负载"。空负载视为格式错误，
/// 尺寸为 0 的画布会产生这种结果。
pub fn decode_data_url(data_url: &str) -> Result<CapturedImage, CaptureError> {
    let (header, payload) = data_url
        .split_once(',')
        .ok_or_else(|| CaptureError::MalformedDataUrl("缺少 ',' 分隔符".to_string()))?;

    let payload = payload.trim();
    if payload.is_empty() {
        return Err(CaptureError::MalformedDataUrl("负载为空".to_string()));
    }

    let mime_type = header
        .strip_prefix("data:")
        .and_then(|rest| rest.split(';').next())
        .filter(|mime| !mime.is_empty())
        .unwrap_or("image/jpeg")
        .to_string();

    let bytes = BASE64.decode(payload)?;
    Ok(CapturedImage { mime_type, bytes })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_jpeg_data_url() {
        let raw = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46];
        let data_url = format!("data:image/jpeg;base64,{}", BASE64.encode(&raw));
        let image = decode_data_url(&data_url).unwrap();
        assert_eq!(image.mime_type, "image/jpeg");
        assert_eq!(image.bytes, raw);
    }

    #[test]
    fn test_missing_separator_is_malformed() {
        let err = decode_data_url("data:image/jpeg;base64").unwrap_err();
        assert!(matches!(err, CaptureError::MalformedDataUrl(_)));
    }

    #[test]
    fn test_empty_canvas_payload_is_rejected() {
        let err = decode_data_url("data:,").unwrap_err();
        assert!(matches!(err, CaptureError::MalformedDataUrl(_)));
    }

    #[test]
    fn test_invalid_base64_is_reported() {
        let err = decode_data_url("data:image/jpeg;base64,@@@not-base64@@@").unwrap_err();
        assert!(matches!(err, CaptureError::Base64(_)));
    }
}
