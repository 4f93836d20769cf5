//! 账户服务器相关的请求与状态模型。

use serde::{Deserialize, Serialize};

/// `POST /join` 的 JSON 请求体，字段名与账户服务器约定一致。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct JoinRequest {
    #[serde(rename = "loginId")]
    pub login_id: String,
    pub pw: String,
}

/// 登录状态，返回给前端用于切换登录页与个人页。
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginStatus {
    pub logged_in: bool,
    pub login_id: Option<String>,
}

impl LoginStatus {
    pub fn logged_in(login_id: impl Into<String>) -> Self {
        Self { logged_in: true, login_id: Some(login_id.into()) }
    }

    pub fn logged_out() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_request_wire_format() {
        let request = JoinRequest { login_id: "driver01".to_string(), pw: "secret".to_string() };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, serde_json::json!({ "loginId": "driver01", "pw": "secret" }));
    }
}
