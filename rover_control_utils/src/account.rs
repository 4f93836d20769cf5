// rover_control_utils/src/account.rs

//! 账户服务器客户端与登录状态。
//!
//! 登录只做三件事：把 `{loginId, pw}` POST 到 `/join`、记录响应、
//! 成功时在本地键值存储里写入登录状态标记。失败只记录日志，不提示用户。

use common_models::{JoinRequest, LoginStatus};
use log::{error, info, warn};
use url::Url;

use crate::endpoint::{join_segments, parse_base_url};
use crate::error::AccountError;
use crate::session_store::SessionStore;

/// 登录状态标记在本地存储中的键名。
pub const LOGIN_MARKER_KEY: &str = "userInfo";

/// 账户服务器的 HTTP 客户端。
#[derive(Debug, Clone)]
pub struct AccountClient {
    client: reqwest::Client,
    join_url: Url,
}

impl AccountClient {
    pub fn new(base_url: &str) -> Result<Self, AccountError> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Result<Self, AccountError> {
        let base = parse_base_url(base_url)?;
        Ok(Self { client, join_url: join_segments(&base, ["join"]) })
    }

    pub fn join_url(&self) -> &Url {
        &self.join_url
    }

    /// `POST /join`，返回响应体文本。非 2xx 视为被拒绝。
    pub async fn join(&self, request: &JoinRequest) -> Result<String, AccountError> {
        let response = self.client.post(self.join_url.clone()).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(AccountError::Rejected { status: status.as_u16(), body });
        }
        Ok(body)
    }
}

/// 登录流程：账户客户端 + 登录状态标记。
#[derive(Debug, Clone)]
pub struct AccountService {
    client: AccountClient,
    store: SessionStore,
}

impl AccountService {
    pub fn new(client: AccountClient, store: SessionStore) -> Self {
        Self { client, store }
    }

    /// 尝试登录。任何失败都只记录日志并返回未登录状态。
    pub async fn try_login(&self, login_id: &str, pw: &str) -> LoginStatus {
        match self.login(login_id, pw).await {
            Ok(status) => status,
            Err(e) => {
                error!("[账户] 登录失败 (loginId='{}'): {}", login_id, e);
                LoginStatus::logged_out()
            }
        }
    }

    async fn login(&self, login_id: &str, pw: &str) -> Result<LoginStatus, AccountError> {
        let request = JoinRequest { login_id: login_id.to_string(), pw: pw.to_string() };
        info!("[账户] 向 {} 发送登录请求 (loginId='{}')", self.client.join_url(), login_id);
        let body = self.client.join(&request).await?;
        info!("[账户] 登录响应: {}", body);

        self.store.set_item(LOGIN_MARKER_KEY, login_id).await?;
        Ok(LoginStatus::logged_in(login_id))
    }

    /// 根据本地标记判断是否已登录。读取失败按未登录处理。
    pub async fn check_login_status(&self) -> LoginStatus {
        match self.store.get_item(LOGIN_MARKER_KEY).await {
            Ok(Some(login_id)) => LoginStatus::logged_in(login_id),
            Ok(None) => LoginStatus::logged_out(),
            Err(e) => {
                warn!("[账户] 读取登录状态失败: {}", e);
                LoginStatus::logged_out()
            }
        }
    }

    pub async fn logout(&self) -> Result<LoginStatus, AccountError> {
        self.store.remove_item(LOGIN_MARKER_KEY).await?;
        info!("[账户] 已退出登录");
        Ok(LoginStatus::logged_out())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url_is_built_from_base() {
        let client = AccountClient::new("http://localhost:8080").unwrap();
        assert_eq!(client.join_url().as_str(), "http://localhost:8080/join");
    }

    #[test]
    fn test_invalid_account_base_url() {
        assert!(matches!(AccountClient::new("::::"), Err(AccountError::InvalidBaseUrl(_))));
    }
}
