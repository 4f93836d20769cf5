// RoverRemoteMobile/src-tauri/src/commands/account_cmds.rs

//! 账户相关的 Tauri 命令。登录失败只记录日志，不向用户提示。

use std::sync::Arc;

use common_models::LoginStatus;
use log::info;
use rover_control_utils::account::AccountService;
use tauri::State;

#[tauri::command]
pub async fn try_login(
    account: State<'_, Arc<AccountService>>,
    login_id: String,
    pw: String,
) -> Result<LoginStatus, String> {
    info!("Tauri 命令 'try_login' 被调用 (loginId='{}')", login_id);
    Ok(account.try_login(&login_id, &pw).await)
}

#[tauri::command]
pub async fn check_login_status(account: State<'_, Arc<AccountService>>) -> Result<LoginStatus, String> {
    Ok(account.check_login_status().await)
}

#[tauri::command]
pub async fn logout(account: State<'_, Arc<AccountService>>) -> Result<LoginStatus, String> {
    info!("Tauri 命令 'logout' 被调用");
    account.logout().await.map_err(|e| e.to_string())
}
