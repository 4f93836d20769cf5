// RoverRemoteMobile/src-tauri/src/config.rs

//! `RoverRemoteMobile` 的配置管理模块。
//!
//! 配置文件为 JSON，固定位于工作目录下的 `config/rover_remote_config.json`。
//! 所有字段都有默认值，文件中缺失的字段按默认值补齐；文件缺失或解析失败时
//! 记录警告并整体回退到默认配置。

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use common_models::SpeedLevel;
use rover_control_utils::capture::DEFAULT_CAPTURE_FILE_NAME;
use serde::Deserialize;

const CONFIG_DIR: &str = "config";
const CONFIG_FILE_NAME: &str = "rover_remote_config.json";

/// 小车控制服务器的连接参数。
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ControlServerConfig {
    /// 控制服务器基地址，例如 `http://192.168.0.10:8000`。
    pub base_url: String,
    /// 为 `true` 时直播画面使用普通图片流 `/video`，拍照功能不可用。
    pub prefer_plain_stream: bool,
}

impl Default for ControlServerConfig {
    fn default() -> Self {
        Self { base_url: "http://localhost:8000".to_string(), prefer_plain_stream: false }
    }
}

/// 账户服务器的连接参数。
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AccountServerConfig {
    pub base_url: String,
}

impl Default for AccountServerConfig {
    fn default() -> Self {
        Self { base_url: "http://localhost:8080".to_string() }
    }
}

/// 拍照保存参数。
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct CaptureConfig {
    /// 文档目录中的文件名，每次拍照覆盖。
    pub file_name: String,
    /// 图片目录下的相册子目录名。
    pub album_name: String,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self { file_name: DEFAULT_CAPTURE_FILE_NAME.to_string(), album_name: "RoverRemote".to_string() }
    }
}

/// 应用配置。
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub control_server: ControlServerConfig,
    pub account_server: AccountServerConfig,
    pub capture: CaptureConfig,
    /// 控制视图挂载时的初始速度档位 (0..=10)。
    pub initial_speed: u8,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            control_server: ControlServerConfig::default(),
            account_server: AccountServerConfig::default(),
            capture: CaptureConfig::default(),
            initial_speed: SpeedLevel::default().level(),
        }
    }
}

impl AppConfig {
    /// 从 `config/rover_remote_config.json` 加载配置。
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// 加载配置，失败时记录警告并使用默认配置。
    pub fn load_or_default() -> Self {
        Self::load_or_default_from(&Self::default_path())
    }

    fn default_path() -> PathBuf {
        PathBuf::from(CONFIG_DIR).join(CONFIG_FILE_NAME)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Err(anyhow!("配置文件 '{}' 未找到", config_path.display()));
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("无法读取配置文件 '{}'", config_path.display()))?;
        let config = Self::from_json_str(&config_str)
            .with_context(|| format!("解析配置文件 '{}' 失败", config_path.display()))?;

        log::info!(
            "[应用配置] 已从 '{}' 加载配置。控制服务器: {}, 账户服务器: {}",
            config_path.display(),
            config.control_server.base_url,
            config.account_server.base_url
        );
        Ok(config)
    }

    pub fn load_or_default_from(config_path: &Path) -> Self {
        match Self::load_from(config_path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("[应用配置] {:#}。将使用默认配置。", e);
                Self::default()
            }
        }
    }

    pub fn from_json_str(config_str: &str) -> Result<Self> {
        let config: AppConfig = serde_json::from_str(config_str)?;
        SpeedLevel::try_from(config.initial_speed).map_err(|e| anyhow!("initial_speed 无效: {}", e))?;
        Ok(config)
    }

    /// 初始速度档位。越界时已在加载阶段被拒绝，这里仍退回默认档位。
    pub fn initial_speed_level(&self) -> SpeedLevel {
        SpeedLevel::try_from(self.initial_speed).unwrap_or_default()
    }
}
