// rover_control_utils/src/session_store.rs

//! 本地键值存储。
//!
//! 以单个 JSON 对象文件保存若干字符串键值，目前只用于登录状态标记。
//! 文件不存在时视为空存储。

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::SessionError;

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<BTreeMap<String, String>, SessionError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => return Err(SessionError::Io { path: self.path.clone(), source }),
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|source| SessionError::Format { path: self.path.clone(), source })
    }

    async fn save(&self, items: &BTreeMap<String, String>) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| SessionError::Io { path: parent.to_path_buf(), source })?;
        }
        let content = serde_json::to_string_pretty(items)
            .map_err(|source| SessionError::Format { path: self.path.clone(), source })?;
        tokio::fs::write(&self.path, content)
            .await
            .map_err(|source| SessionError::Io { path: self.path.clone(), source })
    }

    pub async fn get_item(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.load().await?.remove(key))
    }

    pub async fn set_item(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let mut items = self.load().await?;
        items.insert(key.to_string(), value.to_string());
        self.save(&items).await?;
        debug!("[会话存储] 已写入键 '{}'", key);
        Ok(())
    }

    pub async fn remove_item(&self, key: &str) -> Result<(), SessionError> {
        let mut items = self.load().await?;
        if items.remove(key).is_some() {
            self.save(&items).await?;
            debug!("[会话存储] 已删除键 '{}'", key);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn store() -> SessionStore {
        let dir = std::env::temp_dir().join(format!("rover_session_{}", Uuid::new_v4().simple()));
        SessionStore::new(dir.join("session_store.json"))
    }

    #[tokio::test]
    async fn test_set_get_remove() {
        let store = store();
        assert_eq!(store.get_item("userInfo").await.unwrap(), None, "文件不存在时视为空");

        store.set_item("userInfo", "driver01").await.unwrap();
        assert_eq!(store.get_item("userInfo").await.unwrap().as_deref(), Some("driver01"));

        store.remove_item("userInfo").await.unwrap();
        assert_eq!(store.get_item("userInfo").await.unwrap(), None);

        if let Some(dir) = store.path().parent() {
            let _ = tokio::fs::remove_dir_all(dir).await;
        }
    }

    #[tokio::test]
    async fn test_corrupt_file_is_reported() {
        let store = store();
        if let Some(dir) = store.path().parent() {
            tokio::fs::create_dir_all(dir).await.unwrap();
        }
        tokio::fs::write(store.path(), "{not json").await.unwrap();
        assert!(matches!(store.get_item("userInfo").await, Err(SessionError::Format { .. })));

        if let Some(dir) = store.path().parent() {
            let _ = tokio::fs::remove_dir_all(dir).await;
        }
    }
}
