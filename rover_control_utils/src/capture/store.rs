// rover_control_utils/src/capture/store.rs

//! 捕获结果的落盘与相册登记。
//!
//! 设备边界被抽象为两个 trait：
//! - [`DocumentStore`]：把字节写到应用文档目录下的固定文件名（覆盖旧文件）。
//! - [`MediaGallery`]：申请相册权限，并把已写好的文件登记为一条新的相册资源。
//!
//! 默认实现都基于普通目录：[`FsDocumentStore`] 写文档目录，
//! [`DirectoryGallery`] 把文件复制进一个相册目录并生成资源记录。

use std::future::Future;
use std::path::{Path, PathBuf};

use chrono::Utc;
use common_models::{GalleryAsset, PermissionStatus};
use log::{debug, info, warn};
use uuid::Uuid;

use crate::error::CaptureError;

/// 应用文档目录。
pub trait DocumentStore: Send + Sync {
    /// 写入 `file_name`，返回写入的完整路径。已存在的文件会被覆盖。
    fn write_document(&self, file_name: &str, bytes: &[u8]) -> impl Future<Output = Result<PathBuf, CaptureError>> + Send;
}

/// 设备相册。
pub trait MediaGallery: Send + Sync {
    fn request_permission(&self) -> impl Future<Output = PermissionStatus> + Send;

    /// 把 `path` 指向的文件登记为新的相册资源。
    fn register_asset(&self, path: &Path) -> impl Future<Output = Result<GalleryAsset, CaptureError>> + Send;
}

/// 基于目录的文档存储。
#[derive(Debug, Clone)]
pub struct FsDocumentStore {
    document_dir: PathBuf,
}

impl FsDocumentStore {
    pub fn new(document_dir: impl Into<PathBuf>) -> Self {
        Self { document_dir: document_dir.into() }
    }

    pub fn document_dir(&self) -> &Path {
        &self.document_dir
    }
}

impl DocumentStore for FsDocumentStore {
    async fn write_document(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, CaptureError> {
        let path = self.document_dir.join(file_name);
        tokio::fs::create_dir_all(&self.document_dir)
            .await
            .map_err(|source| CaptureError::Io { path: self.document_dir.clone(), source })?;
        // 写入失败时不清理半写入的文件
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|source| CaptureError::Io { path: path.clone(), source })?;
        debug!("[文档存储] 已写入 {} ({} 字节)", path.display(), bytes.len());
        Ok(path)
    }
}

/// 以目录模拟的相册：每登记一次就复制出一个新文件。
#[derive(Debug, Clone)]
pub struct DirectoryGallery {
    album_dir: PathBuf,
}

impl DirectoryGallery {
    pub fn new(album_dir: impl Into<PathBuf>) -> Self {
        Self { album_dir: album_dir.into() }
    }

    pub fn album_dir(&self) -> &Path {
        &self.album_dir
    }
}

impl MediaGallery for DirectoryGallery {
    async fn request_permission(&self) -> PermissionStatus {
        if let Err(e) = tokio::fs::create_dir_all(&self.album_dir).await {
            warn!("[相册] 无法创建相册目录 {}: {}", self.album_dir.display(), e);
            return PermissionStatus::Denied;
        }
        match tokio::fs::metadata(&self.album_dir).await {
            Ok(meta) if !meta.permissions().readonly() => PermissionStatus::Granted,
            Ok(_) => {
                warn!("[相册] 相册目录 {} 为只读", self.album_dir.display());
                PermissionStatus::Denied
            }
            Err(e) => {
                warn!("[相册] 读取相册目录 {} 元数据失败: {}", self.album_dir.display(), e);
                PermissionStatus::Denied
            }
        }
    }

    async fn register_asset(&self, path: &Path) -> Result<GalleryAsset, CaptureError> {
        let id = Uuid::new_v4();
        let registered_at = Utc::now();
        let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("jpg");
        let file_name = format!("capture_{}_{}.{}", registered_at.format("%Y%m%d_%H%M%S"), id.simple(), extension);
        let target = self.album_dir.join(&file_name);

        tokio::fs::copy(path, &target).await.map_err(|e| {
            CaptureError::Gallery(format!("复制 {} 到 {} 失败: {}", path.display(), target.display(), e))
        })?;

        info!("[相册] 已登记新资源 {} ({})", file_name, id);
        Ok(GalleryAsset { id, file_name, registered_at })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("rover_store_{}_{}", tag, Uuid::new_v4().simple()))
    }

    #[tokio::test]
    async fn test_document_is_overwritten() {
        let dir = scratch_dir("doc");
        let store = FsDocumentStore::new(&dir);

        let first = store.write_document("image.jpg", b"first frame").await.unwrap();
        let second = store.write_document("image.jpg", b"second").await.unwrap();

        assert_eq!(first, second, "固定文件名，两次写入应指向同一路径");
        assert_eq!(tokio::fs::read(&second).await.unwrap(), b"second");
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn test_gallery_registers_a_copy() {
        let doc_dir = scratch_dir("src");
        let album = scratch_dir("album");
        let store = FsDocumentStore::new(&doc_dir);
        let gallery = DirectoryGallery::new(&album);

        assert_eq!(gallery.request_permission().await, PermissionStatus::Granted);
        let path = store.write_document("image.jpg", b"jpeg-bytes").await.unwrap();
        let asset = gallery.register_asset(&path).await.unwrap();

        assert!(asset.file_name.ends_with(".jpg"));
        let copied = tokio::fs::read(album.join(&asset.file_name)).await.unwrap();
        assert_eq!(copied, b"jpeg-bytes");

        let _ = tokio::fs::remove_dir_all(&doc_dir).await;
        let _ = tokio::fs::remove_dir_all(&album).await;
    }

    #[tokio::test]
    async fn test_register_missing_file_fails() {
        let album = scratch_dir("missing");
        let gallery = DirectoryGallery::new(&album);
        gallery.request_permission().await;
        let err = gallery.register_asset(&album.join("nope.jpg")).await.unwrap_err();
        assert!(matches!(err, CaptureError::Gallery(_)));
        let _ = tokio::fs::remove_dir_all(&album).await;
    }
}
