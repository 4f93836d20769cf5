// RoverRemoteMobile/src-tauri/src/state.rs

//! 跨命令共享的拍照视图状态。
//!
//! `CaptureViewState` 在 `setup` 钩子中创建并通过 `app.manage(Arc<...>)` 注册。
//! 它持有渲染面消息通道：控制视图挂载时注册新的捕获管线，卸载时拆除，
//! 拆除后到达的 `deliver_capture_frame` 调用会被丢弃。

use std::path::PathBuf;

use common_models::{LiveViewSource, SurfaceMessagePayload, UserAlert};
use log::{info, warn};
use rover_control_utils::capture::{
    CaptureChannel, CaptureOutcome, CapturePipeline, DirectoryGallery, FsDocumentStore, RenderingSurface,
};
use tauri::{AppHandle, Manager};
use tokio::sync::Mutex as TokioMutex;

use crate::config::CaptureConfig;
use crate::error::AppError;

/// 捕获脚本回传数据时调用的命令名。
pub const CAPTURE_CHANNEL_COMMAND: &str = "deliver_capture_frame";

pub type AppCaptureChannel = CaptureChannel<FsDocumentStore, DirectoryGallery>;

pub struct CaptureViewState {
    channel: TokioMutex<AppCaptureChannel>,
    documents: FsDocumentStore,
    gallery: DirectoryGallery,
    file_name: String,
}

impl CaptureViewState {
    pub fn new(documents: FsDocumentStore, gallery: DirectoryGallery, file_name: impl Into<String>) -> Self {
        Self { channel: TokioMutex::new(CaptureChannel::default()), documents, gallery, file_name: file_name.into() }
    }

    /// 根据平台目录创建：照片写入文档目录，相册位于图片目录下的 `album_name` 子目录。
    /// 平台不提供这些目录时退回应用数据目录。
    pub fn from_app(app_handle: &AppHandle, config: &CaptureConfig) -> Result<Self, AppError> {
        let paths = app_handle.path();
        let data_dir = paths.app_data_dir().map_err(|e| AppError::PathResolution(e.to_string()))?;

        let document_dir = paths.document_dir().unwrap_or_else(|e| {
            warn!("[拍照状态] 无法定位文档目录 ({})，改用应用数据目录", e);
            data_dir.join("documents")
        });
        let album_dir: PathBuf = match paths.picture_dir() {
            Ok(dir) => dir.join(&config.album_name),
            Err(e) => {
                warn!("[拍照状态] 无法定位图片目录 ({})，改用应用数据目录", e);
                data_dir.join(&config.album_name)
            }
        };
        info!("[拍照状态] 文档目录: {}，相册目录: {}", document_dir.display(), album_dir.display());

        Ok(Self::new(FsDocumentStore::new(document_dir), DirectoryGallery::new(album_dir), config.file_name.clone()))
    }

    /// 视图挂载：申请一次相册权限并注册新的捕获管线。
    ///
    /// 权限被拒绝时返回需要展示的提示，管线仍然注册。
    pub async fn mount(&self) -> Option<UserAlert> {
        let pipeline = CapturePipeline::new(
            self.documents.clone(),
            self.gallery.clone(),
            self.file_name.clone(),
            CAPTURE_CHANNEL_COMMAND,
        );
        let alert = pipeline.request_gallery_permission().await;
        self.channel.lock().await.register(pipeline);
        alert
    }

    pub async fn unmount(&self) {
        if self.channel.lock().await.teardown().is_some() {
            info!("[拍照状态] 捕获消息处理器已拆除");
        }
    }

    /// 请求拍照。视图未挂载时返回 `ViewNotMounted`；普通图片流由管线拒绝。
    pub async fn request_capture<S: RenderingSurface>(
        &self,
        surface: &S,
        source: &LiveViewSource,
    ) -> Result<(), AppError> {
        let mut channel = self.channel.lock().await;
        let pipeline = channel.pipeline_mut().ok_or(AppError::ViewNotMounted)?;
        pipeline.request_capture(surface, source)?;
        Ok(())
    }

    pub async fn is_mounted(&self) -> bool {
        self.channel.lock().await.is_registered()
    }

    pub async fn deliver(&self, payload: SurfaceMessagePayload) -> Option<CaptureOutcome> {
        self.channel.lock().await.deliver(payload).await
    }
}
