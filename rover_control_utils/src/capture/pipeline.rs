// rover_control_utils/src/capture/pipeline.rs

//! 直播画面拍照管线。
//!
//! 状态流转：
//!
//! ```text
//! Idle -> CaptureRequested -> ScriptInjected -> MessageReceived
//!      -> Decoding -> WritingFile -> RegisteringAsset -> Idle
//! ```
//!
//! 解码、写文件、登记相册任一步失败都直接回到 `Idle`，并产生一次失败提示。
//! 不重试，也不清理已经写出的文件。
//!
//! [`CaptureChannel`] 是渲染面到宿主的单向消息通道：挂载时注册处理器，
//! 卸载时拆除，拆除后到达的消息会被丢弃。

use std::path::PathBuf;

use common_models::{GalleryAsset, LiveViewSource, PermissionStatus, SurfaceMessagePayload, UserAlert};
use log::{debug, error, info, warn};
use serde::Serialize;

use super::codec::decode_data_url;
use super::script::capture_script;
use super::store::{DocumentStore, MediaGallery};
use crate::error::CaptureError;

/// 捕获文件的默认文件名。
pub const DEFAULT_CAPTURE_FILE_NAME: &str = "image.jpg";

/// 捕获管线的当前阶段。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureState {
    Idle,
    CaptureRequested,
    ScriptInjected,
    MessageReceived,
    Decoding,
    WritingFile,
    RegisteringAsset,
}

/// 能执行脚本的渲染面（嵌入式 WebView）。
pub trait RenderingSurface {
    fn inject_script(&self, script: &str) -> Result<(), CaptureError>;
}

/// 一次捕获保存成功后的结果。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavedCapture {
    pub path: PathBuf,
    pub asset: GalleryAsset,
}

/// 处理一条渲染面消息的结果：恰好一条用户提示，成功时附带保存信息。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaptureOutcome {
    pub alert: UserAlert,
    pub saved: Option<SavedCapture>,
}

/// 拍照管线，每个控制视图一份。
#[derive(Debug)]
pub struct CapturePipeline<D, G> {
    documents: D,
    gallery: G,
    file_name: String,
    channel: String,
    state: CaptureState,
}

impl<D: DocumentStore, G: MediaGallery> CapturePipeline<D, G> {
    /// `channel` 是捕获脚本回传消息时调用的宿主命令名。
    pub fn new(documents: D, gallery: G, file_name: impl Into<String>, channel: impl Into<String>) -> Self {
        Self {
            documents,
            gallery,
            file_name: file_name.into(),
            channel: channel.into(),
            state: CaptureState::Idle,
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn gallery(&self) -> &G {
        &self.gallery
    }

    pub fn documents(&self) -> &D {
        &self.documents
    }

    /// 挂载时申请一次相册权限。被拒绝时返回需要展示的提示，但不阻止之后的拍照。
    pub async fn request_gallery_permission(&self) -> Option<UserAlert> {
        match self.gallery.request_permission().await {
            PermissionStatus::Granted => {
                info!("[捕获管线] 相册权限已授予");
                None
            }
            PermissionStatus::Denied => {
                warn!("[捕获管线] 相册权限被拒绝，后续拍照仍会尝试写入");
                Some(UserAlert::permission_needed())
            }
        }
    }

    /// 用户点击拍照：向显示 `source` 的渲染面注入捕获脚本。
    ///
    /// 普通图片流无法执行脚本，直接返回 `CaptureUnsupported`，状态不变。
    /// 注入失败时回到 `Idle` 并返回错误；这一阶段不产生用户提示。
    pub fn request_capture<S: RenderingSurface + ?Sized>(
        &mut self,
        surface: &S,
        source: &LiveViewSource,
    ) -> Result<(), CaptureError> {
        if !source.supports_capture() {
            warn!("[捕获管线] 直播来源 {:?} 不支持拍照", source);
            return Err(CaptureError::CaptureUnsupported);
        }
        if self.state != CaptureState::Idle && self.state != CaptureState::ScriptInjected {
            debug!("[捕获管线] 在状态 {:?} 下再次请求拍照", self.state);
        }
        self.state = CaptureState::CaptureRequested;
        info!("[捕获管线] 正在向渲染面注入捕获脚本...");
        match surface.inject_script(&capture_script(&self.channel)) {
            Ok(()) => {
                self.state = CaptureState::ScriptInjected;
                Ok(())
            }
            Err(e) => {
                error!("[捕获管线] 注入捕获脚本失败: {}", e);
                self.state = CaptureState::Idle;
                Err(e)
            }
        }
    }

    /// 处理渲染面回传的消息：解码、写文件、登记相册。
    ///
    /// 任何一步失败都只产生一条失败提示，不区分具体原因。
    pub async fn handle_surface_message(&mut self, payload: SurfaceMessagePayload) -> CaptureOutcome {
        if self.state != CaptureState::ScriptInjected {
            warn!("[捕获管线] 收到未经请求的渲染面消息 (当前状态 {:?})，仍按捕获结果处理", self.state);
        }
        self.state = CaptureState::MessageReceived;

        let outcome = match self.persist(&payload.data_url).await {
            Ok(saved) => {
                info!("[捕获管线] 照片已保存: {} -> 相册资源 {}", saved.path.display(), saved.asset.id);
                CaptureOutcome { alert: UserAlert::capture_saved(), saved: Some(saved) }
            }
            Err(e) => {
                error!("[捕获管线] 保存照片失败 (阶段 {:?}): {}", self.state, e);
                CaptureOutcome { alert: UserAlert::capture_failed(), saved: None }
            }
        };
        self.state = CaptureState::Idle;
        outcome
    }

    async fn persist(&mut self, data_url: &str) -> Result<SavedCapture, CaptureError> {
        self.state = CaptureState::Decoding;
        let image = decode_data_url(data_url)?;
        debug!("[捕获管线] 解码得到 {} 字节的 {}", image.bytes.len(), image.mime_type);

        self.state = CaptureState::WritingFile;
        let path = self.documents.write_document(&self.file_name, &image.bytes).await?;

        self.state = CaptureState::RegisteringAsset;
        let asset = self.gallery.register_asset(&path).await?;
        Ok(SavedCapture { path, asset })
    }
}

/// 渲染面到宿主的单向消息通道。
#[derive(Debug)]
pub struct CaptureChannel<D, G> {
    handler: Option<CapturePipeline<D, G>>,
}

impl<D, G> Default for CaptureChannel<D, G> {
    fn default() -> Self {
        Self { handler: None }
    }
}

impl<D: DocumentStore, G: MediaGallery> CaptureChannel<D, G> {
    /// 注册处理器（视图挂载）。已有的处理器会被替换。
    pub fn register(&mut self, pipeline: CapturePipeline<D, G>) {
        if self.handler.replace(pipeline).is_some() {
            debug!("[捕获通道] 替换了已注册的处理器");
        }
    }

    /// 拆除处理器（视图卸载）。
    pub fn teardown(&mut self) -> Option<CapturePipeline<D, G>> {
        self.handler.take()
    }

    pub fn is_registered(&self) -> bool {
        self.handler.is_some()
    }

    pub fn pipeline_mut(&mut self) -> Option<&mut CapturePipeline<D, G>> {
        self.handler.as_mut()
    }

    /// 投递一条渲染面消息。没有注册处理器时丢弃并返回 `None`。
    pub async fn deliver(&mut self, payload: SurfaceMessagePayload) -> Option<CaptureOutcome> {
        match self.handler.as_mut() {
            Some(pipeline) => Some(pipeline.handle_surface_message(payload).await),
            None => {
                warn!("[捕获通道] 处理器未注册，丢弃渲染面消息");
                None
            }
        }
    }
}
