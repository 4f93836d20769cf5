//! 直播画面拍照。
//!
//! - `script`: 注入渲染面的捕获脚本。
//! - `codec`: data URL 解码。
//! - `store`: 文档目录写入与相册登记。
//! - `pipeline`: 捕获状态机与渲染面消息通道。

pub mod codec;
pub mod pipeline;
pub mod script;
pub mod store;

pub use codec::{CapturedImage, decode_data_url};
pub use pipeline::{
    CaptureChannel, CaptureOutcome, CapturePipeline, CaptureState, DEFAULT_CAPTURE_FILE_NAME, RenderingSurface,
    SavedCapture,
};
pub use script::capture_script;
pub use store::{DirectoryGallery, DocumentStore, FsDocumentStore, MediaGallery};
