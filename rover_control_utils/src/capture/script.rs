//! 注入渲染面的捕获脚本。
//!
//! 脚本取页面中第一个 `img` 元素，按图片原始尺寸绘制到画布上，
//! 序列化为 JPEG data URL，再通过宿主的单向消息通道回传。
//! 页面里没有 `img` 时什么也不做，宿主不会收到消息。
//!
//! 注意：捕获哪一帧取决于直播页面的 DOM 结构（总是第一个 `img`）。

/// 消息通道占位符，会被替换成宿主注册的命令名。
const CHANNEL_PLACEHOLDER: &str = "__CAPTURE_CHANNEL__";

const CAPTURE_SCRIPT_TEMPLATE: &str = r#"
(function() {
    const img = document.querySelector('img');
    if (!img) {
        return;
    }
    const canvas = document.createElement('canvas');
    canvas.width = img.naturalWidth || img.width;
    canvas.height = img.naturalHeight || img.height;
    const ctx = canvas.getContext('2d');
    ctx.drawImage(img, 0, 0);
    const dataUrl = canvas.toDataURL('image/jpeg');
    window.__TAURI__.core.invoke('__CAPTURE_CHANNEL__', { payload: { dataUrl: dataUrl } });
})();
"#;

/// 生成捕获脚本，`channel` 为宿主端接收消息的命令名。
pub fn capture_script(channel: &str) -> String {
    CAPTURE_SCRIPT_TEMPLATE.replace(CHANNEL_PLACEHOLDER, channel)
}
