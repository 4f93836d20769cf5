//! 控制通道客户端。
//!
//! - `transport`: HTTP 传输抽象与 `reqwest` 实现。
//! - `dispatcher`: 把方向键、速度滑块、模式开关的操作翻译成出站请求。

pub mod dispatcher;
pub mod transport;

pub use dispatcher::{CommandDispatcher, ControlPanel};
pub use transport::{ControlTransport, HttpControlTransport};
