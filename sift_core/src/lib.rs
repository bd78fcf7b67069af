//! `sift_core`：纯逻辑层，不做任何 I/O（日志除外）。
//!
//! 设计目标：
//! - **核心可复用**：终端/GUI 前端都能复用同一套逻辑
//! - **分层清晰**：utf8 -> buffer -> matcher -> paginator -> selection -> processor -> 输出（`UiState`）
//! - **外部协作者只通过接口出现**：宽度度量（`TextMeasure`）、重绘（`UiState`）、输出（`Action`）
pub mod buffer;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod key_event;
pub mod matcher;
pub mod model;
pub mod paginator;
pub mod processor;
pub mod selection;
pub mod session;
pub mod utf8;
