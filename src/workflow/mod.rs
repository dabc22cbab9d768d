//! 流程层
//!
//! 定义"一页"和"一份文档"的处理顺序，只依赖 services 和 clients 的 trait。

pub mod extraction_flow;
pub mod page_ctx;
pub mod page_task;

pub use extraction_flow::{ExtractionFlow, ExtractionOutcome, ExtractionState};
pub use page_ctx::PageCtx;
pub use page_task::PageTask;
